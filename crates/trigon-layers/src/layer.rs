use trigon_engine::canvas::{Canvas2d, MeshCanvas};

use crate::drawable::Drawable;
use crate::frame::{FrameScheduler, LayerId};
use crate::host::SurfaceHost;

struct Entry {
    drawable: Box<dyn Drawable>,
    x: f32,
    y: f32,
}

/// An ordered set of drawables sharing one surface.
///
/// Entries paint in insertion order, so later entries draw over earlier
/// ones. A static layer paints once per [`render`](Self::render) call and
/// keeps what it painted. An animated layer wipes its surface and asks the
/// frame scheduler for another turn on every render, so once started it
/// keeps running until [`stop`](Self::stop) is called.
///
/// If the surface cannot be acquired the layer is inert: the failure is
/// logged and every later call is a no-op.
pub struct Layer<S = MeshCanvas> {
    id: LayerId,
    selector: String,
    surface: Option<S>,
    animated: bool,
    running: bool,
    entries: Vec<Entry>,
}

impl<S: Canvas2d> Layer<S> {
    pub fn new<H>(host: &mut H, selector: &str, animated: bool) -> Self
    where
        H: SurfaceHost<Surface = S> + ?Sized,
    {
        let surface = match host.acquire(selector) {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::error!("layer `{selector}` is inert: {err}");
                None
            }
        };

        let id = LayerId::next();
        log::debug!("layer {} created for `{selector}` (animated: {animated})", id.raw());

        Self {
            id,
            selector: selector.to_string(),
            surface,
            animated,
            running: true,
            entries: Vec::new(),
        }
    }

    /// Appends `drawable` to be painted at `(x, y)`.
    pub fn add_object<D>(&mut self, drawable: D, x: f32, y: f32)
    where
        D: Drawable + 'static,
    {
        self.entries.push(Entry { drawable: Box::new(drawable), x, y });
    }

    /// Paints one frame.
    pub fn render(&mut self, frames: &mut dyn FrameScheduler) {
        if !self.running {
            return;
        }
        let Some(surface) = self.surface.as_mut() else { return };

        if self.animated {
            let (w, h) = (surface.width(), surface.height());
            surface.clear_rect(0.0, 0.0, w, h);
            frames.request_frame(self.id);
        }

        for entry in &mut self.entries {
            entry.drawable.render(&mut *surface, entry.x, entry.y);
        }
    }

    /// Wipes the whole surface.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let (w, h) = (surface.width(), surface.height());
            surface.clear_rect(0.0, 0.0, w, h);
        }
    }

    /// Stops the layer: later renders, including an already scheduled frame,
    /// do nothing. What is on the surface stays there.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("layer {} (`{}`) stopped", self.id.raw(), self.selector);
        }
        self.running = false;
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    pub fn is_running(&self) -> bool {
        self.running && self.surface.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
