use winit::dpi::LogicalSize;

use trigon_engine::canvas::Mesh;
use trigon_engine::core::{App as EngineApp, AppControl, FrameCtx};
use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::paint::Color;
use trigon_engine::render::MeshRenderer;
use trigon_engine::window::{Runtime, RuntimeConfig};

use crate::frame::FrameQueue;
use crate::host::CanvasHost;
use crate::layer::Layer;

// ── Stage ─────────────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// Declares the window and its canvases, then hands a [`CanvasHost`] and the
/// [`FrameQueue`] to a build closure that creates the layers. Layers are
/// composited in the order the closure returns them, first at the back.
///
/// ```rust,ignore
/// Stage::new()
///     .title("trigon")
///     .canvas("#game-layer", 500.0, 500.0)
///     .run(|host, frames| {
///         let mut layer = Layer::new(host, "#game-layer", true);
///         layer.add_object(Triangle::default(), 250.0, 250.0);
///         layer.render(frames);
///         vec![layer]
///     });
/// ```
pub struct Stage {
    title: String,
    width: f64,
    height: f64,
    background: Color,
    host: CanvasHost,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            title: "trigon".to_string(),
            width: 500.0,
            height: 500.0,
            background: Color::WHITE,
            host: CanvasHost::new(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Color behind all canvases.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Declare a canvas that layers can acquire by `selector`.
    pub fn canvas(mut self, selector: impl Into<String>, width: f32, height: f32) -> Self {
        self.host.declare(selector, width, height);
        self
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Builds the layers and starts the event loop.
    ///
    /// This never returns.
    pub fn run<F>(self, build: F) -> !
    where
        F: FnOnce(&mut CanvasHost, &mut FrameQueue) -> Vec<Layer>,
    {
        init_logging(LoggingConfig::default());

        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..Default::default()
        };
        let app = self.into_app(build);
        log::info!("starting `{}` with {} layer(s)", config.title, app.layers.len());

        if let Err(e) = Runtime::run(config, GpuInit::default(), app) {
            log::error!("trigon runtime error: {e:#}");
            std::process::exit(1);
        }
        std::process::exit(0);
    }

    fn into_app<F>(mut self, build: F) -> StageApp
    where
        F: FnOnce(&mut CanvasHost, &mut FrameQueue) -> Vec<Layer>,
    {
        let mut frames = FrameQueue::new();
        let layers = build(&mut self.host, &mut frames);
        StageApp {
            background: self.background,
            layers,
            frames,
            staging: Mesh::new(),
            renderer: MeshRenderer::new(),
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

// ── StageApp ──────────────────────────────────────────────────────────────

/// Internal state that implements `trigon_engine::core::App`.
struct StageApp {
    background: Color,
    layers: Vec<Layer>,
    frames: FrameQueue,

    /// All canvases concatenated back-to-front, rebuilt every frame.
    staging: Mesh,
    renderer: MeshRenderer,
}

impl StageApp {
    /// Delivers the frames requested since the last call. Returns how many
    /// layers rendered.
    fn advance(&mut self) -> usize {
        let due = self.frames.take();
        let mut rendered = 0;
        for id in due {
            if let Some(layer) = self.layers.iter_mut().find(|l| l.id() == id) {
                layer.render(&mut self.frames);
                rendered += 1;
            }
        }
        rendered
    }

    fn compose(&mut self) {
        self.staging.clear();
        for surface in self.layers.iter().filter_map(Layer::surface) {
            surface.write_mesh(&mut self.staging);
        }
    }
}

impl EngineApp for StageApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.advance();
        self.compose();

        let (renderer, mesh) = (&mut self.renderer, &self.staging);
        let control = ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, mesh);
        });

        // Animated layers asked for another turn.
        if !self.frames.is_empty() {
            ctx.request_redraw();
        }
        control
    }
}
