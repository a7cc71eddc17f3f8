//! Resolving surface selectors to drawing surfaces.

use std::collections::HashMap;

use thiserror::Error;
use trigon_engine::canvas::{Canvas2d, MeshCanvas};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no surface matches selector `{selector}`")]
    Unavailable { selector: String },
}

/// Hands out drawing surfaces by selector.
pub trait SurfaceHost {
    type Surface: Canvas2d;

    fn acquire(&mut self, selector: &str) -> Result<Self::Surface, SurfaceError>;
}

/// Surface host backed by declared canvases.
///
/// Each canvas is declared with its logical size before layers are built;
/// acquiring a declared selector yields a fresh blank [`MeshCanvas`].
#[derive(Debug, Default, Clone)]
pub struct CanvasHost {
    canvases: HashMap<String, (f32, f32)>,
}

impl CanvasHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or resizes) the canvas behind `selector`.
    pub fn declare(&mut self, selector: impl Into<String>, width: f32, height: f32) {
        self.canvases.insert(selector.into(), (width, height));
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.canvases.contains_key(selector)
    }
}

impl SurfaceHost for CanvasHost {
    type Surface = MeshCanvas;

    fn acquire(&mut self, selector: &str) -> Result<MeshCanvas, SurfaceError> {
        let &(w, h) = self.canvases.get(selector).ok_or_else(|| SurfaceError::Unavailable {
            selector: selector.to_string(),
        })?;
        Ok(MeshCanvas::new(w, h))
    }
}
