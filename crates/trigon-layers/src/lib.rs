//! Trigon layers: drawables, layers and the frame loop on top of `trigon-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use trigon_layers::prelude::*;
//!
//! Stage::new()
//!     .size(500.0, 500.0)
//!     .canvas("#background-layer", 500.0, 500.0)
//!     .canvas("#game-layer", 500.0, 500.0)
//!     .run(|host, frames| {
//!         let mut bg = Layer::new(host, "#background-layer", false);
//!         bg.add_object(Grid::new(GridConfig::default()), 0.0, 0.0);
//!         bg.render(frames);
//!
//!         let mut fg = Layer::new(host, "#game-layer", true);
//!         fg.add_object(
//!             Triangle::new(TriangleConfig { rotation_speed: 1.0, ..Default::default() }),
//!             250.0,
//!             250.0,
//!         );
//!         fg.render(frames);
//!
//!         vec![bg, fg]
//!     });
//! ```
//!
//! # Custom drawables
//!
//! Implement [`Drawable`] and hand it to [`Layer::add_object`]:
//!
//! ```rust,ignore
//! struct Dot;
//!
//! impl Drawable for Dot {
//!     fn render(&mut self, surface: &mut dyn Canvas2d, x: f32, y: f32) {
//!         surface.begin_path();
//!         surface.arc(x, y, 3.0, 0.0, std::f32::consts::TAU);
//!         surface.fill();
//!     }
//! }
//! ```

pub mod drawable;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod layer;
pub mod stage;
pub mod triangle;

#[cfg(test)]
mod testing;

pub use drawable::Drawable;
pub use layer::Layer;
pub use stage::Stage;

/// Everything needed to compose a scene.
pub mod prelude {
    pub use crate::drawable::Drawable;
    pub use crate::frame::{FrameQueue, FrameScheduler, LayerId};
    pub use crate::geometry::{arc_pos, radians, Point};
    pub use crate::grid::{Grid, GridConfig};
    pub use crate::host::{CanvasHost, SurfaceError, SurfaceHost};
    pub use crate::layer::Layer;
    pub use crate::stage::Stage;
    pub use crate::triangle::{triangle_points, Triangle, TriangleConfig, TrianglePoints};

    pub use trigon_engine::canvas::{Canvas2d, MeshCanvas};
    pub use trigon_engine::paint::Color;
}
