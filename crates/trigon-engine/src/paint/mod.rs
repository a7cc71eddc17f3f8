//! Paint model shared between the canvas, the layers and the renderer.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - CSS-style color parsing for drawable configuration
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
