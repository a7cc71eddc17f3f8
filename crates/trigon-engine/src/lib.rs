//! Trigon engine crate.
//!
//! Platform + GPU runtime used by the layer library: window and event loop,
//! wgpu device/surface, logging, the color model, the host 2D
//! canvas API and the renderer that presents canvases.

pub mod canvas;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;
