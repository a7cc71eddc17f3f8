use trigon_engine::canvas::Canvas2d;
use trigon_engine::paint::Color;

use crate::drawable::Drawable;

/// Upper bound on lines per axis.
const MAX_LINES: f32 = 10_000.0;

/// Background grid settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Distance between lines in logical pixels.
    pub gap: f32,
    pub stroke_style: Color,
    pub line_width: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 10.0,
            // #ddd
            stroke_style: Color::from_srgb_u8(0xdd, 0xdd, 0xdd, 0xff),
            line_width: 0.5,
        }
    }
}

/// Evenly spaced horizontal and vertical lines covering the whole surface.
///
/// Stateless: every render produces the same strokes for the same surface
/// size. The position passed to [`Drawable::render`] is ignored.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    config: GridConfig,
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

impl Drawable for Grid {
    fn render(&mut self, surface: &mut dyn Canvas2d, _x: f32, _y: f32) {
        let GridConfig { gap, stroke_style, line_width } = self.config;
        let (w, h) = (surface.width(), surface.height());

        if !(gap.is_finite() && gap > 0.0) || !(w.is_finite() && h.is_finite()) {
            log::debug!("grid skipped: gap {gap}, surface {w}x{h}");
            return;
        }
        if w / gap > MAX_LINES || h / gap > MAX_LINES {
            log::warn!("grid skipped: gap {gap} is too small for a {w}x{h} surface");
            return;
        }

        surface.set_line_width(line_width);
        surface.set_stroke_style(stroke_style);

        // Multiply instead of accumulating so the last line lands exactly on
        // the edge when the size is a multiple of the gap.
        let mut i = 0u32;
        loop {
            let x = i as f32 * gap;
            if x > w {
                break;
            }
            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, h);
            surface.stroke();
            i += 1;
        }

        let mut j = 0u32;
        loop {
            let y = j as f32 * gap;
            if y > h {
                break;
            }
            surface.begin_path();
            surface.move_to(0.0, y);
            surface.line_to(w, y);
            surface.stroke();
            j += 1;
        }
    }
}
