use trigon_engine::canvas::Canvas2d;

/// Anything a [`Layer`](crate::Layer) can paint.
///
/// `render` is called once per frame of the owning layer with the entry's
/// position. It is the only hook: a drawable that animates advances its own
/// state at the end of `render`, so each call is one animation step.
pub trait Drawable {
    fn render(&mut self, surface: &mut dyn Canvas2d, x: f32, y: f32);
}

impl<F> Drawable for F
where
    F: FnMut(&mut dyn Canvas2d, f32, f32),
{
    fn render(&mut self, surface: &mut dyn Canvas2d, x: f32, y: f32) {
        self(surface, x, y)
    }
}
