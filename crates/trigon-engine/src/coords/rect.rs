use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Smallest rect enclosing every point of `points`.
    ///
    /// Returns `None` for an empty iterator or when any point is non-finite.
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        if !first.is_finite() {
            return None;
        }

        let (mut min, mut max) = (first, first);
        for p in iter {
            if !p.is_finite() {
                return None;
            }
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }

        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    ///
    /// `clear_rect` callers may pass negative extents, as the 2D canvas API allows.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut w) = (self.origin.x, self.size.x);
        let (mut y, mut h) = (self.origin.y, self.size.y);

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Closed containment of another rect: edges may touch.
    #[inline]
    pub fn encloses(self, other: Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.min().x >= a.min().x
            && b.min().y >= a.min().y
            && b.max().x <= a.max().x
            && b.max().y <= a.max().y
    }
}
