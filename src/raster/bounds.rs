use crate::math::Point2;

/// An axis-aligned box in the projection plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl BoundingBox {
    /// Smallest box containing all `points`, grown by `margin` on every side.
    ///
    /// Returns `None` for an empty point set.
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Point2>, margin: f64) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            left: first.x,
            right: first.x,
            bottom: first.y,
            top: first.y,
        };
        for p in iter {
            bb.left = bb.left.min(p.x);
            bb.right = bb.right.max(p.x);
            bb.bottom = bb.bottom.min(p.y);
            bb.top = bb.top.max(p.y);
        }
        Some(bb.grown(margin))
    }

    /// A copy of this box grown by `margin` on every side.
    #[must_use]
    pub fn grown(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            right: self.right + margin,
            bottom: self.bottom - margin,
            top: self.top + margin,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// The square sharing this box's center whose side is the larger box
    /// dimension plus `2 * margin`.
    #[must_use]
    pub fn to_square(&self, margin: f64) -> Self {
        let side = self.width().max(self.height()) + 2.0 * margin;
        let dx = (side - self.width()) / 2.0;
        let dy = (side - self.height()) / 2.0;
        Self {
            left: self.left - dx,
            right: self.right + dx,
            bottom: self.bottom - dy,
            top: self.top + dy,
        }
    }

    /// Returns `true` if `point` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }
}
