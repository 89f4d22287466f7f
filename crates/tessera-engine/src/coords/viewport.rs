use super::Vec2;

/// Offset added to every surface-local draw coordinate.
///
/// Scrolling is expressed by moving the viewport, not the elements. To bring the
/// world point `p` to the surface origin use [`Viewport::looking_at`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Viewport that scrolls the world so `origin` lands on the surface's top-left corner.
    #[inline]
    pub fn looking_at(origin: Vec2) -> Self {
        Self::new(-origin.x, -origin.y)
    }

    #[inline]
    pub fn offset(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
