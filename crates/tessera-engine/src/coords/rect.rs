use serde::Deserialize;

use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
///
/// Deserializes from `{ "x": .., "y": .., "w": .., "h": .. }` so frame regions can
/// live in sequence definitions.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RectDef")]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

#[derive(Deserialize)]
struct RectDef {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl From<RectDef> for Rect {
    fn from(d: RectDef) -> Self {
        Rect::new(d.x, d.y, d.w, d.h)
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Same size, origin shifted by `by`.
    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Self::from_origin_size(self.origin + by, self.size)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// `true` when the interiors overlap. Shared edges do not count.
    #[inline]
    pub fn intersects(self, other: Rect) -> bool {
        let (a0, a1) = (self.min(), self.max());
        let (b0, b1) = (other.min(), other.max());
        a0.x < b1.x && b0.x < a1.x && a0.y < b1.y && b0.y < a1.y
    }

    /// Smallest rectangle covering both inputs.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let (a0, a1) = (self.min(), self.max());
        let (b0, b1) = (other.min(), other.max());
        let x0 = a0.x.min(b0.x);
        let y0 = a0.y.min(b0.y);
        let x1 = a1.x.max(b1.x);
        let y1 = a1.y.max(b1.y);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.5, 9.5)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
    }

    // ── intersects ────────────────────────────────────────────────────────

    #[test]
    fn intersects_overlapping() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersects(r(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).intersects(r(10.0, 0.0, 10.0, 10.0)));
    }

    // ── union / translated ────────────────────────────────────────────────

    #[test]
    fn union_covers_both() {
        let u = r(0.0, 0.0, 5.0, 5.0).union(r(10.0, 2.0, 5.0, 10.0));
        assert_eq!(u, r(0.0, 0.0, 15.0, 12.0));
    }

    #[test]
    fn translated_keeps_size() {
        let t = r(1.0, 2.0, 3.0, 4.0).translated(Vec2::new(10.0, -2.0));
        assert_eq!(t, r(11.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn deserializes_from_xywh() {
        let rect: Rect = serde_json::from_str(r#"{"x":64,"y":128,"w":64,"h":64}"#).unwrap();
        assert_eq!(rect, r(64.0, 128.0, 64.0, 64.0));
    }
}
