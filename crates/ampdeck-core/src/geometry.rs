#![forbid(unsafe_code)]

//! Geometric primitives for panel layout.
//!
//! A [`Window`] is an immutable rectangle in display coordinates (origin at
//! top-left, `f32` units). Layout is built by recursively splitting and
//! insetting the full-screen window; every operation returns new values.
//!
//! # Invariants
//!
//! 1. Extents are never negative. Insets or split offsets that exceed the
//!    parent are clamped and logged.
//! 2. A split reserves a [`SPLIT_GAP`]-unit separator between its halves, so
//!    for `1 <= t <= extent` the first part, the gap, and the second part
//!    tile the parent exactly.
//! 3. Containment is half-open: `[x, x + w) × [y, y + h)`. Adjacent windows
//!    never both claim a boundary point.

use bitflags::bitflags;
use tracing::warn;

/// Separator reserved between the two halves of a split.
pub const SPLIT_GAP: f32 = 1.0;

/// A point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

bitflags! {
    /// Horizontal and vertical alignment, combined as flags.
    ///
    /// With no horizontal bit set the anchor is the left edge; with no
    /// vertical bit set it is the top edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Align: u8 {
        const LEFT = 1 << 0;
        const CENTER = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const MIDDLE = 1 << 4;
        const BOTTOM = 1 << 5;
        const BASELINE = 1 << 6;
    }
}

impl Align {
    pub const CENTER_MIDDLE: Self = Self::CENTER.union(Self::MIDDLE);
    pub const LEFT_TOP: Self = Self::LEFT.union(Self::TOP);
}

impl Default for Align {
    fn default() -> Self {
        Self::LEFT_TOP
    }
}

/// Insets for each side of a window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Same inset on every side.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Left and right only.
    pub const fn horizontal(val: f32) -> Self {
        Self {
            top: 0.0,
            right: val,
            bottom: 0.0,
            left: val,
        }
    }

    /// Top and bottom only.
    pub const fn vertical(val: f32) -> Self {
        Self {
            top: val,
            right: 0.0,
            bottom: val,
            left: 0.0,
        }
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

/// An axis-aligned rectangle used for layout bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Window {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Window {
    /// Create a new window. Negative extents are clamped to zero.
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Window anchored at the origin with the given size.
    #[inline]
    pub fn from_size(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Shrink by the given insets, shifting the origin by `(left, top)`.
    pub fn inner(&self, left: f32, top: f32, right: f32, bottom: f32) -> Window {
        let w = self.w - left - right;
        let h = self.h - top - bottom;
        if w < 0.0 || h < 0.0 {
            warn!(
                window = ?self,
                left, top, right, bottom,
                "insets exceed window extent; clamping to zero"
            );
        }
        Window::new(self.x + left, self.y + top, w, h)
    }

    /// Shrink by a [`Sides`] value.
    #[inline]
    pub fn inset(&self, sides: Sides) -> Window {
        self.inner(sides.left, sides.top, sides.right, sides.bottom)
    }

    /// Split into `(top, bottom)` at `offset` from the top edge.
    ///
    /// `top` covers `[y, y + offset - 1)`, the row at `offset - 1` is the
    /// separator, and `bottom` covers `[y + offset, y + h)`.
    pub fn split_h(&self, offset: f32) -> (Window, Window) {
        let t = clamp_offset(offset, self.h, "split_h");
        let top = Window::new(self.x, self.y, self.w, t - SPLIT_GAP);
        let bottom = Window::new(self.x, self.y + t, self.w, self.h - t);
        (top, bottom)
    }

    /// Split into `(left, right)` at `offset` from the left edge.
    pub fn split_v(&self, offset: f32) -> (Window, Window) {
        let t = clamp_offset(offset, self.w, "split_v");
        let left = Window::new(self.x, self.y, t - SPLIT_GAP, self.h);
        let right = Window::new(self.x + t, self.y, self.w - t, self.h);
        (left, right)
    }

    /// Cut into `n` equal-width columns by repeated [`split_v`](Self::split_v).
    ///
    /// Every column but the last gives up the separator on its right edge.
    pub fn columns(&self, n: usize) -> Vec<Window> {
        let mut out = Vec::with_capacity(n);
        let mut rest = *self;
        for i in 0..n {
            let remaining = (n - i) as f32;
            if i + 1 == n {
                out.push(rest);
                break;
            }
            let (col, tail) = rest.split_v(rest.w / remaining);
            out.push(col);
            rest = tail;
        }
        out
    }

    /// Cut into `n` equal-height rows by repeated [`split_h`](Self::split_h).
    pub fn rows(&self, n: usize) -> Vec<Window> {
        let mut out = Vec::with_capacity(n);
        let mut rest = *self;
        for i in 0..n {
            let remaining = (n - i) as f32;
            if i + 1 == n {
                out.push(rest);
                break;
            }
            let (row, tail) = rest.split_h(rest.h / remaining);
            out.push(row);
            rest = tail;
        }
        out
    }

    /// Anchor point inside the window for the given alignment.
    pub fn aligned_point(&self, align: Align) -> Point {
        let x = if align.contains(Align::CENTER) {
            self.x + self.w * 0.5
        } else if align.contains(Align::RIGHT) {
            self.right()
        } else {
            self.x
        };
        let y = if align.contains(Align::MIDDLE) {
            self.y + self.h * 0.5
        } else if align.intersects(Align::BOTTOM | Align::BASELINE) {
            self.bottom()
        } else {
            self.y
        };
        Point::new(x, y)
    }

    /// Radius of the largest circle centered in the window.
    #[inline]
    pub fn radius_min(&self) -> f32 {
        self.w.min(self.h) * 0.5
    }

    /// Half-open containment test.
    #[inline]
    pub fn is_point_inside(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

fn clamp_offset(offset: f32, extent: f32, op: &'static str) -> f32 {
    let extent = extent.max(0.0);
    if offset < 0.0 || offset > extent {
        warn!(op, offset, extent, "split offset outside window; clamping");
        return offset.clamp(0.0, extent);
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::{Align, Point, SPLIT_GAP, Sides, Window};

    #[test]
    fn inner_shrinks_and_shifts() {
        let w = Window::new(10.0, 20.0, 100.0, 50.0);
        let inner = w.inner(1.0, 2.0, 3.0, 4.0);
        assert_eq!(inner, Window::new(11.0, 22.0, 96.0, 44.0));
    }

    #[test]
    fn inner_clamps_oversized_insets() {
        let w = Window::new(0.0, 0.0, 10.0, 10.0);
        let inner = w.inner(8.0, 0.0, 8.0, 20.0);
        assert_eq!(inner.w, 0.0);
        assert_eq!(inner.h, 0.0);
        assert_eq!(inner.x, 8.0);
    }

    #[test]
    fn inset_matches_inner() {
        let w = Window::new(0.0, 0.0, 40.0, 30.0);
        assert_eq!(w.inset(Sides::all(2.0)), w.inner(2.0, 2.0, 2.0, 2.0));
        assert_eq!(w.inset(Sides::horizontal(4.0)), w.inner(4.0, 0.0, 4.0, 0.0));
        assert_eq!(w.inset(Sides::vertical(3.0)), w.inner(0.0, 3.0, 0.0, 3.0));
    }

    #[test]
    fn split_h_reserves_gap() {
        let w = Window::new(0.0, 0.0, 800.0, 480.0);
        let (top, bottom) = w.split_h(34.0);
        assert_eq!(top, Window::new(0.0, 0.0, 800.0, 33.0));
        assert_eq!(bottom, Window::new(0.0, 34.0, 800.0, 446.0));
        assert_eq!(top.h + SPLIT_GAP + bottom.h, w.h);
    }

    #[test]
    fn split_v_right_part_is_relative_to_origin() {
        let w = Window::new(100.0, 10.0, 200.0, 50.0);
        let (left, right) = w.split_v(50.0);
        assert_eq!(left, Window::new(100.0, 10.0, 49.0, 50.0));
        assert_eq!(right, Window::new(150.0, 10.0, 150.0, 50.0));
    }

    #[test]
    fn split_offset_past_extent_is_clamped() {
        let w = Window::new(0.0, 0.0, 10.0, 10.0);
        let (top, bottom) = w.split_h(25.0);
        assert_eq!(top.h, 9.0);
        assert_eq!(bottom.h, 0.0);
        let (left, right) = w.split_v(-5.0);
        assert_eq!(left.w, 0.0);
        assert_eq!(right, w);
    }

    #[test]
    fn columns_tile_the_parent() {
        let w = Window::new(0.0, 0.0, 100.0, 20.0);
        let cols = w.columns(4);
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0].x, 0.0);
        assert_eq!(cols[3].right(), 100.0);
        let covered: f32 = cols.iter().map(|c| c.w).sum::<f32>() + 3.0 * SPLIT_GAP;
        assert!((covered - 100.0).abs() < 1e-3);
    }

    #[test]
    fn rows_of_zero_is_empty() {
        assert!(Window::from_size(10.0, 10.0).rows(0).is_empty());
        assert_eq!(Window::from_size(10.0, 10.0).rows(1).len(), 1);
    }

    #[test]
    fn aligned_point_anchors() {
        let w = Window::new(10.0, 20.0, 100.0, 60.0);
        assert_eq!(w.aligned_point(Align::CENTER_MIDDLE), Point::new(60.0, 50.0));
        assert_eq!(w.aligned_point(Align::LEFT_TOP), Point::new(10.0, 20.0));
        assert_eq!(
            w.aligned_point(Align::RIGHT | Align::BOTTOM),
            Point::new(110.0, 80.0)
        );
        assert_eq!(w.aligned_point(Align::empty()), Point::new(10.0, 20.0));
    }

    #[test]
    fn radius_min_uses_short_side() {
        assert_eq!(Window::from_size(100.0, 40.0).radius_min(), 20.0);
        assert_eq!(Window::from_size(30.0, 90.0).radius_min(), 15.0);
    }

    #[test]
    fn containment_is_half_open() {
        let w = Window::new(0.0, 0.0, 10.0, 10.0);
        assert!(!w.is_point_inside(Point::new(10.0, 5.0)));
        assert!(w.is_point_inside(Point::new(9.999, 5.0)));
        assert!(w.is_point_inside(Point::new(0.0, 0.0)));
        assert!(!w.is_point_inside(Point::new(5.0, 10.0)));
        assert!(!w.is_point_inside(Point::new(-0.001, 5.0)));
    }

    #[test]
    fn adjacent_windows_do_not_share_boundary() {
        let a = Window::new(0.0, 0.0, 10.0, 10.0);
        let b = Window::new(10.0, 0.0, 10.0, 10.0);
        let p = Point::new(10.0, 3.0);
        assert!(!a.is_point_inside(p));
        assert!(b.is_point_inside(p));
    }
}
