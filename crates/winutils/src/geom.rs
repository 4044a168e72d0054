//! Geometry primitives shared by the snapshot and Accessibility sides.
//! CGPoint/CGSize mirror CoreGraphics types (f64 fields) for AXValue interop.

use serde::Serialize;

/// A point in global top-left-origin coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct CGPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl CGPoint {
    /// Construct a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct CGSize {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl CGSize {
    /// Construct a size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Integer window bounds as reported by the window server (`kCGWindowBounds`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Bounds {
    /// Construct bounds from origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner as a [`CGPoint`].
    #[inline]
    pub fn origin(&self) -> CGPoint {
        CGPoint::new(self.x as f64, self.y as f64)
    }

    /// Extent as a [`CGSize`].
    #[inline]
    pub fn size(&self) -> CGSize {
        CGSize::new(self.width as f64, self.height as f64)
    }
}

/// Floating-point rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Construct a rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
    /// Minimum x.
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    /// Maximum x.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Minimum y.
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    /// Maximum y.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// `|a - b| <= eps`.
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// True when a precise AX coordinate falls on the same pixel as a coarse
/// window-server coordinate.
#[inline]
pub fn same_pixel(precise: f64, coarse: i32) -> bool {
    (precise - coarse as f64).abs() < 1.0
}

/// Compare AX geometry against snapshot bounds, tolerating sub-pixel drift.
pub fn matches_bounds(pos: CGPoint, size: CGSize, bounds: &Bounds) -> bool {
    same_pixel(pos.x, bounds.x)
        && same_pixel(pos.y, bounds.y)
        && same_pixel(size.width, bounds.width)
        && same_pixel(size.height, bounds.height)
}

/// Points equal to within half a pixel.
pub fn point_eq(a: CGPoint, b: CGPoint) -> bool {
    approx_eq_eps(a.x, b.x, 0.5) && approx_eq_eps(a.y, b.y, 0.5)
}

/// Sizes equal to within half a pixel.
pub fn size_eq(a: CGSize, b: CGSize) -> bool {
    approx_eq_eps(a.width, b.width, 0.5) && approx_eq_eps(a.height, b.height, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_eps_basic() {
        assert!(approx_eq_eps(1.0, 1.0, 0.0));
        assert!(approx_eq_eps(1.0, 1.000_5, 0.001));
        assert!(!approx_eq_eps(1.0, 1.01, 0.001));
    }

    #[test]
    fn fractional_ax_geometry_matches_integer_bounds() {
        let b = Bounds::new(100, 200, 640, 480);
        assert!(matches_bounds(
            CGPoint::new(100.4, 200.0),
            CGSize::new(640.0, 479.6),
            &b
        ));
        assert!(!matches_bounds(
            CGPoint::new(101.0, 200.0),
            CGSize::new(640.0, 480.0),
            &b
        ));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
    }
}
