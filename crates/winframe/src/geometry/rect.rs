//! Axis-aligned integer rectangle
//!
//! A `Rect` is an origin plus a signed size. The right and bottom edges are
//! inclusive: `x2 = x + w - 1` is the last column inside the rect, so a rect
//! built from the same corner twice is 1×1. Width and height are not
//! constrained, zero and negative extents are legal and every operation gives
//! a deterministic answer for them (usually "contains nothing").

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::clip;
use super::point::Point;
use super::raw::RawRect;

/// Rectangle with origin `(x, y)` and size `(w, h)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    /// Create a rect from origin and size
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect from its top-left corner and a width and height
    pub const fn at(corner: Point, w: i32, h: i32) -> Self {
        Self::new(corner.x(), corner.y(), w, h)
    }

    /// Create a rect from its top-left corner and a `(w, h)` pair
    pub const fn with_size(corner: Point, (w, h): (i32, i32)) -> Self {
        Self::at(corner, w, h)
    }

    /// Create a rect of size `w`×`h` around a center
    ///
    /// The origin is `cx - w/2, cy - h/2` with truncating division, so a rect
    /// with an odd dimension sits one pixel closer to the origin on that axis
    /// than a true center would put it.
    pub const fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx.wrapping_sub(w / 2), cy.wrapping_sub(h / 2), w, h)
    }

    /// [`Rect::from_center`] taking a center point and a `(w, h)` pair
    pub const fn from_center_point(center: Point, (w, h): (i32, i32)) -> Self {
        Self::from_center(center.x(), center.y(), w, h)
    }

    /// Create a rect spanning two inclusive corners
    ///
    /// `from_corners(3, 3, 3, 3)` is the single pixel at `(3, 3)`.
    pub const fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(
            x1,
            y1,
            x2.wrapping_sub(x1).wrapping_add(1),
            y2.wrapping_sub(y1).wrapping_add(1),
        )
    }

    /// [`Rect::from_corners`] taking the corners as points
    pub const fn from_corner_points(p1: Point, p2: Point) -> Self {
        Self::from_corners(p1.x(), p1.y(), p2.x(), p2.y())
    }

    /// Left edge
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Move the left edge, keeping the width
    pub fn set_x(&mut self, x: i32) -> &mut Self {
        self.x = x;
        self
    }

    /// Top edge
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Move the top edge, keeping the height
    pub fn set_y(&mut self, y: i32) -> &mut Self {
        self.y = y;
        self
    }

    /// Width
    pub const fn width(&self) -> i32 {
        self.w
    }

    /// Set the width
    pub fn set_width(&mut self, w: i32) -> &mut Self {
        self.w = w;
        self
    }

    /// Height
    pub const fn height(&self) -> i32 {
        self.h
    }

    /// Set the height
    pub fn set_height(&mut self, h: i32) -> &mut Self {
        self.h = h;
        self
    }

    /// Last column inside the rect
    pub const fn x2(&self) -> i32 {
        self.x.wrapping_add(self.w).wrapping_sub(1)
    }

    /// Move the right edge by changing the width; `x` stays put
    pub fn set_x2(&mut self, x2: i32) -> &mut Self {
        self.w = x2.wrapping_sub(self.x).wrapping_add(1);
        self
    }

    /// Last row inside the rect
    pub const fn y2(&self) -> i32 {
        self.y.wrapping_add(self.h).wrapping_sub(1)
    }

    /// Move the bottom edge by changing the height; `y` stays put
    pub fn set_y2(&mut self, y2: i32) -> &mut Self {
        self.h = y2.wrapping_sub(self.y).wrapping_add(1);
        self
    }

    /// `(x, y)`
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// `(x2, y)`
    pub const fn top_right(&self) -> Point {
        Point::new(self.x2(), self.y)
    }

    /// `(x, y2)`
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y2())
    }

    /// `(x2, y2)`
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.x2(), self.y2())
    }

    /// `(w, h)`
    pub const fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    /// `(x + w/2, y + h/2)`, truncating
    pub const fn centroid(&self) -> Point {
        Point::new(self.x.wrapping_add(self.w / 2), self.y.wrapping_add(self.h / 2))
    }

    /// True when the rect covers no pixel
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether `(px, py)` lies in `[x, x2] × [y, y2]`
    pub const fn contains_xy(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px <= self.x2() && py <= self.y2()
    }

    /// Whether `point` lies in `[x, x2] × [y, y2]`
    pub const fn contains_point(&self, point: Point) -> bool {
        self.contains_xy(point.x(), point.y())
    }

    /// Whether both inclusive corners of `other` lie inside this rect
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x && other.y >= self.y && other.x2() <= self.x2() && other.y2() <= self.y2()
    }

    /// Whether the inclusive spans overlap on both axes
    pub const fn intersects(&self, other: &Self) -> bool {
        !(other.x2() < self.x || other.y2() < self.y || other.x > self.x2() || other.y > self.y2())
    }

    /// Smallest rect spanning both, whether or not they overlap
    pub fn get_union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.x2().max(other.x2()),
            self.y2().max(other.y2()),
        )
    }

    /// Grow this rect to span `other` as well
    pub fn union_in_place(&mut self, other: &Self) -> &mut Self {
        *self = self.get_union(other);
        self
    }

    /// Copy grown by `amount` on every side
    pub fn get_extension(&self, amount: i32) -> Self {
        self.get_extension_hv(amount, amount)
    }

    /// Copy grown by `horizontal` on the left and right and `vertical` on the
    /// top and bottom
    pub fn get_extension_hv(&self, horizontal: i32, vertical: i32) -> Self {
        let mut rect = *self;
        rect.extend_in_place_hv(horizontal, vertical);
        rect
    }

    /// Grow by `amount` on every side
    pub fn extend_in_place(&mut self, amount: i32) -> &mut Self {
        self.extend_in_place_hv(amount, amount)
    }

    /// Grow by `horizontal` / `vertical` on each side. Negative amounts shrink,
    /// and may leave the rect with a negative size.
    pub fn extend_in_place_hv(&mut self, horizontal: i32, vertical: i32) -> &mut Self {
        self.x = self.x.wrapping_sub(horizontal);
        self.y = self.y.wrapping_sub(vertical);
        self.w = self.w.wrapping_add(horizontal.wrapping_mul(2));
        self.h = self.h.wrapping_add(vertical.wrapping_mul(2));
        self
    }

    /// Overlapping region, or `None` when the rects don't intersect
    pub fn get_intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::from_corners(
            self.x.max(other.x),
            self.y.max(other.y),
            self.x2().min(other.x2()),
            self.y2().min(other.y2()),
        ))
    }

    /// Clip the segment `(x1, y1)-(x2, y2)` to this rect
    ///
    /// Returns whether any part of the segment is inside. The coordinates are
    /// rewritten with the clipped endpoints only when it is; on rejection they
    /// keep their input values.
    pub fn intersect_line(&self, x1: &mut i32, y1: &mut i32, x2: &mut i32, y2: &mut i32) -> bool {
        match clip::clip_line(self, *x1, *y1, *x2, *y2) {
            Some((cx1, cy1, cx2, cy2)) => {
                *x1 = cx1;
                *y1 = cy1;
                *x2 = cx2;
                *y2 = cy2;
                true
            }
            None => false,
        }
    }

    /// [`Rect::intersect_line`] with the endpoints as points
    pub fn intersect_line_points(&self, p1: &mut Point, p2: &mut Point) -> bool {
        let (mut x1, mut y1) = (p1.x(), p1.y());
        let (mut x2, mut y2) = (p2.x(), p2.y());
        if !self.intersect_line(&mut x1, &mut y1, &mut x2, &mut y2) {
            return false;
        }
        p1.set_x(x1).set_y(y1);
        p2.set_x(x2).set_y(y2);
        true
    }
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Self::new(raw.x, raw.y, raw.w, raw.h)
    }
}

impl From<Rect> for RawRect {
    fn from(rect: Rect) -> Self {
        Self { x: rect.x, y: rect.y, w: rect.w, h: rect.h }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[x:{},y:{},w:{},h:{}]", self.x, self.y, self.w, self.h)
    }
}

impl AddAssign<Point> for Rect {
    fn add_assign(&mut self, offset: Point) {
        self.x = self.x.wrapping_add(offset.x());
        self.y = self.y.wrapping_add(offset.y());
    }
}

impl SubAssign<Point> for Rect {
    fn sub_assign(&mut self, offset: Point) {
        self.x = self.x.wrapping_sub(offset.x());
        self.y = self.y.wrapping_sub(offset.y());
    }
}

impl Add<Point> for Rect {
    type Output = Self;

    fn add(mut self, offset: Point) -> Self {
        self += offset;
        self
    }
}

impl Sub<Point> for Rect {
    type Output = Self;

    fn sub(mut self, offset: Point) -> Self {
        self -= offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_rect_intersection_is_symmetric() {
        let rect = Rect::new(0, 0, 100, 100);
        let inverted = Rect::new(99, 100, -20, -20);

        assert_eq!(rect.intersects(&inverted), inverted.intersects(&rect));
        assert!(!rect.intersects(&inverted));
        assert_eq!(inverted.width(), -20);
        assert_eq!(inverted.height(), -20);
    }

    #[test]
    fn test_from_corners_is_inclusive() {
        let rect = Rect::from_corners(0, 0, 9, 9);
        assert_eq!(rect.width(), 10);
        assert_eq!(rect.height(), 10);
        assert_eq!(rect.x2(), 9);
        assert_eq!(rect.y2(), 9);
        assert_eq!(Rect::from_corners(4, 4, 4, 4).size(), (1, 1));
    }

    #[test]
    fn test_from_center_truncates() {
        assert_eq!(Rect::from_center(10, 10, 5, 4), Rect::new(8, 8, 5, 4));
        assert_eq!(
            Rect::from_center_point(Point::new(0, 0), (3, 3)),
            Rect::new(-1, -1, 3, 3)
        );
    }

    #[test]
    fn test_setters() {
        let mut rect = Rect::new(1, 2, 3, 4);
        rect.set_x(10).set_y(20);
        assert_eq!(rect, Rect::new(10, 20, 3, 4));

        rect.set_x2(19);
        assert_eq!(rect.x(), 10);
        assert_eq!(rect.width(), 10);

        rect.set_y2(20);
        assert_eq!(rect.y(), 20);
        assert_eq!(rect.height(), 1);
    }

    #[test]
    fn test_corners_and_centroid() {
        let rect = Rect::new(2, 3, 4, 5);
        assert_eq!(rect.top_left(), Point::new(2, 3));
        assert_eq!(rect.top_right(), Point::new(5, 3));
        assert_eq!(rect.bottom_left(), Point::new(2, 7));
        assert_eq!(rect.bottom_right(), Point::new(5, 7));
        assert_eq!(rect.centroid(), Point::new(4, 5));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains_xy(0, 0));
        assert!(rect.contains_xy(9, 9));
        assert!(!rect.contains_xy(10, 9));
        assert!(rect.contains_point(Point::new(5, 5)));
        assert!(rect.contains_rect(&Rect::new(0, 0, 10, 10)));
        assert!(rect.contains_rect(&Rect::new(2, 2, 3, 3)));
        assert!(!rect.contains_rect(&Rect::new(2, 2, 9, 3)));
    }

    #[test]
    fn test_union_of_disjoint_rects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        assert_eq!(a.get_union(&b), Rect::new(0, 0, 25, 25));

        let mut c = a;
        c.union_in_place(&b);
        assert_eq!(c, Rect::new(0, 0, 25, 25));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.get_intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.get_intersection(&Rect::new(10, 0, 5, 5)), None);
        // Touching on the last column still overlaps by one pixel
        assert_eq!(a.get_intersection(&Rect::new(9, 0, 5, 5)), Some(Rect::new(9, 0, 1, 5)));
    }

    #[test]
    fn test_extension() {
        let rect = Rect::new(10, 10, 5, 5);
        assert_eq!(rect.get_extension(2), Rect::new(8, 8, 9, 9));
        assert_eq!(rect.get_extension_hv(1, 3), Rect::new(9, 7, 7, 11));
        assert_eq!(rect.get_extension(-3), Rect::new(13, 13, -1, -1));

        let mut grown = rect;
        grown.extend_in_place(1);
        assert_eq!(grown, Rect::new(9, 9, 7, 7));
    }

    #[test]
    fn test_translation() {
        let rect = Rect::new(1, 1, 4, 4);
        assert_eq!(rect + Point::new(2, 3), Rect::new(3, 4, 4, 4));
        assert_eq!(rect - Point::new(2, 3), Rect::new(-1, -2, 4, 4));

        let mut moved = rect;
        moved += Point::new(1, 1);
        moved -= Point::new(0, 2);
        assert_eq!(moved, Rect::new(2, 0, 4, 4));
    }

    #[test]
    fn test_intersect_line_points() {
        let rect = Rect::new(0, 0, 10, 10);
        let mut p1 = Point::new(-5, 5);
        let mut p2 = Point::new(15, 5);
        assert!(rect.intersect_line_points(&mut p1, &mut p2));
        assert_eq!((p1, p2), (Point::new(0, 5), Point::new(9, 5)));

        let mut q1 = Point::new(-5, -5);
        let mut q2 = Point::new(-1, 20);
        assert!(!rect.intersect_line_points(&mut q1, &mut q2));
        assert_eq!((q1, q2), (Point::new(-5, -5), Point::new(-1, 20)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(1, -2, 3, 4).to_string(), "[x:1,y:-2,w:3,h:4]");
    }
}
