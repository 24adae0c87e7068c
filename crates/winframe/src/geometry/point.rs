//! Integer 2D point
//!
//! `Point` is a plain value type. Arithmetic is memberwise: point operands act
//! per axis, scalar operands apply to both axes. Every operator wraps on
//! overflow. Division and remainder still panic on a zero divisor.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use super::raw::RawPoint;
use super::rect::Rect;

/// A point with signed 32-bit coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// X coordinate
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Set the X coordinate
    pub fn set_x(&mut self, x: i32) -> &mut Self {
        self.x = x;
        self
    }

    /// Y coordinate
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Set the Y coordinate
    pub fn set_y(&mut self, y: i32) -> &mut Self {
        self.y = y;
        self
    }

    /// Copy of this point clamped into `rect`
    pub fn get_clamped(&self, rect: &Rect) -> Self {
        let mut point = *self;
        point.clamp(rect);
        point
    }

    /// Clamp this point into the inclusive span `[x, x2] × [y, y2]` of `rect`
    ///
    /// The lower bound is applied before the upper one, so for an inverted
    /// rect (negative width or height) the coordinate ends on `x2` / `y2`.
    pub fn clamp(&mut self, rect: &Rect) -> &mut Self {
        if self.x < rect.x() {
            self.x = rect.x();
        }
        if self.x > rect.x2() {
            self.x = rect.x2();
        }
        if self.y < rect.y() {
            self.y = rect.y();
        }
        if self.y > rect.y2() {
            self.y = rect.y2();
        }
        self
    }

    /// Copy of this point wrapped toroidally into `rect`
    ///
    /// # Panics
    /// Panics if `rect` has zero width or height and the point lies outside it
    /// on that axis.
    pub fn get_wrapped(&self, rect: &Rect) -> Self {
        let mut point = *self;
        point.wrap(rect);
        point
    }

    /// Wrap this point toroidally into `rect`, as if opposite edges were joined
    ///
    /// Coordinates already inside `[origin, origin + extent - 1]` are left
    /// alone. This is not a plain modulo: the lower branch counts back from the
    /// far edge so negative coordinates land on the right pixel.
    ///
    /// # Panics
    /// Panics if `rect` has zero width or height and the point lies outside it
    /// on that axis.
    pub fn wrap(&mut self, rect: &Rect) -> &mut Self {
        self.x = wrap_axis(self.x, rect.x(), rect.width());
        self.y = wrap_axis(self.y, rect.y(), rect.height());
        self
    }
}

fn wrap_axis(coord: i32, origin: i32, extent: i32) -> i32 {
    if coord < origin {
        let last = origin.wrapping_add(extent).wrapping_sub(1);
        let overshoot = origin.wrapping_sub(coord).wrapping_add(extent).wrapping_sub(1);
        last.wrapping_sub(overshoot.wrapping_rem(extent))
    } else if coord >= origin.wrapping_add(extent) {
        let overshoot = coord.wrapping_sub(origin).wrapping_sub(extent);
        origin.wrapping_add(overshoot.wrapping_rem(extent))
    } else {
        coord
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        Self::new(raw.x, raw.y)
    }
}

impl From<Point> for RawPoint {
    fn from(point: Point) -> Self {
        Self { x: point.x, y: point.y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[x:{},y:{}]", self.x, self.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x.wrapping_neg(), self.y.wrapping_neg())
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.x = self.x.wrapping_add(other.x);
        self.y = self.y.wrapping_add(other.y);
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        self.x = self.x.wrapping_sub(other.x);
        self.y = self.y.wrapping_sub(other.y);
    }
}

impl MulAssign for Point {
    fn mul_assign(&mut self, other: Self) {
        self.x = self.x.wrapping_mul(other.x);
        self.y = self.y.wrapping_mul(other.y);
    }
}

impl MulAssign<i32> for Point {
    fn mul_assign(&mut self, factor: i32) {
        self.x = self.x.wrapping_mul(factor);
        self.y = self.y.wrapping_mul(factor);
    }
}

/// `i32::MIN / -1` wraps to `i32::MIN`.
///
/// # Panics
/// Panics if either divisor coordinate is zero.
impl DivAssign for Point {
    fn div_assign(&mut self, divisor: Self) {
        self.x = self.x.wrapping_div(divisor.x);
        self.y = self.y.wrapping_div(divisor.y);
    }
}

/// # Panics
/// Panics if `divisor` is zero.
impl DivAssign<i32> for Point {
    fn div_assign(&mut self, divisor: i32) {
        self.x = self.x.wrapping_div(divisor);
        self.y = self.y.wrapping_div(divisor);
    }
}

/// `i32::MIN % -1` is zero.
///
/// # Panics
/// Panics if either modulus coordinate is zero.
impl RemAssign for Point {
    fn rem_assign(&mut self, modulus: Self) {
        self.x = self.x.wrapping_rem(modulus.x);
        self.y = self.y.wrapping_rem(modulus.y);
    }
}

/// # Panics
/// Panics if `modulus` is zero.
impl RemAssign<i32> for Point {
    fn rem_assign(&mut self, modulus: i32) {
        self.x = self.x.wrapping_rem(modulus);
        self.y = self.y.wrapping_rem(modulus);
    }
}

// Binary operators are defined in terms of the compound ones.
macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign:ident, $rhs:ty) => {
        impl $trait<$rhs> for Point {
            type Output = Self;

            fn $method(mut self, rhs: $rhs) -> Self {
                self.$assign(rhs);
                self
            }
        }
    };
}

binary_op!(Add, add, add_assign, Point);
binary_op!(Sub, sub, sub_assign, Point);
binary_op!(Mul, mul, mul_assign, Point);
binary_op!(Mul, mul, mul_assign, i32);
binary_op!(Div, div, div_assign, Point);
binary_op!(Div, div, div_assign, i32);
binary_op!(Rem, rem, rem_assign, Point);
binary_op!(Rem, rem, rem_assign, i32);

impl Add<(i32, i32)> for Point {
    type Output = Self;

    fn add(self, pair: (i32, i32)) -> Self {
        self + Self::from(pair)
    }
}

impl Sub<(i32, i32)> for Point {
    type Output = Self;

    fn sub(self, pair: (i32, i32)) -> Self {
        self - Self::from(pair)
    }
}

impl Mul<Point> for i32 {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        point * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_pair() {
        let a = Point::new(10, 20);
        assert_eq!(a + (10, 20), Point::new(20, 40));
    }

    #[test]
    fn test_setters_chain() {
        let mut p = Point::default();
        p.set_x(3).set_y(-4);
        assert_eq!(p, Point::new(3, -4));
    }

    #[test]
    fn test_memberwise_arithmetic() {
        let p = Point::new(7, -9);
        assert_eq!(-p, Point::new(-7, 9));
        assert_eq!(p - Point::new(2, 1), Point::new(5, -10));
        assert_eq!(p * 2, Point::new(14, -18));
        assert_eq!(3 * p, Point::new(21, -27));
        assert_eq!(p * Point::new(2, -1), Point::new(14, 9));
        assert_eq!(p / 2, Point::new(3, -4));
        assert_eq!(p / Point::new(7, 3), Point::new(1, -3));
        assert_eq!(p % 4, Point::new(3, -1));
        assert_eq!(p % Point::new(5, 5), Point::new(2, -4));
    }

    #[test]
    #[should_panic]
    fn test_divide_by_zero_panics() {
        let _ = Point::new(1, 1) / 0;
    }

    #[test]
    fn test_wrap_negative_coordinate() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(Point::new(-5, 3).get_wrapped(&rect), Point::new(5, 3));
        assert_eq!(Point::new(-1, -10).get_wrapped(&rect), Point::new(9, 0));
        assert_eq!(Point::new(-11, 0).get_wrapped(&rect), Point::new(9, 0));
    }

    #[test]
    fn test_wrap_upper_boundary() {
        let rect = Rect::new(5, 5, 10, 10);
        assert_eq!(Point::new(15, 14).get_wrapped(&rect), Point::new(5, 14));
        assert_eq!(Point::new(27, 5).get_wrapped(&rect), Point::new(7, 5));
        assert_eq!(Point::new(14, 5).get_wrapped(&rect), Point::new(14, 5));
    }

    #[test]
    fn test_clamp() {
        let rect = Rect::new(0, 0, 10, 10);
        let mut p = Point::new(-3, 42);
        p.clamp(&rect);
        assert_eq!(p, Point::new(0, 9));
        assert_eq!(Point::new(4, 4).get_clamped(&rect), Point::new(4, 4));
    }

    #[test]
    fn test_display_and_pair_conversion() {
        let p = Point::new(-1, 2);
        assert_eq!(p.to_string(), "[x:-1,y:2]");
        let pair: (i32, i32) = p.into();
        assert_eq!(pair, (-1, 2));
        assert_eq!(Point::from(RawPoint { x: 8, y: 9 }), Point::new(8, 9));
    }

    #[test]
    fn test_division_overflow_wraps() {
        let p = Point::new(i32::MIN, i32::MIN);
        assert_eq!(p / -1, Point::new(i32::MIN, i32::MIN));
        assert_eq!(p % Point::new(-1, 3), Point::new(0, i32::MIN % 3));
    }

    #[test]
    fn test_wrap_inverted_rect_at_extremes() {
        let rect = Rect::new(0, 0, -1, 5);
        assert_eq!(Point::new(i32::MAX, 2).get_wrapped(&rect), Point::new(0, 2));
        assert_eq!(Point::new(i32::MIN, 2).get_wrapped(&rect), Point::new(-2, 2));
    }

    #[test]
    fn test_hash_follows_equality() {
        use std::collections::HashSet;

        let points: HashSet<_> = [Point::new(1, 2), Point::from((1, 2)), Point::new(2, 1)]
            .into_iter()
            .collect();
        assert_eq!(points.len(), 2);
    }
}
