//! Line segment clipping against a rect
//!
//! Integer Cohen-Sutherland, matching the behaviour windowing backends ship
//! for their rect/line intersection call: empty rects reject everything, a
//! segment fully inside comes back untouched, axis-aligned segments are
//! clamped directly, anything else is walked edge by edge.

use bitflags::bitflags;

use super::rect::Rect;

bitflags! {
    /// Which sides of a rect a point lies beyond
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutCode: u8 {
        /// Below the last row
        const BOTTOM = 0b0001;
        /// Above the first row
        const TOP = 0b0010;
        /// Left of the first column
        const LEFT = 0b0100;
        /// Right of the last column
        const RIGHT = 0b1000;
    }
}

impl OutCode {
    /// Classify `(x, y)` against the inclusive bounds of `rect`
    pub fn of(rect: &Rect, x: i32, y: i32) -> Self {
        let mut code = Self::empty();
        if y < rect.y() {
            code |= Self::TOP;
        } else if y > rect.y2() {
            code |= Self::BOTTOM;
        }
        if x < rect.x() {
            code |= Self::LEFT;
        } else if x > rect.x2() {
            code |= Self::RIGHT;
        }
        code
    }
}

/// Clip `(x1, y1)-(x2, y2)` to `rect`
///
/// Returns the clipped endpoints, or `None` when no part of the segment lies
/// inside the rect. A rect whose far edge wrapped past `i32::MAX` contains no
/// point and rejects every segment.
pub fn clip_line(rect: &Rect, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
    let (left, top, right, bottom) = (rect.x(), rect.y(), rect.x2(), rect.y2());
    if rect.is_empty() || right < left || bottom < top {
        return None;
    }

    if rect.contains_xy(x1, y1) && rect.contains_xy(x2, y2) {
        return Some((x1, y1, x2, y2));
    }

    if (x1 < left && x2 < left)
        || (x1 > right && x2 > right)
        || (y1 < top && y2 < top)
        || (y1 > bottom && y2 > bottom)
    {
        return None;
    }

    if y1 == y2 {
        return Some((x1.clamp(left, right), y1, x2.clamp(left, right), y2));
    }

    if x1 == x2 {
        return Some((x1, y1.clamp(top, bottom), x2, y2.clamp(top, bottom)));
    }

    let (mut ax, mut ay, mut bx, mut by) = (x1, y1, x2, y2);
    let mut code_a = OutCode::of(rect, ax, ay);
    let mut code_b = OutCode::of(rect, bx, by);

    while !(code_a.is_empty() && code_b.is_empty()) {
        if code_a.intersects(code_b) {
            return None;
        }
        // Always move an endpoint that is still outside, the first one first.
        let code = if code_a.is_empty() { code_b } else { code_a };
        let (x, y) = edge_crossing(rect, code, (ax, ay), (bx, by));
        if code_a.is_empty() {
            bx = x;
            by = y;
            code_b = OutCode::of(rect, bx, by);
        } else {
            ax = x;
            ay = y;
            code_a = OutCode::of(rect, ax, ay);
        }
    }

    Some((ax, ay, bx, by))
}

/// Point where the line through `a` and `b` crosses the edge named by `code`
///
/// The line is the original segment extended. Interpolation runs in `i128`,
/// wide enough for the product of two full-range `i32` spans, and truncates
/// toward zero like the backend's integer arithmetic.
fn edge_crossing(rect: &Rect, code: OutCode, a: (i32, i32), b: (i32, i32)) -> (i32, i32) {
    let (ax, ay) = (i128::from(a.0), i128::from(a.1));
    let (bx, by) = (i128::from(b.0), i128::from(b.1));

    let along_y = |edge: i32| {
        let y = i128::from(edge);
        let x = ax + (bx - ax) * (y - ay) / (by - ay);
        (narrow(x), edge)
    };
    let along_x = |edge: i32| {
        let x = i128::from(edge);
        let y = ay + (by - ay) * (x - ax) / (bx - ax);
        (edge, narrow(y))
    };

    if code.contains(OutCode::TOP) {
        along_y(rect.y())
    } else if code.contains(OutCode::BOTTOM) {
        along_y(rect.y2())
    } else if code.contains(OutCode::LEFT) {
        along_x(rect.x())
    } else {
        along_x(rect.x2())
    }
}

fn narrow(value: i128) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
