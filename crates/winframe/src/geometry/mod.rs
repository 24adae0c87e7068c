//! Integer geometry kernel
//!
//! Points, rectangles with inclusive right/bottom edges, and line clipping.
//! Nothing here talks to a backend; everything is plain `Copy` data.

pub mod clip;
pub mod point;
pub mod raw;
pub mod rect;

pub use clip::{clip_line, OutCode};
pub use point::Point;
pub use raw::{RawPoint, RawRect};
pub use rect::Rect;
