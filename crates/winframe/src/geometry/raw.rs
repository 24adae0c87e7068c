//! Backend-shaped plain data for points and rects
//!
//! These mirror the C layout windowing libraries use for `{x, y}` and
//! `{x, y, w, h}`, so slices of them can be handed across a backend boundary
//! as bytes. `Point` and `Rect` convert to and from them explicitly.
#![allow(unsafe_code)]

/// C-layout point
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

/// C-layout rectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width, may be zero or negative
    pub w: i32,
    /// Height, may be zero or negative
    pub h: i32,
}

unsafe impl bytemuck::Pod for RawPoint {}
unsafe impl bytemuck::Zeroable for RawPoint {}

unsafe impl bytemuck::Pod for RawRect {}
unsafe impl bytemuck::Zeroable for RawRect {}
