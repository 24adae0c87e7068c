//! Backend contract for window management
//!
//! This trait is the whole surface the window tree needs from a windowing
//! library. Value queries return `Option` and mutations return `bool`; on
//! failure the backend leaves a diagnostic behind that callers read back
//! through [`WindowBackend::last_error`], the way C windowing libraries keep a
//! per-thread error string.

use std::fmt::Debug;
use std::hash::Hash;

use bitflags::bitflags;

/// Names of backend calls, as reported in [`crate::BackendError::operation`]
pub mod calls {
    /// [`super::WindowBackend::create_window`]
    pub const CREATE_WINDOW: &str = "create_window";
    /// [`super::WindowBackend::create_popup_window`]
    pub const CREATE_POPUP_WINDOW: &str = "create_popup_window";
    /// [`super::WindowBackend::window_size`]
    pub const GET_WINDOW_SIZE: &str = "get_window_size";
    /// [`super::WindowBackend::window_size_in_pixels`]
    pub const GET_WINDOW_SIZE_IN_PIXELS: &str = "get_window_size_in_pixels";
    /// [`super::WindowBackend::window_title`]
    pub const GET_WINDOW_TITLE: &str = "get_window_title";
    /// [`super::WindowBackend::set_window_title`]
    pub const SET_WINDOW_TITLE: &str = "set_window_title";
    /// [`super::WindowBackend::set_window_parent`]
    pub const SET_WINDOW_PARENT: &str = "set_window_parent";
    /// [`super::WindowBackend::window_position`]
    pub const GET_WINDOW_POSITION: &str = "get_window_position";
    /// [`crate::Window::from_raw`]
    pub const ADOPT_WINDOW: &str = "adopt_window";
}

bitflags! {
    /// Window creation flags
    ///
    /// The values follow the common windowing-library bit layout. The window
    /// tree never interprets them; they are handed to the backend exactly as
    /// given. Build from raw bits with `WindowFlags::from_bits_retain` to keep
    /// bits that have no name here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u64 {
        /// Fullscreen at desktop resolution
        const FULLSCREEN = 0x0000_0001;
        /// Usable with an OpenGL context
        const OPENGL = 0x0000_0002;
        /// Partially or completely obscured
        const OCCLUDED = 0x0000_0004;
        /// Not visible
        const HIDDEN = 0x0000_0008;
        /// No decorations
        const BORDERLESS = 0x0000_0010;
        /// User-resizable
        const RESIZABLE = 0x0000_0020;
        /// Minimized
        const MINIMIZED = 0x0000_0040;
        /// Maximized
        const MAXIMIZED = 0x0000_0080;
        /// Has grabbed mouse focus
        const MOUSE_GRABBED = 0x0000_0100;
        /// Has input focus
        const INPUT_FOCUS = 0x0000_0200;
        /// Has mouse focus
        const MOUSE_FOCUS = 0x0000_0400;
        /// Not created by the backend
        const EXTERNAL = 0x0000_0800;
        /// Modal
        const MODAL = 0x0000_1000;
        /// Prefers a high pixel density back buffer
        const HIGH_PIXEL_DENSITY = 0x0000_2000;
        /// Has captured the mouse
        const MOUSE_CAPTURE = 0x0000_4000;
        /// Relative mouse mode
        const MOUSE_RELATIVE_MODE = 0x0000_8000;
        /// Stays above other windows
        const ALWAYS_ON_TOP = 0x0001_0000;
        /// Utility window, kept out of the task bar
        const UTILITY = 0x0002_0000;
        /// Tooltip; requires a parent
        const TOOLTIP = 0x0004_0000;
        /// Popup menu; requires a parent
        const POPUP_MENU = 0x0008_0000;
        /// Has grabbed keyboard input
        const KEYBOARD_GRABBED = 0x0010_0000;
        /// Usable with a Vulkan instance
        const VULKAN = 0x1000_0000;
        /// Usable with a Metal view
        const METAL = 0x2000_0000;
        /// Transparent buffer
        const TRANSPARENT = 0x4000_0000;
        /// Cannot take focus
        const NOT_FOCUSABLE = 0x8000_0000;
    }
}

/// Window management calls a backend must provide
///
/// All calls happen on the thread that owns the backend. Handles are plain
/// copyable identifiers; ownership of the windows behind them is tracked by
/// the caller, not by the handle type.
pub trait WindowBackend {
    /// Raw identifier of one backend window
    type Handle: Copy + Eq + Hash + Debug;

    /// Open a top-level window
    fn create_window(&mut self, title: &str, width: i32, height: i32, flags: WindowFlags) -> Option<Self::Handle>;

    /// Open a popup window positioned relative to `parent`
    fn create_popup_window(
        &mut self,
        parent: Self::Handle,
        offset_x: i32,
        offset_y: i32,
        width: i32,
        height: i32,
        flags: WindowFlags,
    ) -> Option<Self::Handle>;

    /// Close a window; its child windows are closed along with it
    fn destroy_window(&mut self, window: Self::Handle);

    /// Client size in window coordinates
    fn window_size(&self, window: Self::Handle) -> Option<(i32, i32)>;

    /// Client size in pixels
    fn window_size_in_pixels(&self, window: Self::Handle) -> Option<(i32, i32)>;

    /// Current title
    fn window_title(&self, window: Self::Handle) -> Option<String>;

    /// Change the title
    fn set_window_title(&mut self, window: Self::Handle, title: &str) -> bool;

    /// Parent of `window`, `None` for top-level windows and invalid handles
    fn window_parent(&self, window: Self::Handle) -> Option<Self::Handle>;

    /// Attach `window` to `parent`, or detach it with `None`
    fn set_window_parent(&mut self, window: Self::Handle, parent: Option<Self::Handle>) -> bool;

    /// Position of the top-left corner on screen
    fn window_position(&self, window: Self::Handle) -> Option<(i32, i32)>;

    /// Diagnostic left by the last failed call
    fn last_error(&self) -> String;

    /// Replace the pending diagnostic
    fn set_error(&self, message: &str);
}
