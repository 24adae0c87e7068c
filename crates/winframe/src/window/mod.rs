//! Window ownership tree
//!
//! A [`Display`] wraps one [`WindowBackend`] and records which windows it
//! opened and how they are nested. [`Window`] values own backend windows:
//!
//! - A top-level window comes from [`Window::new`] or [`Display::create_window`]
//! - Popups come from [`Window::popup`] and start out attached to their parent
//! - [`Window::set_parent`] moves a window under another one
//! - Dropping a window destroys its backend window exactly once and releases
//!   every window below it without further backend calls
//!
//! [`HeadlessBackend`] runs everything in memory. The `glfw` feature adds
//! [`GlfwBackend`] for real desktop windows.

pub mod backend;
pub mod display;
pub mod handle;
pub mod headless;

#[cfg(feature = "glfw")]
pub mod glfw_backend;

#[cfg(test)]
mod tests;

pub use backend::{calls, WindowBackend, WindowFlags};
pub use display::{Display, WindowId, WindowRef};
#[cfg(feature = "glfw")]
pub use glfw_backend::{GlfwBackend, GlfwWindowId};
pub use handle::Window;
pub use headless::{HeadlessBackend, HeadlessWindowId};
