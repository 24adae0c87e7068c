//! # winframe
//!
//! Integer 2D geometry and an ownership tree for native windows.
//!
//! ## Features
//!
//! - **Geometry**: `Point` and `Rect` with inclusive edges, clamping, wrapping,
//!   unions, intersections and line clipping
//! - **Window tree**: parent/child windows where dropping a parent tears down
//!   its popups safely
//! - **Backends**: in-memory `HeadlessBackend`, GLFW behind the `glfw` feature
//! - **Configuration**: window settings in TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use winframe::prelude::*;
//!
//! fn main() -> Result<(), BackendError> {
//!     let display = Display::new(HeadlessBackend::new());
//!     let main = display.create_window("Arch BTW", 500, 400, WindowFlags::empty())?;
//!     let menu = Window::popup(&main, 10, 10, 100, 80, WindowFlags::POPUP_MENU)?;
//!
//!     assert_eq!(menu.parent(), main.downgrade());
//!     assert!(Rect::new(0, 0, 500, 400).contains_point(menu.position()?));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod geometry;
pub mod window;

pub use error::{BackendError, WindowResult};
pub use geometry::{Point, Rect};
pub use window::{Display, Window, WindowBackend, WindowFlags, WindowRef};

/// Common imports
pub mod prelude {
    pub use crate::config::{Config, ConfigError, HeadlessConfig, WindowConfig};
    pub use crate::error::{BackendError, WindowResult};
    pub use crate::foundation::handle::OwningHandle;
    pub use crate::foundation::weak::WeakRef;
    pub use crate::geometry::{Point, Rect};
    pub use crate::window::{calls, Display, HeadlessBackend, Window, WindowBackend, WindowFlags, WindowRef};
}
