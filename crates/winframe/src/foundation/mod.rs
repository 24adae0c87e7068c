//! Foundation module - ownership primitives and logging
//!
//! - Owning handles for backend resources
//! - Weak, identity-compared references into arenas
//! - Logging utilities

pub mod handle;
pub mod logging;
pub mod weak;
