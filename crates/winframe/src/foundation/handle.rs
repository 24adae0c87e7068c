//! Exclusive ownership of a raw backend handle

use std::fmt;

/// Move-only holder of one raw backend handle
///
/// At most one `OwningHandle` holds a given raw value. The holder is
/// responsible for passing the value back to its backend exactly once, which is
/// why the raw value only leaves through [`OwningHandle::release`] (ownership
/// handed to the caller) or [`OwningHandle::get`] (a copy for a single backend
/// call, ownership kept). It is neither `Clone` nor convertible to `T`.
pub struct OwningHandle<T> {
    raw: Option<T>,
}

impl<T> OwningHandle<T> {
    /// Take ownership of `raw`
    pub const fn new(raw: T) -> Self {
        Self { raw: Some(raw) }
    }

    /// A handle that owns nothing
    pub const fn null() -> Self {
        Self { raw: None }
    }

    /// Whether this handle owns nothing
    pub const fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    /// Give up ownership, returning the raw value and leaving this handle null
    ///
    /// The caller now has to release the resource (or knows it is already
    /// gone, as for child windows destroyed with their parent).
    pub fn release(&mut self) -> Option<T> {
        self.raw.take()
    }

    /// Move ownership into a new handle, leaving this one null
    pub fn take(&mut self) -> Self {
        Self { raw: self.raw.take() }
    }
}

impl<T: Copy> OwningHandle<T> {
    /// Copy of the raw value for passing to a backend call
    pub const fn get(&self) -> Option<T> {
        self.raw
    }
}

impl<T> Default for OwningHandle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: fmt::Debug> fmt::Debug for OwningHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.debug_tuple("OwningHandle").field(raw).finish(),
            None => f.write_str("OwningHandle(null)"),
        }
    }
}
