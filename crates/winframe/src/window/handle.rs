//! Application-facing window type

use std::fmt;

use super::backend::{calls, WindowBackend, WindowFlags};
use super::display::{Display, WindowId, WindowRef};
use crate::config::WindowConfig;
use crate::error::{BackendError, WindowResult};
use crate::geometry::Point;

/// A backend window owned by this value
///
/// A window is either *unattached* (top-level), *attached* (it has a parent
/// and appears in that parent's [`Window::children`]) or *released* (it no
/// longer owns a backend resource). Moving a `Window` moves ownership; the
/// moved-from binding is gone as far as the compiler is concerned.
/// [`Window::take`] does the same through a `&mut` and leaves the source
/// released.
///
/// Dropping a window first releases the windows below it in the tree without
/// any backend call (the backend closes child windows together with their
/// parent), then destroys its own backend window once. Dropping a child whose
/// parent went first is therefore a no-op for the backend.
pub struct Window<B: WindowBackend> {
    id: Option<WindowId>,
    display: Display<B>,
}

impl<B: WindowBackend> Window<B> {
    /// Open a top-level window
    ///
    /// `flags` go to the backend untouched.
    ///
    /// # Errors
    /// Fails with the `create_window` diagnostic if the backend refuses.
    pub fn new(display: &Display<B>, title: &str, width: i32, height: i32, flags: WindowFlags) -> WindowResult<Self> {
        let id = {
            let mut registry = display.registry_mut();
            let raw = registry
                .backend
                .create_window(title, width, height, flags)
                .ok_or_else(|| BackendError::capture(calls::CREATE_WINDOW, &registry.backend))?;
            registry.insert(raw, None)
        };
        log::debug!("created window {id:?} \"{title}\" {width}x{height}");

        Ok(Self {
            id: Some(id),
            display: display.clone(),
        })
    }

    /// Open a top-level window from saved settings
    ///
    /// # Errors
    /// Same as [`Window::new`].
    pub fn from_config(display: &Display<B>, config: &WindowConfig) -> WindowResult<Self> {
        Self::new(display, &config.title, config.width, config.height, config.window_flags())
    }

    /// Open a popup window anchored to `parent`
    ///
    /// The popup is placed at `(offset_x, offset_y)` relative to the parent,
    /// records `parent` as its parent and is added to the parent's children.
    ///
    /// # Errors
    /// Fails with the `create_popup_window` diagnostic if the backend refuses
    /// or `parent` is released.
    pub fn popup(
        parent: &Self,
        offset_x: i32,
        offset_y: i32,
        width: i32,
        height: i32,
        flags: WindowFlags,
    ) -> WindowResult<Self> {
        let display = &parent.display;
        let id = {
            let mut registry = display.registry_mut();
            let (parent_id, parent_raw) = registry.live(parent.id, calls::CREATE_POPUP_WINDOW)?;
            let raw = registry
                .backend
                .create_popup_window(parent_raw, offset_x, offset_y, width, height, flags)
                .ok_or_else(|| BackendError::capture(calls::CREATE_POPUP_WINDOW, &registry.backend))?;
            registry.insert(raw, Some(parent_id))
        };
        log::debug!("created popup {id:?} under {:?} at +{offset_x}+{offset_y}", parent.id);

        Ok(Self {
            id: Some(id),
            display: display.clone(),
        })
    }

    /// Take ownership of a window the backend opened elsewhere
    ///
    /// The adopted window is unattached in this tree even if the backend
    /// reports a parent for it.
    ///
    /// # Errors
    /// Fails with an `adopt_window` error if another `Window` of this display
    /// already owns `raw`.
    pub fn from_raw(display: &Display<B>, raw: B::Handle) -> WindowResult<Self> {
        let id = {
            let mut registry = display.registry_mut();
            if registry.owns_raw(raw) {
                registry.backend.set_error("Window is already owned");
                return Err(BackendError::capture(calls::ADOPT_WINDOW, &registry.backend));
            }
            registry.insert(raw, None)
        };
        log::debug!("adopted window {id:?} ({raw:?})");

        Ok(Self {
            id: Some(id),
            display: display.clone(),
        })
    }

    /// Move ownership out into a new value, leaving this one released
    ///
    /// The new value keeps the window's identity, so its parent and children
    /// still refer to it. Dropping the released source does nothing.
    #[must_use = "dropping the taken window destroys it"]
    pub fn take(&mut self) -> Self {
        Self {
            id: self.id.take(),
            display: self.display.clone(),
        }
    }

    /// Whether this value no longer owns a backend window
    pub fn is_released(&self) -> bool {
        self.raw_handle().is_none()
    }

    /// Raw backend handle, for passing to backend calls directly
    pub fn raw_handle(&self) -> Option<B::Handle> {
        let registry = self.display.registry();
        registry.windows.get(self.id?)?.handle.get()
    }

    /// Weak reference to this window; the empty reference once released by
    /// [`Window::take`]
    pub fn downgrade(&self) -> WindowRef {
        self.id.map_or_else(WindowRef::none, WindowRef::new)
    }

    /// Display this window belongs to
    pub const fn display(&self) -> &Display<B> {
        &self.display
    }

    /// Windows currently listed as children of this one, oldest first
    pub fn children(&self) -> Vec<WindowRef> {
        let registry = self.display.registry();
        self.id
            .and_then(|id| registry.windows.get(id))
            .map(|node| node.children.iter().copied().map(WindowRef::new).collect())
            .unwrap_or_default()
    }

    fn query<T>(&self, operation: &str, call: impl FnOnce(&B, B::Handle) -> Option<T>) -> WindowResult<T> {
        let registry = self.display.registry();
        let (_, raw) = registry.live(self.id, operation)?;
        call(&registry.backend, raw).ok_or_else(|| BackendError::capture(operation, &registry.backend))
    }

    /// Client size in window coordinates
    ///
    /// # Errors
    /// Fails with the `get_window_size` diagnostic.
    pub fn size(&self) -> WindowResult<(i32, i32)> {
        self.query(calls::GET_WINDOW_SIZE, |backend, raw| backend.window_size(raw))
    }

    /// Client width in window coordinates
    ///
    /// # Errors
    /// Fails with the `get_window_size` diagnostic.
    pub fn width(&self) -> WindowResult<i32> {
        self.size().map(|(width, _)| width)
    }

    /// Client height in window coordinates
    ///
    /// # Errors
    /// Fails with the `get_window_size` diagnostic.
    pub fn height(&self) -> WindowResult<i32> {
        self.size().map(|(_, height)| height)
    }

    /// Client size in pixels, larger than [`Window::size`] on high-density
    /// displays
    ///
    /// # Errors
    /// Fails with the `get_window_size_in_pixels` diagnostic.
    pub fn size_in_pixels(&self) -> WindowResult<(i32, i32)> {
        self.query(calls::GET_WINDOW_SIZE_IN_PIXELS, |backend, raw| {
            backend.window_size_in_pixels(raw)
        })
    }

    /// Client width in pixels
    ///
    /// # Errors
    /// Fails with the `get_window_size_in_pixels` diagnostic.
    pub fn width_in_pixels(&self) -> WindowResult<i32> {
        self.size_in_pixels().map(|(width, _)| width)
    }

    /// Client height in pixels
    ///
    /// # Errors
    /// Fails with the `get_window_size_in_pixels` diagnostic.
    pub fn height_in_pixels(&self) -> WindowResult<i32> {
        self.size_in_pixels().map(|(_, height)| height)
    }

    /// Current title
    ///
    /// # Errors
    /// Fails with the `get_window_title` diagnostic.
    pub fn title(&self) -> WindowResult<String> {
        self.query(calls::GET_WINDOW_TITLE, |backend, raw| backend.window_title(raw))
    }

    /// Change the title
    ///
    /// # Errors
    /// Fails with the `set_window_title` diagnostic; the title is unchanged.
    pub fn set_title(&mut self, title: &str) -> WindowResult<()> {
        let mut registry = self.display.registry_mut();
        let (_, raw) = registry.live(self.id, calls::SET_WINDOW_TITLE)?;
        if registry.backend.set_window_title(raw, title) {
            Ok(())
        } else {
            Err(BackendError::capture(calls::SET_WINDOW_TITLE, &registry.backend))
        }
    }

    /// Position of the top-left corner on screen
    ///
    /// # Errors
    /// Fails with the `get_window_position` diagnostic.
    pub fn position(&self) -> WindowResult<Point> {
        self.query(calls::GET_WINDOW_POSITION, |backend, raw| backend.window_position(raw))
            .map(Point::from)
    }

    /// Parent of this window
    ///
    /// The backend is asked first: if it reports no parent (a top-level
    /// window, a released one, or a window detached behind the tree's back)
    /// the answer is the empty reference whatever the tree last recorded.
    pub fn parent(&self) -> WindowRef {
        let registry = self.display.registry();
        let Some(node) = self.id.and_then(|id| registry.windows.get(id)) else {
            return WindowRef::none();
        };
        match node.handle.get() {
            Some(raw) if registry.backend.window_parent(raw).is_some() => node.parent,
            _ => WindowRef::none(),
        }
    }

    /// Make this window a child of `parent`
    ///
    /// On success the window moves from its old parent's children to
    /// `parent`'s.
    ///
    /// # Errors
    /// Fails with the `set_window_parent` diagnostic if the backend refuses
    /// (for instance when `parent` is a descendant of this window), if either
    /// window is released, or if they belong to different displays. The
    /// previous relationship is left as it was.
    pub fn set_parent(&mut self, parent: &Self) -> WindowResult<()> {
        let mut registry = self.display.registry_mut();
        if !self.display.same_display(&parent.display) {
            registry.backend.set_error("Windows belong to different displays");
            return Err(BackendError::capture(calls::SET_WINDOW_PARENT, &registry.backend));
        }
        let (id, raw) = registry.live(self.id, calls::SET_WINDOW_PARENT)?;
        let (parent_id, parent_raw) = registry.live(parent.id, calls::SET_WINDOW_PARENT)?;

        if !registry.backend.set_window_parent(raw, Some(parent_raw)) {
            return Err(BackendError::capture(calls::SET_WINDOW_PARENT, &registry.backend));
        }
        registry.reparent(id, Some(parent_id));
        log::debug!("window {id:?} reparented under {parent_id:?}");
        Ok(())
    }

    /// Turn this window back into a top-level window
    ///
    /// # Errors
    /// Fails with the `set_window_parent` diagnostic; the parent is kept.
    pub fn detach_from_parent(&mut self) -> WindowResult<()> {
        let mut registry = self.display.registry_mut();
        let (id, raw) = registry.live(self.id, calls::SET_WINDOW_PARENT)?;

        if !registry.backend.set_window_parent(raw, None) {
            return Err(BackendError::capture(calls::SET_WINDOW_PARENT, &registry.backend));
        }
        registry.reparent(id, None);
        Ok(())
    }
}

impl<B: WindowBackend> Drop for Window<B> {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        match self.display.try_registry_mut() {
            Some(mut registry) => registry.destroy(id),
            None => log::error!("window {id:?} dropped while its display was borrowed, backend window leaked"),
        }
    }
}

impl<B: WindowBackend> fmt::Debug for Window<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window").field("id", &self.id).finish_non_exhaustive()
    }
}
