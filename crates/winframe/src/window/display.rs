//! Shared window registry
//!
//! A [`Display`] owns the backend and an arena with one node per window. Each
//! node holds the window's [`OwningHandle`], a weak reference to its parent
//! and the ordered list of its children. [`Window`](super::Window) values are
//! thin owners of a node key, so moving a window never invalidates the
//! references other nodes hold to it, and tearing down a parent is a walk over
//! the arena.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use super::backend::{WindowBackend, WindowFlags};
use super::handle::Window;
use crate::error::{BackendError, WindowResult};
use crate::foundation::handle::OwningHandle;
use crate::foundation::weak::WeakRef;

new_key_type! {
    /// Identity of a window in its display's arena
    pub struct WindowId;
}

/// Non-owning reference to a window, compared by identity
pub type WindowRef = WeakRef<WindowId>;

pub(crate) struct WindowNode<H> {
    pub(crate) handle: OwningHandle<H>,
    pub(crate) parent: WindowRef,
    pub(crate) children: Vec<WindowId>,
}

pub(crate) struct Registry<B: WindowBackend> {
    pub(crate) backend: B,
    pub(crate) windows: SlotMap<WindowId, WindowNode<B::Handle>>,
}

impl<B: WindowBackend> Registry<B> {
    pub(crate) fn insert(&mut self, raw: B::Handle, parent: Option<WindowId>) -> WindowId {
        let id = self.windows.insert(WindowNode {
            handle: OwningHandle::new(raw),
            parent: parent.map_or_else(WindowRef::none, WindowRef::new),
            children: Vec::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.windows.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    /// Key and raw handle of a window that still owns its backend resource
    ///
    /// Anything else is reported as a failure of `operation` with an
    /// invalid-window diagnostic, the same answer the backend gives for a
    /// closed handle.
    pub(crate) fn live(&self, id: Option<WindowId>, operation: &str) -> WindowResult<(WindowId, B::Handle)> {
        let found = id.and_then(|id| Some((id, self.windows.get(id)?.handle.get()?)));
        found.ok_or_else(|| {
            self.backend.set_error("Invalid window");
            BackendError::capture(operation, &self.backend)
        })
    }

    pub(crate) fn owns_raw(&self, raw: B::Handle) -> bool {
        self.windows.values().any(|node| node.handle.get() == Some(raw))
    }

    /// Move `id` under `parent` (or to the top level) in the arena
    pub(crate) fn reparent(&mut self, id: WindowId, parent: Option<WindowId>) {
        let Some(previous) = self.windows.get(id).map(|node| node.parent) else {
            return;
        };
        if let Some(old_parent) = previous.upgrade_mut(&mut self.windows) {
            old_parent.children.retain(|child| *child != id);
        }
        if let Some(new_parent) = parent.and_then(|p| self.windows.get_mut(p)) {
            new_parent.children.push(id);
        }
        if let Some(node) = self.windows.get_mut(id) {
            node.parent = parent.map_or_else(WindowRef::none, WindowRef::new);
        }
    }

    /// Tear down one window node
    ///
    /// Children are cleared first, then the node leaves its parent's child
    /// list, then the backend is asked to destroy the handle if the node still
    /// owns one.
    pub(crate) fn destroy(&mut self, id: WindowId) {
        let Some(mut node) = self.windows.remove(id) else {
            return;
        };
        let raw = node.handle.get();
        self.clear_children(raw, std::mem::take(&mut node.children));

        if let Some(parent) = node.parent.upgrade_mut(&mut self.windows) {
            parent.children.retain(|child| *child != id);
        }

        match node.handle.release() {
            Some(raw) => {
                self.backend.destroy_window(raw);
                log::debug!("destroyed window {id:?} ({raw:?})");
            }
            None => log::trace!("window {id:?} released without a backend resource"),
        }
    }

    /// Null the handle of every window the backend will close together with
    /// `root_raw`
    ///
    /// The backend decides what goes: any owned window with `root_raw` among
    /// its backend ancestors. A tree child that is no longer below `root_raw`
    /// on the backend side was detached outside the tree; it keeps its handle,
    /// its own subtree and only loses the parent link.
    fn clear_children(&mut self, root_raw: Option<B::Handle>, children: Vec<WindowId>) {
        let mut closing: HashSet<WindowId> = match root_raw {
            Some(root) => self
                .windows
                .iter()
                .filter(|(_, node)| node.handle.get().is_some_and(|raw| self.closes_with(raw, root)))
                .map(|(id, _)| id)
                .collect(),
            None => HashSet::new(),
        };

        let mut pending = children;
        while let Some(child_id) = pending.pop() {
            let Some(child) = self.windows.get_mut(child_id) else {
                continue;
            };
            child.parent.reset();

            if child.handle.is_null() || closing.remove(&child_id) {
                child.handle.release();
                pending.append(&mut child.children);
                log::trace!("cleared child window {child_id:?}");
            } else {
                log::debug!("window {child_id:?} was detached outside the tree, keeping it open");
            }
        }

        // Windows moved below `root_raw` through the backend directly
        for id in closing {
            if let Some(node) = self.windows.get_mut(id) {
                node.handle.release();
                log::trace!("cleared window {id:?} attached outside the tree");
            }
        }
    }

    fn closes_with(&self, raw: B::Handle, root: B::Handle) -> bool {
        std::iter::successors(self.backend.window_parent(raw), |parent| self.backend.window_parent(*parent))
            .any(|ancestor| ancestor == root)
    }
}

/// Owner of a backend and every window opened through it
///
/// Cloning a `Display` is cheap and yields another handle to the same
/// registry. Windows keep their display alive. Everything here is
/// single-threaded: `Display` and [`Window`] are neither `Send` nor `Sync`.
pub struct Display<B: WindowBackend> {
    shared: Rc<RefCell<Registry<B>>>,
}

impl<B: WindowBackend> Display<B> {
    /// Take ownership of `backend`
    pub fn new(backend: B) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Registry {
                backend,
                windows: SlotMap::with_key(),
            })),
        }
    }

    /// Open a top-level window; see [`Window::new`]
    pub fn create_window(&self, title: &str, width: i32, height: i32, flags: WindowFlags) -> WindowResult<Window<B>> {
        Window::new(self, title, width, height, flags)
    }

    /// Run `f` with direct access to the backend
    ///
    /// # Panics
    /// Panics if called from inside another `with_backend` closure. Windows
    /// dropped inside `f` cannot reach the registry and leak their backend
    /// resource (an error is logged).
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.registry_mut().backend)
    }

    /// Whether `window` refers to a window that still owns its backend resource
    pub fn is_alive(&self, window: WindowRef) -> bool {
        window
            .upgrade(&self.registry().windows)
            .is_some_and(|node| !node.handle.is_null())
    }

    /// Number of windows that still own a backend resource
    pub fn window_count(&self) -> usize {
        self.registry()
            .windows
            .values()
            .filter(|node| !node.handle.is_null())
            .count()
    }

    /// Whether both values are handles to the same registry
    pub fn same_display(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    pub(crate) fn registry(&self) -> Ref<'_, Registry<B>> {
        self.shared.borrow()
    }

    pub(crate) fn registry_mut(&self) -> RefMut<'_, Registry<B>> {
        self.shared.borrow_mut()
    }

    pub(crate) fn try_registry_mut(&self) -> Option<RefMut<'_, Registry<B>>> {
        self.shared.try_borrow_mut().ok()
    }
}

impl<B: WindowBackend> Clone for Display<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<B: WindowBackend> fmt::Debug for Display<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.try_borrow() {
            Ok(registry) => f
                .debug_struct("Display")
                .field("windows", &registry.windows.len())
                .finish(),
            Err(_) => f.write_str("Display(<borrowed>)"),
        }
    }
}
