//! In-memory window backend
//!
//! `HeadlessBackend` keeps windows as plain records and never touches a
//! display server. It follows the rules a real windowing library enforces
//! (popups need a parent and a popup flag, destroying a window closes its
//! children, invalid handles are reported) so the window tree can be exercised
//! in tests and on machines without a display. Failures can be injected per
//! call name and every explicit destroy call is recorded.

use std::cell::RefCell;
use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

use super::backend::{calls, WindowBackend, WindowFlags};
use crate::config::HeadlessConfig;

new_key_type! {
    /// Handle of a headless window
    pub struct HeadlessWindowId;
}

#[derive(Debug, Clone)]
struct HeadlessWindow {
    title: String,
    size: (i32, i32),
    position: (i32, i32),
    flags: WindowFlags,
    parent: Option<HeadlessWindowId>,
}

/// Backend that simulates windows in memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    config: HeadlessConfig,
    windows: SlotMap<HeadlessWindowId, HeadlessWindow>,
    last_error: RefCell<String>,
    injected: RefCell<HashSet<String>>,
    destroy_calls: Vec<HeadlessWindowId>,
}

impl HeadlessBackend {
    /// Create a backend with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with explicit settings
    pub fn with_config(config: HeadlessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Make the next call named `operation` fail
    ///
    /// Names are the ones in [`calls`], e.g. `calls::SET_WINDOW_TITLE`.
    pub fn fail_next(&self, operation: &str) {
        self.injected.borrow_mut().insert(operation.to_string());
    }

    /// Clear the pending diagnostic
    pub fn clear_error(&self) {
        self.last_error.borrow_mut().clear();
    }

    /// Whether `window` names a window that is currently open
    pub fn is_window(&self, window: HeadlessWindowId) -> bool {
        self.windows.contains_key(window)
    }

    /// Number of open windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Every handle passed to [`WindowBackend::destroy_window`], in call order
    pub fn destroy_calls(&self) -> &[HeadlessWindowId] {
        &self.destroy_calls
    }

    /// Flags a window was created with
    pub fn window_flags(&self, window: HeadlessWindowId) -> Option<WindowFlags> {
        self.windows.get(window).map(|w| w.flags)
    }

    fn injected_failure(&self, operation: &str) -> bool {
        if self.injected.borrow_mut().remove(operation) {
            self.set_error(&format!("Injected failure in {operation}"));
            true
        } else {
            false
        }
    }

    fn lookup(&self, window: HeadlessWindowId) -> Option<&HeadlessWindow> {
        let found = self.windows.get(window);
        if found.is_none() {
            self.set_error("Invalid window");
        }
        found
    }

    fn check_size(&self, width: i32, height: i32) -> bool {
        if width <= 0 || height <= 0 {
            self.set_error(&format!("Invalid window size {width}x{height}"));
            return false;
        }
        true
    }

    fn is_descendant(&self, window: HeadlessWindowId, ancestor: HeadlessWindowId) -> bool {
        let mut current = self.windows.get(window).and_then(|w| w.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.windows.get(id).and_then(|w| w.parent);
        }
        false
    }

    fn subtree(&self, root: HeadlessWindowId) -> Vec<HeadlessWindowId> {
        let mut found = vec![root];
        let mut index = 0;
        while index < found.len() {
            let parent = found[index];
            found.extend(
                self.windows
                    .iter()
                    .filter(|(_, w)| w.parent == Some(parent))
                    .map(|(id, _)| id),
            );
            index += 1;
        }
        found
    }
}

impl WindowBackend for HeadlessBackend {
    type Handle = HeadlessWindowId;

    fn create_window(&mut self, title: &str, width: i32, height: i32, flags: WindowFlags) -> Option<Self::Handle> {
        if self.injected_failure(calls::CREATE_WINDOW) || !self.check_size(width, height) {
            return None;
        }
        if flags.intersects(WindowFlags::TOOLTIP | WindowFlags::POPUP_MENU) {
            self.set_error("Tooltip and popup menu windows need a parent");
            return None;
        }
        Some(self.windows.insert(HeadlessWindow {
            title: title.to_string(),
            size: (width, height),
            position: self.config.default_position,
            flags,
            parent: None,
        }))
    }

    fn create_popup_window(
        &mut self,
        parent: Self::Handle,
        offset_x: i32,
        offset_y: i32,
        width: i32,
        height: i32,
        flags: WindowFlags,
    ) -> Option<Self::Handle> {
        if self.injected_failure(calls::CREATE_POPUP_WINDOW) || !self.check_size(width, height) {
            return None;
        }
        let (px, py) = self.lookup(parent)?.position;
        if !flags.intersects(WindowFlags::TOOLTIP | WindowFlags::POPUP_MENU) {
            self.set_error("Popup windows must specify either the TOOLTIP or the POPUP_MENU flag");
            return None;
        }
        Some(self.windows.insert(HeadlessWindow {
            title: String::new(),
            size: (width, height),
            position: (px.wrapping_add(offset_x), py.wrapping_add(offset_y)),
            flags,
            parent: Some(parent),
        }))
    }

    fn destroy_window(&mut self, window: Self::Handle) {
        if self.lookup(window).is_none() {
            log::warn!("destroy requested for unknown headless window {window:?}");
            return;
        }
        self.destroy_calls.push(window);
        for id in self.subtree(window) {
            self.windows.remove(id);
        }
    }

    fn window_size(&self, window: Self::Handle) -> Option<(i32, i32)> {
        if self.injected_failure(calls::GET_WINDOW_SIZE) {
            return None;
        }
        self.lookup(window).map(|w| w.size)
    }

    fn window_size_in_pixels(&self, window: Self::Handle) -> Option<(i32, i32)> {
        if self.injected_failure(calls::GET_WINDOW_SIZE_IN_PIXELS) {
            return None;
        }
        let density = self.config.pixel_density;
        self.lookup(window).map(|w| {
            if w.flags.contains(WindowFlags::HIGH_PIXEL_DENSITY) {
                (w.size.0.saturating_mul(density), w.size.1.saturating_mul(density))
            } else {
                w.size
            }
        })
    }

    fn window_title(&self, window: Self::Handle) -> Option<String> {
        if self.injected_failure(calls::GET_WINDOW_TITLE) {
            return None;
        }
        self.lookup(window).map(|w| w.title.clone())
    }

    fn set_window_title(&mut self, window: Self::Handle, title: &str) -> bool {
        if self.injected_failure(calls::SET_WINDOW_TITLE) || self.lookup(window).is_none() {
            return false;
        }
        if let Some(record) = self.windows.get_mut(window) {
            record.title = title.to_string();
        }
        true
    }

    fn window_parent(&self, window: Self::Handle) -> Option<Self::Handle> {
        self.lookup(window)?.parent
    }

    fn set_window_parent(&mut self, window: Self::Handle, parent: Option<Self::Handle>) -> bool {
        if self.injected_failure(calls::SET_WINDOW_PARENT) || self.lookup(window).is_none() {
            return false;
        }
        if let Some(parent) = parent {
            if self.lookup(parent).is_none() {
                return false;
            }
            if parent == window || self.is_descendant(parent, window) {
                self.set_error("A window cannot be parented to itself or one of its descendants");
                return false;
            }
        }
        if let Some(record) = self.windows.get_mut(window) {
            record.parent = parent;
        }
        true
    }

    fn window_position(&self, window: Self::Handle) -> Option<(i32, i32)> {
        if self.injected_failure(calls::GET_WINDOW_POSITION) {
            return None;
        }
        self.lookup(window).map(|w| w.position)
    }

    fn last_error(&self) -> String {
        self.last_error.borrow().clone()
    }

    fn set_error(&self, message: &str) {
        *self.last_error.borrow_mut() = message.to_string();
    }
}
