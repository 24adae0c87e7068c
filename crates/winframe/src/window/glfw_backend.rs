//! Window backend using GLFW
//!
//! GLFW has no native notion of child windows, so parent links and titles are
//! tracked here. Popups are undecorated floating windows placed relative to
//! their parent, and closing a window closes everything below it.

use std::cell::RefCell;

use slotmap::{new_key_type, SlotMap};

use super::backend::{WindowBackend, WindowFlags};
use crate::error::{BackendError, WindowResult};

new_key_type! {
    /// Handle of a GLFW window
    pub struct GlfwWindowId;
}

struct GlfwWindow {
    window: glfw::PWindow,
    // Kept so the event queue lives as long as the window
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    parent: Option<GlfwWindowId>,
}

/// Backend that opens real desktop windows through GLFW
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    windows: SlotMap<GlfwWindowId, GlfwWindow>,
    last_error: RefCell<String>,
}

impl GlfwBackend {
    /// Initialise GLFW
    ///
    /// # Errors
    /// Fails with an `init` error if GLFW cannot start, e.g. without a display
    /// server.
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| BackendError::new("init", format!("GLFW initialization failed: {e:?}")))?;
        log::info!("GLFW initialized");

        Ok(Self {
            glfw,
            windows: SlotMap::with_key(),
            last_error: RefCell::new(String::new()),
        })
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Whether the user asked to close `window`
    pub fn should_close(&self, window: GlfwWindowId) -> bool {
        self.windows.get(window).map_or(true, |w| w.window.should_close())
    }

    fn open(
        &mut self,
        title: &str,
        width: i32,
        height: i32,
        flags: WindowFlags,
        popup: bool,
    ) -> Option<(glfw::PWindow, glfw::GlfwReceiver<(f64, glfw::WindowEvent)>)> {
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            self.set_error(&format!("Invalid window size {width}x{height}"));
            return None;
        };
        if w == 0 || h == 0 {
            self.set_error(&format!("Invalid window size {width}x{height}"));
            return None;
        }

        self.glfw.default_window_hints();
        self.glfw
            .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw
            .window_hint(glfw::WindowHint::Visible(!flags.contains(WindowFlags::HIDDEN)));
        self.glfw
            .window_hint(glfw::WindowHint::Resizable(flags.contains(WindowFlags::RESIZABLE)));
        self.glfw.window_hint(glfw::WindowHint::Decorated(
            !popup && !flags.contains(WindowFlags::BORDERLESS),
        ));
        self.glfw.window_hint(glfw::WindowHint::Floating(
            popup || flags.contains(WindowFlags::ALWAYS_ON_TOP),
        ));
        self.glfw.window_hint(glfw::WindowHint::ScaleToMonitor(
            flags.contains(WindowFlags::HIGH_PIXEL_DENSITY),
        ));

        let created = self.glfw.create_window(w, h, title, glfw::WindowMode::Windowed);
        if created.is_none() {
            self.set_error("GLFW could not create the window");
        }
        created
    }

    fn lookup(&self, window: GlfwWindowId) -> Option<&GlfwWindow> {
        let found = self.windows.get(window);
        if found.is_none() {
            self.set_error("Invalid window");
        }
        found
    }
}

impl WindowBackend for GlfwBackend {
    type Handle = GlfwWindowId;

    fn create_window(&mut self, title: &str, width: i32, height: i32, flags: WindowFlags) -> Option<Self::Handle> {
        if flags.intersects(WindowFlags::TOOLTIP | WindowFlags::POPUP_MENU) {
            self.set_error("Tooltip and popup menu windows need a parent");
            return None;
        }
        let (window, events) = self.open(title, width, height, flags, false)?;
        Some(self.windows.insert(GlfwWindow {
            window,
            _events: events,
            title: title.to_string(),
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
        if !flags.intersects(WindowFlags::TOOLTIP | WindowFlags::POPUP_MENU) {
            self.set_error("Popup windows must specify either the TOOLTIP or the POPUP_MENU flag");
            return None;
        }
        let (px, py) = self.lookup(parent)?.window.get_pos();
        let (mut window, events) = self.open("", width, height, flags, true)?;
        window.set_pos(px.wrapping_add(offset_x), py.wrapping_add(offset_y));

        Some(self.windows.insert(GlfwWindow {
            window,
            _events: events,
            title: String::new(),
            parent: Some(parent),
        }))
    }

    fn destroy_window(&mut self, window: Self::Handle) {
        if self.lookup(window).is_none() {
            log::warn!("destroy requested for unknown GLFW window {window:?}");
            return;
        }
        let mut doomed = vec![window];
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index];
            doomed.extend(
                self.windows
                    .iter()
                    .filter(|(_, w)| w.parent == Some(parent))
                    .map(|(id, _)| id),
            );
            index += 1;
        }
        // Children first so no window outlives the one it is attached to
        for id in doomed.into_iter().rev() {
            self.windows.remove(id);
        }
    }

    fn window_size(&self, window: Self::Handle) -> Option<(i32, i32)> {
        self.lookup(window).map(|w| w.window.get_size())
    }

    fn window_size_in_pixels(&self, window: Self::Handle) -> Option<(i32, i32)> {
        self.lookup(window).map(|w| w.window.get_framebuffer_size())
    }

    fn window_title(&self, window: Self::Handle) -> Option<String> {
        self.lookup(window).map(|w| w.title.clone())
    }

    fn set_window_title(&mut self, window: Self::Handle, title: &str) -> bool {
        if self.lookup(window).is_none() {
            return false;
        }
        if let Some(record) = self.windows.get_mut(window) {
            record.window.set_title(title);
            record.title = title.to_string();
        }
        true
    }

    fn window_parent(&self, window: Self::Handle) -> Option<Self::Handle> {
        self.lookup(window)?.parent
    }

    fn set_window_parent(&mut self, window: Self::Handle, parent: Option<Self::Handle>) -> bool {
        if self.lookup(window).is_none() {
            return false;
        }
        if let Some(parent) = parent {
            if self.lookup(parent).is_none() {
                return false;
            }
            let mut current = Some(parent);
            while let Some(id) = current {
                if id == window {
                    self.set_error("A window cannot be parented to itself or one of its descendants");
                    return false;
                }
                current = self.windows.get(id).and_then(|w| w.parent);
            }
        }
        if let Some(record) = self.windows.get_mut(window) {
            record.parent = parent;
        }
        true
    }

    fn window_position(&self, window: Self::Handle) -> Option<(i32, i32)> {
        self.lookup(window).map(|w| w.window.get_pos())
    }

    fn last_error(&self) -> String {
        self.last_error.borrow().clone()
    }

    fn set_error(&self, message: &str) {
        *self.last_error.borrow_mut() = message.to_string();
    }
}
