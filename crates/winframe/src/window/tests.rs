use super::*;
use crate::config::{HeadlessConfig, WindowConfig};

fn display() -> Display<HeadlessBackend> {
    Display::new(HeadlessBackend::new())
}

fn popup(parent: &Window<HeadlessBackend>) -> Window<HeadlessBackend> {
    Window::popup(parent, 50, 50, 100, 100, WindowFlags::TOOLTIP).unwrap()
}

fn destroy_calls(display: &Display<HeadlessBackend>) -> Vec<HeadlessWindowId> {
    display.with_backend(|backend| backend.destroy_calls().to_vec())
}

#[test]
fn test_create_and_query() {
    let display = display();
    let mut window = display.create_window("Arch BTW", 500, 400, WindowFlags::empty()).unwrap();

    assert!(!window.is_released());
    assert_eq!(window.size().unwrap(), (500, 400));
    assert_eq!(window.width().unwrap(), 500);
    assert_eq!(window.height().unwrap(), 400);
    assert_eq!(window.title().unwrap(), "Arch BTW");
    assert!(window.parent().is_none());
    assert!(window.children().is_empty());

    window.set_title("renamed").unwrap();
    assert_eq!(window.title().unwrap(), "renamed");
}

#[test]
fn test_create_failure_carries_diagnostic() {
    let display = display();
    let error = display.create_window("bad", 0, 10, WindowFlags::empty()).unwrap_err();

    assert_eq!(error.operation(), calls::CREATE_WINDOW);
    assert!(error.diagnostic().contains("0x10"));
    assert_eq!(display.window_count(), 0);
}

#[test]
fn test_popup_is_attached_to_parent() {
    let display = display();
    let main = display.create_window("main", 500, 400, WindowFlags::empty()).unwrap();
    let tip = popup(&main);

    assert_eq!(tip.parent(), main.downgrade());
    assert_eq!(main.children(), vec![tip.downgrade()]);
    assert_eq!(tip.position().unwrap(), crate::Point::new(50, 50));
}

#[test]
fn test_popup_without_flag_fails() {
    let display = display();
    let main = display.create_window("main", 500, 400, WindowFlags::empty()).unwrap();
    let error = Window::popup(&main, 0, 0, 10, 10, WindowFlags::empty()).unwrap_err();

    assert_eq!(error.operation(), calls::CREATE_POPUP_WINDOW);
    assert!(error.diagnostic().contains("POPUP_MENU"));
    assert!(main.children().is_empty());
}

#[test]
fn test_parent_dropped_before_child() {
    let display = display();
    let main = display.create_window("main", 500, 400, WindowFlags::empty()).unwrap();
    let main_raw = main.raw_handle().unwrap();
    let tip = popup(&main);
    let tip_ref = tip.downgrade();

    drop(main);

    assert!(tip.is_released());
    assert!(!display.is_alive(tip_ref));
    assert!(tip.parent().is_none());
    assert_eq!(tip.size().unwrap_err().diagnostic(), "Invalid window");

    drop(tip);
    assert_eq!(destroy_calls(&display), vec![main_raw]);
    assert_eq!(display.window_count(), 0);
}

#[test]
fn test_child_dropped_before_parent() {
    let display = display();
    let main = display.create_window("main", 500, 400, WindowFlags::empty()).unwrap();
    let tip = popup(&main);
    let tip_raw = tip.raw_handle().unwrap();
    let main_raw = main.raw_handle().unwrap();

    drop(tip);
    assert!(main.children().is_empty());

    drop(main);
    assert_eq!(destroy_calls(&display), vec![tip_raw, main_raw]);
}

#[test]
fn test_grandchildren_released_with_root() {
    let display = display();
    let root = display.create_window("root", 300, 300, WindowFlags::empty()).unwrap();
    let child = popup(&root);
    let grandchild = popup(&child);

    drop(root);

    assert!(child.is_released());
    assert!(grandchild.is_released());
    assert_eq!(destroy_calls(&display).len(), 1);
}

#[test]
fn test_take_leaves_source_released() {
    let display = display();
    let mut main = display.create_window("main", 500, 400, WindowFlags::empty()).unwrap();
    let tip = popup(&main);
    let identity = main.downgrade();

    let moved = main.take();

    assert!(main.is_released());
    assert!(main.downgrade().is_none());
    assert!(main.children().is_empty());
    assert_eq!(moved.downgrade(), identity);
    assert_eq!(tip.parent(), identity);
    assert_eq!(moved.children(), vec![tip.downgrade()]);

    drop(main);
    assert!(destroy_calls(&display).is_empty());
    assert!(!tip.is_released());
}

#[test]
fn test_assignment_destroys_previous_window() {
    let display = display();
    let mut slot = display.create_window("first", 10, 10, WindowFlags::empty()).unwrap();
    let first_raw = slot.raw_handle().unwrap();

    slot = display.create_window("second", 10, 10, WindowFlags::empty()).unwrap();

    assert_eq!(destroy_calls(&display), vec![first_raw]);
    assert_eq!(slot.title().unwrap(), "second");
    assert_eq!(display.window_count(), 1);
}

#[test]
fn test_set_parent_moves_between_children() {
    let display = display();
    let a = display.create_window("a", 100, 100, WindowFlags::empty()).unwrap();
    let b = display.create_window("b", 100, 100, WindowFlags::empty()).unwrap();
    let mut tip = popup(&a);

    tip.set_parent(&b).unwrap();

    assert!(a.children().is_empty());
    assert_eq!(b.children(), vec![tip.downgrade()]);
    assert_eq!(tip.parent(), b.downgrade());

    tip.detach_from_parent().unwrap();
    assert!(b.children().is_empty());
    assert!(tip.parent().is_none());
}

#[test]
fn test_set_parent_failure_leaves_tree_unchanged() {
    let display = display();
    let a = display.create_window("a", 100, 100, WindowFlags::empty()).unwrap();
    let b = display.create_window("b", 100, 100, WindowFlags::empty()).unwrap();
    let mut tip = popup(&a);

    display.with_backend(|backend| backend.fail_next(calls::SET_WINDOW_PARENT));
    let error = tip.set_parent(&b).unwrap_err();

    assert_eq!(error.operation(), calls::SET_WINDOW_PARENT);
    assert!(error.diagnostic().contains("Injected failure"));
    assert_eq!(a.children(), vec![tip.downgrade()]);
    assert!(b.children().is_empty());
    assert_eq!(tip.parent(), a.downgrade());
}

#[test]
fn test_set_parent_rejects_cycle() {
    let display = display();
    let mut a = display.create_window("a", 100, 100, WindowFlags::empty()).unwrap();
    let tip = popup(&a);

    assert!(a.set_parent(&tip).is_err());
    assert!(a.parent().is_none());
    assert_eq!(a.children(), vec![tip.downgrade()]);
}

#[test]
fn test_set_parent_across_displays() {
    let first = display();
    let second = display();
    let mut a = first.create_window("a", 10, 10, WindowFlags::empty()).unwrap();
    let b = second.create_window("b", 10, 10, WindowFlags::empty()).unwrap();

    let error = a.set_parent(&b).unwrap_err();
    assert!(error.diagnostic().contains("different displays"));
    assert!(a.parent().is_none());
}

#[test]
fn test_failed_title_change_keeps_title() {
    let display = display();
    let mut window = display.create_window("kept", 10, 10, WindowFlags::empty()).unwrap();

    display.with_backend(|backend| backend.fail_next(calls::SET_WINDOW_TITLE));
    let error = window.set_title("lost").unwrap_err();

    assert_eq!(error.to_string(), "set_window_title failed: Injected failure in set_window_title");
    assert_eq!(window.title().unwrap(), "kept");
}

#[test]
fn test_external_detach_survives_parent_drop() {
    let display = display();
    let main = display.create_window("main", 100, 100, WindowFlags::empty()).unwrap();
    let tip = popup(&main);
    let tip_raw = tip.raw_handle().unwrap();

    display.with_backend(|backend| assert!(backend.set_window_parent(tip_raw, None)));
    assert!(tip.parent().is_none());

    drop(main);

    assert!(!tip.is_released());
    assert_eq!(tip.size().unwrap(), (100, 100));
    drop(tip);
    assert_eq!(destroy_calls(&display).last(), Some(&tip_raw));
}

#[test]
fn test_queries_on_released_window() {
    let display = display();
    let mut window = display.create_window("w", 10, 10, WindowFlags::empty()).unwrap();
    let _owner = window.take();

    let error = window.title().unwrap_err();
    assert_eq!(error.operation(), calls::GET_WINDOW_TITLE);
    assert_eq!(error.diagnostic(), "Invalid window");
    assert!(window.set_title("x").is_err());
    assert!(window.position().is_err());
    assert!(Window::popup(&window, 0, 0, 5, 5, WindowFlags::TOOLTIP).is_err());
}

#[test]
fn test_size_in_pixels() {
    let display = Display::new(HeadlessBackend::with_config(HeadlessConfig {
        pixel_density: 2,
        ..HeadlessConfig::default()
    }));
    let window = display
        .create_window("hi", 320, 240, WindowFlags::HIGH_PIXEL_DENSITY)
        .unwrap();

    assert_eq!(window.size_in_pixels().unwrap(), (640, 480));
    assert_eq!(window.width_in_pixels().unwrap(), 640);
    assert_eq!(window.height_in_pixels().unwrap(), 480);
    assert_eq!(window.size().unwrap(), (320, 240));
}

#[test]
fn test_from_config() {
    let display = display();
    let config = WindowConfig {
        title: "configured".to_string(),
        width: 640,
        height: 360,
        flags: WindowFlags::RESIZABLE.bits(),
    };
    let window = Window::from_config(&display, &config).unwrap();
    let raw = window.raw_handle().unwrap();

    assert_eq!(window.title().unwrap(), "configured");
    assert_eq!(window.size().unwrap(), (640, 360));
    assert_eq!(
        display.with_backend(|backend| backend.window_flags(raw)),
        Some(WindowFlags::RESIZABLE)
    );
}

#[test]
fn test_from_raw_adopts_once() {
    let display = display();
    let raw = display
        .with_backend(|backend| backend.create_window("foreign", 20, 20, WindowFlags::empty()))
        .unwrap();

    let adopted = Window::from_raw(&display, raw).unwrap();
    assert_eq!(adopted.title().unwrap(), "foreign");

    let error = Window::from_raw(&display, raw).unwrap_err();
    assert_eq!(error.operation(), calls::ADOPT_WINDOW);

    drop(adopted);
    assert_eq!(destroy_calls(&display), vec![raw]);
}

#[test]
fn test_no_double_destroy() {
    let display = display();
    let root = display.create_window("root", 100, 100, WindowFlags::empty()).unwrap();
    let popups: Vec<_> = (0..4).map(|_| popup(&root)).collect();

    drop(root);
    drop(popups);

    assert_eq!(destroy_calls(&display).len(), 1);
    assert_eq!(display.with_backend(|backend| backend.window_count()), 0);
}

#[test]
fn test_sibling_reparent_outside_tree_closes_with_root() {
    let display = display();
    let root = display.create_window("root", 200, 200, WindowFlags::empty()).unwrap();
    let root_raw = root.raw_handle().unwrap();
    let first = popup(&root);
    let second = popup(&root);
    let (first_raw, second_raw) = (first.raw_handle().unwrap(), second.raw_handle().unwrap());

    display.with_backend(|backend| assert!(backend.set_window_parent(second_raw, Some(first_raw))));
    drop(root);

    assert!(first.is_released());
    assert!(second.is_released());
    drop(second);
    drop(first);
    assert_eq!(destroy_calls(&display), vec![root_raw]);
}

#[test]
fn test_window_attached_outside_tree_closes_with_root() {
    let display = display();
    let root = display.create_window("root", 200, 200, WindowFlags::empty()).unwrap();
    let root_raw = root.raw_handle().unwrap();
    let stray = display.create_window("stray", 50, 50, WindowFlags::empty()).unwrap();
    let stray_raw = stray.raw_handle().unwrap();

    display.with_backend(|backend| assert!(backend.set_window_parent(stray_raw, Some(root_raw))));
    assert!(root.children().is_empty());
    drop(root);

    assert!(stray.is_released());
    drop(stray);
    assert_eq!(destroy_calls(&display), vec![root_raw]);
}
