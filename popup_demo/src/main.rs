//! Popup demo application
//!
//! Opens a main window with a tooltip and a popup menu, prints a few geometry
//! results, then closes the main window first to show that its popups are
//! torn down along with it. Runs headless unless built with `--features glfw`.
//!
//! Usage: `popup_demo [window.toml | window.ron]`

use thiserror::Error;
use winframe::foundation::logging;
use winframe::prelude::*;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("could not load window settings: {0}")]
    Config(#[from] ConfigError),
}

fn geometry_tour() {
    let rect = Rect::new(0, 0, 100, 100);
    let inverted = Rect::new(99, 100, -20, -20);

    let a = Point::new(10, 20);
    let c = a + (10, 20);

    println!("{c}");
    println!("{}", rect.intersects(&inverted));
    println!("{}", inverted.width());

    let (mut p1, mut p2) = (Point::new(-50, 50), Point::new(150, 50));
    if rect.intersect_line_points(&mut p1, &mut p2) {
        println!("clipped {p1} - {p2} to {rect}");
    }
}

fn run<B: WindowBackend>(
    display: &Display<B>,
    config: &WindowConfig,
    hold: impl FnOnce(&Display<B>, &Window<B>),
) -> Result<(), DemoError> {
    let main = Window::from_config(display, config)?;
    let (width, height) = main.size()?;
    log::info!("main window \"{}\" is {width}x{height}", main.title()?);

    let tooltip = Window::popup(&main, 20, 20, 120, 24, WindowFlags::TOOLTIP)?;
    let menu = Window::popup(&main, width / 2, height / 2, 160, 200, WindowFlags::POPUP_MENU)?;
    log::info!(
        "popups at {} and {}, main has {} children",
        tooltip.position()?,
        menu.position()?,
        main.children().len()
    );

    let screen = Rect::with_size(main.position()?, (width, height));
    let menu_rect = Rect::with_size(menu.position()?, menu.size()?);
    match screen.get_intersection(&menu_rect) {
        Some(visible) => log::info!("visible part of the menu: {visible}"),
        None => log::warn!("menu opened off screen"),
    }

    hold(display, &main);
    drop(main);
    log::info!(
        "main closed: tooltip released {}, menu released {}, {} windows left",
        tooltip.is_released(),
        menu.is_released(),
        display.window_count()
    );
    Ok(())
}

fn load_config() -> Result<WindowConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading window settings from {path}");
            Ok(WindowConfig::load_from_file(path)?)
        }
        None => Ok(WindowConfig {
            title: "Arch BTW".to_string(),
            width: 500,
            height: 400,
            ..WindowConfig::default()
        }),
    }
}

#[cfg(feature = "glfw")]
fn open_display() -> Result<Display<winframe::window::GlfwBackend>, DemoError> {
    Ok(Display::new(winframe::window::GlfwBackend::new()?))
}

/// Keep the windows on screen until the user closes the main one
#[cfg(feature = "glfw")]
fn hold(display: &Display<winframe::window::GlfwBackend>, main: &Window<winframe::window::GlfwBackend>) {
    let Some(raw) = main.raw_handle() else {
        return;
    };
    log::info!("close the main window to continue");
    while !display.with_backend(|backend| {
        backend.poll_events();
        backend.should_close(raw)
    }) {
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
}

#[cfg(not(feature = "glfw"))]
fn open_display() -> Result<Display<HeadlessBackend>, DemoError> {
    Ok(Display::new(HeadlessBackend::new()))
}

#[cfg(not(feature = "glfw"))]
const fn hold(_display: &Display<HeadlessBackend>, _main: &Window<HeadlessBackend>) {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");
    log::info!("Starting popup demo");

    geometry_tour();

    let config = load_config()?;
    let display = open_display()?;
    if let Err(e) = run(&display, &config, hold) {
        log::error!("Demo failed: {e}");
        return Err(e.into());
    }

    log::info!("Popup demo finished successfully");
    Ok(())
}
