// filepath: src/main.rs

mod app;
mod keyboard;
mod wayland;

use app::AppData;
use calloop::EventLoop;
use calloop_wayland_source::WaylandSource;
use log::{error, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        xdg::{window::WindowDecorations, XdgShell},
        WaylandSurface,
    },
    shm::{slot::SlotPool, Shm},
};
use surface_stride::{config::DemoConfig, demo, draw::ShmGeometry, Error, Surface};
use wayland_client::{globals::registry_queue_init, Connection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting surface-stride");

    let config = DemoConfig::load_from_file().unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {e}");
        DemoConfig::default()
    });
    info!("Configuration loaded");

    run(config).map_err(|e| {
        error!("surface-stride failed: {e}");
        e
    })
}

fn run(config: DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sc = &config.surface;
    let mut surface = Surface::create(sc.width, sc.height, sc.bits_per_pixel, sc.format)?;
    surface.set_length_model(sc.length_model);
    info!(
        "Surface {}x{} {}: pitch {}, true length {}, naive length {}",
        surface.width(),
        surface.height(),
        surface.format(),
        surface.pitch(),
        surface.true_len()?,
        surface.naive_len()?
    );

    let report = demo::mark(&mut surface, sc.target, sc.marker)?;
    if report.landed_on_intended() {
        info!("Marker {:#04x} written at {}", sc.marker, report);
    } else {
        warn!("Marker {:#04x} missed its pixel: {}", sc.marker, report);
    }

    // Everything below only puts the surface on screen.
    let conn = Connection::connect_to_env().map_err(|e| Error::WindowCreation(e.to_string()))?;
    let (globals, event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(&globals, &qh)
        .map_err(|e| Error::WindowCreation(format!("wl_compositor: {e}")))?;
    let xdg_shell = XdgShell::bind(&globals, &qh)
        .map_err(|e| Error::WindowCreation(format!("xdg_wm_base: {e}")))?;
    let shm =
        Shm::bind(&globals, &qh).map_err(|e| Error::WindowCreation(format!("wl_shm: {e}")))?;

    let geometry = ShmGeometry::new(config.window.width, config.window.height)
        .map_err(|e| Error::WindowCreation(e.to_string()))?;
    let pool = SlotPool::new(geometry.bytes, &shm)?;

    let wl_surface = compositor.create_surface(&qh);
    let window = xdg_shell.create_window(wl_surface, WindowDecorations::RequestServer, &qh);
    window.set_title(config.window.title.clone());
    window.set_app_id("surface-stride");
    window.set_min_size(Some((sc.width, sc.height)));
    window.commit();

    let mut app_data = AppData::new(
        RegistryState::new(&globals),
        OutputState::new(&globals, &qh),
        SeatState::new(&globals, &qh),
        shm,
        window,
        pool,
        config.window.clone(),
        surface,
    );

    let mut event_loop: EventLoop<AppData> = EventLoop::try_new()?;
    WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|e| e.error)?;

    info!("Entering event loop");
    while !app_data.state.should_exit() {
        // Blocks until the compositor sends something
        event_loop.dispatch(None, &mut app_data)?;
    }

    app_data.release();
    std::mem::take(&mut app_data.state).finish()?;
    info!("Window closed, exiting");
    Ok(())
}
