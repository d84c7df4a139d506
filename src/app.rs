// filepath: src/app.rs
//! Main application state for surface-stride

use log::{debug, info};
use smithay_client_toolkit::{
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{xdg::window::Window, WaylandSurface},
    shm::{
        slot::{Buffer, SlotPool},
        Shm,
    },
};
use surface_stride::{
    config::WindowConfig,
    draw::{self, Canvas, ShmGeometry},
    event::{dispatch, Control, DemoEvent, LoopState, WindowEvent},
    Error, Surface,
};
use wayland_client::protocol::{wl_keyboard, wl_shm};

pub struct AppData {
    registry_state: RegistryState,
    output_state: OutputState,
    seat_state: SeatState,
    shm_state: Shm,
    window: Window,
    pool: SlotPool,
    buffer: Option<Buffer>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    keyboard: Option<wl_keyboard::WlKeyboard>,
    config: WindowConfig,
    surface: Surface,
    pub(crate) state: LoopState,
}

impl AppData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry_state: RegistryState,
        output_state: OutputState,
        seat_state: SeatState,
        shm_state: Shm,
        window: Window,
        pool: SlotPool,
        config: WindowConfig,
        surface: Surface,
    ) -> Self {
        Self {
            registry_state,
            output_state,
            seat_state,
            shm_state,
            window,
            pool,
            buffer: None,
            width: config.width,
            height: config.height,
            keyboard: None,
            config,
            surface,
            state: LoopState::default(),
        }
    }

    /// Route a translated Wayland event through the demo's dispatch rules
    pub fn handle_event(&mut self, event: DemoEvent) {
        debug!("AppData::handle_event: {:?}", event);
        let control = dispatch(&event);
        match control {
            Control::Continue => {}
            Control::Redraw => {
                if let DemoEvent::Window(WindowEvent::Configure { width, height }) = event {
                    self.update_size(width, height);
                }
                if let Err(e) = self.draw() {
                    log::error!("Failed to draw window: {e}");
                    self.state.fail(e);
                }
            }
            Control::Exit => info!("Exit requested"),
        }
        self.state.apply(control);
    }

    /// Zero means the compositor left the choice to us
    pub fn update_size(&mut self, width: u32, height: u32) {
        self.width = if width == 0 { self.config.width } else { width };
        self.height = if height == 0 {
            self.config.height
        } else {
            height
        };
    }

    /// Blit the surface into a fresh shm buffer and present it
    pub fn draw(&mut self) -> Result<(), Error> {
        let width = self.width;
        let height = self.height;
        info!("Drawing window {}x{}", width, height);

        let geometry = ShmGeometry::new(width, height)?;

        let (buffer, pixels) = self
            .pool
            .create_buffer(
                geometry.width,
                geometry.height,
                geometry.stride,
                wl_shm::Format::Argb8888,
            )
            .map_err(|e| Error::Blit(format!("shm buffer: {e}")))?;

        let mut canvas = Canvas::new(pixels, width, height, geometry.stride as usize)?;
        canvas.fill(self.config.background_color);
        draw::blit_scaled(&self.surface, &mut canvas)?;

        let wl_surface = self.window.wl_surface();
        wl_surface.damage_buffer(0, 0, geometry.width, geometry.height);
        buffer
            .attach_to(wl_surface)
            .map_err(|e| Error::Blit(format!("attach: {e:?}")))?;
        self.window.commit();
        self.buffer = Some(buffer);

        Ok(())
    }

    /// Free the off-screen surface. Safe to call more than once.
    pub fn release(&mut self) {
        if self.surface.release() {
            info!("Surface released");
        }
    }

    pub fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    pub fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm_state
    }

    pub fn set_keyboard(&mut self, keyboard: Option<wl_keyboard::WlKeyboard>) {
        if let Some(old) = self.keyboard.take() {
            old.release();
        }
        self.keyboard = keyboard;
        info!("Keyboard set: {:?}", self.keyboard.is_some());
    }
}
