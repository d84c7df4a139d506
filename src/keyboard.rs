// filepath: src/keyboard.rs
//! Keyboard event handling for surface-stride

use crate::app::AppData;
use log::debug;
use smithay_client_toolkit::seat::keyboard::KeyEvent;
use surface_stride::event::DemoEvent;

pub fn handle_key_event(event: &KeyEvent, pressed: bool, app: &mut AppData) {
    debug!(
        "Key {}: keysym {:?} ({:?})",
        if pressed { "pressed" } else { "released" },
        event.keysym,
        event.utf8
    );
    app.handle_event(DemoEvent::Keyboard {
        keysym: event.keysym.raw(),
        pressed,
    });
}
