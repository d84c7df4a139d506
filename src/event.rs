// filepath: src/event.rs
//! Window and keyboard events, and what the demo does about them.

use crate::error::{Error, Result};

/// X11/xkb keysym for Escape.
pub const KEY_ESCAPE: u32 = 0xff1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The compositor gave the window a size (0 means "pick one").
    Configure { width: u32, height: u32 },
    /// The user asked to close the window.
    Close,
}

/// Events fed from the Wayland handlers into the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    Window(WindowEvent),
    Keyboard { keysym: u32, pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Redraw,
    Exit,
}

pub fn dispatch(event: &DemoEvent) -> Control {
    match event {
        DemoEvent::Window(WindowEvent::Close) => Control::Exit,
        DemoEvent::Window(WindowEvent::Configure { .. }) => Control::Redraw,
        DemoEvent::Keyboard {
            keysym: KEY_ESCAPE,
            pressed: true,
        } => Control::Exit,
        DemoEvent::Keyboard { .. } => Control::Continue,
    }
}

/// Whether the event loop should keep running, and why it stopped
#[derive(Debug, Default)]
pub struct LoopState {
    exit: bool,
    failure: Option<Error>,
}

impl LoopState {
    pub fn apply(&mut self, control: Control) {
        if control == Control::Exit {
            self.exit = true;
        }
    }

    /// Stop the loop; the first error wins.
    pub fn fail(&mut self, error: Error) {
        self.failure.get_or_insert(error);
        self.exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Result of the whole run once the loop has stopped.
    pub fn finish(self) -> Result<()> {
        match self.failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_exit_finishes_ok() {
        let mut state = LoopState::default();
        state.apply(dispatch(&DemoEvent::Window(WindowEvent::Configure {
            width: 0,
            height: 0,
        })));
        assert!(!state.should_exit());
        state.apply(dispatch(&DemoEvent::Window(WindowEvent::Close)));
        assert!(state.should_exit());
        assert_eq!(state.finish(), Ok(()));
    }

    #[test]
    fn draw_failure_stops_loop_with_error() {
        let mut state = LoopState::default();
        state.fail(Error::Blit("shm buffer: out of memory".to_string()));
        state.fail(Error::UseAfterFree);
        // a redraw after the failure must not clear it
        state.apply(Control::Redraw);
        assert!(state.should_exit());
        assert_eq!(
            state.finish(),
            Err(Error::Blit("shm buffer: out of memory".to_string()))
        );
    }

    #[test]
    fn close_and_escape_exit() {
        assert_eq!(
            dispatch(&DemoEvent::Window(WindowEvent::Close)),
            Control::Exit
        );
        assert_eq!(
            dispatch(&DemoEvent::Keyboard {
                keysym: KEY_ESCAPE,
                pressed: true
            }),
            Control::Exit
        );
    }

    #[test]
    fn escape_release_and_other_keys_continue() {
        assert_eq!(
            dispatch(&DemoEvent::Keyboard {
                keysym: KEY_ESCAPE,
                pressed: false
            }),
            Control::Continue
        );
        // 'q'
        assert_eq!(
            dispatch(&DemoEvent::Keyboard {
                keysym: 0x71,
                pressed: true
            }),
            Control::Continue
        );
    }

    #[test]
    fn configure_redraws() {
        assert_eq!(
            dispatch(&DemoEvent::Window(WindowEvent::Configure {
                width: 800,
                height: 600
            })),
            Control::Redraw
        );
    }
}
