use std::collections::HashSet;
use winit::keyboard::KeyCode;
use log::debug;

/// Actions sampled once per simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Newly pressed this tick; holding the key does not auto-fire.
    pub fire: bool,
    pub confirm: bool,
    pub back: bool,
    pub toggle_fps: bool,
}

impl FrameInput {
    /// Horizontal direction: -1, 0 or 1. Opposite keys cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Default)]
pub struct InputHandler {
    pressed_keys: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard_input_event(
        &mut self,
        keycode: KeyCode,
        pressed: bool,
    ) {
        if pressed {
            // OS key repeat arrives as further presses of a held key.
            if self.pressed_keys.insert(keycode) {
                self.just_pressed.insert(keycode);
            }
        } else {
            self.pressed_keys.remove(&keycode);
        }
    }

    pub fn snapshot(&self) -> FrameInput {
        use KeyCode::*;
        let held = |keys: &[KeyCode]| keys.iter().any(|k| self.pressed_keys.contains(k));
        let tapped = |key: KeyCode| self.just_pressed.contains(&key);

        FrameInput {
            left: held(&[ArrowLeft, KeyA]),
            right: held(&[ArrowRight, KeyD]),
            fire: tapped(Space),
            confirm: tapped(Space) || tapped(Enter),
            back: tapped(Escape),
            toggle_fps: tapped(F3),
        }
    }

    /// Forgets presses already delivered to a tick.
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }

    pub fn handle_window_focus(&mut self, focused: bool) {
        if !focused {
            self.pressed_keys.clear();
            self.just_pressed.clear();
            debug!("Window unfocused, released all keys");
        }
    }
}
