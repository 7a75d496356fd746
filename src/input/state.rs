//! Input state management
//!
//! Polls keyboard and mouse once per frame and folds them into a plain
//! `FrameInput` value that the game update consumes.

use macroquad::prelude::*;

use super::{Action, Binding};
use crate::game::combat::{CombatInput, WeaponKind};
use crate::game::player::PlayerInput;
use crate::game::runtime::FrameInput;

/// Keyboard/mouse poller
pub struct InputState {
    cursor_grabbed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { cursor_grabbed: false }
    }

    /// Lock and hide the cursor for mouse look (or release it)
    pub fn set_grab(&mut self, grab: bool) {
        if grab != self.cursor_grabbed {
            set_cursor_grab(grab);
            show_mouse(!grab);
            self.cursor_grabbed = grab;
        }
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        match action.binding() {
            Binding::Key(key) => is_key_down(key),
            Binding::Mouse(button) => is_mouse_button_down(button),
        }
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        match action.binding() {
            Binding::Key(key) => is_key_pressed(key),
            Binding::Mouse(button) => is_mouse_button_pressed(button),
        }
    }

    /// Mouse movement since last frame in pixels (right and down positive).
    /// Zero while the cursor is free so menus don't spin the camera.
    pub fn look_delta(&self) -> Vec2 {
        if !self.cursor_grabbed {
            return Vec2::ZERO;
        }
        // macroquad reports previous - current in [-1, 1] screen space
        let delta = mouse_delta_position();
        vec2(-delta.x * screen_width() / 2.0, -delta.y * screen_height() / 2.0)
    }

    /// Read every device once and build this frame's input
    pub fn poll(&self) -> FrameInput {
        let select = Action::ALL
            .iter()
            .filter(|a| self.action_pressed(**a))
            .find_map(|a| a.weapon_slot())
            .and_then(WeaponKind::from_slot);

        FrameInput {
            player: PlayerInput {
                look_delta: self.look_delta(),
                forward: self.action_down(Action::MoveForward),
                back: self.action_down(Action::MoveBackward),
                left: self.action_down(Action::MoveLeft),
                right: self.action_down(Action::MoveRight),
            },
            combat: CombatInput {
                attack_pressed: self.action_pressed(Action::Attack),
                select,
            },
            pause_pressed: self.action_pressed(Action::Pause),
            restart_pressed: self.action_pressed(Action::Restart),
            quit_pressed: self.action_pressed(Action::Quit),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
