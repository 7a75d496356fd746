//! Game action definitions
//!
//! Classic keyboard-and-mouse FPS layout.

use macroquad::input::{KeyCode, MouseButton};

/// All possible game actions that can be triggered by input
///
/// Default bindings:
/// - W/S/A/D = Move
/// - LMB = Attack
/// - 1/2/3/4 = Spatula / Frying Pan / Ketchup / Egg Launcher
/// - P = Pause
/// - R = Restart (after game over)
/// - Esc = Quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    // Combat
    Attack,
    Weapon1,
    Weapon2,
    Weapon3,
    Weapon4,

    // System
    Pause,
    Restart,
    Quit,
}

/// A physical input an action is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Attack,
        Action::Weapon1,
        Action::Weapon2,
        Action::Weapon3,
        Action::Weapon4,
        Action::Pause,
        Action::Restart,
        Action::Quit,
    ];

    pub fn binding(self) -> Binding {
        match self {
            Action::MoveForward => Binding::Key(KeyCode::W),
            Action::MoveBackward => Binding::Key(KeyCode::S),
            Action::MoveLeft => Binding::Key(KeyCode::A),
            Action::MoveRight => Binding::Key(KeyCode::D),
            Action::Attack => Binding::Mouse(MouseButton::Left),
            Action::Weapon1 => Binding::Key(KeyCode::Key1),
            Action::Weapon2 => Binding::Key(KeyCode::Key2),
            Action::Weapon3 => Binding::Key(KeyCode::Key3),
            Action::Weapon4 => Binding::Key(KeyCode::Key4),
            Action::Pause => Binding::Key(KeyCode::P),
            Action::Restart => Binding::Key(KeyCode::R),
            Action::Quit => Binding::Key(KeyCode::Escape),
        }
    }

    /// Weapon slot (1-4) for the weapon select actions
    pub fn weapon_slot(self) -> Option<u8> {
        match self {
            Action::Weapon1 => Some(1),
            Action::Weapon2 => Some(2),
            Action::Weapon3 => Some(3),
            Action::Weapon4 => Some(4),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_are_unique() {
        for (i, a) in Action::ALL.iter().enumerate() {
            for b in &Action::ALL[i + 1..] {
                assert_ne!(a.binding(), b.binding(), "{:?} and {:?} share a binding", a, b);
            }
        }
    }

    #[test]
    fn test_weapon_slots() {
        let slots: Vec<_> = Action::ALL.iter().filter_map(|a| a.weapon_slot()).collect();
        assert_eq!(slots, vec![1, 2, 3, 4]);
    }
}
