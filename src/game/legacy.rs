//! Legacy Enemy
//!
//! The game's first enemy: a single toaster stored directly on the game
//! state rather than in the pool. It predates the state machine and still
//! uses the grid chase policy its behaviour was trained on: the arena is
//! seen as a 10x10 grid and the toaster steps along whichever axis has the
//! larger gap to the player.

use macroquad::math::{vec3, Vec3};
use super::arena::{ArenaBounds, ARENA_SIZE, GRID_SCALE};
use super::enemy::{DamageOutcome, ENEMY_HEIGHT};

/// Cells per side of the decision grid
pub const GRID_SIZE: usize = 10;
/// Movement speed in world units per second
pub const LEGACY_SPEED: f32 = 3.0;
/// Starting hit points
pub const LEGACY_HP: i32 = 30;

/// Minimum grid gap before the toaster bothers to move
const MOVE_THRESHOLD: f32 = 0.5;

/// One step of the grid policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    Stay,
    /// +Z
    Up,
    /// -Z
    Down,
    /// -X
    Left,
    /// +X
    Right,
}

impl GridAction {
    fn direction(self) -> Vec3 {
        match self {
            GridAction::Stay => Vec3::ZERO,
            GridAction::Up => vec3(0.0, 0.0, 1.0),
            GridAction::Down => vec3(0.0, 0.0, -1.0),
            GridAction::Left => vec3(-1.0, 0.0, 0.0),
            GridAction::Right => vec3(1.0, 0.0, 0.0),
        }
    }
}

/// Map a world position onto the continuous 0..=9 decision grid
pub fn world_to_grid(pos: Vec3) -> (f32, f32) {
    let half = ARENA_SIZE / 2.0;
    let max = (GRID_SIZE - 1) as f32;
    (
        ((pos.x + half) / GRID_SCALE).clamp(0.0, max),
        ((pos.z + half) / GRID_SCALE).clamp(0.0, max),
    )
}

/// Choose the axis with the larger gap and step along it
pub fn choose_action(enemy: Vec3, player: Vec3) -> GridAction {
    let (ex, ez) = world_to_grid(enemy);
    let (px, pz) = world_to_grid(player);
    let dx = px - ex;
    let dz = pz - ez;

    if dx.abs() > dz.abs() {
        if dx > MOVE_THRESHOLD {
            return GridAction::Right;
        }
        if dx < -MOVE_THRESHOLD {
            return GridAction::Left;
        }
    } else {
        if dz > MOVE_THRESHOLD {
            return GridAction::Up;
        }
        if dz < -MOVE_THRESHOLD {
            return GridAction::Down;
        }
    }
    GridAction::Stay
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyEnemy {
    pub position: Vec3,
    pub hp: i32,
    pub active: bool,
}

impl LegacyEnemy {
    pub fn new() -> Self {
        Self {
            position: vec3(0.0, ENEMY_HEIGHT / 2.0, 15.0),
            hp: LEGACY_HP,
            active: true,
        }
    }

    /// Step toward the player (no-op once destroyed)
    pub fn update(&mut self, player_pos: Vec3, bounds: &ArenaBounds, dt: f32) {
        if !self.active {
            return;
        }
        let action = choose_action(self.position, player_pos);
        self.position = bounds.clamp(self.position + action.direction() * LEGACY_SPEED * dt);
    }

    pub fn damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.active {
            return DamageOutcome::Ignored;
        }
        log::debug!("legacy toaster hp {} -> {}", self.hp, self.hp - amount);
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
            log::info!("legacy toaster destroyed");
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt { remaining_hp: self.hp }
        }
    }
}

impl Default for LegacyEnemy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_grid_clamps() {
        assert_eq!(world_to_grid(vec3(-25.0, 0.0, -25.0)), (0.0, 0.0));
        assert_eq!(world_to_grid(vec3(0.0, 0.0, 0.0)), (5.0, 5.0));
        assert_eq!(world_to_grid(vec3(100.0, 0.0, 100.0)), (9.0, 9.0));
    }

    #[test]
    fn test_choose_action_prefers_larger_axis() {
        let enemy = vec3(0.0, 2.0, 15.0);
        assert_eq!(choose_action(enemy, vec3(0.0, 1.8, 0.0)), GridAction::Down);
        assert_eq!(choose_action(enemy, vec3(20.0, 1.8, 14.0)), GridAction::Right);
        assert_eq!(choose_action(enemy, vec3(-20.0, 1.8, 14.0)), GridAction::Left);
        assert_eq!(choose_action(enemy, vec3(1.0, 1.8, 16.0)), GridAction::Stay);
    }

    #[test]
    fn test_update_moves_one_axis() {
        let mut legacy = LegacyEnemy::new();
        legacy.update(vec3(0.0, 1.8, 0.0), &ArenaBounds::interior(), 1.0);
        assert_eq!(legacy.position, vec3(0.0, 2.0, 12.0));
    }

    #[test]
    fn test_damage_until_destroyed() {
        let mut legacy = LegacyEnemy::new();
        assert_eq!(legacy.damage(25), DamageOutcome::Hurt { remaining_hp: 5 });
        assert_eq!(legacy.damage(10), DamageOutcome::Killed);
        assert!(!legacy.active);
        assert_eq!(legacy.damage(10), DamageOutcome::Ignored);

        let before = legacy.position;
        legacy.update(Vec3::ZERO, &ArenaBounds::interior(), 1.0);
        assert_eq!(legacy.position, before);
    }
}
