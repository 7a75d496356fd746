//! Health pickups placed by the map (`H` cells)

use macroquad::color::{Color, LIME};
use macroquad::math::{vec3, Vec3};
use macroquad::models::{draw_cube, draw_cube_wires};

use super::collision::within_radius;

/// HP restored per pickup
pub const HEAL_AMOUNT: i32 = 25;
/// Horizontal distance at which the player collects a pickup
pub const PICKUP_RADIUS: f32 = 1.5;

const PICKUP_SIZE: f32 = 0.8;
const BOB_HEIGHT: f32 = 0.25;
const BOB_SPEED: f32 = 3.0;
const PICKUP_COLOR: Color = Color::new(0.9, 0.1, 0.2, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthPickup {
    /// Floor position
    pub position: Vec3,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Pickups {
    items: Vec<HealthPickup>,
}

impl Pickups {
    pub fn new(positions: &[Vec3]) -> Self {
        Self {
            items: positions
                .iter()
                .map(|&position| HealthPickup { position, active: true })
                .collect(),
        }
    }

    /// Collect every pickup the player is standing on.
    /// Returns the total HP to restore (before capping).
    pub fn collect(&mut self, player_pos: Vec3) -> i32 {
        let feet = vec3(player_pos.x, 0.0, player_pos.z);
        let mut healed = 0;
        for item in self.items.iter_mut().filter(|p| p.active) {
            if within_radius(feet, item.position, PICKUP_RADIUS) {
                item.active = false;
                healed += HEAL_AMOUNT;
                log::info!("health pickup at ({:.1}, {:.1})", item.position.x, item.position.z);
            }
        }
        healed
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|p| p.active).count()
    }

    /// Bobbing cubes; `time` is seconds since start
    pub fn draw(&self, time: f32) {
        let size = vec3(PICKUP_SIZE, PICKUP_SIZE, PICKUP_SIZE);
        for item in self.items.iter().filter(|p| p.active) {
            let bob = (time * BOB_SPEED + item.position.x).sin() * BOB_HEIGHT;
            let pos = item.position + vec3(0.0, 1.0 + bob, 0.0);
            draw_cube(pos, size, None, PICKUP_COLOR);
            draw_cube_wires(pos, size, LIME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_once() {
        let mut pickups = Pickups::new(&[vec3(4.0, 0.0, 0.0)]);
        assert_eq!(pickups.collect(vec3(0.0, 1.8, 0.0)), 0);
        assert_eq!(pickups.collect(vec3(3.5, 1.8, 0.5)), HEAL_AMOUNT);
        assert_eq!(pickups.active_count(), 0);
        assert_eq!(pickups.collect(vec3(4.0, 1.8, 0.0)), 0);
    }

    #[test]
    fn test_collect_ignores_eye_height() {
        let mut pickups = Pickups::new(&[Vec3::ZERO]);
        assert_eq!(pickups.collect(vec3(0.0, 1.8, 0.0)), HEAL_AMOUNT);
    }
}
