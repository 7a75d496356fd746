//! Player Controller
//!
//! First-person camera and WASD movement. Mouse X turns (yaw), mouse Y
//! looks up and down (pitch, clamped short of vertical). The player walks
//! on the floor plane at eye height and cannot leave the arena interior.

use macroquad::math::{vec3, Vec2, Vec3};

use super::arena::ArenaBounds;
use super::map::LevelMap;

/// Camera height above the floor
pub const EYE_HEIGHT: f32 = 1.8;
/// Walk speed in world units per second
pub const PLAYER_SPEED: f32 = 10.0;
/// Radians per pixel of mouse movement
pub const MOUSE_SENSITIVITY: f32 = 0.003;
/// Pitch limit (radians, symmetric)
pub const PITCH_LIMIT: f32 = 1.4;
/// Per-frame gravity at 60 FPS; scaled by dt * 60
pub const GRAVITY: f32 = 0.5;
pub const PLAYER_MAX_HP: i32 = 100;

/// Movement keys and mouse motion for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Mouse movement in pixels since last frame
    pub look_delta: Vec2,
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Eye position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub vel_y: f32,
    pub grounded: bool,
    /// Point the camera looks at (one unit ahead of the eye)
    pub target: Vec3,
}

impl Player {
    /// Player at `start`, facing +Z
    pub fn new(start: Vec3) -> Self {
        let mut player = Self {
            position: start,
            yaw: 0.0,
            pitch: 0.0,
            vel_y: 0.0,
            grounded: true,
            target: start,
        };
        player.update_target();
        player
    }

    /// Horizontal facing direction
    pub fn forward(&self) -> Vec3 {
        vec3(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Horizontal unit vector to the player's left. `A` moves along it,
    /// `D` against it.
    pub fn left(&self) -> Vec3 {
        vec3(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Unit view direction including pitch
    pub fn look_dir(&self) -> Vec3 {
        vec3(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    fn update_target(&mut self) {
        self.target = self.position + self.look_dir();
    }

    pub fn update(
        &mut self,
        input: &PlayerInput,
        sensitivity: f32,
        bounds: &ArenaBounds,
        map: Option<&LevelMap>,
        dt: f32,
    ) {
        // Mouse look
        self.yaw -= input.look_delta.x * sensitivity;
        self.pitch = (self.pitch - input.look_delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // WASD
        let forward = self.forward();
        let left = self.left();
        let mut dir = Vec3::ZERO;
        if input.forward {
            dir += forward;
        }
        if input.back {
            dir -= forward;
        }
        if input.left {
            dir += left;
        }
        if input.right {
            dir -= left;
        }
        let step = dir.normalize_or_zero() * PLAYER_SPEED * dt;

        // Walls block each axis on its own so the player slides along them
        let old = self.position;
        let mut next = old;
        next.x += step.x;
        if map.is_some_and(|m| m.is_wall_at(next)) {
            next.x = old.x;
        }
        next.z += step.z;
        if map.is_some_and(|m| m.is_wall_at(next)) {
            next.z = old.z;
        }
        self.position = next;

        // Gravity
        if !self.grounded {
            self.vel_y -= GRAVITY * dt * 60.0;
            self.position.y += self.vel_y * dt;
        }
        if self.position.y <= EYE_HEIGHT {
            self.position.y = EYE_HEIGHT;
            self.vel_y = 0.0;
            self.grounded = true;
        }

        self.position = bounds.clamp(self.position);
        debug_assert!(bounds.contains(self.position));
        self.update_target();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(vec3(0.0, EYE_HEIGHT, 0.0))
    }
}
