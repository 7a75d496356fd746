//! Arena Bounds
//!
//! The fixed square play area: a 50x50 floor centred at the origin with a
//! wall on each side. Everything that moves (player, enemies) is clamped to
//! the interior of this box.

use macroquad::color::Color;
use macroquad::math::{vec2, vec3, Vec3};
use macroquad::models::{draw_cube, draw_cube_wires, draw_grid, draw_plane};

/// Side length of the square arena (world units)
pub const ARENA_SIZE: f32 = 50.0;
/// Height of the boundary walls
pub const WALL_HEIGHT: f32 = 5.0;
/// Thickness of the boundary walls
pub const WALL_THICKNESS: f32 = 1.0;
/// Distance kept between moving entities and the walls
pub const WALL_MARGIN: f32 = 1.0;
/// Spacing of the floor grid (also the legacy toaster's decision grid)
pub const GRID_SCALE: f32 = 5.0;

const FLOOR_COLOR: Color = Color::new(80.0 / 255.0, 140.0 / 255.0, 80.0 / 255.0, 1.0);
const WALL_COLOR: Color = Color::new(160.0 / 255.0, 100.0 / 255.0, 60.0 / 255.0, 1.0);
const WALL_WIRE_COLOR: Color = Color::new(0.31, 0.31, 0.31, 1.0);

/// Axis-aligned horizontal bounds used for movement clamping.
///
/// Only X and Z are constrained; height is owned by each entity's own
/// ground logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl ArenaBounds {
    /// Interior of the standard arena (half size minus wall margin)
    pub const fn interior() -> Self {
        let half = ARENA_SIZE / 2.0 - WALL_MARGIN;
        Self {
            min_x: -half,
            max_x: half,
            min_z: -half,
            max_z: half,
        }
    }

    /// Clamp a position into the bounds. Y is passed through untouched.
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        vec3(
            pos.x.clamp(self.min_x, self.max_x),
            pos.y,
            pos.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.z >= self.min_z && pos.z <= self.max_z
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::interior()
    }
}

/// Draw the floor plane and the four boundary walls
pub fn draw_arena() {
    draw_plane(Vec3::ZERO, vec2(ARENA_SIZE / 2.0, ARENA_SIZE / 2.0), None, FLOOR_COLOR);

    let half = ARENA_SIZE / 2.0;
    let wall_y = WALL_HEIGHT / 2.0;
    let walls = [
        (vec3(0.0, wall_y, half), vec3(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS)),
        (vec3(0.0, wall_y, -half), vec3(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS)),
        (vec3(half, wall_y, 0.0), vec3(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE)),
        (vec3(-half, wall_y, 0.0), vec3(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE)),
    ];
    for (center, size) in walls {
        draw_cube(center, size, None, WALL_COLOR);
        draw_cube_wires(center, size, WALL_WIRE_COLOR);
    }

    draw_grid(10, GRID_SCALE, Color::new(0.3, 0.3, 0.3, 1.0), Color::new(0.2, 0.2, 0.2, 1.0));
}
