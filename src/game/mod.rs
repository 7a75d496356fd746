//! Game Module
//!
//! Everything that happens inside the arena. Fixed-size pools with index
//! handles for enemies, projectiles and particles; one `GameState` that owns
//! them all and steps them in a fixed order each frame.
//!
//! Key pieces:
//! - Enemy pool: per-type stats plus an idle/chase/attack/hurt/dead machine
//! - Combat: held weapon, melee ray test, projectile pool, screen shake
//! - Events: per-frame queues from systems back to the frame loop
//!
//! Rendering is kept apart in `renderer` so the update path runs headless.

pub mod arena;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod event;
pub mod legacy;
pub mod map;
pub mod particles;
pub mod pickup;
pub mod player;
pub mod renderer;
pub mod runtime;

// Re-export main types
pub use map::LevelMap;
pub use renderer::{draw_frame, SceneTextures};
pub use runtime::GameState;
