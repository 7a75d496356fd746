//! Game Renderer
//!
//! Draws one frame of `GameState`: the 3D scene through a first-person
//! camera, then the 2D HUD on top. Read-only over the state; the only thing
//! it needs besides the state is the texture set and the shake offset the
//! frame loop pulled from combat.

use macroquad::prelude::*;

use super::arena::draw_arena;
use super::combat::{WeaponKind, PROJECTILE_RADIUS};
use super::enemy::{AiState, EnemyKind, ENEMY_DEPTH, ENEMY_HEIGHT, ENEMY_WIDTH};
use super::runtime::GameState;

/// Vertical field of view in degrees
const FOV_DEGREES: f32 = 75.0;
/// World units of camera jitter per pixel of screen shake
const SHAKE_WORLD_SCALE: f32 = 0.02;
/// Billboard height for textured enemies
const BILLBOARD_SIZE: f32 = 4.0;

const CLEAR_COLOR: Color = Color::new(40.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0, 1.0);
const PROJECTILE_COLOR: Color = RED;
const TOASTER_TEXTURE: &str = "toster.png";
const SPATULA_TEXTURE: &str = "spatula_hand.png";
const HELP_TEXT: &str = "WASD - Move | Mouse - Look | LMB - Attack | 1-4 - Weapon | P - Pause | ESC - Quit";

/// Optional sprites. Anything missing is drawn with primitives instead.
#[derive(Default)]
pub struct SceneTextures {
    pub toaster: Option<Texture2D>,
    pub spatula: Option<Texture2D>,
}

impl SceneTextures {
    pub async fn load(asset_dir: &str) -> Self {
        Self {
            toaster: load_optional(&asset_path(asset_dir, TOASTER_TEXTURE)).await,
            spatula: load_optional(&asset_path(asset_dir, SPATULA_TEXTURE)).await,
        }
    }
}

fn asset_path(asset_dir: &str, file: &str) -> String {
    format!("{}/{}", asset_dir.trim_end_matches('/'), file)
}

async fn load_optional(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            log::info!("loaded texture {}", path);
            Some(tex)
        }
        Err(e) => {
            log::warn!("texture {} unavailable, using fallback: {}", path, e);
            None
        }
    }
}

/// Draw the whole frame: scene, then HUD
pub fn draw_frame(game: &GameState, textures: &SceneTextures, shake: Vec2) {
    clear_background(CLEAR_COLOR);
    draw_scene(game, textures, shake);
    draw_hud(game, textures, shake);
}

fn draw_scene(game: &GameState, textures: &SceneTextures, shake: Vec2) {
    let player = &game.player;
    let jitter = vec3(shake.x, shake.y, 0.0) * SHAKE_WORLD_SCALE;

    set_camera(&Camera3D {
        position: player.position + jitter,
        target: player.target + jitter,
        up: vec3(0.0, 1.0, 0.0),
        fovy: FOV_DEGREES.to_radians(),
        ..Default::default()
    });

    draw_arena();
    if let Some(map) = &game.map {
        map.draw();
    }

    // On-screen right for camera-facing quads
    let screen_right = -player.left();

    if game.legacy.active {
        draw_enemy_body(game.legacy.position, EnemyKind::Toaster.stats().color, true, textures, screen_right);
    }

    for (_, enemy) in game.enemies.iter_alive() {
        let color = if enemy.state == AiState::Hurt { RED } else { enemy.color };
        let billboard = enemy.kind == EnemyKind::Toaster;
        draw_enemy_body(enemy.position, color, billboard, textures, screen_right);
    }

    for p in game.combat.projectiles.iter_active() {
        draw_sphere(p.position, PROJECTILE_RADIUS, None, PROJECTILE_COLOR);
    }

    game.pickups.draw(game.elapsed);
    game.particles.draw();

    set_default_camera();
}

/// Textured billboard when a toaster sprite is available, cube otherwise
fn draw_enemy_body(pos: Vec3, color: Color, billboard: bool, textures: &SceneTextures, screen_right: Vec3) {
    match (&textures.toaster, billboard) {
        (Some(tex), true) => {
            let h = BILLBOARD_SIZE;
            let w = h * tex.width() / tex.height().max(1.0);
            let up = vec3(0.0, 1.0, 0.0);
            let top_left = pos + up * (h / 2.0) - screen_right * (w / 2.0);
            draw_affine_parallelogram(top_left, screen_right * w, -up * h, Some(tex), color);
        }
        _ => {
            let size = vec3(ENEMY_WIDTH, ENEMY_HEIGHT, ENEMY_DEPTH);
            draw_cube(pos, size, None, color);
            draw_cube_wires(pos, size, BLACK);
        }
    }
}

fn draw_hud(game: &GameState, textures: &SceneTextures, shake: Vec2) {
    let sw = screen_width();
    let sh = screen_height();
    let cx = sw / 2.0 + shake.x;
    let cy = sh / 2.0 + shake.y;
    let weapon = &game.combat.weapon;

    // Crosshair
    let crosshair = if weapon.ranged { SKYBLUE } else { GREEN };
    draw_circle(cx, cy, 4.0, crosshair);
    draw_circle_lines(cx, cy, 8.0, 1.0, crosshair);
    if game.hit_marker > 0.0 {
        for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            draw_line(cx + dx * 10.0, cy + dy * 10.0, cx + dx * 16.0, cy + dy * 16.0, 2.0, WHITE);
        }
    }

    // Cooldown bar
    if weapon.current_cooldown > 0.0 {
        draw_rectangle(cx - 25.0, cy + 40.0, 50.0, 6.0, DARKGRAY);
        draw_rectangle(cx - 25.0, cy + 40.0, 50.0 * weapon.readiness(), 6.0, YELLOW);
    }

    // Weapon name and slot hint
    let name = weapon.kind.label();
    let name_w = measure_text(name, None, 20, 1.0).width;
    draw_text(name, sw / 2.0 - name_w / 2.0, sh - 100.0, 20.0, WHITE);
    draw_text("[1] [2] [3] [4]", sw / 2.0 - 60.0, sh - 75.0, 16.0, GRAY);

    if weapon.kind == WeaponKind::Spatula {
        if let Some(tex) = &textures.spatula {
            let scale = 0.5;
            let w = tex.width() * scale;
            let h = tex.height() * scale;
            let bob = (get_time() as f32 * 5.0).sin() * 10.0;
            draw_texture_ex(
                tex,
                sw - w - 20.0 + shake.x,
                sh - h + bob + shake.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            );
        }
    }

    // Player health
    let ratio = game.player_hp as f32 / game.player_max_hp.max(1) as f32;
    draw_rectangle(20.0, 20.0, 200.0, 20.0, DARKGRAY);
    draw_rectangle(20.0, 20.0, 200.0 * ratio, 20.0, RED);
    draw_rectangle_lines(20.0, 20.0, 200.0, 20.0, 1.0, WHITE);
    draw_text(
        &format!("HP: {}/{}", game.player_hp, game.player_max_hp),
        25.0,
        36.0,
        16.0,
        WHITE,
    );

    // Enemies
    let remaining = game.enemies_remaining();
    if remaining > 0 {
        draw_text(&format!("Enemies: {}", remaining), 20.0, 62.0, 16.0, ORANGE);
        if game.legacy.active {
            draw_text(&format!("Toaster HP: {}", game.legacy.hp), 20.0, 80.0, 16.0, ORANGE);
        }
    } else {
        draw_text("ENEMY DEFEATED!", 20.0, 66.0, 20.0, GREEN);
    }
    draw_text(&format!("Kills: {}", game.kills), sw - 120.0, 36.0, 16.0, LIGHTGRAY);

    // Damage flash
    if game.damage_flash > 0.0 {
        draw_rectangle(0.0, 0.0, sw, sh, Color { a: game.damage_flash * 0.5, ..RED });
    }

    if game.paused {
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.5));
        draw_text("PAUSED", sw / 2.0 - 60.0, sh / 2.0 - 20.0, 40.0, WHITE);
    }

    if game.game_over {
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.3, 0.0, 0.0, 0.6));
        let title = "YOU GOT TOASTED";
        let title_w = measure_text(title, None, 48, 1.0).width;
        draw_text(title, sw / 2.0 - title_w / 2.0, sh / 2.0 - 20.0, 48.0, WHITE);
        let hint = "Press R to restart";
        let hint_w = measure_text(hint, None, 20, 1.0).width;
        draw_text(hint, sw / 2.0 - hint_w / 2.0, sh / 2.0 + 20.0, 20.0, LIGHTGRAY);
    }

    draw_text(&format!("FPS: {}", get_fps()), 10.0, sh - 50.0, 20.0, LIME);
    draw_text(HELP_TEXT, 10.0, sh - 20.0, 16.0, LIGHTGRAY);
}
