//! Kitchen Knight: a first-person arena brawler
//!
//! Fight toasters, blenders and microwaves with kitchen utensils:
//! - Four weapons (two melee, two ranged) on keys 1-4
//! - Pooled enemies with a small idle/chase/attack/hurt state machine
//! - ASCII grid maps, health pickups, particles and screen shake

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod audio;
mod game;
mod input;
mod settings;

use macroquad::prelude::*;

use audio::AudioSystem;
use game::{draw_frame, GameState, LevelMap, SceneTextures};
use input::InputState;
use settings::{Settings, DEFAULT_SETTINGS_PATH};

/// Longest frame step the simulation will take (stalls, window drags)
const MAX_FRAME_DT: f32 = 0.1;

fn window_conf() -> Conf {
    let (settings, _) = Settings::load_or_default(DEFAULT_SETTINGS_PATH);
    Conf {
        window_title: "Kitchen Knight 3D".to_string(),
        window_width: settings.window_width,
        window_height: settings.window_height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging(default_filter: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .try_init();
    // No logger to report through, so stderr it is
    if let Err(e) = result {
        eprintln!("logging disabled: {}", e);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let (settings, settings_note) = Settings::load_or_default(DEFAULT_SETTINGS_PATH);
    init_logging(&settings.log_filter);
    if let Some(note) = settings_note {
        log::warn!("{}", note);
    }
    match settings.save_if_missing(DEFAULT_SETTINGS_PATH) {
        Ok(true) => log::info!("wrote default settings to {}", DEFAULT_SETTINGS_PATH),
        Ok(false) => {}
        Err(e) => log::warn!("could not write {}: {}", DEFAULT_SETTINGS_PATH, e),
    }
    log::info!("=== KITCHEN KNIGHT v{} ===", VERSION);

    let map = match LevelMap::load(&settings.map_path) {
        Ok(map) => Some(map),
        Err(e) => {
            log::warn!("map {} not loaded ({}), using the open arena", settings.map_path, e);
            None
        }
    };

    let textures = SceneTextures::load(&settings.asset_dir).await;
    let audio = AudioSystem::load(&settings.asset_dir, settings.volume).await;

    let mut game = GameState::new(map).with_sensitivity(settings.mouse_sensitivity);
    let mut input = InputState::new();
    input.set_grab(true);

    let target_frame_time = settings.frame_time();

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();
        let dt = get_frame_time().min(MAX_FRAME_DT);

        // Free the mouse on menus and overlays
        input.set_grab(!game.paused && !game.game_over);

        let frame_input = input.poll();
        game.update(&frame_input, dt);
        if !game.running {
            break;
        }

        for sfx in game.events.sfx.drain() {
            audio.play(sfx);
        }

        let shake = game.combat.shake_offset();
        draw_frame(&game, &textures, shake);

        // FPS limiting
        let elapsed = get_time() - frame_start;
        if elapsed < target_frame_time {
            // Native: use sleep for bulk, then spin-wait for precision
            #[cfg(not(target_arch = "wasm32"))]
            {
                let spin_margin = 0.002; // 2ms
                while get_time() - frame_start + spin_margin < target_frame_time {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while get_time() - frame_start < target_frame_time {
                    std::hint::spin_loop();
                }
            }
        }

        next_frame().await;
    }

    input.set_grab(false);
    log::info!("bye ({} kills in {:.1}s)", game.kills, game.elapsed);
}
