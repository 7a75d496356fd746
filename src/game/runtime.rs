//! Game Runtime
//!
//! `GameState` owns everything that changes during play and advances it one
//! frame at a time in a fixed order:
//!
//! 1. player (mouse look, movement)
//! 2. legacy toaster (grid chase)
//! 3. pooled enemies (state machine, attacks on the player)
//! 4. combat (weapon, melee, projectiles)
//! 5. particles
//! 6. pickups
//!
//! Systems report sounds and hits through `events`; the frame loop drains
//! the sound queue after `update` returns. Nothing here touches the window,
//! so the whole update path runs headless in tests.

use macroquad::math::{vec3, Vec3};

use super::arena::ArenaBounds;
use super::combat::{Combat, CombatContext, CombatInput};
use super::enemy::{EnemyKind, EnemyPool, ENEMY_HEIGHT};
use super::event::Events;
use super::legacy::LegacyEnemy;
use super::map::LevelMap;
use super::particles::{ParticleKind, ParticlePool};
use super::pickup::Pickups;
use super::player::{Player, PlayerInput, EYE_HEIGHT, MOUSE_SENSITIVITY, PLAYER_MAX_HP};
use crate::audio::Sfx;

/// Seconds the red overlay stays up after the player is hit
pub const DAMAGE_FLASH_TIME: f32 = 0.5;
/// Seconds the crosshair hit marker stays up
pub const HIT_MARKER_TIME: f32 = 0.15;

/// Enemies placed when no map file is available
const FALLBACK_SPAWNS: [(EnemyKind, Vec3); 2] = [
    (EnemyKind::Toaster, Vec3::new(10.0, ENEMY_HEIGHT / 2.0, 10.0)),
    (EnemyKind::Toaster, Vec3::new(-15.0, ENEMY_HEIGHT / 2.0, 5.0)),
];

/// Everything the player did this frame, decoded from the devices
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub player: PlayerInput,
    pub combat: CombatInput,
    pub pause_pressed: bool,
    pub restart_pressed: bool,
    pub quit_pressed: bool,
}

/// The game's aggregate root
pub struct GameState {
    pub player: Player,
    /// The first toaster, stored on the state rather than in the pool
    pub legacy: LegacyEnemy,

    pub player_hp: i32,
    pub player_max_hp: i32,
    /// Counts down from `DAMAGE_FLASH_TIME` after each hit on the player
    pub damage_flash: f32,
    pub hit_marker: f32,

    pub paused: bool,
    /// False once the player asks to quit
    pub running: bool,
    pub game_over: bool,
    /// Seconds of unpaused play
    pub elapsed: f32,
    /// Enemies destroyed this run (pool and legacy)
    pub kills: u32,

    pub enemies: EnemyPool,
    pub combat: Combat,
    pub particles: ParticlePool,
    pub pickups: Pickups,
    pub map: Option<LevelMap>,
    pub events: Events,

    pub bounds: ArenaBounds,
    pub mouse_sensitivity: f32,
}

impl GameState {
    /// Start a run on `map`, or on the open arena when there is none
    pub fn new(map: Option<LevelMap>) -> Self {
        let mut game = Self {
            player: Player::default(),
            legacy: LegacyEnemy::new(),
            player_hp: PLAYER_MAX_HP,
            player_max_hp: PLAYER_MAX_HP,
            damage_flash: 0.0,
            hit_marker: 0.0,
            paused: false,
            running: true,
            game_over: false,
            elapsed: 0.0,
            kills: 0,
            enemies: EnemyPool::new(),
            combat: Combat::new(),
            particles: ParticlePool::new(),
            pickups: Pickups::default(),
            map,
            events: Events::new(),
            bounds: ArenaBounds::interior(),
            mouse_sensitivity: MOUSE_SENSITIVITY,
        };
        game.populate();
        game
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Place player, enemies and pickups from the map (or the fallback layout)
    fn populate(&mut self) {
        self.enemies.clear();
        match &self.map {
            Some(map) => {
                self.player = Player::new(map.player_start);
                for &(kind, pos) in &map.enemy_spawns {
                    self.enemies.spawn(kind, pos);
                }
                self.pickups = Pickups::new(&map.pickups);
            }
            None => {
                self.player = Player::new(vec3(0.0, EYE_HEIGHT, 0.0));
                for (kind, pos) in FALLBACK_SPAWNS {
                    self.enemies.spawn(kind, pos);
                }
                self.pickups = Pickups::default();
            }
        }
        log::info!(
            "run started: {} enemies, {} pickups",
            self.enemies.active_count(),
            self.pickups.active_count()
        );
    }

    /// Fresh run on the same map. Settings survive, everything else resets.
    pub fn restart(&mut self) {
        log::info!("restarting after {:.1}s, {} kills", self.elapsed, self.kills);
        self.legacy = LegacyEnemy::new();
        self.player_hp = self.player_max_hp;
        self.damage_flash = 0.0;
        self.hit_marker = 0.0;
        self.paused = false;
        self.game_over = false;
        self.elapsed = 0.0;
        self.kills = 0;
        self.combat.reset();
        self.particles.clear();
        self.events.clear_all();
        self.populate();
    }

    /// Enemies still standing, legacy toaster included
    pub fn enemies_remaining(&self) -> usize {
        self.enemies.active_count() + usize::from(self.legacy.active)
    }

    /// Advance one frame
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.events.clear_all();

        if input.quit_pressed {
            log::info!("quit requested");
            self.running = false;
            return;
        }

        if self.game_over {
            if input.restart_pressed {
                self.restart();
            }
            return;
        }

        if input.pause_pressed {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return;
        }

        self.elapsed += dt;
        if self.damage_flash > 0.0 {
            self.damage_flash = (self.damage_flash - dt).max(0.0);
        }

        self.player.update(
            &input.player,
            self.mouse_sensitivity,
            &self.bounds,
            self.map.as_ref(),
            dt,
        );

        self.legacy.update(self.player.position, &self.bounds, dt);

        let report = self.enemies.update(self.player.position, dt);
        if report.player_damage > 0 {
            self.hurt_player(report.player_damage);
            if self.game_over {
                return;
            }
        }

        let mut ctx = CombatContext {
            enemies: &mut self.enemies,
            legacy: &mut self.legacy,
            particles: &mut self.particles,
            events: &mut self.events,
        };
        self.combat.update(&mut ctx, &input.combat, self.player.position, self.player.target, dt);

        self.particles.update(dt);

        let healed = self.pickups.collect(self.player.position);
        if healed > 0 {
            self.player_hp = (self.player_hp + healed).min(self.player_max_hp);
            self.events.sfx.send(Sfx::Pickup);
        }

        if !self.events.hits.is_empty() {
            self.hit_marker = HIT_MARKER_TIME;
        } else if self.hit_marker > 0.0 {
            self.hit_marker = (self.hit_marker - dt).max(0.0);
        }
        self.kills += self.events.kills.len() as u32;
    }

    fn hurt_player(&mut self, amount: i32) {
        self.player_hp = (self.player_hp - amount).max(0);
        self.damage_flash = DAMAGE_FLASH_TIME;
        self.events.sfx.send(Sfx::PlayerHurt);
        log::debug!("player took {} damage, hp {}/{}", amount, self.player_hp, self.player_max_hp);

        let chest = self.player.position - vec3(0.0, 0.5, 0.0) + self.player.forward();
        self.particles.spawn(ParticleKind::Blood, chest, 6);

        if self.player_hp == 0 {
            self.game_over = true;
            log::info!("player died after {:.1}s with {} kills", self.elapsed, self.kills);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::WeaponKind;
    use crate::game::enemy::AiState;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn test_fallback_layout() {
        let game = GameState::new(None);
        assert_eq!(game.enemies.active_count(), 2);
        assert!(game.legacy.active);
        assert_eq!(game.enemies_remaining(), 3);
        assert_eq!(game.player.position, vec3(0.0, EYE_HEIGHT, 0.0));
        assert_eq!(game.player_hp, PLAYER_MAX_HP);
    }

    #[test]
    fn test_map_layout() {
        let map = LevelMap::parse_str("#####\n#S.T#\n#.H.#\n#####\n").unwrap();
        let game = GameState::new(Some(map));
        assert_eq!(game.enemies.active_count(), 1);
        assert_eq!(game.pickups.active_count(), 1);
        assert_eq!(game.player.position.x, -4.0);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut game = GameState::new(None);
        let pause = FrameInput { pause_pressed: true, ..idle() };

        game.update(&pause, DT);
        assert!(game.paused);
        let legacy_before = game.legacy.position;
        for _ in 0..30 {
            game.update(&idle(), DT);
        }
        assert_eq!(game.elapsed, 0.0);
        assert_eq!(game.legacy.position, legacy_before);

        game.update(&pause, DT);
        assert!(!game.paused);
        assert!(game.elapsed > 0.0);
    }

    #[test]
    fn test_quit_stops_running() {
        let mut game = GameState::new(None);
        game.update(&FrameInput { quit_pressed: true, ..idle() }, DT);
        assert!(!game.running);
    }

    #[test]
    fn test_enemy_attack_hurts_player_and_flashes() {
        let mut game = GameState::new(None);
        game.legacy.active = false;
        game.enemies.clear();
        game.enemies.spawn(EnemyKind::Blender, vec3(0.0, 2.0, 2.0));

        let mut hurt = false;
        for _ in 0..120 {
            game.update(&idle(), DT);
            if game.player_hp < PLAYER_MAX_HP {
                hurt = true;
                break;
            }
        }
        assert!(hurt);
        assert_eq!(game.player_hp, PLAYER_MAX_HP - 10);
        assert_eq!(game.damage_flash, DAMAGE_FLASH_TIME);
        assert!(game.events.sfx.drain().any(|s| s == Sfx::PlayerHurt));
    }

    #[test]
    fn test_death_and_restart() {
        let mut game = GameState::new(None);
        game.player_hp = 5;
        game.legacy.active = false;
        game.enemies.clear();
        game.enemies.spawn(EnemyKind::Microwave, vec3(0.0, 2.0, 5.0));

        for _ in 0..120 {
            game.update(&idle(), DT);
            if game.game_over {
                break;
            }
        }
        assert!(game.game_over);
        assert_eq!(game.player_hp, 0);

        // Frozen until restart
        let elapsed = game.elapsed;
        game.update(&idle(), DT);
        assert_eq!(game.elapsed, elapsed);

        game.update(&FrameInput { restart_pressed: true, ..idle() }, DT);
        assert!(!game.game_over);
        assert_eq!(game.player_hp, PLAYER_MAX_HP);
        assert_eq!(game.enemies.active_count(), 2);
        assert!(game.legacy.active);
    }

    #[test]
    fn test_kill_counts_and_marks_hit() {
        let mut game = GameState::new(None);
        game.enemies.clear();
        game.legacy.position = vec3(0.0, 2.0, 3.0);
        game.legacy.hp = 10;

        let attack = FrameInput {
            combat: CombatInput { attack_pressed: true, select: None },
            ..idle()
        };
        game.update(&attack, DT);
        assert!(!game.legacy.active);
        assert_eq!(game.kills, 1);
        assert_eq!(game.hit_marker, HIT_MARKER_TIME);
        assert_eq!(game.enemies_remaining(), 0);
    }

    #[test]
    fn test_weapon_select_through_frame_input() {
        let mut game = GameState::new(None);
        let select = FrameInput {
            combat: CombatInput { attack_pressed: false, select: WeaponKind::from_slot(2) },
            ..idle()
        };
        game.update(&select, DT);
        assert_eq!(game.combat.weapon.kind, WeaponKind::FryingPan);
    }

    #[test]
    fn test_pickup_heals_capped() {
        let map = LevelMap::parse_str("SH\n").unwrap();
        let mut game = GameState::new(Some(map));
        game.legacy.active = false;
        game.player_hp = 90;
        // Start and pickup are neighbours 4 units apart on X
        let pickup = game.map.as_ref().unwrap().pickups[0];
        game.player.position = vec3(pickup.x, EYE_HEIGHT, pickup.z);

        game.update(&idle(), DT);
        assert_eq!(game.player_hp, PLAYER_MAX_HP);
        assert_eq!(game.pickups.active_count(), 0);
        assert!(game.events.sfx.drain().any(|s| s == Sfx::Pickup));
    }

    #[test]
    fn test_enemies_chase_during_update() {
        let mut game = GameState::new(None);
        for _ in 0..10 {
            game.update(&idle(), DT);
        }
        let states: Vec<_> = game.enemies.iter_alive().map(|(_, e)| e.state).collect();
        assert!(states.iter().all(|s| *s == AiState::Chase));
    }
}
