//! Enemy Pool and AI
//!
//! Kitchen appliances that hunt the player. Enemies live in a fixed-size
//! pool of 64 slots; a spawn takes the first free slot and a death frees it
//! again. Handles are plain slot indices.
//!
//! Each enemy runs a five-state machine:
//!
//! ```text
//!   Idle ──(player within 20)──> Chase ──(within attack range)──> Attack
//!                                  ^                                 │
//!                                  └──────(windup expires)───────────┘
//!   any ──(damage)──> Hurt ──(stun expires)──> Chase
//!   any ──(hp <= 0)──> Dead   (terminal until the slot is reused)
//! ```
//!
//! Transitions are checked in a fixed order every frame (idle check, then
//! chase check), so an enemy can move through two states in one tick.
//!
//! A windup that expires with the player in range lands a blow, unless the
//! previous blow's cooldown is still running.

use macroquad::color::Color;
use macroquad::math::Vec3;
use super::arena::ArenaBounds;

/// Maximum number of live enemies
pub const MAX_ENEMIES: usize = 64;

/// Enemy body dimensions (used for drawing and hit tests)
pub const ENEMY_WIDTH: f32 = 3.0;
pub const ENEMY_HEIGHT: f32 = 4.0;
pub const ENEMY_DEPTH: f32 = 3.0;

/// Distance at which an idle enemy notices the player
pub const DETECTION_RADIUS: f32 = 20.0;
/// Time between entering Attack and the blow landing
pub const ATTACK_WINDUP: f32 = 0.5;
/// Recovery time between two attacks
pub const ATTACK_COOLDOWN: f32 = 1.0;
/// Stun applied by any damage
pub const HURT_STUN: f32 = 0.2;

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Toast projectile attack, medium range
    Toaster,
    /// Fast spin charge, short range
    Blender,
    /// Slow, tanky, long beam attack
    Microwave,
}

/// Per-type stat block applied on spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hp: i32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_damage: i32,
    pub color: Color,
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Toaster => EnemyStats {
                hp: 30,
                speed: 3.0,
                attack_range: 8.0,
                attack_damage: 5,
                color: Color::new(1.0, 165.0 / 255.0, 0.0, 1.0),
            },
            EnemyKind::Blender => EnemyStats {
                hp: 50,
                speed: 5.0,
                attack_range: 3.0,
                attack_damage: 10,
                color: Color::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0),
            },
            EnemyKind::Microwave => EnemyStats {
                hp: 80,
                speed: 1.5,
                attack_range: 15.0,
                attack_damage: 15,
                color: Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0),
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnemyKind::Toaster => "Toaster",
            EnemyKind::Blender => "Blender",
            EnemyKind::Microwave => "Microwave",
        }
    }
}

/// AI state. `Hurt` is the only record of being stunned; there is no
/// separate hurt flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    Idle,
    Chase,
    Attack,
    Hurt,
    #[default]
    Dead,
}

/// One enemy slot
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub state: AiState,
    pub position: Vec3,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// Is this slot in use?
    pub active: bool,
    /// Countdown for the current timed state (windup or stun)
    pub state_timer: f32,
    pub color: Color,
    pub attack_range: f32,
    pub attack_damage: i32,
    pub attack_cooldown: f32,
    pub current_cooldown: f32,
    pub speed: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            kind: EnemyKind::Toaster,
            state: AiState::Dead,
            position: Vec3::ZERO,
            radius: ENEMY_WIDTH / 2.0,
            hp: 0,
            max_hp: 0,
            active: false,
            state_timer: 0.0,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            attack_range: 0.0,
            attack_damage: 0,
            attack_cooldown: ATTACK_COOLDOWN,
            current_cooldown: 0.0,
            speed: 0.0,
        }
    }
}

impl Enemy {
    /// Fresh enemy of the given type at a position
    pub fn new(kind: EnemyKind, position: Vec3) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            state: AiState::Idle,
            position,
            radius: ENEMY_WIDTH / 2.0,
            hp: stats.hp,
            max_hp: stats.hp,
            active: true,
            state_timer: 0.0,
            color: stats.color,
            attack_range: stats.attack_range,
            attack_damage: stats.attack_damage,
            attack_cooldown: ATTACK_COOLDOWN,
            current_cooldown: 0.0,
            speed: stats.speed,
        }
    }

    /// Active and not dead: takes part in update, draw and collision
    pub fn is_alive(&self) -> bool {
        self.active && self.state != AiState::Dead
    }

    /// Advance this enemy by one frame. Returns the damage dealt to the
    /// player by an attack landing this frame (0 if none).
    fn step(&mut self, player_pos: Vec3, bounds: &ArenaBounds, dt: f32) -> i32 {
        if !self.is_alive() {
            return 0;
        }

        // Stunned: count down and stand still
        if self.state == AiState::Hurt {
            self.state_timer -= dt;
            if self.state_timer <= 0.0 {
                self.state_timer = 0.0;
                self.state = AiState::Chase;
            }
            return 0;
        }

        let dist = self.position.distance(player_pos);
        let mut dealt = 0;

        if self.state == AiState::Idle && dist < DETECTION_RADIUS {
            self.state = AiState::Chase;
        }

        if self.state == AiState::Chase && dist <= self.attack_range {
            self.state = AiState::Attack;
            self.state_timer = ATTACK_WINDUP;
        }

        if self.state == AiState::Chase {
            let mut dir = player_pos - self.position;
            dir.y = 0.0;
            let dir = dir.normalize_or_zero();
            self.position = bounds.clamp(self.position + dir * self.speed * dt);
        }

        if self.state == AiState::Attack {
            self.state_timer -= dt;
            if self.state_timer <= 0.0 {
                self.state_timer = 0.0;
                self.state = AiState::Chase;
                // A running cooldown swallows the blow and is not re-armed
                if self.current_cooldown <= 0.0 {
                    self.current_cooldown = self.attack_cooldown;
                    if dist <= self.attack_range {
                        dealt = self.attack_damage;
                    }
                }
            }
        }

        if self.current_cooldown > 0.0 {
            self.current_cooldown = (self.current_cooldown - dt).max(0.0);
        }

        dealt
    }
}

/// What a call to [`EnemyPool::damage`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Index out of range or slot not alive
    Ignored,
    /// Enemy survived and is now stunned
    Hurt { remaining_hp: i32 },
    /// Enemy died and its slot was freed
    Killed,
}

/// Summary of one pool update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyUpdateReport {
    /// Total damage landed on the player this frame
    pub player_damage: i32,
    /// Number of attacks that connected
    pub hits: u32,
}

/// Fixed-size pool of enemy slots
pub struct EnemyPool {
    enemies: [Enemy; MAX_ENEMIES],
    active_count: usize,
    bounds: ArenaBounds,
}

impl EnemyPool {
    pub fn new() -> Self {
        Self::with_bounds(ArenaBounds::interior())
    }

    pub fn with_bounds(bounds: ArenaBounds) -> Self {
        Self {
            enemies: [Enemy::default(); MAX_ENEMIES],
            active_count: 0,
            bounds,
        }
    }

    /// Spawn an enemy in the first free slot.
    /// Returns the slot index, or None if the pool is full.
    pub fn spawn(&mut self, kind: EnemyKind, position: Vec3) -> Option<usize> {
        let Some(idx) = self.enemies.iter().position(|e| !e.active) else {
            log::warn!("enemy pool full ({} slots), dropping {} spawn", MAX_ENEMIES, kind.label());
            return None;
        };

        self.enemies[idx] = Enemy::new(kind, position);
        self.active_count += 1;
        log::info!(
            "spawned {} at ({:.1}, {:.1}, {:.1}) in slot {}",
            kind.label(),
            position.x,
            position.y,
            position.z,
            idx
        );
        Some(idx)
    }

    /// Run one AI step for every live enemy
    pub fn update(&mut self, player_pos: Vec3, dt: f32) -> EnemyUpdateReport {
        let mut report = EnemyUpdateReport::default();
        for enemy in &mut self.enemies {
            let dealt = enemy.step(player_pos, &self.bounds, dt);
            if dealt > 0 {
                report.player_damage += dealt;
                report.hits += 1;
            }
        }
        report
    }

    /// Apply damage to a slot. Forces the Hurt stun; kills at hp <= 0.
    pub fn damage(&mut self, index: usize, amount: i32) -> DamageOutcome {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return DamageOutcome::Ignored;
        };
        if !enemy.is_alive() {
            return DamageOutcome::Ignored;
        }

        enemy.hp -= amount;
        enemy.state = AiState::Hurt;
        enemy.state_timer = HURT_STUN;
        log::debug!("enemy {} took {} damage, hp {}/{}", index, amount, enemy.hp, enemy.max_hp);

        if enemy.hp <= 0 {
            self.kill(index);
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt { remaining_hp: enemy.hp }
        }
    }

    /// Deactivate a slot. Returns true if it was active.
    pub fn kill(&mut self, index: usize) -> bool {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return false;
        };
        if !enemy.active {
            return false;
        }
        enemy.active = false;
        enemy.state = AiState::Dead;
        self.active_count -= 1;
        log::info!("enemy {} destroyed, {} remaining", index, self.active_count);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    /// Iterate over live enemies with their slot indices
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Free every slot
    pub fn clear(&mut self) {
        for e in &mut self.enemies {
            *e = Enemy::default();
        }
        self.active_count = 0;
    }
}

impl Default for EnemyPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec3;

    const DT: f32 = 1.0 / 60.0;
    const KINDS: [EnemyKind; 3] = [EnemyKind::Toaster, EnemyKind::Blender, EnemyKind::Microwave];

    #[test]
    fn test_spawn_applies_type_defaults() {
        let mut pool = EnemyPool::new();
        for kind in KINDS {
            let idx = pool.spawn(kind, vec3(1.0, 2.0, 3.0)).unwrap();
            let e = pool.get(idx).unwrap();
            assert!(e.active);
            assert_eq!(e.state, AiState::Idle);
            assert_eq!(e.hp, kind.stats().hp);
            assert_eq!(e.hp, e.max_hp);
            assert_eq!(e.speed, kind.stats().speed);
            assert_eq!(e.attack_range, kind.stats().attack_range);
            assert_eq!(e.radius, ENEMY_WIDTH / 2.0);
        }
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_spawn_fails_when_full() {
        let mut pool = EnemyPool::new();
        for i in 0..MAX_ENEMIES {
            assert_eq!(pool.spawn(EnemyKind::Blender, Vec3::ZERO), Some(i));
        }
        assert_eq!(pool.spawn(EnemyKind::Blender, Vec3::ZERO), None);
        assert_eq!(pool.active_count(), MAX_ENEMIES);

        // Freed slot is reused
        pool.kill(10);
        assert_eq!(pool.spawn(EnemyKind::Toaster, Vec3::ZERO), Some(10));
    }

    #[test]
    fn test_two_hits_kill_toaster() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Toaster, vec3(0.0, 2.0, 0.0)).unwrap();

        assert_eq!(pool.damage(idx, 25), DamageOutcome::Hurt { remaining_hp: 5 });
        let e = pool.get(idx).unwrap();
        assert_eq!(e.hp, 5);
        assert!(e.active);
        assert_eq!(e.state, AiState::Hurt);

        assert_eq!(pool.damage(idx, 10), DamageOutcome::Killed);
        let e = pool.get(idx).unwrap();
        assert!(!e.active);
        assert_eq!(e.state, AiState::Dead);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_lethal_damage_decrements_count_once() {
        let mut pool = EnemyPool::new();
        let a = pool.spawn(EnemyKind::Toaster, Vec3::ZERO).unwrap();
        pool.spawn(EnemyKind::Microwave, Vec3::ZERO).unwrap();
        assert_eq!(pool.damage(a, 1000), DamageOutcome::Killed);
        assert_eq!(pool.active_count(), 1);
        // Hitting the corpse again changes nothing
        assert_eq!(pool.damage(a, 1000), DamageOutcome::Ignored);
        assert!(!pool.kill(a));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_damage_out_of_range_is_ignored() {
        let mut pool = EnemyPool::new();
        assert_eq!(pool.damage(MAX_ENEMIES + 3, 10), DamageOutcome::Ignored);
        assert!(!pool.kill(MAX_ENEMIES));
    }

    #[test]
    fn test_toaster_goes_idle_chase_attack_in_order() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Toaster, vec3(0.0, 2.0, 25.0)).unwrap();
        let mut player = vec3(0.0, 1.8, 0.0);

        let mut seen = vec![pool.get(idx).unwrap().state];
        for _ in 0..2000 {
            // Walk the player toward the toaster until it is close
            if player.z < 20.0 {
                player.z += 0.1;
            }
            pool.update(player, DT);
            let state = pool.get(idx).unwrap().state;
            if *seen.last().unwrap() != state {
                seen.push(state);
            }
            if state == AiState::Attack {
                break;
            }
        }
        assert_eq!(seen, vec![AiState::Idle, AiState::Chase, AiState::Attack]);
    }

    #[test]
    fn test_idle_enemy_does_not_move() {
        let mut pool = EnemyPool::new();
        let start = vec3(0.0, 2.0, 22.0);
        let idx = pool.spawn(EnemyKind::Blender, start).unwrap();
        for _ in 0..60 {
            pool.update(vec3(0.0, 1.8, -22.0), DT);
        }
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Idle);
        assert_eq!(e.position, start);
    }

    #[test]
    fn test_can_transition_twice_in_one_tick() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Microwave, vec3(0.0, 2.0, 5.0)).unwrap();
        pool.update(vec3(0.0, 1.8, 0.0), DT);
        assert_eq!(pool.get(idx).unwrap().state, AiState::Attack);
    }

    #[test]
    fn test_chase_moves_toward_player_horizontally() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Blender, vec3(10.0, 2.0, 0.0)).unwrap();
        pool.update(vec3(0.0, 1.8, 0.0), 0.1);
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Chase);
        assert!((e.position.x - 9.5).abs() < 1e-4);
        assert_eq!(e.position.y, 2.0);
        assert_eq!(e.position.z, 0.0);
    }

    #[test]
    fn test_chase_is_clamped_to_bounds() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Blender, vec3(23.9, 2.0, 0.0)).unwrap();
        // Player outside the arena pulls the enemy into the wall
        pool.update(vec3(40.0, 1.8, 0.0), 1.0);
        let e = pool.get(idx).unwrap();
        assert_eq!(e.position.x, 24.0);
    }

    #[test]
    fn test_hurt_suspends_movement_then_resumes_chase() {
        let mut pool = EnemyPool::new();
        let start = vec3(10.0, 2.0, 0.0);
        let idx = pool.spawn(EnemyKind::Toaster, start).unwrap();
        pool.damage(idx, 1);

        pool.update(vec3(0.0, 1.8, 0.0), 0.1);
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Hurt);
        assert_eq!(e.position, start);

        pool.update(vec3(0.0, 1.8, 0.0), 0.15);
        assert_eq!(pool.get(idx).unwrap().state, AiState::Chase);
        assert_eq!(pool.get(idx).unwrap().position, start);
    }

    #[test]
    fn test_attack_lands_after_windup() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Blender, vec3(0.0, 2.0, 2.0)).unwrap();
        let player = vec3(0.0, 1.8, 0.0);

        let mut total = 0;
        for _ in 0..40 {
            total += pool.update(player, DT).player_damage;
        }
        assert_eq!(total, EnemyKind::Blender.stats().attack_damage);
        let e = pool.get(idx).unwrap();
        // Still in range, so it is winding up the next blow
        assert_eq!(e.state, AiState::Attack);
        assert!(e.current_cooldown > 0.0);
    }

    #[test]
    fn test_in_range_enemy_winds_up_again_next_frame() {
        let mut pool = EnemyPool::new();
        let start = vec3(0.0, 2.0, 6.0);
        let idx = pool.spawn(EnemyKind::Toaster, start).unwrap();
        let player = vec3(0.0, 1.8, 0.0);

        let mut prev = pool.get(idx).unwrap().state;
        let mut expired = false;
        for _ in 0..60 {
            pool.update(player, DT);
            let state = pool.get(idx).unwrap().state;
            if prev == AiState::Attack && state == AiState::Chase {
                expired = true;
                break;
            }
            prev = state;
        }
        assert!(expired);

        pool.update(player, DT);
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Attack);
        assert!((e.state_timer - (ATTACK_WINDUP - DT)).abs() < 1e-4);
        // Never walked: in range from the first frame
        assert_eq!(e.position, start);
    }

    #[test]
    fn test_cooldown_limits_landed_blows() {
        let mut pool = EnemyPool::new();
        pool.spawn(EnemyKind::Toaster, vec3(0.0, 2.0, 6.0)).unwrap();
        let player = vec3(0.0, 1.8, 0.0);

        // First windup lands; the second expires inside the 1s cooldown
        let mut hits = 0;
        for _ in 0..70 {
            hits += pool.update(player, DT).hits;
        }
        assert_eq!(hits, 1);

        // Roughly one blow per second from then on, not one per windup
        for _ in 0..130 {
            hits += pool.update(player, DT).hits;
        }
        assert!((2..=4).contains(&hits), "landed {} blows", hits);
    }

    #[test]
    fn test_damage_cancels_windup() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Blender, vec3(0.0, 2.0, 2.0)).unwrap();
        let player = vec3(0.0, 1.8, 0.0);

        pool.update(player, DT);
        assert_eq!(pool.get(idx).unwrap().state, AiState::Attack);

        assert_eq!(pool.damage(idx, 1), DamageOutcome::Hurt { remaining_hp: 49 });
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Hurt);
        assert_eq!(e.state_timer, HURT_STUN);

        // The interrupted windup never lands
        let mut total = pool.update(player, 0.1).player_damage;
        assert_eq!(pool.get(idx).unwrap().state, AiState::Hurt);
        total += pool.update(player, 0.15).player_damage;
        assert_eq!(pool.get(idx).unwrap().state, AiState::Chase);
        assert_eq!(total, 0);

        // Next frame starts a fresh windup
        pool.update(player, DT);
        let e = pool.get(idx).unwrap();
        assert_eq!(e.state, AiState::Attack);
        assert!((e.state_timer - (ATTACK_WINDUP - DT)).abs() < 1e-4);
    }

    #[test]
    fn test_dead_slot_is_inert() {
        let mut pool = EnemyPool::new();
        let idx = pool.spawn(EnemyKind::Toaster, vec3(5.0, 2.0, 0.0)).unwrap();
        pool.kill(idx);
        let before = pool.get(idx).unwrap().position;
        let report = pool.update(Vec3::ZERO, 1.0);
        assert_eq!(report, EnemyUpdateReport::default());
        assert_eq!(pool.get(idx).unwrap().position, before);
        assert_eq!(pool.iter_alive().count(), 0);
    }
}
