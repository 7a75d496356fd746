//! Combat System
//!
//! The player's weapon, hit detection and projectiles.
//!
//! A weapon is either melee (instant hit-scan along the view ray, limited by
//! range) or ranged (spawns a projectile that flies straight for up to
//! three seconds). Every attack arms the weapon's cooldown and kicks the
//! screen shake; no attack can start until the cooldown has run out.

use macroquad::math::{vec2, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::Sfx;
use super::collision::{ray_sphere, within_radius, Ray};
use super::enemy::{DamageOutcome, EnemyKind, EnemyPool, ENEMY_WIDTH};
use super::event::{Events, HitEvent, HitTarget, KillEvent};
use super::legacy::LegacyEnemy;
use super::particles::{ParticleKind, ParticlePool};

/// Maximum number of live projectiles
pub const MAX_PROJECTILES: usize = 128;
/// Projectile velocity = view direction * this
pub const PROJECTILE_SPEED: f32 = 30.0;
/// Seconds a projectile flies before fizzling out
pub const PROJECTILE_LIFETIME: f32 = 3.0;
/// Drawn size of a projectile
pub const PROJECTILE_RADIUS: f32 = 0.3;
/// Projectile catch radius around an enemy (also the legacy toaster's melee sphere)
pub const HIT_RADIUS: f32 = ENEMY_WIDTH;

/// Screen shake kicked off by every attack
pub const SHAKE_DURATION: f32 = 0.1;
pub const SHAKE_INTENSITY: f32 = 3.0;

/// The four weapons, bound to keys 1-4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    /// Melee, fast, low damage
    Spatula,
    /// Melee, slow, heavy
    FryingPan,
    /// Ranged, rapid fire
    Ketchup,
    /// Ranged, slow, big damage
    EggLauncher,
}

/// Static stats for a weapon type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub damage: i32,
    pub range: f32,
    pub cooldown: f32,
    pub ranged: bool,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Spatula,
        WeaponKind::FryingPan,
        WeaponKind::Ketchup,
        WeaponKind::EggLauncher,
    ];

    /// Weapon for a number key (1-based)
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1..=4 => Some(Self::ALL[(slot - 1) as usize]),
            _ => None,
        }
    }

    pub fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Spatula => WeaponStats { damage: 10, range: 4.0, cooldown: 0.4, ranged: false },
            WeaponKind::FryingPan => WeaponStats { damage: 25, range: 3.0, cooldown: 0.8, ranged: false },
            WeaponKind::Ketchup => WeaponStats { damage: 8, range: 15.0, cooldown: 0.2, ranged: true },
            WeaponKind::EggLauncher => WeaponStats { damage: 40, range: 20.0, cooldown: 1.2, ranged: true },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponKind::Spatula => "SPATULA",
            WeaponKind::FryingPan => "FRYING PAN",
            WeaponKind::Ketchup => "KETCHUP",
            WeaponKind::EggLauncher => "EGG LAUNCHER",
        }
    }
}

/// Weapon firing state. `Idle` exactly when no cooldown remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Idle,
    /// The frame an attack was triggered
    Firing,
    /// Waiting for the cooldown to run out
    Cooldown,
}

/// The weapon the player is holding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub state: WeaponState,
    pub damage: i32,
    pub range: f32,
    pub cooldown_time: f32,
    pub current_cooldown: f32,
    pub ranged: bool,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            state: WeaponState::Idle,
            damage: stats.damage,
            range: stats.range,
            cooldown_time: stats.cooldown,
            current_cooldown: 0.0,
            ranged: stats.ranged,
        }
    }

    /// Swap to another weapon's stats. A cooldown already running carries
    /// over to the new weapon (capped at the new weapon's cooldown time).
    pub fn switch_to(&mut self, kind: WeaponKind) {
        if kind == self.kind {
            return;
        }
        let stats = kind.stats();
        self.kind = kind;
        self.damage = stats.damage;
        self.range = stats.range;
        self.cooldown_time = stats.cooldown;
        self.ranged = stats.ranged;
        self.current_cooldown = self.current_cooldown.min(self.cooldown_time);
        log::debug!("switched weapon to {}", kind.label());
    }

    /// Count the cooldown down; returns to Idle when it reaches zero
    pub fn tick(&mut self, dt: f32) {
        if self.current_cooldown > 0.0 {
            self.current_cooldown -= dt;
            if self.current_cooldown <= 0.0 {
                self.current_cooldown = 0.0;
                self.state = WeaponState::Idle;
            } else {
                self.state = WeaponState::Cooldown;
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == WeaponState::Idle
    }

    /// Start an attack if the weapon is idle. Returns false while cooling down.
    pub fn try_fire(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.state = WeaponState::Firing;
        self.current_cooldown = self.cooldown_time;
        true
    }

    /// Cooldown progress for the HUD (0 = just fired, 1 = ready)
    pub fn readiness(&self) -> f32 {
        if self.cooldown_time <= 0.0 {
            return 1.0;
        }
        1.0 - (self.current_cooldown / self.cooldown_time).clamp(0.0, 1.0)
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponKind::Spatula)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub damage: i32,
    /// Seconds left before the projectile fizzles
    pub lifetime: f32,
    pub active: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: PROJECTILE_RADIUS,
            damage: 0,
            lifetime: 0.0,
            active: false,
        }
    }
}

/// Fixed-size pool of projectiles
pub struct ProjectilePool {
    pub projectiles: [Projectile; MAX_PROJECTILES],
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            projectiles: [Projectile::default(); MAX_PROJECTILES],
        }
    }

    /// Launch a projectile from `origin` along unit vector `dir`.
    /// Returns the slot used, or None when the pool is full (spawn dropped).
    pub fn spawn(&mut self, origin: Vec3, dir: Vec3, damage: i32) -> Option<usize> {
        let idx = self.projectiles.iter().position(|p| !p.active)?;
        self.projectiles[idx] = Projectile {
            position: origin,
            velocity: dir * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage,
            lifetime: PROJECTILE_LIFETIME,
            active: true,
        };
        Some(idx)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    pub fn clear(&mut self) {
        for p in &mut self.projectiles {
            p.active = false;
        }
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything an attack can touch, borrowed from the game state for one update
pub struct CombatContext<'a> {
    pub enemies: &'a mut EnemyPool,
    pub legacy: &'a mut LegacyEnemy,
    pub particles: &'a mut ParticlePool,
    pub events: &'a mut Events,
}

impl CombatContext<'_> {
    /// Apply one hit landing at `impact` and emit its sound, particles and
    /// events. A kill explodes at the target's center.
    fn apply_hit(&mut self, target: HitTarget, amount: i32, impact: Vec3) -> DamageOutcome {
        let (position, color) = match target {
            HitTarget::Pool(idx) => match self.enemies.get(idx) {
                Some(e) => (e.position, e.color),
                None => return DamageOutcome::Ignored,
            },
            HitTarget::Legacy => (self.legacy.position, EnemyKind::Toaster.stats().color),
        };

        let outcome = match target {
            HitTarget::Pool(idx) => self.enemies.damage(idx, amount),
            HitTarget::Legacy => self.legacy.damage(amount),
        };

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { .. } => {
                self.events.hits.send(HitEvent { target, amount, position: impact });
                self.events.sfx.send(Sfx::HitEnemy);
                self.particles.spawn(ParticleKind::Sparks, impact, 12);
                self.particles.spawn(ParticleKind::Blood, impact, 8);
            }
            DamageOutcome::Killed => {
                self.events.hits.send(HitEvent { target, amount, position: impact });
                self.events.kills.send(KillEvent { target, position });
                self.events.sfx.send(Sfx::EnemyDeath);
                self.particles.spawn(ParticleKind::Explosion(color), position, 40);
            }
        }
        outcome
    }

    /// Nearest live target whose bounding sphere the ray hits within `range`.
    /// The legacy toaster has no radius of its own and uses the hit radius.
    fn melee_target(&self, ray: &Ray, range: f32) -> Option<(HitTarget, f32)> {
        let pooled = self
            .enemies
            .iter_alive()
            .filter_map(|(idx, e)| ray_sphere(ray, e.position, e.radius).map(|d| (HitTarget::Pool(idx), d)));
        let legacy = self
            .legacy
            .active
            .then(|| ray_sphere(ray, self.legacy.position, HIT_RADIUS).map(|d| (HitTarget::Legacy, d)))
            .flatten();

        pooled
            .chain(legacy)
            .filter(|(_, d)| *d <= range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Nearest live target whose center is within the hit radius of `point`
    fn touching_target(&self, point: Vec3) -> Option<HitTarget> {
        let pooled = self
            .enemies
            .iter_alive()
            .filter(|(_, e)| within_radius(point, e.position, HIT_RADIUS))
            .map(|(idx, e)| (HitTarget::Pool(idx), point.distance_squared(e.position)));
        let legacy = (self.legacy.active && within_radius(point, self.legacy.position, HIT_RADIUS))
            .then(|| (HitTarget::Legacy, point.distance_squared(self.legacy.position)));

        pooled
            .chain(legacy)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, _)| target)
    }
}

/// Per-frame combat input, already decoded from keys and mouse
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatInput {
    /// Attack button went down this frame
    pub attack_pressed: bool,
    /// Weapon key pressed this frame
    pub select: Option<WeaponKind>,
}

/// Weapon, projectiles and screen feedback
pub struct Combat {
    pub weapon: Weapon,
    pub projectiles: ProjectilePool,
    shake_timer: f32,
    shake_intensity: f32,
    rng: StdRng,
}

impl Combat {
    pub fn new() -> Self {
        Self::with_seed(0x5eed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            weapon: Weapon::default(),
            projectiles: ProjectilePool::new(),
            shake_timer: 0.0,
            shake_intensity: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn switch_weapon(&mut self, kind: WeaponKind) {
        self.weapon.switch_to(kind);
    }

    /// One combat frame: weapon switch, cooldown, attack, projectiles, shake.
    /// `eye` and `look_target` are the camera position and look-at point.
    pub fn update(
        &mut self,
        ctx: &mut CombatContext<'_>,
        input: &CombatInput,
        eye: Vec3,
        look_target: Vec3,
        dt: f32,
    ) {
        if let Some(kind) = input.select {
            self.switch_weapon(kind);
        }

        self.weapon.tick(dt);

        if input.attack_pressed {
            self.attack(ctx, eye, look_target);
        }

        self.update_projectiles(ctx, dt);

        if self.shake_timer > 0.0 {
            self.shake_timer = (self.shake_timer - dt).max(0.0);
        }
    }

    /// Trigger the held weapon. Returns false if the weapon was cooling
    /// down (nothing happens in that case).
    pub fn attack(&mut self, ctx: &mut CombatContext<'_>, eye: Vec3, look_target: Vec3) -> bool {
        if !self.weapon.try_fire() {
            return false;
        }

        self.shake_timer = SHAKE_DURATION;
        self.shake_intensity = SHAKE_INTENSITY;
        ctx.events.sfx.send(if self.weapon.ranged { Sfx::AttackRanged } else { Sfx::AttackMelee });

        let Some(ray) = Ray::toward(eye, look_target) else {
            return true;
        };

        if self.weapon.ranged {
            if self.projectiles.spawn(eye, ray.direction, self.weapon.damage).is_none() {
                log::debug!("projectile pool full, shot dropped");
            }
        } else if let Some((target, distance)) = ctx.melee_target(&ray, self.weapon.range) {
            log::debug!("{} hit {:?} at {:.2}", self.weapon.kind.label(), target, distance);
            ctx.apply_hit(target, self.weapon.damage, ray.at(distance));
        }
        true
    }

    /// Move projectiles, expire old ones and resolve hits
    pub fn update_projectiles(&mut self, ctx: &mut CombatContext<'_>, dt: f32) {
        for p in &mut self.projectiles.projectiles {
            if !p.active {
                continue;
            }

            p.position += p.velocity * dt;
            p.lifetime -= dt;
            if p.lifetime <= 0.0 {
                p.active = false;
                continue;
            }

            if let Some(target) = ctx.touching_target(p.position) {
                ctx.apply_hit(target, p.damage, p.position);
                p.active = false;
            }
        }
    }

    /// Random camera/HUD jitter while the shake is running, zero otherwise
    pub fn shake_offset(&mut self) -> Vec2 {
        if self.shake_timer <= 0.0 {
            return Vec2::ZERO;
        }
        let i = self.shake_intensity;
        vec2(self.rng.gen_range(-i..=i), self.rng.gen_range(-i..=i))
    }

    /// Back to the starting weapon with no projectiles in flight
    pub fn reset(&mut self) {
        self.weapon = Weapon::default();
        self.projectiles.clear();
        self.shake_timer = 0.0;
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new()
    }
}
