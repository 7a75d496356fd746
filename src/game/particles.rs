//! Particle System
//!
//! Cosmetic hit and death effects using a fixed-size pool. Particles are
//! drawn as small fading spheres; they never touch gameplay state.

use macroquad::color::{Color, RED, YELLOW};
use macroquad::math::{vec3, Vec3};
use macroquad::models::draw_sphere;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum number of live particles
pub const MAX_PARTICLES: usize = 256;

/// Downward acceleration applied to every particle
pub const PARTICLE_GRAVITY: f32 = 15.0;
/// Height of the floor plane particles bounce on
pub const FLOOR_Y: f32 = 0.1;
/// Vertical restitution on floor contact (sign flips)
const BOUNCE_DAMPING: f32 = 0.3;
/// Horizontal friction on floor contact
const FLOOR_FRICTION: f32 = 0.8;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World position
    pub position: Vec3,
    /// Velocity (units per second)
    pub velocity: Vec3,
    pub color: Color,
    /// Remaining life in seconds
    pub life: f32,
    /// Total lifetime (for fade interpolation)
    pub max_life: f32,
    /// Sphere radius at spawn
    pub size: f32,
    /// Is this particle slot active?
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            life: 0.0,
            max_life: 1.0,
            size: 0.1,
            alive: false,
        }
    }
}

impl Particle {
    /// Remaining life as a fraction of the total (1 = fresh, 0 = gone)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Effect presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Full-sphere burst in the given color (enemy deaths)
    Explosion(Color),
    /// Short yellow sparks (weapon impacts)
    Sparks,
    /// Red droplets thrown upward (damage taken)
    Blood,
}

/// Spawn ranges for one effect preset
struct EmitterRanges {
    speed: (f32, f32),
    life: (f32, f32),
    size: (f32, f32),
    color: Color,
    upward: bool,
}

impl ParticleKind {
    fn ranges(self) -> EmitterRanges {
        match self {
            ParticleKind::Explosion(color) => EmitterRanges {
                speed: (5.0, 15.0),
                life: (0.5, 1.0),
                size: (0.2, 0.5),
                color,
                upward: false,
            },
            ParticleKind::Sparks => EmitterRanges {
                speed: (3.0, 8.0),
                life: (0.2, 0.4),
                size: (0.1, 0.1),
                color: YELLOW,
                upward: false,
            },
            ParticleKind::Blood => EmitterRanges {
                speed: (2.0, 6.0),
                life: (0.3, 0.6),
                size: (0.15, 0.15),
                color: RED,
                upward: true,
            },
        }
    }
}

/// The particle pool: manages all live particles
pub struct ParticlePool {
    pub particles: [Particle; MAX_PARTICLES],
    rng: StdRng,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::with_seed(12345)
    }

    /// Pool with a fixed RNG seed (deterministic effects for tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_range(&mut self, (min, max): (f32, f32)) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform direction on the unit sphere
    fn random_direction(&mut self) -> Vec3 {
        let theta = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let phi = self.rng.gen_range(0.0..std::f32::consts::PI);
        let sin_phi = phi.sin();
        vec3(sin_phi * theta.cos(), phi.cos(), sin_phi * theta.sin())
    }

    /// Find a dead particle slot
    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn a burst of `count` particles of one kind.
    /// Stops early (silently) when the pool runs out of slots.
    /// Returns how many were actually spawned.
    pub fn spawn(&mut self, kind: ParticleKind, origin: Vec3, count: usize) -> usize {
        let ranges = kind.ranges();
        for spawned in 0..count {
            let Some(idx) = self.find_free_slot() else {
                return spawned;
            };

            let mut dir = self.random_direction();
            if ranges.upward {
                dir.y = dir.y.abs();
            }
            let speed = self.random_range(ranges.speed);
            let life = self.random_range(ranges.life);
            let size = self.random_range(ranges.size);

            self.particles[idx] = Particle {
                position: origin,
                velocity: dir * speed,
                color: ranges.color,
                life,
                max_life: life,
                size,
                alive: true,
            };
        }
        count
    }

    /// Update all live particles: integrate, apply gravity, bounce on the
    /// floor, expire on lifetime.
    pub fn update(&mut self, delta_time: f32) {
        for p in &mut self.particles {
            if !p.alive {
                continue;
            }

            p.position += p.velocity * delta_time;
            p.velocity.y -= PARTICLE_GRAVITY * delta_time;

            p.life -= delta_time;
            if p.life <= 0.0 {
                p.alive = false;
                continue;
            }

            if p.position.y < FLOOR_Y {
                p.position.y = FLOOR_Y;
                p.velocity.y *= -BOUNCE_DAMPING;
                p.velocity.x *= FLOOR_FRICTION;
                p.velocity.z *= FLOOR_FRICTION;
            }
        }
    }

    /// Draw live particles as spheres that fade and shrink with age
    pub fn draw(&self) {
        for p in self.particles.iter().filter(|p| p.alive) {
            let t = p.life_fraction();
            let mut color = p.color;
            color.a *= t;
            draw_sphere(p.position, p.size * t, None, color);
        }
    }

    /// Kill all particles
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}
