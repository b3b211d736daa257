//! Entity types and their per-entity update rules
//!
//! The world keeps one homogeneous `Vec` per kind; nothing here knows about
//! the other collections. Cross-entity rules (collisions, spawning, scoring)
//! live in `collision`, `spawn` and `tick`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::consts::{SAUCER_FALLBACK_AIM, SHIP_SPAWN_ANGLE};
use crate::tuning::Tuning;
use crate::{angle_to_vec, normalize_degrees, vec_from_radians, wrap_position};

/// Which pool a bullet belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Saucer,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before the bullet fizzles
    pub ttl: f32,
    pub radius: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, owner: BulletOwner, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel,
            ttl: tuning.bullet_ttl,
            radius: tuning.bullet_radius,
            owner,
        }
    }

    /// Move, wrap and age the bullet
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
        self.ttl -= dt;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Sizes produced when an asteroid of this class is destroyed
    pub fn split_into(self) -> &'static [AsteroidSize] {
        match self {
            AsteroidSize::Large => &[AsteroidSize::Medium, AsteroidSize::Medium],
            AsteroidSize::Medium => &[AsteroidSize::Small, AsteroidSize::Small],
            AsteroidSize::Small => &[],
        }
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    /// Outline vertices relative to `pos`, fixed for the asteroid's lifetime
    pub outline: Vec<Vec2>,
}

impl Asteroid {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        size: AsteroidSize,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let class = tuning.asteroid(size);
        Self {
            id,
            pos,
            vel,
            size,
            radius: class.radius,
            outline: jagged_outline(class.radius, class.vertices, rng),
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
    }

    /// Points for destroying this asteroid, whatever destroyed it
    #[inline]
    pub fn score(&self, tuning: &Tuning) -> u64 {
        tuning.asteroid(self.size).score
    }
}

/// Evenly spaced vertices with each radius jittered to 75-120%
fn jagged_outline<R: Rng + ?Sized>(radius: f32, vertices: usize, rng: &mut R) -> Vec<Vec2> {
    let step = 360.0 / vertices as f32;
    (0..vertices)
        .map(|i| {
            let jitter = rng.random_range(0.75_f32..1.2);
            angle_to_vec(i as f32 * step) * radius * jitter
        })
        .collect()
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees, normalized to [-180, 180)
    pub angle: f32,
    /// Seconds until the gun is reloaded
    pub fire_cooldown: f32,
    /// Seconds of remaining invulnerability
    pub invuln: f32,
    pub radius: f32,
    /// Always true: a destroyed ship respawns in the same frame, and running
    /// out of lives resets the world instead of leaving a dead ship behind
    pub alive: bool,
}

impl Ship {
    /// Fresh ship at the playfield centre with the spawn grace period
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.center(),
            vel: Vec2::ZERO,
            angle: SHIP_SPAWN_ANGLE,
            fire_cooldown: 0.0,
            invuln: tuning.safe_spawn_time,
            radius: tuning.ship_radius,
            alive: true,
        }
    }

    /// Put the ship back at the centre after a death
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.center();
        self.vel = Vec2::ZERO;
        self.angle = SHIP_SPAWN_ANGLE;
        self.invuln = tuning.safe_spawn_time;
    }

    /// Apply held controls. Friction applies every frame, thrust or not.
    pub fn control(&mut self, input: &TickInput, dt: f32, tuning: &Tuning) {
        if input.turn_left {
            self.angle -= tuning.ship_turn_speed * dt;
        }
        if input.turn_right {
            self.angle += tuning.ship_turn_speed * dt;
        }
        self.angle = normalize_degrees(self.angle);
        if input.thrust {
            self.vel += self.heading() * tuning.ship_thrust * dt;
        }
        self.vel *= tuning.ship_friction;
    }

    /// Fire from the nose if the gun is reloaded
    pub fn fire(&mut self, id: u32, tuning: &Tuning) -> Option<Bullet> {
        if self.fire_cooldown > 0.0 {
            return None;
        }
        let dir = self.heading();
        let pos = self.pos + dir * (self.radius + tuning.ship_muzzle_offset);
        let vel = self.vel + dir * tuning.ship_bullet_speed;
        self.fire_cooldown = tuning.ship_fire_rate;
        Some(Bullet::new(id, pos, vel, BulletOwner::Player, tuning))
    }

    /// Jump to a random point on the playfield
    pub fn hyperspace<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.pos = Vec2::new(
            rng.random_range(0.0..tuning.width),
            rng.random_range(0.0..tuning.height),
        );
        self.vel = Vec2::ZERO;
        self.invuln = tuning.hyperspace_invuln;
    }

    /// Move, wrap and run down the timers
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.invuln = (self.invuln - dt).max(0.0);
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
    }

    #[inline]
    pub fn heading(&self) -> Vec2 {
        angle_to_vec(self.angle)
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    /// Blink phase of the invulnerability shield (toggles every 0.1 s)
    pub fn shield_visible(&self) -> bool {
        self.is_invulnerable() && ((self.invuln * 10.0) as i32) % 2 == 0
    }
}

/// Saucer size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaucerSize {
    /// Cruises straight across the screen
    Big,
    /// Homes in on the ship
    Small,
}

/// A hostile saucer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub id: u32,
    pub pos: Vec2,
    pub size: SaucerSize,
    pub radius: f32,
    /// Travel direction; small saucers blend this toward the ship
    pub dir: Vec2,
    pub speed: f32,
    /// Seconds until the next shot
    pub fire_cooldown: f32,
}

impl Saucer {
    /// New saucer, ready to fire on its first frame
    pub fn new(id: u32, pos: Vec2, size: SaucerSize, dir: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size,
            radius: tuning.saucer(size).radius,
            dir,
            speed: tuning.saucer_speed,
            fire_cooldown: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos = wrap_position(
            self.pos + self.dir * self.speed * dt,
            tuning.width,
            tuning.height,
        );
    }

    /// Blend the travel direction toward `target` and switch to homing speed
    pub fn steer_toward(&mut self, target: Vec2, tuning: &Tuning) {
        if let Some(bearing) = (target - self.pos).try_normalize() {
            self.dir = self.dir.lerp(bearing, tuning.saucer_steer_blend);
        }
        self.speed = tuning.saucer_small_speed;
    }

    /// Unit vector from the saucer to `target`, straight line, no lead
    pub fn aim_at(&self, target: Vec2) -> Vec2 {
        (target - self.pos)
            .try_normalize()
            .unwrap_or(Vec2::new(SAUCER_FALLBACK_AIM.0, SAUCER_FALLBACK_AIM.1))
    }

    /// Points for destroying this saucer
    #[inline]
    pub fn score(&self, tuning: &Tuning) -> u64 {
        tuning.saucer(self.size).score
    }
}

/// Random unit vector
pub fn random_unit_vec<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    vec_from_radians(rng.random_range(0.0..std::f32::consts::TAU))
}
