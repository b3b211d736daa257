//! World state and core simulation types
//!
//! The [`World`] owns every entity, timer and counter. All mutation happens
//! inside [`World::advance`]; hosts read back snapshots and drain events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Asteroid, Bullet, Saucer, Ship};
use crate::tuning::Tuning;

/// Phase of the wave cycle. The menu belongs to the host and never shows up
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Asteroids on the field
    Playing,
    /// Field cleared (or not yet populated); next wave pending
    WaveCooldown,
}

/// What blew up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Asteroid,
    Saucer,
    Ship,
}

/// Fire-and-forget notifications for the audio/effects layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShoot,
    SaucerShoot,
    Explosion { kind: ExplosionKind, pos: Vec2 },
    Hyperspace,
    WaveStarted { wave: u32 },
    /// Lives ran out and the world started over
    WorldReset,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Tunables this world was built with
    pub tuning: Tuning,
    /// Seed the RNG was started from
    pub seed: u64,
    pub rng: Pcg32,
    pub ship: Ship,
    /// Player bullets (capped by `max_player_bullets`)
    pub bullets: Vec<Bullet>,
    /// Saucer bullets (capped by `max_saucer_bullets`)
    pub saucer_bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub saucers: Vec<Saucer>,
    pub score: u64,
    /// Goes below zero only for the frame that triggers a full reset
    pub lives: i32,
    /// Waves started so far (0 before the first wave)
    pub wave: u32,
    pub phase: GamePhase,
    /// Countdown to the next wave while the field is empty
    pub wave_cooldown: f32,
    /// Post-spawn safety window; keeps the ship invulnerable while positive
    pub safe_timer: f32,
    /// Countdown to the next saucer
    pub saucer_timer: f32,
    /// Simulation frames advanced
    pub frame: u64,
    /// Pending notifications, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Build a world. Uses `tuning.seed` when set, otherwise a fresh seed.
    ///
    /// Tuning that fails [`Tuning::validate`] is replaced by the defaults
    /// (keeping its seed) and the error is logged.
    pub fn new(tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::error!("{}; falling back to default tuning", e);
                Tuning {
                    seed: tuning.seed,
                    ..Tuning::default()
                }
            }
        };
        let seed = tuning.seed.unwrap_or_else(|| rand::rng().random());
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::spawn(&tuning),
            bullets: Vec::new(),
            saucer_bullets: Vec::new(),
            asteroids: Vec::new(),
            saucers: Vec::new(),
            score: 0,
            lives: 0,
            wave: 0,
            phase: GamePhase::WaveCooldown,
            wave_cooldown: 0.0,
            safe_timer: 0.0,
            saucer_timer: 0.0,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        world.reset();
        log::info!("World created with seed {}", seed);
        world
    }

    /// Rebuild every collection and counter to its starting value.
    ///
    /// The RNG keeps running so a reset world does not replay the previous
    /// run. Queued events are kept for the host to drain.
    pub fn reset(&mut self) {
        self.ship = Ship::spawn(&self.tuning);
        self.bullets.clear();
        self.saucer_bullets.clear();
        self.asteroids.clear();
        self.saucers.clear();
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.wave = 0;
        self.phase = GamePhase::WaveCooldown;
        self.wave_cooldown = self.tuning.wave_delay;
        self.safe_timer = self.tuning.safe_spawn_time;
        self.saucer_timer = self.tuning.saucer_spawn_every;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Whether hazards can currently kill the ship
    pub fn ship_vulnerable(&self) -> bool {
        !self.ship.is_invulnerable() && self.safe_timer <= 0.0
    }

    /// Fire a player bullet if under the live cap and the gun is reloaded.
    /// Returns whether a bullet was fired.
    pub fn try_fire(&mut self) -> bool {
        if self.bullets.len() >= self.tuning.max_player_bullets {
            return false;
        }
        let id = self.next_entity_id();
        match self.ship.fire(id, &self.tuning) {
            Some(bullet) => {
                self.bullets.push(bullet);
                self.events.push(GameEvent::PlayerShoot);
                true
            }
            None => false,
        }
    }

    /// Hyperspace jump; costs points, floored at zero
    pub fn hyperspace(&mut self) {
        self.ship.hyperspace(&self.tuning, &mut self.rng);
        self.score = self.score.saturating_sub(self.tuning.hyperspace_cost);
        self.events.push(GameEvent::Hyperspace);
        log::debug!("Hyperspace to ({:.0}, {:.0})", self.ship.pos.x, self.ship.pos.y);
    }

    /// Lose a life and respawn at the centre, or start over when lives run out
    pub fn ship_destroyed(&mut self) {
        self.events.push(GameEvent::Explosion {
            kind: ExplosionKind::Ship,
            pos: self.ship.pos,
        });
        self.lives -= 1;
        self.ship.respawn(&self.tuning);
        self.safe_timer = self.tuning.safe_spawn_time;
        log::debug!("Ship destroyed, {} lives left", self.lives);

        if self.lives < 0 {
            log::info!(
                "Out of lives at wave {} with score {}, resetting world",
                self.wave,
                self.score
            );
            self.reset();
            self.events.push(GameEvent::WorldReset);
        }
    }

    /// Advance the world by one frame
    pub fn advance(&mut self, dt: f32, input: &super::TickInput) -> super::CollisionSummary {
        super::tick(self, input, dt)
    }
}
