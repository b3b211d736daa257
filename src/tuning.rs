//! Game balance tunables
//!
//! Every speed, radius, timer and spawn count the simulation uses. Supplied
//! once when a [`crate::sim::World`] is built; the world never mutates it.
//! Documents are JSON and may name only the keys they want to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::{AsteroidSize, SaucerSize};

/// Per-size asteroid profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidClass {
    /// Collision radius (px)
    pub radius: f32,
    /// Points awarded when destroyed
    pub score: u64,
    /// Outline vertex count
    pub vertices: usize,
}

/// Per-size saucer profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaucerClass {
    /// Collision radius (px)
    pub radius: f32,
    /// Points awarded when destroyed
    pub score: u64,
    /// Aim accuracy factor (0-1). Carried for presentation; shots are always
    /// aimed straight at the ship.
    pub aim: f32,
}

/// Static set of named tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    /// Playfield width (px)
    pub width: f32,
    /// Playfield height (px)
    pub height: f32,

    // === Game ===
    /// Lives at world start and after a full reset
    pub start_lives: i32,
    /// Safety window after (re)spawn, seconds
    pub safe_spawn_time: f32,
    /// Pause between a cleared field and the next wave, seconds
    pub wave_delay: f32,
    /// Large asteroids in a wave on top of the wave number
    pub wave_base_asteroids: u32,
    /// Minimum distance from the ship for wave spawns (px)
    pub wave_safe_distance: f32,

    // === Ship ===
    pub ship_radius: f32,
    /// Turn rate, degrees per second
    pub ship_turn_speed: f32,
    /// Thrust acceleration, px/s^2
    pub ship_thrust: f32,
    /// Velocity multiplier applied every frame
    pub ship_friction: f32,
    /// Reload interval, seconds
    pub ship_fire_rate: f32,
    /// Muzzle speed added to the ship velocity, px/s
    pub ship_bullet_speed: f32,
    /// Bullet spawn distance beyond the hull (px)
    pub ship_muzzle_offset: f32,
    /// Points deducted per hyperspace jump
    pub hyperspace_cost: u64,
    /// Invulnerability granted by a jump, seconds
    pub hyperspace_invuln: f32,
    /// Invulnerability re-applied every frame while the safety timer runs
    pub safety_invuln_refresh: f32,

    // === Asteroids ===
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    /// Speed multiplier for split fragments
    pub split_speed_multiplier: f32,
    pub asteroid_large: AsteroidClass,
    pub asteroid_medium: AsteroidClass,
    pub asteroid_small: AsteroidClass,

    // === Bullets ===
    pub bullet_radius: f32,
    /// Bullet lifetime, seconds
    pub bullet_ttl: f32,
    pub max_player_bullets: usize,
    pub max_saucer_bullets: usize,

    // === Saucers ===
    /// Seconds between saucer spawns
    pub saucer_spawn_every: f32,
    /// Cruise speed of big saucers, px/s
    pub saucer_speed: f32,
    /// Speed of small saucers once they home in, px/s
    pub saucer_small_speed: f32,
    /// Per-frame lerp factor steering small saucers toward the ship
    pub saucer_steer_blend: f32,
    /// Seconds between saucer shots
    pub saucer_fire_interval: f32,
    pub saucer_bullet_speed: f32,
    pub saucer_big: SaucerClass,
    pub saucer_small: SaucerClass,

    // === RNG ===
    /// Fixed seed for reproducible runs; `None` draws one at startup
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,

            start_lives: 3,
            safe_spawn_time: 2.0,
            wave_delay: 2.0,
            wave_base_asteroids: 3,
            wave_safe_distance: 150.0,

            ship_radius: 15.0,
            ship_turn_speed: 220.0,
            ship_thrust: 220.0,
            ship_friction: 0.995,
            ship_fire_rate: 0.2,
            ship_bullet_speed: 420.0,
            ship_muzzle_offset: 6.0,
            hyperspace_cost: 250,
            hyperspace_invuln: 1.0,
            safety_invuln_refresh: 0.5,

            asteroid_speed_min: 30.0,
            asteroid_speed_max: 90.0,
            split_speed_multiplier: 1.2,
            asteroid_large: AsteroidClass {
                radius: 46.0,
                score: 20,
                vertices: 12,
            },
            asteroid_medium: AsteroidClass {
                radius: 24.0,
                score: 50,
                vertices: 10,
            },
            asteroid_small: AsteroidClass {
                radius: 12.0,
                score: 100,
                vertices: 8,
            },

            bullet_radius: 2.0,
            bullet_ttl: 1.0,
            max_player_bullets: 4,
            max_saucer_bullets: 16,

            saucer_spawn_every: 15.0,
            saucer_speed: 80.0,
            saucer_small_speed: 120.0,
            saucer_steer_blend: 0.06,
            saucer_fire_interval: 1.5,
            saucer_bullet_speed: 420.0,
            saucer_big: SaucerClass {
                radius: 18.0,
                score: 200,
                aim: 0.2,
            },
            saucer_small: SaucerClass {
                radius: 12.0,
                score: 1000,
                aim: 0.6,
            },

            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (useful as a starting template)
    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same tunables with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Profile for an asteroid size class
    pub fn asteroid(&self, size: AsteroidSize) -> &AsteroidClass {
        match size {
            AsteroidSize::Large => &self.asteroid_large,
            AsteroidSize::Medium => &self.asteroid_medium,
            AsteroidSize::Small => &self.asteroid_small,
        }
    }

    /// Profile for a saucer size class
    pub fn saucer(&self, size: SaucerSize) -> &SaucerClass {
        match size {
            SaucerSize::Big => &self.saucer_big,
            SaucerSize::Small => &self.saucer_small,
        }
    }

    /// Playfield centre, where the ship spawns
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite value greater than zero",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite value of zero or more",
                })
            }
        }

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("ship_radius", self.ship_radius)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("bullet_ttl", self.bullet_ttl)?;
        positive("saucer_spawn_every", self.saucer_spawn_every)?;
        positive("saucer_fire_interval", self.saucer_fire_interval)?;
        positive("asteroid_large.radius", self.asteroid_large.radius)?;
        positive("asteroid_medium.radius", self.asteroid_medium.radius)?;
        positive("asteroid_small.radius", self.asteroid_small.radius)?;
        positive("saucer_big.radius", self.saucer_big.radius)?;
        positive("saucer_small.radius", self.saucer_small.radius)?;

        non_negative("safe_spawn_time", self.safe_spawn_time)?;
        non_negative("wave_delay", self.wave_delay)?;
        non_negative("wave_safe_distance", self.wave_safe_distance)?;
        non_negative("ship_fire_rate", self.ship_fire_rate)?;
        non_negative("asteroid_speed_min", self.asteroid_speed_min)?;
        non_negative("saucer_speed", self.saucer_speed)?;
        non_negative("saucer_small_speed", self.saucer_small_speed)?;
        non_negative("hyperspace_invuln", self.hyperspace_invuln)?;

        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(TuningError::Invalid {
                field: "ship_friction",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.saucer_steer_blend >= 0.0 && self.saucer_steer_blend <= 1.0) {
            return Err(TuningError::Invalid {
                field: "saucer_steer_blend",
                reason: "must be in [0, 1]",
            });
        }
        if !(self.asteroid_speed_max.is_finite()
            && self.asteroid_speed_max > self.asteroid_speed_min)
        {
            return Err(TuningError::Invalid {
                field: "asteroid_speed_max",
                reason: "must be greater than asteroid_speed_min",
            });
        }
        if self.max_player_bullets == 0 {
            return Err(TuningError::Invalid {
                field: "max_player_bullets",
                reason: "must allow at least one bullet",
            });
        }
        if self.max_saucer_bullets == 0 {
            return Err(TuningError::Invalid {
                field: "max_saucer_bullets",
                reason: "must allow at least one bullet",
            });
        }
        for (field, class) in [
            ("asteroid_large.vertices", &self.asteroid_large),
            ("asteroid_medium.vertices", &self.asteroid_medium),
            ("asteroid_small.vertices", &self.asteroid_small),
        ] {
            if class.vertices < 3 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "an outline needs at least three vertices",
                });
            }
        }
        if self.start_lives < 0 {
            return Err(TuningError::Invalid {
                field: "start_lives",
                reason: "must not be negative",
            });
        }

        Ok(())
    }
}
