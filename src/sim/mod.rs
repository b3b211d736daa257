//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt` only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod step;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{CollisionSummary, Hazard, circles_overlap, resolve_collisions};
pub use entity::{Asteroid, AsteroidSize, Bullet, BulletOwner, Saucer, SaucerSize, Ship};
pub use snapshot::{AsteroidView, BulletView, Hud, RenderSnapshot, SaucerView, ShipView};
pub use spawn::{spawn_saucer, split_asteroid, start_wave, wave_asteroid_count};
pub use state::{ExplosionKind, GameEvent, GamePhase, World};
pub use step::FixedStep;
pub use tick::{TickInput, tick};
