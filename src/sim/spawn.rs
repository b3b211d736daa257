//! Spawn and difficulty policy
//!
//! Wave composition, saucer cadence and asteroid splitting. Every random
//! choice goes through the world's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::entity::{Asteroid, AsteroidSize, Saucer, SaucerSize, random_unit_vec};
use super::state::{ExplosionKind, GameEvent, World};
use crate::tuning::Tuning;
use crate::wrap_position;

/// Attempts at finding an edge spawn point far enough from the ship
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Number of Large asteroids in a given wave
#[inline]
pub fn wave_asteroid_count(tuning: &Tuning, wave: u32) -> usize {
    (tuning.wave_base_asteroids + wave) as usize
}

/// Random point on one of the four screen edges.
///
/// The far edges wrap onto the near ones, so the result is always inside
/// `[0, width) x [0, height)`.
pub fn random_edge_pos<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Vec2 {
    let pos = if rng.random_bool(0.5) {
        let x = rng.random_range(0.0..tuning.width);
        let y = if rng.random_bool(0.5) { 0.0 } else { tuning.height };
        Vec2::new(x, y)
    } else {
        let x = if rng.random_bool(0.5) { 0.0 } else { tuning.width };
        let y = rng.random_range(0.0..tuning.height);
        Vec2::new(x, y)
    };
    wrap_position(pos, tuning.width, tuning.height)
}

/// Edge point at least `wave_safe_distance` from `avoid`.
///
/// Falls back to the farthest candidate seen when the playfield is too small
/// for the constraint.
fn safe_edge_pos<R: Rng + ?Sized>(tuning: &Tuning, avoid: Vec2, rng: &mut R) -> Vec2 {
    let mut best = random_edge_pos(tuning, rng);
    let mut best_dist = best.distance(avoid);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if best_dist >= tuning.wave_safe_distance {
            return best;
        }
        let candidate = random_edge_pos(tuning, rng);
        let dist = candidate.distance(avoid);
        if dist > best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    if best_dist < tuning.wave_safe_distance {
        log::warn!(
            "No edge spawn point {} px from the ship, using one at {:.0} px",
            tuning.wave_safe_distance,
            best_dist
        );
    }
    best
}

/// Random velocity with speed drawn from the asteroid speed range
fn asteroid_velocity<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R, scale: f32) -> Vec2 {
    let speed = rng.random_range(tuning.asteroid_speed_min..tuning.asteroid_speed_max);
    random_unit_vec(rng) * speed * scale
}

/// Add an asteroid to the field
pub fn spawn_asteroid(world: &mut World, pos: Vec2, vel: Vec2, size: AsteroidSize) {
    let id = world.next_entity_id();
    let asteroid = Asteroid::new(id, pos, vel, size, &world.tuning, &mut world.rng);
    world.asteroids.push(asteroid);
}

/// Advance the wave counter and populate the field with Large asteroids
pub fn start_wave(world: &mut World) {
    world.wave += 1;
    let count = wave_asteroid_count(&world.tuning, world.wave);
    for _ in 0..count {
        let pos = safe_edge_pos(&world.tuning, world.ship.pos, &mut world.rng);
        let vel = asteroid_velocity(&world.tuning, &mut world.rng, 1.0);
        spawn_asteroid(world, pos, vel, AsteroidSize::Large);
    }
    world.events.push(GameEvent::WaveStarted { wave: world.wave });
    log::info!("Wave {} started with {} asteroids", world.wave, count);
}

/// Score a destroyed asteroid and scatter its fragments.
///
/// The asteroid must already be removed from the field. Fragments appear at
/// its position, heading in random directions faster than wave spawns.
pub fn split_asteroid(world: &mut World, asteroid: &Asteroid) {
    world.award(asteroid.score(&world.tuning));
    world.events.push(GameEvent::Explosion {
        kind: ExplosionKind::Asteroid,
        pos: asteroid.pos,
    });
    let multiplier = world.tuning.split_speed_multiplier;
    for &size in asteroid.size.split_into() {
        let vel = asteroid_velocity(&world.tuning, &mut world.rng, multiplier);
        spawn_asteroid(world, asteroid.pos, vel, size);
    }
}

/// Spawn one saucer on the left or right edge at a random height
pub fn spawn_saucer(world: &mut World) {
    let rng = &mut world.rng;
    let size = if rng.random_bool(0.5) {
        SaucerSize::Small
    } else {
        SaucerSize::Big
    };
    let y = rng.random_range(0.0..world.tuning.height);
    let from_left = rng.random_bool(0.5);
    let x = if from_left { 0.0 } else { world.tuning.width };

    let dir = match size {
        // Big saucers cross the screen away from the edge they entered on
        SaucerSize::Big => {
            if from_left {
                Vec2::X
            } else {
                Vec2::NEG_X
            }
        }
        SaucerSize::Small => {
            if rng.random_bool(0.5) {
                Vec2::X
            } else {
                Vec2::NEG_X
            }
        }
    };

    let pos = wrap_position(Vec2::new(x, y), world.tuning.width, world.tuning.height);
    let id = world.next_entity_id();
    world
        .saucers
        .push(Saucer::new(id, pos, size, dir, &world.tuning));
    log::debug!("{:?} saucer spawned at ({:.0}, {:.0})", size, pos.x, pos.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        World::new(Tuning::default().with_seed(7))
    }

    #[test]
    fn test_wave_count_grows_with_wave() {
        let t = Tuning::default();
        assert_eq!(wave_asteroid_count(&t, 1), 4);
        assert_eq!(wave_asteroid_count(&t, 5), 8);
    }

    #[test]
    fn test_edge_positions_are_on_an_edge() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let p = random_edge_pos(&t, &mut rng);
            // Far edges wrap onto x = 0 / y = 0
            assert!(p.x == 0.0 || p.y == 0.0, "{p:?} is not on an edge");
            assert!(p.x < t.width && p.y < t.height, "{p:?} is off the playfield");
        }
    }

    #[test]
    fn test_start_wave_keeps_distance_from_ship() {
        let mut w = world();
        start_wave(&mut w);
        assert_eq!(w.wave, 1);
        assert_eq!(w.asteroids.len(), 4);
        for a in &w.asteroids {
            assert_eq!(a.size, AsteroidSize::Large);
            assert!(a.pos.distance(w.ship.pos) >= w.tuning.wave_safe_distance);
            let speed = a.vel.length();
            assert!(speed >= 30.0 - 1e-3 && speed <= 90.0 + 1e-3);
        }
        assert!(w.events.contains(&GameEvent::WaveStarted { wave: 1 }));
    }

    #[test]
    fn test_split_large_gives_two_fast_mediums() {
        let mut w = world();
        spawn_asteroid(&mut w, Vec2::new(100.0, 100.0), Vec2::ZERO, AsteroidSize::Large);
        let large = w.asteroids.remove(0);

        split_asteroid(&mut w, &large);

        assert_eq!(w.score, 20);
        assert_eq!(w.asteroids.len(), 2);
        for child in &w.asteroids {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.pos, large.pos);
            let speed = child.vel.length();
            assert!(speed >= 30.0 * 1.2 - 1e-3 && speed <= 90.0 * 1.2 + 1e-3);
        }
    }

    #[test]
    fn test_split_small_leaves_nothing() {
        let mut w = world();
        spawn_asteroid(&mut w, Vec2::new(100.0, 100.0), Vec2::ZERO, AsteroidSize::Small);
        let small = w.asteroids.remove(0);
        split_asteroid(&mut w, &small);
        assert!(w.asteroids.is_empty());
        assert_eq!(w.score, 100);
    }

    #[test]
    fn test_big_saucers_head_into_the_screen() {
        let mut w = world();
        for _ in 0..100 {
            spawn_saucer(&mut w);
        }
        assert!(w.saucers.iter().any(|s| s.size == SaucerSize::Big));
        assert!(w.saucers.iter().any(|s| s.size == SaucerSize::Small));
        for s in &w.saucers {
            // Both side edges share the x = 0 seam
            assert_eq!(s.pos.x, 0.0);
            assert!(s.pos.y >= 0.0 && s.pos.y < w.tuning.height);
            assert_eq!(s.fire_cooldown, 0.0);
            if s.size == SaucerSize::Big {
                assert!(s.dir == Vec2::X || s.dir == Vec2::NEG_X);
            }
        }
        let big = || w.saucers.iter().filter(|s| s.size == SaucerSize::Big);
        assert!(big().any(|s| s.dir == Vec2::X));
        assert!(big().any(|s| s.dir == Vec2::NEG_X));
    }
}
