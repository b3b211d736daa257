//! Collision detection and resolution
//!
//! Everything is a circle. Resolution runs four passes in a fixed order and
//! each pass commits its removals before the next starts, so an entity killed
//! early is simply absent later in the frame:
//!
//! 1. bullets (both pools) vs asteroids
//! 2. ship vs hazards: asteroid, then saucer, then saucer bullet
//! 3. saucers vs player bullets
//! 4. saucers vs asteroids
//!
//! The hazard order in pass 2 is first-match-wins. Beyond guaranteeing one
//! death per frame the order is arbitrary; nothing else depends on it.

use glam::Vec2;

use super::entity::Saucer;
use super::spawn::split_asteroid;
use super::state::{ExplosionKind, GameEvent, World};

/// What killed the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Asteroid,
    Saucer,
    SaucerBullet,
}

/// Outcome of one frame of collision resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    /// Asteroids destroyed (each one split and scored)
    pub asteroids_destroyed: usize,
    /// Saucers destroyed (each one scored)
    pub saucers_destroyed: usize,
    /// Set when the ship was destroyed this frame
    pub ship_hit: Option<Hazard>,
}

/// True when the centres are closer than `threshold`
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Run all collision passes in order
pub fn resolve_collisions(world: &mut World) -> CollisionSummary {
    let mut summary = CollisionSummary {
        asteroids_destroyed: bullets_vs_asteroids(world),
        ..Default::default()
    };

    if let Some((hazard, asteroid_hit, saucer_hit)) = ship_vs_hazards(world) {
        summary.ship_hit = Some(hazard);
        summary.asteroids_destroyed += asteroid_hit as usize;
        summary.saucers_destroyed += saucer_hit as usize;
    }

    summary.saucers_destroyed += saucers_vs_player_bullets(world);

    let (saucers, asteroids) = saucers_vs_asteroids(world);
    summary.saucers_destroyed += saucers;
    summary.asteroids_destroyed += asteroids;

    summary
}

/// Split `items` into (kept, removed) according to `marked`, keeping order
fn remove_marked<T>(items: &mut Vec<T>, marked: &[bool]) -> Vec<T> {
    debug_assert_eq!(items.len(), marked.len());
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = Vec::new();
    for (item, &hit) in items.drain(..).zip(marked) {
        if hit {
            removed.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    removed
}

/// Pass 1: any bullet whose centre is inside an asteroid destroys both.
/// A bullet is consumed by the first asteroid it hits.
fn bullets_vs_asteroids(world: &mut World) -> usize {
    let mut hit = vec![false; world.asteroids.len()];
    for (i, asteroid) in world.asteroids.iter().enumerate() {
        let (pos, radius) = (asteroid.pos, asteroid.radius);
        let before = world.bullets.len() + world.saucer_bullets.len();
        world
            .bullets
            .retain(|b| !circles_overlap(b.pos, pos, radius));
        world
            .saucer_bullets
            .retain(|b| !circles_overlap(b.pos, pos, radius));
        hit[i] = world.bullets.len() + world.saucer_bullets.len() < before;
    }

    let destroyed = remove_marked(&mut world.asteroids, &hit);
    for asteroid in &destroyed {
        split_asteroid(world, asteroid);
    }
    destroyed.len()
}

/// Pass 2: first hazard touching a vulnerable ship destroys it.
///
/// Returns the hazard plus whether an asteroid or saucer died with the ship.
fn ship_vs_hazards(world: &mut World) -> Option<(Hazard, bool, bool)> {
    if !world.ship_vulnerable() {
        return None;
    }
    let (ship_pos, ship_radius) = (world.ship.pos, world.ship.radius);

    let outcome = if let Some(i) = world
        .asteroids
        .iter()
        .position(|a| circles_overlap(a.pos, ship_pos, a.radius + ship_radius))
    {
        let asteroid = world.asteroids.remove(i);
        split_asteroid(world, &asteroid);
        (Hazard::Asteroid, true, false)
    } else if let Some(i) = world
        .saucers
        .iter()
        .position(|s| circles_overlap(s.pos, ship_pos, s.radius + ship_radius))
    {
        let saucer = world.saucers.remove(i);
        destroy_saucer(world, &saucer);
        (Hazard::Saucer, false, true)
    } else if let Some(i) = world
        .saucer_bullets
        .iter()
        .position(|b| circles_overlap(b.pos, ship_pos, b.radius + ship_radius))
    {
        world.saucer_bullets.remove(i);
        (Hazard::SaucerBullet, false, false)
    } else {
        return None;
    };

    world.ship_destroyed();
    Some(outcome)
}

/// Pass 3: a player bullet touching a saucer destroys both
fn saucers_vs_player_bullets(world: &mut World) -> usize {
    let mut hit = vec![false; world.saucers.len()];
    for (i, saucer) in world.saucers.iter().enumerate() {
        if let Some(j) = world
            .bullets
            .iter()
            .position(|b| circles_overlap(b.pos, saucer.pos, saucer.radius + b.radius))
        {
            world.bullets.remove(j);
            hit[i] = true;
        }
    }

    let destroyed = remove_marked(&mut world.saucers, &hit);
    for saucer in &destroyed {
        destroy_saucer(world, saucer);
    }
    destroyed.len()
}

/// Pass 4: a saucer touching an asteroid destroys both.
/// Each asteroid can take out at most one saucer.
fn saucers_vs_asteroids(world: &mut World) -> (usize, usize) {
    let mut saucer_hit = vec![false; world.saucers.len()];
    let mut asteroid_hit = vec![false; world.asteroids.len()];
    for (i, saucer) in world.saucers.iter().enumerate() {
        let found = world.asteroids.iter().enumerate().position(|(j, a)| {
            !asteroid_hit[j] && circles_overlap(a.pos, saucer.pos, a.radius + saucer.radius)
        });
        if let Some(j) = found {
            saucer_hit[i] = true;
            asteroid_hit[j] = true;
        }
    }

    let saucers = remove_marked(&mut world.saucers, &saucer_hit);
    let asteroids = remove_marked(&mut world.asteroids, &asteroid_hit);
    for saucer in &saucers {
        destroy_saucer(world, saucer);
    }
    for asteroid in &asteroids {
        split_asteroid(world, asteroid);
    }
    (saucers.len(), asteroids.len())
}

/// Score a removed saucer and report the explosion
fn destroy_saucer(world: &mut World, saucer: &Saucer) {
    world.award(saucer.score(&world.tuning));
    world.events.push(GameEvent::Explosion {
        kind: ExplosionKind::Saucer,
        pos: saucer.pos,
    });
}
