//! Per-frame simulation step
//!
//! Core game loop that advances the world by one frame.

use super::collision::{CollisionSummary, resolve_collisions};
use super::entity::{Bullet, BulletOwner, SaucerSize};
use super::spawn::{spawn_saucer, start_wave};
use super::state::{GameEvent, GamePhase, World};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rotate counter-clockwise (held)
    pub turn_left: bool,
    /// Rotate clockwise (held)
    pub turn_right: bool,
    /// Accelerate along the heading (held)
    pub thrust: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Hyperspace pressed this frame
    pub hyperspace: bool,
}

impl TickInput {
    /// Copy with the edge-triggered actions cleared
    pub fn held_only(&self) -> Self {
        Self {
            fire: false,
            hyperspace: false,
            ..*self
        }
    }
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> CollisionSummary {
    world.frame += 1;

    // Edge-triggered actions land before the frame's physics
    if input.hyperspace {
        world.hyperspace();
    }
    if input.fire {
        world.try_fire();
    }

    integrate(world, input, dt);

    // Small saucers home in on the ship
    let target = world.ship.pos;
    for saucer in world
        .saucers
        .iter_mut()
        .filter(|s| s.size == SaucerSize::Small)
    {
        saucer.steer_toward(target, &world.tuning);
    }

    // Safety window keeps re-arming the ship's shield
    if world.safe_timer > 0.0 {
        world.safe_timer = (world.safe_timer - dt).max(0.0);
        world.ship.invuln = world.ship.invuln.max(world.tuning.safety_invuln_refresh);
    }

    world.saucer_timer -= dt;
    if world.saucer_timer <= 0.0 {
        spawn_saucer(world);
        world.saucer_timer = world.tuning.saucer_spawn_every;
    }

    saucers_fire(world, dt);

    let summary = resolve_collisions(world);

    update_wave(world, dt);

    summary
}

/// Move every entity and drop expired bullets
fn integrate(world: &mut World, input: &TickInput, dt: f32) {
    let tuning = &world.tuning;

    world.ship.control(input, dt, tuning);
    world.ship.integrate(dt, tuning);

    for bullet in world.bullets.iter_mut() {
        bullet.update(dt, tuning);
    }
    world.bullets.retain(|b| !b.expired());

    for bullet in world.saucer_bullets.iter_mut() {
        bullet.update(dt, tuning);
    }
    world.saucer_bullets.retain(|b| !b.expired());

    for asteroid in world.asteroids.iter_mut() {
        asteroid.update(dt, tuning);
    }

    for saucer in world.saucers.iter_mut() {
        saucer.update(dt, tuning);
    }
}

/// Every saucer whose cooldown has run out shoots straight at the ship
fn saucers_fire(world: &mut World, dt: f32) {
    let target = world.ship.pos;
    for i in 0..world.saucers.len() {
        let saucer = &mut world.saucers[i];
        saucer.fire_cooldown = (saucer.fire_cooldown - dt).max(0.0);
        if saucer.fire_cooldown > 0.0
            || world.saucer_bullets.len() >= world.tuning.max_saucer_bullets
        {
            continue;
        }

        let id = world.next_entity_id();
        let saucer = &mut world.saucers[i];
        saucer.fire_cooldown = world.tuning.saucer_fire_interval;
        let vel = saucer.aim_at(target) * world.tuning.saucer_bullet_speed;
        let bullet = Bullet::new(id, saucer.pos, vel, BulletOwner::Saucer, &world.tuning);
        world.saucer_bullets.push(bullet);
        world.events.push(GameEvent::SaucerShoot);
    }
}

/// Count down an empty field and launch the next wave
fn update_wave(world: &mut World, dt: f32) {
    if !world.asteroids.is_empty() {
        world.phase = GamePhase::Playing;
        return;
    }

    world.phase = GamePhase::WaveCooldown;
    if world.wave_cooldown <= 0.0 {
        start_wave(world);
        world.wave_cooldown = world.tuning.wave_delay;
        world.phase = GamePhase::Playing;
    } else {
        world.wave_cooldown = (world.wave_cooldown - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::{AsteroidSize, Saucer};
    use crate::sim::spawn::spawn_asteroid;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn world() -> World {
        World::new(Tuning::default().with_seed(12345))
    }

    #[test]
    fn test_first_wave_after_delay() {
        let mut w = world();
        let input = TickInput::default();
        let frames = (w.tuning.wave_delay / SIM_DT).ceil() as usize + 5;
        for _ in 0..frames {
            tick(&mut w, &input, SIM_DT);
            if w.wave > 0 {
                break;
            }
        }
        assert_eq!(w.wave, 1);
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(!w.asteroids.is_empty());
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut w = world();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut w, &fire, SIM_DT);
        assert_eq!(w.bullets.len(), 1);

        // Holding the button is the host's business; a held-only frame never fires
        tick(&mut w, &fire.held_only(), SIM_DT);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_safety_timer_refreshes_invulnerability() {
        let mut w = world();
        w.ship.invuln = 0.0;
        w.safe_timer = 0.5;
        tick(&mut w, &TickInput::default(), SIM_DT);
        assert!(w.ship.is_invulnerable());
        assert!(w.safe_timer < 0.5);
    }

    #[test]
    fn test_saucer_spawns_on_timer() {
        let mut w = world();
        w.saucer_timer = SIM_DT / 2.0;
        tick(&mut w, &TickInput::default(), SIM_DT);
        assert_eq!(w.saucers.len(), 1);
        assert_eq!(w.saucer_timer, w.tuning.saucer_spawn_every);
        // Fresh saucers shoot on arrival
        assert_eq!(w.saucer_bullets.len(), 1);
        assert!(w.drain_events().contains(&GameEvent::SaucerShoot));
    }

    #[test]
    fn test_saucer_fire_cadence_and_cap() {
        let mut w = world();
        w.tuning.max_saucer_bullets = 2;
        let target = w.ship.pos;
        for k in 0..3 {
            let id = w.next_entity_id();
            let pos = target + Vec2::new(200.0 + 40.0 * k as f32, 0.0);
            let mut saucer = Saucer::new(id, pos, SaucerSize::Big, Vec2::ZERO, &w.tuning);
            saucer.speed = 0.0;
            w.saucers.push(saucer);
        }

        tick(&mut w, &TickInput::default(), SIM_DT);
        assert_eq!(w.saucer_bullets.len(), 2);
        // The third saucer is held back by the cap and stays ready
        assert_eq!(w.saucers[2].fire_cooldown, 0.0);
        for bullet in &w.saucer_bullets {
            assert!(bullet.vel.x < 0.0, "bullets must head toward the ship");
            assert!(bullet.vel.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_wave_not_started_while_asteroids_remain() {
        let mut w = world();
        w.wave_cooldown = 0.0;
        spawn_asteroid(&mut w, Vec2::new(10.0, 10.0), Vec2::ZERO, AsteroidSize::Small);
        tick(&mut w, &TickInput::default(), SIM_DT);
        assert_eq!(w.wave, 0);
        assert_eq!(w.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut w1 = world();
        let mut w2 = world();

        let inputs = [
            TickInput {
                thrust: true,
                turn_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                hyperspace: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut w1, input, SIM_DT);
            tick(&mut w2, input, SIM_DT);
        }

        assert_eq!(w1.frame, w2.frame);
        assert_eq!(w1.score, w2.score);
        assert_eq!(w1.asteroids.len(), w2.asteroids.len());
        assert_eq!(w1.ship.pos, w2.ship.pos);
    }
}
