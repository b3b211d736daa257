//! End-to-end gameplay scenarios driven through the public API.

#![allow(clippy::unwrap_used)]

use glam::Vec2;

use rockfall::Tuning;
use rockfall::consts::SIM_DT;
use rockfall::sim::{
    AsteroidSize, ExplosionKind, GameEvent, GamePhase, Hazard, TickInput, World, spawn::spawn_asteroid,
};

fn world(seed: u64) -> World {
    let mut w = World::new(Tuning::default().with_seed(seed));
    // Keep saucers out of the way unless a test wants them
    w.saucer_timer = f32::MAX;
    w
}

fn exposed(w: &mut World) {
    w.ship.invuln = 0.0;
    w.safe_timer = 0.0;
}

#[test]
fn large_asteroid_rams_ship() {
    let mut w = world(2024);
    exposed(&mut w);
    let start = w.ship.pos + Vec2::new(0.0, 200.0);
    spawn_asteroid(&mut w, start, Vec2::new(0.0, -60.0), AsteroidSize::Large);

    let idle = TickInput::default();
    let mut hit = None;
    for _ in 0..600 {
        let summary = w.advance(SIM_DT, &idle);
        if summary.ship_hit.is_some() {
            hit = summary.ship_hit;
            break;
        }
    }

    assert_eq!(hit, Some(Hazard::Asteroid));
    assert_eq!(w.lives, w.tuning.start_lives - 1);
    assert_eq!(w.score, 20);
    assert_eq!(w.asteroids.len(), 2);
    assert!(w.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
    assert_eq!(w.ship.pos, w.tuning.center());
    assert!(w.ship.is_invulnerable());

    // The fragments cannot score again against the respawned ship
    for _ in 0..30 {
        w.advance(SIM_DT, &idle);
    }
    assert_eq!(w.score, 20);
    assert_eq!(w.lives, w.tuning.start_lives - 1);

    let events = w.drain_events();
    let ship_explosions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Explosion { kind: ExplosionKind::Ship, .. }))
        .count();
    assert_eq!(ship_explosions, 1);
}

#[test]
fn losing_last_life_resets_world() {
    let mut w = world(11);
    w.lives = 0;
    w.score = 4321;
    w.wave = 6;
    exposed(&mut w);
    let on_ship = w.ship.pos;
    spawn_asteroid(&mut w, on_ship, Vec2::ZERO, AsteroidSize::Medium);
    w.try_fire();

    w.advance(SIM_DT, &TickInput::default());

    assert_eq!(w.lives, w.tuning.start_lives);
    assert_eq!(w.score, 0);
    assert_eq!(w.wave, 0);
    assert_eq!(w.phase, GamePhase::WaveCooldown);
    assert!(w.asteroids.is_empty());
    assert!(w.bullets.is_empty());
    assert!(w.saucers.is_empty());
    assert!(w.saucer_bullets.is_empty());
    assert!(w.drain_events().contains(&GameEvent::WorldReset));
}

#[test]
fn repeated_deaths_reset_only_after_last_life() {
    let mut w = world(8);
    w.wave = 2;
    let idle = TickInput::default();

    // Burn every life; reaching zero keeps the game going
    for expected in (0..w.tuning.start_lives).rev() {
        exposed(&mut w);
        let on_ship = w.ship.pos;
        spawn_asteroid(&mut w, on_ship, Vec2::ZERO, AsteroidSize::Small);

        let summary = w.advance(SIM_DT, &idle);

        assert_eq!(summary.ship_hit, Some(Hazard::Asteroid));
        assert_eq!(w.lives, expected);
        assert_eq!(w.wave, 2);
        assert!(!w.drain_events().contains(&GameEvent::WorldReset));
    }
    assert_eq!(w.lives, 0);
    assert!(w.score > 0);

    // Park a rock on the respawned ship and wait out the safety window
    let on_ship = w.ship.pos;
    spawn_asteroid(&mut w, on_ship, Vec2::ZERO, AsteroidSize::Small);
    let grace_frames = (w.tuning.safe_spawn_time / SIM_DT) as usize;
    let mut waited = 0;
    let fatal = loop {
        assert!(waited < 600, "ship never became vulnerable");
        let summary = w.advance(SIM_DT, &idle);
        waited += 1;
        if w.drain_events().contains(&GameEvent::WorldReset) {
            break summary;
        }
        assert_eq!(w.lives, 0);
        assert!(summary.ship_hit.is_none());
    };

    assert!(waited >= grace_frames);
    assert_eq!(fatal.ship_hit, Some(Hazard::Asteroid));
    assert_eq!(w.lives, w.tuning.start_lives);
    assert_eq!(w.wave, 0);
    assert_eq!(w.score, 0);
    assert_eq!(w.phase, GamePhase::WaveCooldown);
    assert!(w.asteroids.is_empty());
    assert!(w.bullets.is_empty());
    assert!(w.saucers.is_empty());
    assert!(w.saucer_bullets.is_empty());
}

#[test]
fn cleared_field_brings_bigger_wave() {
    let mut w = world(77);
    let idle = TickInput::default();

    for expected_wave in 1..=3u32 {
        let frames = (w.tuning.wave_delay / SIM_DT).ceil() as usize + 5;
        for _ in 0..frames {
            w.advance(SIM_DT, &idle);
            if w.wave == expected_wave {
                break;
            }
        }
        assert_eq!(w.wave, expected_wave);
        assert_eq!(
            w.asteroids.len(),
            (w.tuning.wave_base_asteroids + expected_wave) as usize
        );
        // Wipe the field by hand for the next round
        w.asteroids.clear();
    }
}

#[test]
fn shooting_a_small_asteroid_scores_once() {
    let mut w = world(5);
    // Ship faces up; park a small asteroid straight ahead
    let target = w.ship.pos - Vec2::new(0.0, 120.0);
    spawn_asteroid(&mut w, target, Vec2::ZERO, AsteroidSize::Small);

    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    w.advance(SIM_DT, &fire);
    for _ in 0..60 {
        w.advance(SIM_DT, &TickInput::default());
    }

    assert_eq!(w.score, 100);
    assert!(w.asteroids.is_empty());
    assert!(w.bullets.is_empty());
}

#[test]
fn seeded_runs_replay_identically() {
    let run = |seed| {
        let mut w = World::new(Tuning::default().with_seed(seed));
        for frame in 0..1200u32 {
            let input = TickInput {
                turn_left: frame % 90 < 30,
                thrust: frame % 50 < 10,
                fire: frame % 7 == 0,
                hyperspace: frame % 400 == 399,
                ..Default::default()
            };
            w.advance(SIM_DT, &input);
        }
        serde_json::to_string(&w.snapshot()).unwrap()
    };
    assert_eq!(run(314), run(314));
}
