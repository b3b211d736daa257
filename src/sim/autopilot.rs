//! Demo-mode pilot
//!
//! Produces a [`TickInput`] from the current world, the same way a player
//! would: it only reads state and never touches the world directly.

use glam::Vec2;

use super::state::World;
use super::tick::TickInput;
use crate::normalize_degrees;

/// Heading error (degrees) under which the pilot stops turning
const AIM_TOLERANCE: f32 = 4.0;
/// Heading error (degrees) under which the pilot pulls the trigger
const FIRE_CONE: f32 = 10.0;
/// Extra clearance before a hazard counts as a threat
const THREAT_MARGIN: f32 = 90.0;

/// Shortest displacement from `from` to `to` on the wrapping playfield
fn wrapped_delta(from: Vec2, to: Vec2, width: f32, height: f32) -> Vec2 {
    let mut d = to - from;
    if d.x > width * 0.5 {
        d.x -= width;
    } else if d.x < -width * 0.5 {
        d.x += width;
    }
    if d.y > height * 0.5 {
        d.y -= height;
    } else if d.y < -height * 0.5 {
        d.y += height;
    }
    d
}

/// Pick controls for one frame: face the nearest asteroid and shoot it, or
/// turn tail and burn away when something is about to ram the ship.
pub fn autopilot_input(world: &World) -> TickInput {
    let mut input = TickInput::default();
    let ship = &world.ship;
    let (w, h) = (world.tuning.width, world.tuning.height);

    // Nearest hazard body: (offset, collision distance)
    let nearest = world
        .asteroids
        .iter()
        .map(|a| (wrapped_delta(ship.pos, a.pos, w, h), a.radius))
        .chain(
            world
                .saucers
                .iter()
                .map(|s| (wrapped_delta(ship.pos, s.pos, w, h), s.radius)),
        )
        .min_by(|a, b| {
            a.0.length_squared()
                .partial_cmp(&b.0.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some((offset, radius)) = nearest else {
        return input;
    };

    let threatened = offset.length() < radius + ship.radius + THREAT_MARGIN;
    let desired = if threatened { -offset } else { offset };
    let desired_angle = desired.y.atan2(desired.x).to_degrees();
    let error = normalize_degrees(desired_angle - ship.angle);

    if error < -AIM_TOLERANCE {
        input.turn_left = true;
    } else if error > AIM_TOLERANCE {
        input.turn_right = true;
    }

    if threatened {
        input.thrust = error.abs() < 30.0;
    } else {
        input.fire = error.abs() < FIRE_CONE && ship.fire_cooldown <= 0.0;
    }

    input
}
