//! Rockfall - A wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Simulation core (physics, spawning, collisions, world state)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors
//!
//! Rendering, audio and input devices live in the host. The host feeds a
//! [`sim::TickInput`] per frame and reads back a [`sim::RenderSnapshot`] plus
//! the queued [`sim::GameEvent`]s.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed-step driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ship heading at spawn (degrees, screen space: up is -90)
    pub const SHIP_SPAWN_ANGLE: f32 = -90.0;
    /// Aim direction used when a saucer sits exactly on the ship
    pub const SAUCER_FALLBACK_AIM: (f32, f32) = (0.0, -1.0);
}

/// Wrap a position onto the torus `[0, width) x [0, height)`.
///
/// `rem_euclid` can round up to exactly `rhs` for tiny negative inputs, so the
/// upper edge is folded back to zero.
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

#[inline]
fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (0 = +x, screen space so -90 = up)
#[inline]
pub fn angle_to_vec(degrees: f32) -> Vec2 {
    vec_from_radians(degrees.to_radians())
}

/// Unit vector for an angle in radians
#[inline]
pub fn vec_from_radians(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_position_inside_is_identity() {
        let p = wrap_position(Vec2::new(10.0, 700.0), 960.0, 720.0);
        assert_eq!(p, Vec2::new(10.0, 700.0));
    }

    #[test]
    fn test_wrap_position_reenters_opposite_edge() {
        let p = wrap_position(Vec2::new(965.0, -5.0), 960.0, 720.0);
        assert!((p.x - 5.0).abs() < 1e-3);
        assert!((p.y - 715.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_position_tiny_negative_stays_in_range() {
        let p = wrap_position(Vec2::new(-1e-9, -1e-9), 960.0, 720.0);
        assert!(p.x >= 0.0 && p.x < 960.0);
        assert!(p.y >= 0.0 && p.y < 720.0);
    }

    #[test]
    fn test_angle_to_vec_up_is_negative_y() {
        let up = angle_to_vec(consts::SHIP_SPAWN_ANGLE);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + 1.0).abs() < 1e-5);

        let right = angle_to_vec(0.0);
        assert!((right.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(270.0) + 90.0).abs() < 1e-4);
        assert!((normalize_degrees(-450.0) + 90.0).abs() < 1e-4);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-4);
    }
}
