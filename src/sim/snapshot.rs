//! Render snapshot: read-only view of the world for the presentation layer.
//!
//! Building a snapshot never modifies the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{AsteroidSize, Bullet, SaucerSize};
use super::state::{GamePhase, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    /// Heading in degrees
    pub angle: f32,
    pub radius: f32,
    /// Always true under the respawn-or-reset rules
    pub alive: bool,
    pub invulnerable: bool,
    /// Blink phase for drawing the invulnerability ring
    pub shield_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub id: u32,
    pub pos: Vec2,
    pub size: AsteroidSize,
    /// Vertices relative to `pos`
    pub outline: Vec<Vec2>,
}

impl AsteroidView {
    /// Outline in playfield coordinates
    pub fn world_outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outline.iter().map(move |&v| self.pos + v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

impl From<&Bullet> for BulletView {
    fn from(bullet: &Bullet) -> Self {
        Self {
            pos: bullet.pos,
            radius: bullet.radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaucerView {
    pub id: u32,
    pub pos: Vec2,
    pub size: SaucerSize,
    pub radius: f32,
    /// Marksmanship of this saucer class (0 = wild, 1 = perfect)
    pub aim: f32,
}

/// Counters for the HUD line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: i32,
    pub wave: u32,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub player_bullets: Vec<BulletView>,
    pub saucer_bullets: Vec<BulletView>,
    pub saucers: Vec<SaucerView>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(world: &World) -> Self {
        let ship = &world.ship;
        Self {
            frame: world.frame,
            phase: world.phase,
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                radius: ship.radius,
                alive: ship.alive,
                invulnerable: ship.is_invulnerable(),
                shield_visible: ship.shield_visible(),
            },
            asteroids: world
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    id: a.id,
                    pos: a.pos,
                    size: a.size,
                    outline: a.outline.clone(),
                })
                .collect(),
            player_bullets: world.bullets.iter().map(BulletView::from).collect(),
            saucer_bullets: world.saucer_bullets.iter().map(BulletView::from).collect(),
            saucers: world
                .saucers
                .iter()
                .map(|s| SaucerView {
                    id: s.id,
                    pos: s.pos,
                    size: s.size,
                    radius: s.radius,
                    aim: world.tuning.saucer(s.size).aim,
                })
                .collect(),
            hud: Hud {
                score: world.score,
                lives: world.lives,
                wave: world.wave,
            },
        }
    }
}

impl World {
    /// Renderable view of the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
