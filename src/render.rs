//! Renderer boundary
//!
//! The core never draws. Once per frame the driver builds a [`RenderSnapshot`]
//! from the world and hands it to whatever [`SceneRenderer`] is installed;
//! scene construction, meshes, lighting and materials all live behind that
//! trait. [`NullRenderer`] is the inert fallback when presentation setup
//! fails, so the core keeps ticking regardless.

use glam::Vec3;

use crate::sim::{GameWorld, ObstacleKind, PowerUpKind};

/// Stable handle a renderer uses to track scene objects across frames
pub type EntityId = u32;

/// Material hints for the player mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerMaterial {
    /// Collision flash (red tint) is active
    pub flashing: bool,
    /// Invincibility glow is active
    pub invincible: bool,
}

/// One drawable world object
#[derive(Debug, Clone)]
pub struct SpriteState {
    pub id: EntityId,
    pub pos: Vec3,
    /// Spin applied per frame, radians (coins and power-ups)
    pub rotation_speed: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub player_pos: Vec3,
    pub player_grinding: bool,
    pub player_material: PlayerMaterial,
    /// Transient "Ollie!" text should be visible above the player
    pub ollie_text_visible: bool,
    pub obstacles: Vec<(SpriteState, ObstacleKind)>,
    pub coins: Vec<SpriteState>,
    pub power_ups: Vec<(SpriteState, PowerUpKind)>,
    pub npcs: Vec<SpriteState>,
    pub rail_pos: Vec3,
    pub rail_length: f32,
}

impl RenderSnapshot {
    /// Capture the drawable state of the world
    pub fn capture(world: &GameWorld) -> Self {
        Self {
            player_pos: world.player.pos,
            player_grinding: world.player.grinding,
            player_material: PlayerMaterial {
                flashing: world.flash_until_ms.is_some(),
                invincible: world.invincible(),
            },
            ollie_text_visible: world.ollie_text_until_ms.is_some(),
            obstacles: world
                .obstacles
                .iter()
                .map(|o| {
                    (
                        SpriteState { id: o.id, pos: o.pos, rotation_speed: 0.0 },
                        o.kind,
                    )
                })
                .collect(),
            coins: world
                .coins
                .iter()
                .map(|c| SpriteState { id: c.id, pos: c.pos, rotation_speed: c.rotation_speed })
                .collect(),
            power_ups: world
                .power_ups
                .iter()
                .map(|p| {
                    (
                        SpriteState { id: p.id, pos: p.pos, rotation_speed: 0.03 },
                        p.kind,
                    )
                })
                .collect(),
            npcs: world
                .npcs
                .iter()
                .map(|n| SpriteState { id: n.id, pos: n.pos, rotation_speed: 0.01 })
                .collect(),
            rail_pos: world.rail.pos,
            rail_length: world.rail.length,
        }
    }
}

/// The presentation side of the game: accepts a snapshot and draws it
pub trait SceneRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

/// Draws nothing. Installed when renderer setup fails so the game loop keeps
/// running headless.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn render(&mut self, _snapshot: &RenderSnapshot) {}
}
