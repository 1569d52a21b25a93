//! Street Skate - a browser-based 3D skateboarding arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game core (movement, collisions, spawning, scoring)
//! - `render`: Renderer boundary (snapshot + trait, drawing lives outside)
//! - `audio`: Web Audio oscillator cues (wasm only)
//! - `settings`: Persisted preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching per-frame source constants)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed timestep in milliseconds (the sim clock unit)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Street bounds
    pub const STREET_MIN_X: f32 = -45.0;
    pub const STREET_MAX_X: f32 = 45.0;
    pub const STREET_MIN_Z: f32 = -9.0;
    pub const STREET_MAX_Z: f32 = 9.0;

    /// Ground height the player rides at
    pub const GROUND_HEIGHT: f32 = 1.0;

    /// Player movement defaults
    pub const DEFAULT_SPEED: f32 = 0.1;
    pub const DEFAULT_JUMP_POWER: f32 = 1.5;
    pub const DEFAULT_GRAVITY: f32 = 0.005;

    /// Rail geometry: a single fixed segment running along z
    pub const RAIL_POSITION: [f32; 3] = [0.0, 1.0, 0.0];
    pub const RAIL_LENGTH: f32 = 10.0;
    /// Player rides slightly above the rail while grinding
    pub const GRIND_HEIGHT_OFFSET: f32 = 0.25;
    /// Grind movement is faster than rolling
    pub const GRIND_SPEED_FACTOR: f32 = 1.5;

    /// Rail proximity thresholds (canonical tight definition)
    pub const RAIL_NEAR_X: f32 = 0.5;
    pub const RAIL_NEAR_Z: f32 = 0.7;

    /// Collision radii
    pub const OBSTACLE_HIT_RADIUS: f32 = 1.0;
    pub const PICKUP_RADIUS: f32 = 1.0;
    pub const NPC_TALK_RADIUS: f32 = 3.0;

    /// Scoring
    pub const OLLIE_POINTS: u32 = 20;
    pub const GRIND_POINTS: u32 = 5;
    pub const COLLISION_PENALTY: u32 = 100;
    pub const COIN_VALUE: u32 = 50;

    /// Knockback applied on obstacle collision
    pub const KNOCKBACK_VEL_Y: f32 = 0.5;
    pub const KNOCKBACK_VEL_X: f32 = -0.1;

    /// Obstacle recycling window relative to the player
    pub const RECYCLE_BEHIND: f32 = 50.0;
    pub const REMOVE_BEHIND: f32 = 60.0;

    /// Initial entity seeding
    pub const INITIAL_COINS: usize = 30;
    pub const INITIAL_POWERUPS: usize = 5;

    /// HUD banner reverts to the event name after this long
    pub const BANNER_HOLD_MS: f64 = 3000.0;
    /// Collision flash duration
    pub const FLASH_MS: f64 = 300.0;
    /// Transient "Ollie!" text duration
    pub const OLLIE_TEXT_MS: f64 = 1000.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}
