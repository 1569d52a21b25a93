//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, DOM, or audio dependencies; boundary effects leave as
//!   [`GameEvent`]s

pub mod collision;
pub mod physics;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;

pub use physics::near_rail;
pub use spawn::{AI_EVENTS, AiEvent};
pub use state::{
    ActivePowerUp, Coin, GameEvent, GamePhase, GameWorld, Npc, Obstacle, ObstacleKind,
    PlayerState, PowerUp, PowerUpKind, Rail,
};
pub use tick::{TickInput, tick};
