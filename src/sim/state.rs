//! Game state and core simulation types
//!
//! Everything the update pipeline mutates lives in [`GameWorld`]; the driver
//! owns exactly one instance and passes it through `tick` by reference.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (score hit zero on a wipeout); only `reset` leaves this state
    GameOver,
}

/// The skater: position, velocity and the tunable movement fields that
/// power-ups multiply.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub pos: Vec3,
    pub velocity: Vec3,
    /// Units moved per tick per held directional key
    pub speed: f32,
    /// Upward velocity applied on jump
    pub jump_power: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    pub on_ground: bool,
    pub grinding: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            velocity: Vec3::ZERO,
            speed: DEFAULT_SPEED,
            jump_power: DEFAULT_JUMP_POWER,
            gravity: DEFAULT_GRAVITY,
            on_ground: true,
            grinding: false,
        }
    }
}

/// Obstacle catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    TrafficCone,
    TrashCan,
    Hydrant,
    ConstructionBarrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::TrafficCone,
        ObstacleKind::TrashCan,
        ObstacleKind::Hydrant,
        ObstacleKind::ConstructionBarrier,
    ];

    /// Resting height of the obstacle's center above the street
    pub fn resting_height(&self) -> f32 {
        match self {
            ObstacleKind::TrafficCone => 0.5,
            ObstacleKind::TrashCan => 0.6,
            ObstacleKind::Hydrant => 0.4,
            ObstacleKind::ConstructionBarrier => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::TrafficCone => "trafficCone",
            ObstacleKind::TrashCan => "trashCan",
            ObstacleKind::Hydrant => "hydrant",
            ObstacleKind::ConstructionBarrier => "constructionBarrier",
        }
    }
}

/// A street obstacle. Collision radius is the fixed 1-unit threshold.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec3,
}

/// A collectible coin; destroyed on pickup
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec3,
    pub value: u32,
    /// Spin rate for the renderer, radians per tick
    pub rotation_speed: f32,
}

/// Power-up catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Jump,
    Invincibility,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Jump => "jump",
            PowerUpKind::Invincibility => "invincibility",
        }
    }
}

/// A power-up pickup sitting in the world
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
    /// Multiplier applied to the matching player field
    pub value: f32,
    pub duration_ms: f64,
}

/// A picked-up power-up currently modifying the player
#[derive(Debug, Clone)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub value: f32,
    /// Absolute sim-clock deadline
    pub expires_at_ms: f64,
}

/// A stationary character the player can skate up to for a line of dialogue
#[derive(Debug, Clone)]
pub struct Npc {
    pub id: u32,
    pub name: &'static str,
    pub pos: Vec3,
    pub messages: &'static [&'static str],
}

/// The grind target: a fixed segment running along the z axis
#[derive(Debug, Clone, Copy)]
pub struct Rail {
    pub pos: Vec3,
    pub length: f32,
}

impl Default for Rail {
    fn default() -> Self {
        Self {
            pos: Vec3::from_array(RAIL_POSITION),
            length: RAIL_LENGTH,
        }
    }
}

/// Boundary cues emitted by a tick for the driver to forward to audio and HUD.
/// The sim never touches the DOM or the audio context itself.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped,
    Ollie,
    GrindStarted,
    GrindStopped,
    ObstacleHit,
    CoinCollected { value: u32 },
    PowerUpApplied { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    NpcMessage { name: &'static str, message: &'static str },
    GameOver { final_score: u32 },
}

/// Complete mutable game state
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub seed: u64,
    pub player: PlayerState,
    pub rail: Rail,
    pub score: u32,
    pub phase: GamePhase,
    /// Index into [`crate::sim::spawn::AI_EVENTS`]
    pub ai_event: usize,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub npcs: Vec<Npc>,
    pub active_power_ups: Vec<ActivePowerUp>,
    /// Sim clock in milliseconds, advanced once per tick
    pub now_ms: f64,
    /// Sim time of the most recent obstacle spawn
    pub last_spawn_ms: f64,
    /// Deadline after which the HUD banner reverts to the event name
    pub banner_until_ms: Option<f64>,
    /// Deadline for the collision flash material marker
    pub flash_until_ms: Option<f64>,
    /// Deadline for the transient "Ollie!" text
    pub ollie_text_until_ms: Option<f64>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameWorld {
    /// Create a fresh world: player at spawn, initial coins/power-ups/NPCs
    /// seeded, no obstacles yet.
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            seed,
            player: PlayerState::default(),
            rail: Rail::default(),
            score: 0,
            phase: GamePhase::Playing,
            ai_event: 0,
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            npcs: Vec::new(),
            active_power_ups: Vec::new(),
            now_ms: 0.0,
            last_spawn_ms: 0.0,
            banner_until_ms: None,
            flash_until_ms: None,
            ollie_text_until_ms: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        world.ai_event = world.rng.random_range(0..super::spawn::AI_EVENTS.len());
        super::spawn::seed_world(&mut world);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True while any unexpired invincibility record exists
    pub fn invincible(&self) -> bool {
        self.active_power_ups
            .iter()
            .any(|pu| pu.kind == PowerUpKind::Invincibility)
    }

    /// Restart after a game over: player back to spawn with default movement
    /// fields, score zeroed, all entities and pending deadlines cleared, fresh
    /// coins/power-ups seeded, and a new random AI event.
    pub fn reset(&mut self) {
        self.player = PlayerState::default();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.npcs.clear();
        self.active_power_ups.clear();
        self.last_spawn_ms = self.now_ms;
        self.banner_until_ms = None;
        self.flash_until_ms = None;
        self.ollie_text_until_ms = None;
        self.ai_event = self.rng.random_range(0..super::spawn::AI_EVENTS.len());
        super::spawn::seed_world(self);
    }
}
