//! Obstacle spawning and recycling, plus initial world seeding
//!
//! Keeps a bounded, continuously-relevant set of obstacles ahead of the
//! player: spawning is time-gated by the current AI event, and anything that
//! falls far enough behind is teleported ahead or removed.

use glam::Vec3;
use rand::Rng;

use super::state::{Coin, GameWorld, Npc, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::*;

/// A named preset controlling obstacle spawn frequency
#[derive(Debug, Clone, Copy)]
pub struct AiEvent {
    pub name: &'static str,
    pub obstacle_frequency_ms: f64,
}

/// Spawn-frequency presets, cycled randomly on reset
pub const AI_EVENTS: [AiEvent; 4] = [
    AiEvent { name: "Rush Hour", obstacle_frequency_ms: 2000.0 },
    AiEvent { name: "Construction Zone", obstacle_frequency_ms: 2500.0 },
    AiEvent { name: "Sunday Morning", obstacle_frequency_ms: 4000.0 },
    AiEvent { name: "Street Festival", obstacle_frequency_ms: 1800.0 },
];

const INSTRUCTOR_MESSAGES: &[&str] = &[
    "Press E to do an ollie!",
    "Hold Shift while near a rail to grind!",
    "Space to jump, WASD to move!",
    "Watch out for obstacles and collect coins!",
    "Find power-ups to enhance your abilities!",
];

const RIVAL_MESSAGES: &[&str] = &[
    "Think you're good enough to beat me?",
    "Show me what you got, rookie!",
    "Get a score over 1000 to challenge me!",
    "You'll never be the Street King!",
    "Nice moves, but still not as good as mine!",
];

/// Power-up catalog: (kind, multiplier, duration)
const POWERUP_CATALOG: [(PowerUpKind, f32, f64); 3] = [
    (PowerUpKind::Speed, 1.5, 5000.0),
    (PowerUpKind::Jump, 2.0, 5000.0),
    (PowerUpKind::Invincibility, 1.0, 3000.0),
];

/// Seed the initial coins, power-ups and NPCs into a fresh (or reset) world
pub fn seed_world(world: &mut GameWorld) {
    for _ in 0..INITIAL_COINS {
        let id = world.next_entity_id();
        let pos = Vec3::new(
            world.rng.random_range(-40.0..40.0),
            world.rng.random_range(1.0..3.0),
            world.rng.random_range(-8.0..8.0),
        );
        let rotation_speed = world.rng.random_range(0.02..0.04);
        world.coins.push(Coin { id, pos, value: COIN_VALUE, rotation_speed });
    }

    for _ in 0..INITIAL_POWERUPS {
        let id = world.next_entity_id();
        let (kind, value, duration_ms) =
            POWERUP_CATALOG[world.rng.random_range(0..POWERUP_CATALOG.len())];
        let pos = Vec3::new(
            world.rng.random_range(-30.0..30.0),
            world.rng.random_range(1.5..2.5),
            world.rng.random_range(-7.0..7.0),
        );
        world.power_ups.push(PowerUp { id, kind, pos, value, duration_ms });
    }

    let instructor_id = world.next_entity_id();
    world.npcs.push(Npc {
        id: instructor_id,
        name: "Skate Pro",
        pos: Vec3::new(-10.0, 1.0, -7.0),
        messages: INSTRUCTOR_MESSAGES,
    });
    let rival_id = world.next_entity_id();
    world.npcs.push(Npc {
        id: rival_id,
        name: "Street King",
        pos: Vec3::new(10.0, 1.0, 7.0),
        messages: RIVAL_MESSAGES,
    });
}

/// Create one obstacle near the player: random kind, random side, 10-15 units
/// out along x, random lane along z.
pub fn spawn_obstacle(world: &mut GameWorld) {
    let kind = ObstacleKind::ALL[world.rng.random_range(0..ObstacleKind::ALL.len())];
    let side = if world.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let offset = 10.0 + world.rng.random_range(0.0..5.0);
    let pos = Vec3::new(
        world.player.pos.x + side * offset,
        kind.resting_height(),
        world.rng.random_range(-8.0..8.0),
    );
    let id = world.next_entity_id();
    world.obstacles.push(Obstacle { id, kind, pos });
    world.last_spawn_ms = world.now_ms;
    log::debug!("spawned {} at x={:.1} z={:.1}", kind.as_str(), pos.x, pos.z);
}

/// One spawner/recycler pass: spawn if the event's frequency has elapsed, then
/// teleport far-behind obstacles ahead and drop anything beyond the removal
/// window.
pub fn update_obstacles(world: &mut GameWorld) {
    let frequency = AI_EVENTS[world.ai_event].obstacle_frequency_ms;
    if world.now_ms - world.last_spawn_ms > frequency {
        spawn_obstacle(world);
    }

    let player_x = world.player.pos.x;
    for obstacle in &mut world.obstacles {
        if obstacle.pos.x < player_x - RECYCLE_BEHIND {
            obstacle.pos.x = player_x + RECYCLE_BEHIND + world.rng.random_range(0.0..10.0);
            obstacle.pos.z = world.rng.random_range(-8.0..8.0);
        }
    }

    world
        .obstacles
        .retain(|o| o.pos.x >= player_x - REMOVE_BEHIND);
}
