//! Distance-threshold collision detection and response
//!
//! Player vs obstacles, coins, power-ups, and NPC proximity. All checks are
//! plain Euclidean distance against fixed radii; response mutates the world
//! and pushes boundary events.

use super::powerup;
use super::state::{GameEvent, GamePhase, GameWorld};
use crate::consts::*;
use crate::distance;

/// Check obstacle collisions and apply knockback/penalty on hit.
///
/// Skipped entirely by the caller while an invincibility power-up is active.
pub fn check_obstacles(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let hit = world
        .obstacles
        .iter()
        .any(|o| distance(world.player.pos, o.pos) < OBSTACLE_HIT_RADIUS);
    if hit {
        handle_collision(world, events);
    }
}

/// Knockback, score penalty (floored at zero), flash cue, and the one-way
/// transition to game over when the score bottoms out.
fn handle_collision(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    world.player.velocity.y = KNOCKBACK_VEL_Y;
    world.player.velocity.x = KNOCKBACK_VEL_X;
    world.player.on_ground = false;

    world.score = world.score.saturating_sub(COLLISION_PENALTY);
    world.flash_until_ms = Some(world.now_ms + FLASH_MS);
    events.push(GameEvent::ObstacleHit);

    if world.score == 0 {
        world.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { final_score: 0 });
        log::info!("wipeout at t={:.0}ms", world.now_ms);
    }
}

/// Pick up any coin within reach
pub fn collect_coins(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let player_pos = world.player.pos;
    let mut collected = 0u32;
    world.coins.retain(|coin| {
        if distance(player_pos, coin.pos) < PICKUP_RADIUS {
            collected += coin.value;
            events.push(GameEvent::CoinCollected { value: coin.value });
            false
        } else {
            true
        }
    });
    world.score += collected;
}

/// Pick up any power-up within reach and hand it to the power-up manager
pub fn collect_power_ups(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let player_pos = world.player.pos;
    let picked: Vec<_> = world
        .power_ups
        .iter()
        .filter(|pu| distance(player_pos, pu.pos) < PICKUP_RADIUS)
        .cloned()
        .collect();
    world
        .power_ups
        .retain(|pu| distance(player_pos, pu.pos) >= PICKUP_RADIUS);
    for pu in picked {
        powerup::apply(world, pu.kind, pu.value, pu.duration_ms);
        events.push(GameEvent::PowerUpApplied { kind: pu.kind });
    }
}

/// Surface a line of dialogue from the nearest NPC within talking range.
///
/// Only fires while no banner is already showing, so a player idling next to
/// an NPC gets one message per banner hold instead of one per frame.
pub fn check_npcs(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if world.banner_until_ms.is_some() {
        return;
    }
    let player_pos = world.player.pos;
    let nearest = world
        .npcs
        .iter()
        .map(|npc| (npc, distance(player_pos, npc.pos)))
        .filter(|(_, d)| *d < NPC_TALK_RADIUS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((npc, _)) = nearest {
        use rand::Rng;
        let idx = world.rng.random_range(0..npc.messages.len());
        let message = npc.messages[idx];
        world.banner_until_ms = Some(world.now_ms + BANNER_HOLD_MS);
        events.push(GameEvent::NpcMessage { name: npc.name, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameWorld, Obstacle, ObstacleKind, PowerUpKind};
    use glam::Vec3;

    fn world_with_obstacle(at: Vec3) -> GameWorld {
        let mut w = GameWorld::new(2);
        w.coins.clear();
        w.power_ups.clear();
        let id = w.next_entity_id();
        w.obstacles.push(Obstacle { id, kind: ObstacleKind::TrafficCone, pos: at });
        w
    }

    #[test]
    fn test_obstacle_hit_applies_knockback_and_penalty() {
        let mut w = world_with_obstacle(Vec3::new(0.5, 1.0, 0.0));
        w.score = 300;
        let mut events = Vec::new();
        check_obstacles(&mut w, &mut events);

        assert_eq!(w.score, 200);
        assert_eq!(w.player.velocity.y, KNOCKBACK_VEL_Y);
        assert_eq!(w.player.velocity.x, KNOCKBACK_VEL_X);
        assert!(!w.player.on_ground);
        assert!(events.contains(&GameEvent::ObstacleHit));
        assert_eq!(w.phase, GamePhase::Playing);
    }

    #[test]
    fn test_score_floors_at_zero_and_triggers_game_over() {
        let mut w = world_with_obstacle(Vec3::new(0.5, 1.0, 0.0));
        w.score = 40;
        let mut events = Vec::new();
        check_obstacles(&mut w, &mut events);

        assert_eq!(w.score, 0);
        assert_eq!(w.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_obstacle_out_of_range_is_ignored() {
        let mut w = world_with_obstacle(Vec3::new(5.0, 1.0, 0.0));
        w.score = 300;
        let mut events = Vec::new();
        check_obstacles(&mut w, &mut events);
        assert_eq!(w.score, 300);
        assert!(events.is_empty());
    }

    #[test]
    fn test_coin_pickup_scores_and_removes() {
        let mut w = GameWorld::new(4);
        w.coins.clear();
        let id = w.next_entity_id();
        w.coins.push(crate::sim::state::Coin {
            id,
            pos: w.player.pos,
            value: 50,
            rotation_speed: 0.02,
        });
        let before = w.coins.len();
        let mut events = Vec::new();
        collect_coins(&mut w, &mut events);
        assert_eq!(w.coins.len(), before - 1);
        assert_eq!(w.score, 50);
        assert!(events.contains(&GameEvent::CoinCollected { value: 50 }));
    }

    #[test]
    fn test_power_up_pickup_applies_modifier() {
        let mut w = GameWorld::new(6);
        w.power_ups.clear();
        let id = w.next_entity_id();
        w.power_ups.push(crate::sim::state::PowerUp {
            id,
            kind: PowerUpKind::Speed,
            pos: w.player.pos,
            value: 1.5,
            duration_ms: 5000.0,
        });
        let mut events = Vec::new();
        collect_power_ups(&mut w, &mut events);
        assert!(w.power_ups.is_empty());
        assert_eq!(w.active_power_ups.len(), 1);
        assert!((w.player.speed - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_npc_proximity_sets_banner_once() {
        let mut w = GameWorld::new(8);
        w.player.pos = w.npcs[0].pos + Vec3::new(1.0, 0.0, 0.0);
        let mut events = Vec::new();
        check_npcs(&mut w, &mut events);
        assert_eq!(events.len(), 1);
        assert!(w.banner_until_ms.is_some());

        // A second check while the banner is up stays quiet
        check_npcs(&mut w, &mut events);
        assert_eq!(events.len(), 1);
    }
}
