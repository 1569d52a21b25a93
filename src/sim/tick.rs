//! Fixed timestep update pass
//!
//! One tick runs the whole pipeline in a fixed order: clock, transient
//! deadlines, player physics, collisions, pickups, NPC proximity, the
//! spawner/recycler, and the power-up expiry scan. The driver calls this from
//! an accumulator loop at 60 Hz.

use super::state::{GameEvent, GamePhase, GameWorld};
use super::{collision, physics, powerup, spawn};
use crate::consts::SIM_DT_MS;

/// Latched input state for a single tick.
///
/// Held keys are latched by the driver's keydown/keyup handlers; `ollie` is a
/// one-shot edge the driver clears after each simulated tick so holding E
/// cannot retrigger every frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// W held
    pub forward: bool,
    /// S held
    pub back: bool,
    /// A held
    pub left: bool,
    /// D held
    pub right: bool,
    /// Space held
    pub jump: bool,
    /// Shift held
    pub grind: bool,
    /// E edge (debounced)
    pub ollie: bool,
}

/// Advance the world by one fixed timestep, returning the boundary cues the
/// driver should forward to audio and the HUD.
///
/// A no-op while the world is in `GameOver`; only [`GameWorld::reset`] resumes
/// play.
pub fn tick(world: &mut GameWorld, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if world.phase == GamePhase::GameOver {
        return events;
    }

    world.now_ms += SIM_DT_MS;
    expire_transients(world);

    physics::update_player(world, input, &mut events);

    // Obstacle collisions are skipped wholesale while invincible
    if !world.invincible() {
        collision::check_obstacles(world, &mut events);
    }

    // A wipeout that ends the run halts the rest of the pass; the world is
    // frozen until reset
    if world.phase == GamePhase::GameOver {
        return events;
    }

    collision::collect_coins(world, &mut events);
    collision::collect_power_ups(world, &mut events);
    collision::check_npcs(world, &mut events);

    spawn::update_obstacles(world);
    powerup::update(world, &mut events);

    events
}

/// Clear absolute-deadline visual markers that have run out
fn expire_transients(world: &mut GameWorld) {
    let now = world.now_ms;
    if world.flash_until_ms.is_some_and(|t| now >= t) {
        world.flash_until_ms = None;
    }
    if world.ollie_text_until_ms.is_some_and(|t| now >= t) {
        world.ollie_text_until_ms = None;
    }
    if world.banner_until_ms.is_some_and(|t| now >= t) {
        world.banner_until_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Obstacle, ObstacleKind, PowerUpKind};
    use glam::Vec3;

    fn quiet_world(seed: u64) -> GameWorld {
        let mut w = GameWorld::new(seed);
        // Strip seeded pickups/NPCs so scenarios control exactly what the
        // player can touch
        w.coins.clear();
        w.power_ups.clear();
        w.npcs.clear();
        w
    }

    #[test]
    fn test_collision_scenario_fires_once_with_knockback() {
        // Player at x=0, obstacle within 0.9 units: one hit, -100 floored at 0,
        // knockback, airborne
        let mut w = quiet_world(1);
        w.score = 150;
        let id = w.next_entity_id();
        w.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Hydrant,
            pos: w.player.pos + Vec3::new(0.9, 0.0, 0.0),
        });

        let events = tick(&mut w, &TickInput::default());
        let hits = events.iter().filter(|e| **e == GameEvent::ObstacleHit).count();
        assert_eq!(hits, 1);
        assert_eq!(w.score, 50);
        assert_eq!(w.player.velocity.y, KNOCKBACK_VEL_Y);
        assert!(!w.player.on_ground);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut w = quiet_world(2);
        w.phase = GamePhase::GameOver;
        w.score = 0;
        let pos_before = w.player.pos;
        let clock_before = w.now_ms;

        let input = TickInput { forward: true, right: true, jump: true, ..Default::default() };
        for _ in 0..10 {
            let events = tick(&mut w, &input);
            assert!(events.is_empty());
        }
        assert_eq!(w.player.pos, pos_before);
        assert_eq!(w.score, 0);
        assert_eq!(w.now_ms, clock_before);
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut w = GameWorld::new(3);
        w.score = 0;
        w.phase = GamePhase::GameOver;
        w.player.pos = Vec3::new(12.0, 3.0, 4.0);
        w.obstacles.push(Obstacle {
            id: 999,
            kind: ObstacleKind::TrashCan,
            pos: Vec3::new(5.0, 0.6, 0.0),
        });
        w.banner_until_ms = Some(w.now_ms + 3000.0);

        w.reset();
        assert_eq!(w.score, 0);
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(w.obstacles.is_empty());
        assert_eq!(w.player.pos, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(w.player.speed, DEFAULT_SPEED);
        assert_eq!(w.player.jump_power, DEFAULT_JUMP_POWER);
        assert!(w.active_power_ups.is_empty());
        assert!(w.banner_until_ms.is_none());
        // Fresh pickups are seeded for the new run
        assert_eq!(w.coins.len(), INITIAL_COINS);
        assert_eq!(w.power_ups.len(), INITIAL_POWERUPS);
    }

    #[test]
    fn test_reset_cancels_pending_power_up_revert() {
        // A revert deadline from the previous life must not fire into the new
        // world and clobber the defaults
        let mut w = quiet_world(4);
        crate::sim::powerup::apply(&mut w, PowerUpKind::Jump, 2.0, 100.0);
        w.phase = GamePhase::GameOver;
        w.reset();

        // Run well past the old deadline
        for _ in 0..20 {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.player.jump_power, DEFAULT_JUMP_POWER);
        assert!(w.active_power_ups.is_empty());
    }

    #[test]
    fn test_invincibility_skips_obstacle_collisions() {
        let mut w = quiet_world(5);
        w.score = 500;
        crate::sim::powerup::apply(&mut w, PowerUpKind::Invincibility, 1.0, 3000.0);
        let id = w.next_entity_id();
        w.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::TrafficCone,
            pos: w.player.pos + Vec3::new(0.3, 0.0, 0.0),
        });

        let events = tick(&mut w, &TickInput::default());
        assert!(!events.contains(&GameEvent::ObstacleHit));
        assert_eq!(w.score, 500);
    }

    #[test]
    fn test_power_up_expiry_through_ticks() {
        let mut w = quiet_world(6);
        crate::sim::powerup::apply(&mut w, PowerUpKind::Speed, 1.5, 5000.0);
        assert!((w.player.speed - DEFAULT_SPEED * 1.5).abs() < 1e-6);

        // 5000ms at ~16.67ms per tick
        let ticks = (5000.0 / SIM_DT_MS).ceil() as usize + 1;
        for _ in 0..ticks {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.player.speed, DEFAULT_SPEED);
    }

    #[test]
    fn test_transient_deadlines_expire() {
        let mut w = quiet_world(7);
        let events = tick(&mut w, &TickInput { ollie: true, ..Default::default() });
        assert!(events.contains(&GameEvent::Ollie));
        assert!(w.ollie_text_until_ms.is_some());

        let ticks = (OLLIE_TEXT_MS / SIM_DT_MS).ceil() as usize + 1;
        for _ in 0..ticks {
            tick(&mut w, &TickInput::default());
        }
        assert!(w.ollie_text_until_ms.is_none());
    }
}
