//! Player movement engine
//!
//! Advances position and velocity for one tick given the latched input:
//! directional rolling, jump/gravity, the ollie trick, grind entry/movement/
//! exit, and the street boundary clamp. Collision response lives in
//! `collision`; this module never touches obstacles.

use glam::Vec3;

use super::state::{GameEvent, GameWorld, Rail};
use super::tick::TickInput;
use crate::consts::*;

/// Rail proximity predicate: within the per-axis thresholds on x and z.
///
/// This is the single canonical definition; both grind entry and grind exit
/// use it.
pub fn near_rail(pos: Vec3, rail: &Rail) -> bool {
    (pos.x - rail.pos.x).abs() < RAIL_NEAR_X && (pos.z - rail.pos.z).abs() < RAIL_NEAR_Z
}

/// Advance the player by one tick
pub fn update_player(world: &mut GameWorld, input: &TickInput, events: &mut Vec<GameEvent>) {
    // Ollie: one-shot edge, grounded and not grinding; scores but does not
    // change velocity
    if input.ollie && !world.player.grinding && world.player.on_ground {
        world.score += OLLIE_POINTS;
        world.ollie_text_until_ms = Some(world.now_ms + OLLIE_TEXT_MS);
        events.push(GameEvent::Ollie);
    }

    // Directional rolling (disabled while locked to the rail)
    if !world.player.grinding {
        let speed = world.player.speed;
        if input.forward {
            world.player.pos.z -= speed;
        }
        if input.back {
            world.player.pos.z += speed;
        }
        if input.left {
            world.player.pos.x -= speed;
        }
        if input.right {
            world.player.pos.x += speed;
        }
    }

    // Grind entry
    if !world.player.grinding && input.grind && near_rail(world.player.pos, &world.rail) {
        world.player.grinding = true;
        world.player.pos.y = world.rail.pos.y + GRIND_HEIGHT_OFFSET;
        world.player.velocity.y = 0.0;
        world.score += GRIND_POINTS;
        events.push(GameEvent::GrindStarted);
    }

    if world.player.grinding {
        // Only the rail axis moves, scaled up; the other axes are hard-locked
        let grind_speed = world.player.speed * GRIND_SPEED_FACTOR;
        if input.forward {
            world.player.pos.z -= grind_speed;
        }
        if input.back {
            world.player.pos.z += grind_speed;
        }
        world.player.pos.x = world.rail.pos.x;
        world.player.pos.y = world.rail.pos.y + GRIND_HEIGHT_OFFSET;

        // Exit when shift is released or the player slides out of proximity
        if !input.grind || !near_rail(world.player.pos, &world.rail) {
            world.player.grinding = false;
            events.push(GameEvent::GrindStopped);
        }
    } else {
        // Jump on held space while grounded
        if input.jump && world.player.on_ground {
            world.player.velocity.y = world.player.jump_power;
            world.player.on_ground = false;
            events.push(GameEvent::Jumped);
        }

        // Vertical physics and ground clamp
        world.player.velocity.y -= world.player.gravity;
        world.player.pos.y += world.player.velocity.y;
        if world.player.pos.y <= GROUND_HEIGHT {
            world.player.pos.y = GROUND_HEIGHT;
            world.player.velocity.y = 0.0;
            world.player.on_ground = true;
        }
    }

    // Street bounds, applied after all other movement
    world.player.pos.x = world.player.pos.x.clamp(STREET_MIN_X, STREET_MAX_X);
    world.player.pos.z = world.player.pos.z.clamp(STREET_MIN_Z, STREET_MAX_Z);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameWorld;

    fn world() -> GameWorld {
        GameWorld::new(1)
    }

    #[test]
    fn test_near_rail_thresholds() {
        let rail = Rail::default();
        assert!(near_rail(Vec3::new(0.4, 1.0, 0.0), &rail));
        assert!(near_rail(Vec3::new(0.0, 1.0, 0.6), &rail));
        assert!(!near_rail(Vec3::new(0.6, 1.0, 0.0), &rail));
        assert!(!near_rail(Vec3::new(0.0, 1.0, 0.8), &rail));
    }

    #[test]
    fn test_directional_movement_adds_speed_per_tick() {
        let mut w = world();
        let input = TickInput { right: true, forward: true, ..Default::default() };
        let mut events = Vec::new();
        update_player(&mut w, &input, &mut events);
        assert_eq!(w.player.pos.x, DEFAULT_SPEED);
        assert_eq!(w.player.pos.z, -DEFAULT_SPEED);
    }

    #[test]
    fn test_jump_then_land() {
        let mut w = world();
        let mut events = Vec::new();
        let jump = TickInput { jump: true, ..Default::default() };
        update_player(&mut w, &jump, &mut events);
        assert!(!w.player.on_ground);
        assert!(w.player.pos.y > GROUND_HEIGHT);
        assert!(events.contains(&GameEvent::Jumped));

        // Fall back under gravity
        let idle = TickInput::default();
        for _ in 0..2000 {
            update_player(&mut w, &idle, &mut events);
            if w.player.on_ground {
                break;
            }
        }
        assert!(w.player.on_ground);
        assert_eq!(w.player.pos.y, GROUND_HEIGHT);
        assert_eq!(w.player.velocity.y, 0.0);
    }

    #[test]
    fn test_ollie_scores_without_velocity_change() {
        let mut w = world();
        let mut events = Vec::new();
        let input = TickInput { ollie: true, ..Default::default() };
        update_player(&mut w, &input, &mut events);
        assert_eq!(w.score, OLLIE_POINTS);
        assert!(w.player.on_ground);
        assert!(events.contains(&GameEvent::Ollie));
    }

    #[test]
    fn test_ollie_blocked_in_air() {
        let mut w = world();
        w.player.on_ground = false;
        w.player.pos.y = 2.0;
        let mut events = Vec::new();
        let input = TickInput { ollie: true, ..Default::default() };
        update_player(&mut w, &input, &mut events);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn test_grind_locks_off_axis_coordinates() {
        let mut w = world();
        w.player.pos = Vec3::new(0.3, 1.0, 0.1);
        let mut events = Vec::new();
        let input = TickInput { grind: true, back: true, ..Default::default() };
        update_player(&mut w, &input, &mut events);

        assert!(w.player.grinding);
        assert_eq!(w.player.pos.x, w.rail.pos.x);
        assert_eq!(w.player.pos.y, w.rail.pos.y + GRIND_HEIGHT_OFFSET);
        assert_eq!(w.score, GRIND_POINTS);
        assert!(events.contains(&GameEvent::GrindStarted));

        // Keep sliding along z; locked axes must hold every tick
        for _ in 0..3 {
            update_player(&mut w, &input, &mut events);
            if !w.player.grinding {
                break;
            }
            assert_eq!(w.player.pos.x, w.rail.pos.x);
            assert_eq!(w.player.pos.y, w.rail.pos.y + GRIND_HEIGHT_OFFSET);
        }
    }

    #[test]
    fn test_grind_exits_on_release() {
        let mut w = world();
        w.player.pos = Vec3::new(0.0, 1.0, 0.0);
        let mut events = Vec::new();
        update_player(&mut w, &TickInput { grind: true, ..Default::default() }, &mut events);
        assert!(w.player.grinding);

        update_player(&mut w, &TickInput::default(), &mut events);
        assert!(!w.player.grinding);
        assert!(events.contains(&GameEvent::GrindStopped));
    }

    #[test]
    fn test_grind_exits_when_sliding_off_rail() {
        let mut w = world();
        w.player.pos = Vec3::new(0.0, 1.0, 0.0);
        let input = TickInput { grind: true, back: true, ..Default::default() };
        let mut events = Vec::new();
        let mut ticks = 0;
        while ticks < 100 {
            update_player(&mut w, &input, &mut events);
            ticks += 1;
            if !w.player.grinding {
                break;
            }
        }
        assert!(!w.player.grinding, "grind should end at the rail's edge");
        assert!((w.player.pos.z - w.rail.pos.z).abs() >= RAIL_NEAR_Z);
    }

    #[test]
    fn test_boundary_clamp() {
        let mut w = world();
        w.player.pos = Vec3::new(-100.0, 1.0, 100.0);
        let mut events = Vec::new();
        update_player(&mut w, &TickInput::default(), &mut events);
        assert_eq!(w.player.pos.x, STREET_MIN_X);
        assert_eq!(w.player.pos.z, STREET_MAX_Z);
    }
}
