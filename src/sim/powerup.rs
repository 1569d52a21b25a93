//! Timed power-up modifiers
//!
//! Records are absolute-deadline entries scanned once per tick; there are no
//! deferred timers, so `GameWorld::reset` clearing the list is all the
//! cancellation the game needs.
//!
//! Stacking multiplies further. Unwind is last-writer-wins-on-expiry: when the
//! final record of a kind expires, the player field snaps back to its hardcoded
//! default rather than dividing out each multiplier.

use super::state::{ActivePowerUp, GameEvent, GameWorld, PowerUpKind};
use crate::consts::{DEFAULT_JUMP_POWER, DEFAULT_SPEED};

/// Record a picked-up power-up and apply its immediate effect.
///
/// Invincibility has no player-field effect; it is consumed by the collision
/// detector's skip-check.
pub fn apply(world: &mut GameWorld, kind: PowerUpKind, value: f32, duration_ms: f64) {
    world.active_power_ups.push(ActivePowerUp {
        kind,
        value,
        expires_at_ms: world.now_ms + duration_ms,
    });

    match kind {
        PowerUpKind::Speed => world.player.speed *= value,
        PowerUpKind::Jump => world.player.jump_power *= value,
        PowerUpKind::Invincibility => {}
    }
    log::debug!("power-up {} x{} for {}ms", kind.as_str(), value, duration_ms);
}

/// Drop expired records and revert player fields for kinds with none left
pub fn update(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let now = world.now_ms;
    let mut expired_kinds: Vec<PowerUpKind> = Vec::new();
    world.active_power_ups.retain(|pu| {
        if now >= pu.expires_at_ms {
            expired_kinds.push(pu.kind);
            false
        } else {
            true
        }
    });

    for kind in expired_kinds {
        let still_active = world.active_power_ups.iter().any(|pu| pu.kind == kind);
        if !still_active {
            match kind {
                PowerUpKind::Speed => world.player.speed = DEFAULT_SPEED,
                PowerUpKind::Jump => world.player.jump_power = DEFAULT_JUMP_POWER,
                PowerUpKind::Invincibility => {}
            }
            events.push(GameEvent::PowerUpExpired { kind });
        }
    }
}
