//! Strike resolution: damage, knockback, combos and defeat.
//!
//! This module implements a combat step with:
//! - Flat damage equal to the attacker's attack power
//! - Health floored at zero
//! - Knockback continuing the attack's approach, one tile
//! - Hazard tiles that defeat whoever is pushed onto them
//! - Combo tracking for consecutive landed hits
//!
//! Works on any [`Combatant`] pair, so actors striking the player and the
//! player striking actors share the same rules.

use serde::{Deserialize, Serialize};

use crate::components::{Combatant, Position};
use crate::events::{EventSink, TacticsEvent};
use crate::grid::Grid;

/// Result of a single strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// The defender is at zero health after the strike.
    pub defeated: bool,
    /// The attacker's combo counter after the strike.
    pub combo_count: u32,
}

/// Unit push vector continuing an approach of `(dx, dy)`.
///
/// Exact diagonals push along both axes, otherwise only along the
/// dominant axis.
#[must_use]
pub fn knockback_vector(dx: i32, dy: i32) -> (i32, i32) {
    if dx.abs() == dy.abs() {
        (dx.signum(), dy.signum())
    } else if dx.abs() > dy.abs() {
        (dx.signum(), 0)
    } else {
        (0, dy.signum())
    }
}

/// Direction the attacker was travelling when it struck.
///
/// Defender minus attacker; when both share a tile, the attacker's own
/// last move.
fn approach<A, D>(attacker: &A, defender: &D) -> (i32, i32)
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let (dx, dy) = attacker.position().delta_to(defender.position());
    if dx != 0 || dy != 0 {
        return (dx, dy);
    }
    attacker.last_position().delta_to(attacker.position())
}

/// Resolve one strike from `attacker` against `defender`.
///
/// `occupied` reports tiles held by anyone other than the defender; the
/// defender is never pushed onto one. Striking a defender that is already
/// down changes nothing and emits nothing.
pub fn resolve_attack<A, D, F, S>(
    attacker: &mut A,
    defender: &mut D,
    grid: &Grid,
    knockback: bool,
    occupied: F,
    sink: &mut S,
) -> CombatOutcome
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
    F: Fn(Position) -> bool,
    S: EventSink + ?Sized,
{
    if !defender.is_alive() {
        return CombatOutcome {
            defeated: true,
            combo_count: attacker.combo(),
        };
    }

    let damage = attacker.attack_power();
    defender.apply_damage(damage);
    sink.emit(TacticsEvent::Attack {
        attacker: attacker.participant(),
        defender: defender.participant(),
        damage,
    });

    let combo_count = attacker.combo().saturating_add(1);
    attacker.set_combo(combo_count);
    defender.set_combo(0);

    if defender.is_alive() && knockback {
        push(attacker, defender, grid, &occupied, sink);
    }

    let defeated = !defender.is_alive();
    if defeated {
        sink.emit(TacticsEvent::Defeat {
            subject: defender.participant(),
            by: Some(attacker.participant()),
        });
    }

    tracing::debug!(
        attacker = ?attacker.participant(),
        defender = ?defender.participant(),
        damage,
        remaining = defender.health(),
        combo_count,
        "Strike resolved"
    );

    CombatOutcome {
        defeated,
        combo_count,
    }
}

fn push<A, D, F, S>(attacker: &A, defender: &mut D, grid: &Grid, occupied: &F, sink: &mut S)
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
    F: Fn(Position) -> bool,
    S: EventSink + ?Sized,
{
    let from = defender.position();
    let (dx, dy) = approach(attacker, defender);
    let (step_x, step_y) = knockback_vector(dx, dy);
    let to = from.offset(step_x, step_y);

    if (step_x, step_y) == (0, 0) || !defender.can_enter(grid, to) || occupied(to) {
        sink.emit(TacticsEvent::Bump {
            subject: defender.participant(),
            at: from,
        });
        return;
    }

    defender.set_position(to);
    sink.emit(TacticsEvent::Knockback {
        subject: defender.participant(),
        from,
        to,
    });

    if grid.kind_at(to.x, to.y).is_some_and(|kind| kind.is_hazard()) {
        defender.apply_damage(defender.health());
    }
}
