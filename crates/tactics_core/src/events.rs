//! Abstract notifications emitted by the engine.
//!
//! Renderers and audio subscribe through [`EventSink`]. The engine never
//! learns whether anybody is listening or what they do with an event.

use serde::{Deserialize, Serialize};

use crate::components::{ActorId, Participant, Position};

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TacticsEvent {
    /// A strike landed.
    Attack {
        /// Who struck.
        attacker: Participant,
        /// Who was struck.
        defender: Participant,
        /// Damage applied.
        damage: u32,
    },
    /// A struck combatant was pushed.
    Knockback {
        /// Who was pushed.
        subject: Participant,
        /// Tile before the push.
        from: Position,
        /// Tile after the push.
        to: Position,
    },
    /// A struck combatant could not be pushed and stayed put.
    Bump {
        /// Who was struck.
        subject: Participant,
        /// Tile it stayed on.
        at: Position,
    },
    /// A combatant's health reached zero.
    Defeat {
        /// Who fell.
        subject: Participant,
        /// Who landed the final blow, if anyone.
        by: Option<Participant>,
    },
    /// An actor took a single step.
    Moved {
        /// Actor that moved.
        actor: ActorId,
        /// Starting tile.
        from: Position,
        /// Destination tile.
        to: Position,
    },
    /// An actor travelled several tiles in a straight line this turn.
    Charge {
        /// Actor that charged.
        actor: ActorId,
        /// Every tile entered, in order, ending at the landing tile.
        path: Vec<Position>,
    },
    /// An actor stepped away from the target.
    Retreated {
        /// Actor that retreated.
        actor: ActorId,
        /// Starting tile.
        from: Position,
        /// Destination tile.
        to: Position,
    },
    /// An actor's move was refused by the occupancy ledger.
    Blocked {
        /// Actor that stayed.
        actor: ActorId,
        /// Destination it wanted.
        destination: Position,
    },
}

/// Consumer of engine notifications.
pub trait EventSink {
    /// Receive one notification.
    fn emit(&mut self, event: TacticsEvent);
}

impl EventSink for Vec<TacticsEvent> {
    fn emit(&mut self, event: TacticsEvent) {
        self.push(event);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: TacticsEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<TacticsEvent> = Vec::new();
        sink.emit(TacticsEvent::Blocked {
            actor: 1,
            destination: Position::new(0, 0),
        });
        sink.emit(TacticsEvent::Defeat {
            subject: Participant::Actor(1),
            by: Some(Participant::Player),
        });
        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], TacticsEvent::Blocked { actor: 1, .. }));
    }
}
