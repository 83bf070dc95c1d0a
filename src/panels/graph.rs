//! Panels domain: door connection table, transition cooldown, and the
//! door entry gate.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::movement::PlayerState;
use crate::panels::components::DoorId;

/// Why a connection could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionError {
    SelfConnection(DoorId),
    AlreadyConnected { door: DoorId, target: DoorId },
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::SelfConnection(door) => {
                write!(f, "{} cannot connect to itself", door)
            }
            ConnectionError::AlreadyConnected { door, target } => {
                write!(f, "{} is already connected to {}", door, target)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Committed door-to-door connections.
///
/// Every edge is stored in both directions and only ever inserted or removed
/// as a pair, so `target(a) == Some(b)` implies `target(b) == Some(a)`.
#[derive(Resource, Debug, Default)]
pub struct DoorConnections {
    links: HashMap<DoorId, DoorId>,
}

impl DoorConnections {
    pub fn target(&self, door: DoorId) -> Option<DoorId> {
        self.links.get(&door).copied()
    }

    /// A door is opened exactly while it has a committed connection.
    pub fn is_opened(&self, door: DoorId) -> bool {
        self.links.contains_key(&door)
    }

    /// Commit `a <-> b`. Fails without mutation if either side is taken.
    pub fn connect(&mut self, a: DoorId, b: DoorId) -> Result<(), ConnectionError> {
        if a == b {
            return Err(ConnectionError::SelfConnection(a));
        }
        for door in [a, b] {
            if let Some(target) = self.target(door) {
                return Err(ConnectionError::AlreadyConnected { door, target });
            }
        }

        self.links.insert(a, b);
        self.links.insert(b, a);
        Ok(())
    }

    /// Remove the connection touching `door`, returning the former partner.
    pub fn disconnect(&mut self, door: DoorId) -> Option<DoorId> {
        let partner = self.links.remove(&door)?;
        self.links.remove(&partner);
        Some(partner)
    }

    /// Number of connections (each pair counted once).
    pub fn len(&self) -> usize {
        self.links.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Each connection once, lower id first, in id order.
    pub fn pairs(&self) -> Vec<(DoorId, DoorId)> {
        let mut pairs: Vec<_> = self
            .links
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| (*a, *b))
            .collect();
        pairs.sort();
        pairs
    }
}

/// Cooldown timer to prevent a door trigger from firing right after a
/// transition drops the player inside it.
#[derive(Resource, Debug)]
pub struct TransitionCooldown {
    pub timer: Timer,
}

impl Default for TransitionCooldown {
    fn default() -> Self {
        Self::from_seconds(0.3)
    }
}

impl TransitionCooldown {
    pub fn from_seconds(seconds: f32) -> Self {
        let mut timer = Timer::from_seconds(seconds, TimerMode::Once);
        // Nothing to cool down from at startup.
        timer.tick(timer.duration());
        Self { timer }
    }

    /// Start cooling down for `seconds` from now.
    pub fn restart(&mut self, seconds: f32) {
        self.timer
            .set_duration(std::time::Duration::from_secs_f32(seconds.max(0.0)));
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }

    pub fn can_transition(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }
}

/// Whether touching a door's trigger may start a transition through it.
pub fn door_entry_allowed(opened: bool, cooldown_ready: bool, state: PlayerState) -> bool {
    opened && cooldown_ready && state != PlayerState::TransitionMovement
}
