//! Ports domain: per-port drag gesture state and the connection edit flow.
//!
//! Committed connections live only in [`DoorConnections`]. A port's drag
//! gesture (pointer proxy offset, candidate partner) is transient and is
//! dropped whenever the gesture ends, whatever the outcome.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::content::PortTuning;
use crate::panels::{DoorConnections, DoorId, DoorIndex, check_connection_angle};

/// Which plug sprite a port shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlugSprite {
    /// At rest, no drag and no connection.
    #[default]
    Full,
    Left,
    Right,
}

impl PlugSprite {
    /// Half-plug shown while a door is dragging or connected.
    pub fn engaged(goes_right: bool) -> Self {
        if goes_right {
            PlugSprite::Left
        } else {
            PlugSprite::Right
        }
    }
}

/// Visual line from a port's plug to either its pointer proxy or, once the
/// port has requested a connection, the partner's plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionLine {
    pub visible: bool,
    pub partner: Option<DoorId>,
}

impl ConnectionLine {
    fn hidden() -> Self {
        Self::default()
    }
}

/// An in-progress drag from a port's plug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Pointer position (world) seen last frame.
    pub last_pointer: Vec3,
    /// Accumulated pointer proxy offset in the port's local frame.
    pub offset: Vec3,
    pub candidate: Option<DoorId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortState {
    pub door: DoorId,
    pub goes_right: bool,
    pub plug: PlugSprite,
    pub line: ConnectionLine,
    pub gesture: Option<DragGesture>,
}

impl PortState {
    fn new(door: DoorId, goes_right: bool) -> Self {
        Self {
            door,
            goes_right,
            plug: PlugSprite::Full,
            line: ConnectionLine::hidden(),
            gesture: None,
        }
    }

    fn reset(&mut self) {
        self.plug = PlugSprite::Full;
        self.line = ConnectionLine::hidden();
        self.gesture = None;
    }
}

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// No usable candidate; the port was reset.
    Cancelled,
    Connected { partner: DoorId },
    /// The candidate refused the request; the port was reset.
    Rejected { partner: DoorId },
}

/// Every door port, keyed by door.
#[derive(Resource, Debug, Default)]
pub struct ConnectionPorts {
    ports: HashMap<DoorId, PortState>,
    dragging: Option<DoorId>,
}

impl ConnectionPorts {
    /// Track a port. A port whose door is already connected shows its engaged
    /// plug; the lower-id side of the pair owns the visible line.
    pub fn register(&mut self, door: DoorId, goes_right: bool, connections: &DoorConnections) {
        let mut port = PortState::new(door, goes_right);
        if let Some(partner) = connections.target(door) {
            port.plug = PlugSprite::engaged(goes_right);
            if door < partner {
                port.line = ConnectionLine {
                    visible: true,
                    partner: Some(partner),
                };
            }
        }
        self.ports.insert(door, port);
    }

    pub fn port(&self, door: DoorId) -> Option<&PortState> {
        self.ports.get(&door)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortState> {
        self.ports.values()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// The port currently being dragged, if any.
    pub fn dragging(&self) -> Option<DoorId> {
        self.dragging
    }

    pub fn is_dragging(&self, door: DoorId) -> bool {
        self.dragging == Some(door)
    }

    pub fn candidate(&self, door: DoorId) -> Option<DoorId> {
        self.ports.get(&door)?.gesture?.candidate
    }

    /// Start dragging from `door`'s plug. An existing connection is broken on
    /// both sides first; its former partner is returned. Does nothing while
    /// another drag is in progress.
    pub fn connect_edit_started(
        &mut self,
        door: DoorId,
        pointer: Vec3,
        connections: &mut DoorConnections,
    ) -> Option<DoorId> {
        if self.dragging.is_some() || !self.ports.contains_key(&door) {
            return None;
        }

        let broken = self.break_connection(door, connections);

        let port = self.ports.get_mut(&door)?;
        port.line = ConnectionLine {
            visible: true,
            partner: None,
        };
        port.plug = PlugSprite::engaged(port.goes_right);
        port.gesture = Some(DragGesture {
            last_pointer: pointer,
            offset: Vec3::ZERO,
            candidate: None,
        });
        self.dragging = Some(door);
        broken
    }

    /// Move the pointer proxy by the pointer's motion since last frame,
    /// expressed in the port's local frame (`rotation` is the port's world
    /// rotation).
    pub fn drag_pointer(&mut self, door: DoorId, pointer: Vec3, rotation: Quat) {
        let Some(gesture) = self
            .ports
            .get_mut(&door)
            .and_then(|port| port.gesture.as_mut())
        else {
            return;
        };

        let delta = pointer - gesture.last_pointer;
        gesture.offset += rotation.inverse() * Vec3::new(delta.x, delta.y, 0.0);
        gesture.last_pointer = pointer;
    }

    /// World position of the pointer proxy, given the plug's world pose.
    pub fn pointer_world(&self, door: DoorId, plug: Vec3, rotation: Quat) -> Option<Vec3> {
        let gesture = self.ports.get(&door)?.gesture?;
        Some(plug + rotation * gesture.offset)
    }

    /// The dragging pointer proxy overlaps `candidate`'s plug. Records it
    /// when it is another, unconnected port facing the other way and
    /// `angle_ok` holds (see [`candidate_angle_ok`]).
    pub fn pointer_entered(
        &mut self,
        door: DoorId,
        candidate: DoorId,
        angle_ok: bool,
        connections: &DoorConnections,
    ) -> bool {
        if candidate == door || !angle_ok || connections.is_opened(candidate) {
            return false;
        }
        let Some(candidate_goes_right) = self.ports.get(&candidate).map(|port| port.goes_right)
        else {
            return false;
        };
        let Some(port) = self.ports.get_mut(&door) else {
            return false;
        };
        if candidate_goes_right == port.goes_right {
            return false;
        }
        let Some(gesture) = port.gesture.as_mut() else {
            return false;
        };

        gesture.candidate = Some(candidate);
        true
    }

    /// The pointer proxy stopped overlapping `candidate`.
    pub fn pointer_left(&mut self, door: DoorId, candidate: DoorId) {
        let Some(gesture) = self
            .ports
            .get_mut(&door)
            .and_then(|port| port.gesture.as_mut())
        else {
            return;
        };
        if gesture.candidate == Some(candidate) {
            gesture.candidate = None;
        }
    }

    /// Pointer released. Without a usable candidate the port is reset;
    /// otherwise the candidate is asked to accept the connection.
    pub fn connection_edit_ended(
        &mut self,
        door: DoorId,
        connections: &mut DoorConnections,
    ) -> EditOutcome {
        if self.dragging == Some(door) {
            self.dragging = None;
        }
        let candidate = self
            .ports
            .get_mut(&door)
            .and_then(|port| port.gesture.take())
            .and_then(|gesture| gesture.candidate);

        let partner = match candidate {
            Some(partner) if partner != door => partner,
            _ => {
                self.connection_broken(door, connections);
                return EditOutcome::Cancelled;
            }
        };

        if !self.connection_requested(partner, door, connections) {
            self.connection_broken(door, connections);
            return EditOutcome::Rejected { partner };
        }

        if let Some(port) = self.ports.get_mut(&door) {
            port.plug = PlugSprite::engaged(port.goes_right);
            port.line = ConnectionLine {
                visible: true,
                partner: Some(partner),
            };
        }
        EditOutcome::Connected { partner }
    }

    /// `requester` asks `door` to connect. Refused without any change when
    /// `door` already has a connection.
    pub fn connection_requested(
        &mut self,
        door: DoorId,
        requester: DoorId,
        connections: &mut DoorConnections,
    ) -> bool {
        if connections.is_opened(door) || !self.ports.contains_key(&door) {
            return false;
        }
        if let Err(err) = connections.connect(door, requester) {
            debug!("[PORTS] Connection request refused: {}", err);
            return false;
        }

        if let Some(port) = self.ports.get_mut(&door) {
            port.plug = PlugSprite::engaged(port.goes_right);
            port.line = ConnectionLine::hidden();
            port.gesture = None;
        }
        true
    }

    /// Reset `door`'s port to rest and drop its connection. Returns the
    /// former partner, whose port visuals are left to the caller.
    pub fn connection_broken(
        &mut self,
        door: DoorId,
        connections: &mut DoorConnections,
    ) -> Option<DoorId> {
        if let Some(port) = self.ports.get_mut(&door) {
            port.reset();
        }
        if self.dragging == Some(door) {
            self.dragging = None;
        }
        connections.disconnect(door)
    }

    /// Break `door`'s connection on both ports. Returns the former partner.
    pub fn break_connection(
        &mut self,
        door: DoorId,
        connections: &mut DoorConnections,
    ) -> Option<DoorId> {
        let partner = connections.target(door)?;
        if let Some(port) = self.ports.get_mut(&partner) {
            port.reset();
        }
        self.connection_broken(door, connections)
    }

    /// Abandon the drag in progress, if any, leaving its port at rest.
    pub fn cancel_drag(&mut self, connections: &mut DoorConnections) -> Option<DoorId> {
        let door = self.dragging?;
        self.connection_broken(door, connections);
        Some(door)
    }
}

/// Whether the doors behind `a` and `b` face each other closely enough.
/// Unknown doors never pass.
pub fn angle_within_limit(
    index: &DoorIndex,
    a: DoorId,
    b: DoorId,
    angle_limit_degrees: f32,
) -> bool {
    match (index.get(a), index.get(b)) {
        (Some(a), Some(b)) => check_connection_angle(a, b, angle_limit_degrees),
        _ => false,
    }
}

/// Angle verdict for a drag from `door` onto `candidate`; always passes
/// while the limit is not enforced.
pub fn candidate_angle_ok(
    tuning: &PortTuning,
    index: &DoorIndex,
    door: DoorId,
    candidate: DoorId,
) -> bool {
    !tuning.enforce_angle_limit
        || angle_within_limit(index, door, candidate, tuning.angle_limit_degrees)
}
