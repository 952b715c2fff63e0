//! Connection protocol: install an edge and its back-edge, or fail untouched.
//!
//! Semantics
//! - `connect_by_frame(a, d, b, T)` wants `a.d → b` labeled `T` and the back-edge
//!   `b.opposite(T(d)) → a` labeled `T⁻¹`.
//! - Strict mode (default): any occupied slot on either end fails the call and
//!   nothing is written.
//! - Relaxed mode: an occupied back slot only logs a warning; the forward edge is
//!   still installed, which leaves a one-way (wormhole) edge. An occupied forward
//!   slot is overwritten.

use std::fmt;

use crate::frame::Frame;
use crate::geometry::Dir;

use super::types::{Graph, RoomId};

/// Which end of a requested edge had its slot taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
    Source,
    Target,
}

/// Failure of a single connection request. The graph is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectError {
    NullTarget {
        from: RoomId,
        to: RoomId,
    },
    MissingSource {
        from: RoomId,
    },
    SlotOccupied {
        from: RoomId,
        to: RoomId,
        end: EdgeEnd,
        dir: Dir,
    },
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullTarget { from, to } => {
                write!(f, "cannot connect {from} to {to}: no such room")
            }
            Self::MissingSource { from } => write!(f, "cannot connect from {from}: no such room"),
            Self::SlotOccupied {
                from,
                to,
                end: EdgeEnd::Source,
                dir,
            } => write!(
                f,
                "can't connect {from} to {to}; {dir} edge out of {from} is already taken"
            ),
            Self::SlotOccupied {
                from,
                to,
                end: EdgeEnd::Target,
                dir,
            } => write!(
                f,
                "can't connect {from} to {to}; {dir} edge into {to} is already taken"
            ),
        }
    }
}

impl std::error::Error for ConnectError {}

impl Graph {
    /// Frame for "leave through `dir`, arrive entering from `to_dir`".
    ///
    /// `map[d] = (±(d − dir) + opposite(to_dir)) mod 4`, sign `-` when `flip`.
    /// `to_dir` defaults to `dir.opposite()`, which makes an unflipped edge the
    /// identity.
    pub fn derive_frame(dir: Dir, to_dir: Option<Dir>, flip: bool) -> Frame {
        let to_dir = to_dir.unwrap_or(dir.opposite());
        Frame::anchored(dir, to_dir.opposite(), flip)
    }

    /// Connect with a derived frame (see [`Graph::derive_frame`]).
    pub fn connect(
        &mut self,
        room: RoomId,
        dir: Dir,
        other: RoomId,
        to_dir: Option<Dir>,
        flip: bool,
    ) -> Result<(), ConnectError> {
        let frame = Self::derive_frame(dir, to_dir, flip);
        self.connect_by_frame(room, dir, other, frame)
    }

    /// Install `room.dir → other` labeled `frame`, plus the back-edge when allowed.
    pub fn connect_by_frame(
        &mut self,
        room: RoomId,
        dir: Dir,
        other: RoomId,
        frame: Frame,
    ) -> Result<(), ConnectError> {
        let target_dir = frame.apply(dir).opposite();
        let Some(target) = self.room(other) else {
            return Err(ConnectError::NullTarget {
                from: room,
                to: other,
            });
        };
        let back_taken = target.to(target_dir).is_some();
        let Some(source) = self.room(room) else {
            return Err(ConnectError::MissingSource { from: room });
        };
        let strict = self.cfg.enforce_bidirectional;
        if strict && source.to(dir).is_some() {
            return Err(ConnectError::SlotOccupied {
                from: room,
                to: other,
                end: EdgeEnd::Source,
                dir,
            });
        }
        if back_taken {
            if strict {
                return Err(ConnectError::SlotOccupied {
                    from: room,
                    to: other,
                    end: EdgeEnd::Target,
                    dir: target_dir,
                });
            }
            tracing::warn!(
                from = %room,
                to = %other,
                dir = %target_dir,
                "edge into room already taken; installing one-way edge"
            );
        } else if let Some(target) = self.room_mut(other) {
            target.neighbors[target_dir.index()] = Some(room);
            target.transitions[target_dir.index()] = frame.inverse();
        }
        if let Some(source) = self.room_mut(room) {
            source.neighbors[dir.index()] = Some(other);
            source.transitions[dir.index()] = frame;
        }
        Ok(())
    }
}
