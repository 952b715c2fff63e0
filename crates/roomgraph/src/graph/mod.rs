//! Room graph (rooms as nodes; frame-labeled edges) and its connection protocol.
//!
//! Purpose
//! - Own every room in one registry and install edges so that, in strict mode,
//!   each edge `A.d → B` labeled `T` has the back-edge `B.opposite(T(d)) → A`
//!   labeled `T⁻¹`.
//!
//! Why this design
//! - Rooms refer to each other by `RoomId`; the registry is the only owner, so
//!   cursors and builders hold plain ids and borrow the graph per call.
//! - Each room keeps two fixed 4-slot arrays (neighbors, transitions) indexed by
//!   direction; the direction domain is closed and small.

mod connect;
mod types;

pub use connect::{ConnectError, EdgeEnd};
pub use types::{EdgeRef, Graph, GraphCfg, Room, RoomId, PALETTE};
