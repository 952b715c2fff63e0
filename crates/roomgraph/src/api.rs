//! Curated surface for the CLI and other workspace callers (unstable).
//!
//! Prefer these re-exports over reaching into submodules.

// Directions and frames
pub use crate::frame::Frame;
pub use crate::geometry::{Dir, Point, NUM_DIRS};
// Graph and connection protocol
pub use crate::graph::{ConnectError, EdgeEnd, EdgeRef, Graph, GraphCfg, Room, RoomId, PALETTE};
// Mini-language
pub use crate::code::{
    execute, load as load_code, parse, parse_many, CodeError, Connection, ParseError,
    MAX_ROOM_NUMBER,
};
// Builders
pub use crate::topology::{
    fan, klein, mobius, projective, random, twisted_ladder, Blueprint, BuildError, Request,
    Topology,
};
// Traversal
pub use crate::cursor::{is_orientable, non_flat_corners, Cursor, Kink, Neighborhood};
pub use crate::session::{Preset, Session, SessionCfg, SessionError, Turn};
