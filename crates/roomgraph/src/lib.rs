//! Oriented room graphs: rooms on a 4-connected grid whose edges relabel the
//! cardinal directions, so a walker's sense of north can change as it moves.
//!
//! Layout
//! - `geometry`, `frame`: directions and the symmetry group of the square.
//! - `graph`: room registry and the strict/relaxed connection protocol.
//! - `code`: the connection mini-language (`"1E2, 2S3'"`).
//! - `topology`: builders for Möbius, Klein, projective, twisted-ladder,
//!   random, and fan graphs.
//! - `cursor`: traversal with holonomy, flatness checks, neighborhood view.
//! - `session`: graph + observer + settings for interactive front ends.
//!
//! API Policy
//! - Workspace-internal; prefer [`api`] re-exports in callers. Breaking changes
//!   are fine when they improve the design.

pub mod api;
pub mod code;
pub mod cursor;
pub mod frame;
pub mod geometry;
pub mod graph;
pub mod session;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use frame::Frame;
pub use geometry::{Dir, Point};
pub use graph::{Graph, GraphCfg, RoomId};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cursor::Cursor;
    pub use crate::frame::Frame;
    pub use crate::geometry::{Dir, Point};
    pub use crate::graph::{Graph, GraphCfg, RoomId};
    pub use crate::session::{Preset, Session, SessionCfg, Turn};
}
