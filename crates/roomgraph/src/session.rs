//! Game session: one graph, one observer, and the settings they were built with.
//!
//! Purpose
//! - Hold what an interactive front end needs between inputs: the current
//!   graph, the cursor, and visited bookkeeping. All state is explicit; a
//!   front end owns a `Session` value and drives it through methods.
//!
//! Conventions
//! - The observer always starts in room 1 with the identity transform, and
//!   that room counts as visited.
//! - God mode marks every room visited at (re)build time.

use std::fmt;
use std::str::FromStr;

use crate::code::{self, CodeError};
use crate::cursor::{Cursor, Neighborhood};
use crate::frame::Frame;
use crate::geometry::Dir;
use crate::graph::{Graph, GraphCfg, RoomId};
use crate::topology::{BuildError, Topology};

/// Graph a session is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    Mobius,
    Klein,
    Projective,
    /// Twisted ladder closed by rotated edges.
    Mobius2,
    Random,
    /// Fan graph (`B`).
    Fan,
    /// Mini-language source.
    Custom(String),
}

impl Preset {
    pub const NAMES: [&'static str; 6] =
        ["mobius", "klein", "projective", "mobius2", "random", "fan"];

    /// Topology for the built-in presets; `None` for `Custom`.
    pub fn topology(&self, seed: u64) -> Option<Topology> {
        match self {
            Self::Mobius => Some(Topology::MOBIUS),
            Self::Klein => Some(Topology::KLEIN),
            Self::Projective => Some(Topology::PROJECTIVE),
            Self::Mobius2 => Some(Topology::TWISTED_LADDER),
            Self::Random => Some(Topology::random(seed)),
            Self::Fan => Some(Topology::FAN),
            Self::Custom(_) => None,
        }
    }

    /// Build a fresh graph for this preset.
    pub fn build(&self, cfg: &SessionCfg) -> Result<Graph, SessionError> {
        if let Self::Custom(text) = self {
            return Ok(code::load(text, cfg.graph)?);
        }
        let topo = self
            .topology(cfg.seed)
            .ok_or_else(|| SessionError::UnknownPreset(self.to_string()))?;
        Ok(topo.build(cfg.graph)?)
    }
}

impl FromStr for Preset {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobius" => Ok(Self::Mobius),
            "klein" => Ok(Self::Klein),
            "projective" => Ok(Self::Projective),
            "mobius2" => Ok(Self::Mobius2),
            "random" => Ok(Self::Random),
            "fan" | "B" => Ok(Self::Fan),
            other => Err(SessionError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobius => f.write_str("mobius"),
            Self::Klein => f.write_str("klein"),
            Self::Projective => f.write_str("projective"),
            Self::Mobius2 => f.write_str("mobius2"),
            Self::Random => f.write_str("random"),
            Self::Fan => f.write_str("fan"),
            Self::Custom(_) => f.write_str("custom"),
        }
    }
}

/// Session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionCfg {
    pub graph: GraphCfg,
    /// Start with every room visited.
    pub god_mode: bool,
    /// Seed for the random preset.
    pub seed: u64,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            graph: GraphCfg::default(),
            god_mode: false,
            seed: 0,
        }
    }
}

/// In-place turn of the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    pub fn frame(self) -> Frame {
        match self {
            Self::Left => Frame::ROTATE_CCW,
            Self::Right => Frame::ROTATE_CW,
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    UnknownPreset(String),
    Build(BuildError),
    Code(CodeError),
    /// The built graph has no room 1 to start in.
    NoStartRoom,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPreset(name) => write!(
                f,
                "unknown preset {name:?} (expected one of: {}, B)",
                Preset::NAMES.join(", ")
            ),
            Self::Build(e) => write!(f, "{e}"),
            Self::Code(e) => write!(f, "{e}"),
            Self::NoStartRoom => write!(f, "graph has no room 1"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(e) => Some(e),
            Self::Code(e) => Some(e),
            Self::UnknownPreset(_) | Self::NoStartRoom => None,
        }
    }
}

impl From<BuildError> for SessionError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

impl From<CodeError> for SessionError {
    fn from(e: CodeError) -> Self {
        Self::Code(e)
    }
}

/// A graph being explored by one observer.
#[derive(Clone, Debug)]
pub struct Session {
    cfg: SessionCfg,
    preset: Preset,
    graph: Graph,
    cursor: Cursor,
}

impl Session {
    pub fn new(preset: Preset, cfg: SessionCfg) -> Result<Self, SessionError> {
        let graph = Self::fresh_graph(&preset, &cfg)?;
        Ok(Self {
            cfg,
            preset,
            graph,
            cursor: Cursor::new(RoomId(0)),
        })
    }

    /// Rebuild from `preset`, discarding the old graph and cursor.
    ///
    /// On error the current session is left untouched.
    pub fn reset(&mut self, preset: Preset) -> Result<(), SessionError> {
        self.graph = Self::fresh_graph(&preset, &self.cfg)?;
        self.preset = preset;
        self.cursor = Cursor::new(RoomId(0));
        Ok(())
    }

    fn fresh_graph(preset: &Preset, cfg: &SessionCfg) -> Result<Graph, SessionError> {
        let mut graph = preset.build(cfg)?;
        let start = RoomId(0);
        if !graph.contains(start) {
            return Err(SessionError::NoStartRoom);
        }
        graph.mark_visited(start);
        if cfg.god_mode {
            graph.visit_all();
        }
        tracing::debug!(
            preset = %preset,
            rooms = graph.len(),
            edges = graph.edge_count(),
            god_mode = cfg.god_mode,
            "session reset"
        );
        Ok(graph)
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Step the observer; marks the arrival room visited. `false` at a wall.
    pub fn move_player(&mut self, dir: Dir) -> bool {
        match self.cursor.step(&self.graph, dir) {
            Some(next) => {
                self.cursor = next;
                next.mark_visited(&mut self.graph);
                true
            }
            None => false,
        }
    }

    pub fn turn(&mut self, turn: Turn) {
        self.cursor.rotate(turn.frame());
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.cursor.neighborhood(&self.graph)
    }

    pub fn remaining(&self) -> Vec<RoomId> {
        self.graph.unvisited()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining().is_empty()
    }

    /// One-line progress text.
    pub fn status(&self) -> String {
        let left = self.remaining();
        if left.is_empty() {
            return "Congratulations! You found all the rooms!".to_string();
        }
        let names: Vec<String> = left.iter().map(RoomId::to_string).collect();
        format!("{} rooms left to find: {}", left.len(), names.join(", "))
    }
}
