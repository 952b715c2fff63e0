//! Topology builders: edge lists for closed-surface identifications of a grid.
//!
//! Purpose
//! - Produce reproducible [`Blueprint`]s (room count plus ordered connection
//!   requests) for the preset surfaces, then materialize them into a [`Graph`].
//!
//! Why this design
//! - Builders are pure: they only emit requests, so the same inputs (and the same
//!   seed for [`random`]) always yield the same blueprint and the same graph.
//! - Strict blueprints abort on the first failed request. Lenient ones
//!   ([`random`], [`fan`]) tolerate failures, which is how collisions and
//!   dangling references become missing or one-way edges.
//!
//! Conventions
//! - Rooms are numbered row-major from 1 on a `width × height` grid; row 0 is
//!   the top (north) row.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::code::{Connection, MAX_ROOM_NUMBER};
use crate::frame::Frame;
use crate::geometry::Dir;
use crate::graph::{ConnectError, Graph, GraphCfg, RoomId, PALETTE};

/// Error type shared by all builders.
#[derive(Debug)]
pub enum BuildError {
    InvalidParams { reason: String },
    Connect(ConnectError),
}

impl BuildError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid builder params: {reason}"),
            Self::Connect(e) => write!(f, "blueprint connection failed: {e}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams { .. } => None,
            Self::Connect(e) => Some(e),
        }
    }
}

/// A single edge request inside a blueprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Frame derived from target side and flip (see [`Graph::connect`]).
    Connect(Connection),
    /// Explicit frame (see [`Graph::connect_by_frame`]).
    Frame {
        from: RoomId,
        dir: Dir,
        to: RoomId,
        frame: Frame,
    },
}

impl Request {
    pub fn apply(&self, graph: &mut Graph) -> Result<(), ConnectError> {
        match *self {
            Self::Connect(c) => c.apply(graph),
            Self::Frame {
                from,
                dir,
                to,
                frame,
            } => graph.connect_by_frame(from, dir, to, frame),
        }
    }

    /// Equivalent mini-language connection.
    pub fn to_connection(&self) -> Connection {
        match *self {
            Self::Connect(c) => c,
            Self::Frame {
                from,
                dir,
                to,
                frame,
            } => Connection::from_frame(from, dir, to, frame),
        }
    }
}

/// Rooms `1..=rooms`, optional color overrides, and ordered edge requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    pub rooms: usize,
    pub requests: Vec<Request>,
    /// Skip failed requests instead of aborting.
    pub lenient: bool,
    pub colors: Vec<(RoomId, String)>,
}

impl Blueprint {
    fn strict(rooms: usize, requests: Vec<Request>) -> Self {
        Self {
            rooms,
            requests,
            lenient: false,
            colors: Vec::new(),
        }
    }

    /// Materialize into a fresh graph under `cfg`.
    pub fn build(&self, cfg: GraphCfg) -> Result<Graph, BuildError> {
        let mut graph = Graph::with_rooms(self.rooms, cfg);
        for (id, color) in &self.colors {
            if let Some(room) = graph.room_mut(*id) {
                room.color.clone_from(color);
            }
        }
        let mut skipped = 0usize;
        for req in &self.requests {
            match req.apply(&mut graph) {
                Ok(()) => {}
                Err(e) if self.lenient => {
                    skipped += 1;
                    tracing::debug!(error = %e, "skipping connection");
                }
                Err(e) => return Err(BuildError::Connect(e)),
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, total = self.requests.len(), "lenient build");
        }
        Ok(graph)
    }

    /// Mini-language string (one token per request) that `code::load` turns
    /// back into the edges of a strict build. Requests a lenient blueprint
    /// would skip are left out; a strict blueprint fails like [`Self::build`].
    pub fn to_code(&self) -> Result<String, BuildError> {
        let mut graph = Graph::with_rooms(self.rooms, GraphCfg::default());
        let mut tokens = Vec::with_capacity(self.requests.len());
        for req in &self.requests {
            match req.apply(&mut graph) {
                Ok(()) => tokens.push(req.to_connection().to_string()),
                Err(_) if self.lenient => {}
                Err(e) => return Err(BuildError::Connect(e)),
            }
        }
        Ok(tokens.join(","))
    }
}

/// Named surfaces with their size parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Mobius { width: usize, height: usize },
    Klein { width: usize, height: usize },
    Projective { width: usize, height: usize },
    TwistedLadder { size: usize },
    Random { rooms: usize, seed: u64 },
    Fan { rooms: usize },
}

impl Topology {
    pub const MOBIUS: Topology = Topology::Mobius {
        width: 10,
        height: 3,
    };
    pub const KLEIN: Topology = Topology::Klein {
        width: 4,
        height: 4,
    };
    pub const PROJECTIVE: Topology = Topology::Projective {
        width: 4,
        height: 4,
    };
    pub const TWISTED_LADDER: Topology = Topology::TwistedLadder { size: 4 };
    pub const FAN: Topology = Topology::Fan { rooms: 12 };

    pub fn random(seed: u64) -> Topology {
        Topology::Random { rooms: 50, seed }
    }

    pub fn blueprint(&self) -> Result<Blueprint, BuildError> {
        match *self {
            Self::Mobius { width, height } => mobius(width, height),
            Self::Klein { width, height } => klein(width, height),
            Self::Projective { width, height } => projective(width, height),
            Self::TwistedLadder { size } => twisted_ladder(size),
            Self::Random { rooms, seed } => random(rooms, seed),
            Self::Fan { rooms } => fan(rooms),
        }
    }

    pub fn build(&self, cfg: GraphCfg) -> Result<Graph, BuildError> {
        self.blueprint()?.build(cfg)
    }
}

/// Möbius strip: ordinary grid edges plus a flipped east-to-west wrap that
/// sends row `y` to row `height - 1 - y`.
pub fn mobius(width: usize, height: usize) -> Result<Blueprint, BuildError> {
    check_grid(width, height)?;
    let mut requests = grid_edges(width, height, false);
    requests.extend(half_twist(width, height));
    Ok(Blueprint::strict(width * height, requests))
}

/// Klein bottle: the Möbius identification plus an unflipped north/south wrap.
pub fn klein(width: usize, height: usize) -> Result<Blueprint, BuildError> {
    check_grid(width, height)?;
    let mut requests = grid_edges(width, height, true);
    requests.extend(half_twist(width, height));
    Ok(Blueprint::strict(width * height, requests))
}

/// Projective plane: the Möbius identification plus a flipped antipodal gluing
/// of the top boundary onto the bottom boundary.
pub fn projective(width: usize, height: usize) -> Result<Blueprint, BuildError> {
    check_grid(width, height)?;
    let mut requests = grid_edges(width, height, false);
    requests.extend(half_twist(width, height));
    let bottom = (height - 1) * width;
    for x in 0..width {
        let c = Connection::new(RoomId(x), Dir::N, RoomId(bottom + width - 1 - x));
        requests.push(Request::Connect(c.flipped()));
    }
    Ok(Blueprint::strict(width * height, requests))
}

/// A `2 × size` ladder closed into a Möbius band by two rotated (not flipped)
/// edges: the top row's east end enters room 1 from the north and the bottom
/// row's east end enters room `size + 1` from the south.
pub fn twisted_ladder(size: usize) -> Result<Blueprint, BuildError> {
    if size == 0 {
        return Err(BuildError::invalid("ladder size must be >= 1"));
    }
    check_rooms(size.saturating_mul(2))?;
    let mut requests = Vec::with_capacity(4 * size);
    for i in 0..size - 1 {
        requests.push(edge(i, Dir::E, i + 1));
        requests.push(edge(size + i, Dir::E, size + i + 1));
    }
    for i in 0..size {
        requests.push(edge(i, Dir::S, size + i));
    }
    let top = Connection::new(RoomId(size - 1), Dir::E, RoomId(0)).entering(Dir::N);
    let bottom = Connection::new(RoomId(2 * size - 1), Dir::E, RoomId(size)).entering(Dir::S);
    requests.push(Request::Connect(top));
    requests.push(Request::Connect(bottom));
    Ok(Blueprint::strict(2 * size, requests))
}

/// Random wormhole graph: every slot of every room points (identity frame) at a
/// uniformly drawn other room. Collisions are tolerated, so strict mode drops
/// them and relaxed mode turns them into one-way edges.
pub fn random(rooms: usize, seed: u64) -> Result<Blueprint, BuildError> {
    if rooms < 2 {
        return Err(BuildError::invalid("random graph needs at least 2 rooms"));
    }
    check_rooms(rooms)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let colors = (PALETTE.len()..=rooms)
        .map(|number| (RoomId(number - 1), random_color(&mut rng)))
        .collect();
    let mut requests = Vec::with_capacity(4 * rooms);
    for r in 0..rooms {
        for dir in Dir::ALL {
            let mut other = rng.gen_range(0..rooms);
            while other == r {
                other = rng.gen_range(0..rooms);
            }
            requests.push(Request::Frame {
                from: RoomId(r),
                dir,
                to: RoomId(other),
                frame: Frame::IDENTITY,
            });
        }
    }
    Ok(Blueprint {
        rooms,
        requests,
        lenient: true,
        colors,
    })
}

/// Fan graph: room `r`'s four slots point at rooms `r+1 ..= r+4`. References
/// past the last room are dangling and get skipped.
pub fn fan(rooms: usize) -> Result<Blueprint, BuildError> {
    if rooms == 0 {
        return Err(BuildError::invalid("fan graph needs at least 1 room"));
    }
    check_rooms(rooms)?;
    let mut requests = Vec::with_capacity(4 * rooms);
    for r in 0..rooms {
        for (k, dir) in Dir::ALL.into_iter().enumerate() {
            requests.push(Request::Frame {
                from: RoomId(r),
                dir,
                to: RoomId(r + 1 + k),
                frame: Frame::IDENTITY,
            });
        }
    }
    Ok(Blueprint {
        rooms,
        requests,
        lenient: true,
        colors: Vec::new(),
    })
}

fn check_grid(width: usize, height: usize) -> Result<(), BuildError> {
    if width == 0 || height == 0 {
        return Err(BuildError::invalid(format!(
            "grid must be at least 1x1, got {width}x{height}"
        )));
    }
    let rooms = width.checked_mul(height).unwrap_or(usize::MAX);
    check_rooms(rooms)
}

/// Builders share the parser's room limit.
fn check_rooms(rooms: usize) -> Result<(), BuildError> {
    if rooms > MAX_ROOM_NUMBER {
        return Err(BuildError::invalid(format!(
            "{rooms} rooms exceed the limit of {MAX_ROOM_NUMBER}"
        )));
    }
    Ok(())
}

fn edge(from: usize, dir: Dir, to: usize) -> Request {
    Request::Connect(Connection::new(RoomId(from), dir, RoomId(to)))
}

/// East edges inside rows and south edges between rows (wrapping the last row
/// to the first when `wrap_rows`).
fn grid_edges(width: usize, height: usize, wrap_rows: bool) -> Vec<Request> {
    let mut requests = Vec::with_capacity(2 * width * height);
    for y in 0..height {
        for x in 0..width {
            let here = y * width + x;
            if x + 1 < width {
                requests.push(edge(here, Dir::E, here + 1));
            }
            if wrap_rows || y + 1 < height {
                requests.push(edge(here, Dir::S, ((y + 1) % height) * width + x));
            }
        }
    }
    requests
}

/// Flipped wrap from each row's east end to the mirrored row's west end.
fn half_twist(width: usize, height: usize) -> impl Iterator<Item = Request> {
    (0..height).map(move |y| {
        let c = Connection::new(
            RoomId((y + 1) * width - 1),
            Dir::E,
            RoomId((height - 1 - y) * width),
        );
        Request::Connect(c.flipped())
    })
}

fn random_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06X}", rng.gen_range(0..0x0100_0000u32))
}
