//! Connection mini-language: compact edge lists such as `"1E2, 2S3', 4E1N"`.
//!
//! Grammar (per token, case-insensitive)
//! - `<from><dir><to>[<to_dir>][flip]`
//! - `from`/`to`: 1-based decimal room numbers; `dir`/`to_dir`: one of `W N E S`;
//!   `to_dir` defaults to the opposite of `dir`; `flip` is `'` or `!`.
//! - Tokens are separated by commas and/or whitespace.
//!
//! Semantics
//! - Parsing allocates every referenced room that is not in the graph yet, but
//!   never creates edges. A malformed token fails the whole batch.
//! - [`execute`] connects token by token in input order; the first failure
//!   aborts. Edges installed by earlier tokens stay installed.

use std::fmt;

use crate::frame::Frame;
use crate::geometry::Dir;
use crate::graph::{ConnectError, Graph, GraphCfg, RoomId};

/// Largest room number the parser accepts.
pub const MAX_ROOM_NUMBER: usize = 10_000;

/// One edge request, consumed once by the connection protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    pub from: RoomId,
    pub dir: Dir,
    pub to: RoomId,
    /// Side of `to` the edge enters through; `None` means `dir.opposite()`.
    pub to_dir: Option<Dir>,
    pub flip: bool,
}

impl Connection {
    pub fn new(from: RoomId, dir: Dir, to: RoomId) -> Self {
        Self {
            from,
            dir,
            to,
            to_dir: None,
            flip: false,
        }
    }

    pub fn entering(mut self, to_dir: Dir) -> Self {
        self.to_dir = Some(to_dir);
        self
    }

    pub fn flipped(mut self) -> Self {
        self.flip = true;
        self
    }

    /// Token for an explicit frame edge. Every symmetry is reachable by some
    /// `(to_dir, flip)` pair, so any frame-labeled edge has a token form.
    pub fn from_frame(from: RoomId, dir: Dir, to: RoomId, frame: Frame) -> Self {
        let flip = !frame.is_orientation_preserving();
        let to_dir = frame.apply(dir).opposite();
        Self {
            from,
            dir,
            to,
            to_dir: (to_dir != dir.opposite()).then_some(to_dir),
            flip,
        }
    }

    /// Frame this request installs on its forward edge.
    pub fn frame(&self) -> Frame {
        Graph::derive_frame(self.dir, self.to_dir, self.flip)
    }

    /// Run this request through [`Graph::connect`].
    pub fn apply(&self, graph: &mut Graph) -> Result<(), ConnectError> {
        graph.connect(self.from, self.dir, self.to, self.to_dir, self.flip)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.dir, self.to)?;
        if let Some(d) = self.to_dir {
            write!(f, "{d}")?;
        }
        if self.flip {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// Malformed token; carries the offending substring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub token: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse string {:?}", self.token)
    }
}

impl std::error::Error for ParseError {}

/// Either stage of [`load`] failing.
#[derive(Debug)]
pub enum CodeError {
    Parse(ParseError),
    Connect(ConnectError),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::Connect(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for CodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Connect(e) => Some(e),
        }
    }
}

impl From<ParseError> for CodeError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConnectError> for CodeError {
    fn from(e: ConnectError) -> Self {
        Self::Connect(e)
    }
}

/// Parse one token, allocating the rooms it names.
pub fn parse(token: &str, graph: &mut Graph) -> Result<Connection, ParseError> {
    let malformed = || ParseError {
        token: token.to_string(),
    };
    let mut rest = token;
    let from = take_room(&mut rest).ok_or_else(malformed)?;
    let dir = take_dir(&mut rest).ok_or_else(malformed)?;
    let to = take_room(&mut rest).ok_or_else(malformed)?;
    let to_dir = take_dir(&mut rest);
    let flip = match rest {
        "" => false,
        "'" | "!" => true,
        _ => return Err(malformed()),
    };
    graph.ensure_room(from);
    graph.ensure_room(to);
    Ok(Connection {
        from,
        dir,
        to,
        to_dir,
        flip,
    })
}

/// Parse a comma/whitespace separated batch. Blank input is malformed.
pub fn parse_many(text: &str, graph: &mut Graph) -> Result<Vec<Connection>, ParseError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(ParseError {
            token: text.trim().to_string(),
        });
    }
    tokens.into_iter().map(|t| parse(t, graph)).collect()
}

/// Connect in order; stops at (and returns) the first failure.
pub fn execute(connections: &[Connection], graph: &mut Graph) -> Result<(), ConnectError> {
    connections.iter().try_for_each(|c| c.apply(graph))
}

/// Fresh graph holding room 1, populated from `text`.
pub fn load(text: &str, cfg: GraphCfg) -> Result<Graph, CodeError> {
    let mut graph = Graph::new(cfg);
    graph.ensure_room(RoomId(0));
    let connections = parse_many(text, &mut graph)?;
    execute(&connections, &mut graph)?;
    Ok(graph)
}

fn take_room(rest: &mut &str) -> Option<RoomId> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number: usize = rest[..end].parse().ok()?;
    if number > MAX_ROOM_NUMBER {
        return None;
    }
    *rest = &rest[end..];
    RoomId::from_number(number)
}

fn take_dir(rest: &mut &str) -> Option<Dir> {
    let c = rest.chars().next()?;
    let dir = Dir::from_letter(c)?;
    *rest = &rest[c.len_utf8()..];
    Some(dir)
}
