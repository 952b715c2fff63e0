//! Data types for the room graph: ids, rooms, policy, and the registry.
//!
//! Kept small and explicit to make `connect` easy to read.

use std::fmt;

use crate::frame::Frame;
use crate::geometry::{Dir, NUM_DIRS};

/// Room identifier. Stored 0-based; displayed (and parsed) 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

impl RoomId {
    /// Id for the external 1-based room number; `None` for 0.
    #[inline]
    pub fn from_number(number: usize) -> Option<RoomId> {
        number.checked_sub(1).map(RoomId)
    }

    /// External 1-based room number.
    #[inline]
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Display colors indexed by room number; numbers past the end fall back to black.
pub const PALETTE: [&str; 9] = [
    "black", "blue", "green", "red", "#7f00ff", "maroon", "turquoise", "black", "gray",
];

/// A node with up to four outgoing edges, one per direction.
///
/// Invariants:
/// - `transitions[d]` is meaningful only where `neighbors[d]` is `Some`
///   (it is the identity otherwise).
/// - Edges change only through `Graph::connect_by_frame`; `visited` and
///   `color` are plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub(super) neighbors: [Option<RoomId>; NUM_DIRS],
    pub(super) transitions: [Frame; NUM_DIRS],
    pub visited: bool,
    pub color: String,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        let color = PALETTE.get(id.number()).copied().unwrap_or("black");
        Self {
            id,
            neighbors: [None; NUM_DIRS],
            transitions: [Frame::IDENTITY; NUM_DIRS],
            visited: false,
            color: color.to_string(),
        }
    }

    /// Neighbor across the `dir` edge, if any.
    #[inline]
    pub fn to(&self, dir: Dir) -> Option<RoomId> {
        self.neighbors[dir.index()]
    }

    /// Frame applied when crossing the `dir` edge.
    #[inline]
    pub fn transition(&self, dir: Dir) -> Frame {
        self.transitions[dir.index()]
    }

    /// Number of occupied edge slots.
    pub fn degree(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }
}

/// Graph-wide connection policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphCfg {
    /// Strict mode: every edge must get a consistent back-edge, or the
    /// connection fails untouched. Relaxed mode permits one-way edges.
    pub enforce_bidirectional: bool,
}

impl Default for GraphCfg {
    fn default() -> Self {
        Self {
            enforce_bidirectional: true,
        }
    }
}

/// One directed edge as seen from its source slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRef {
    pub from: RoomId,
    pub dir: Dir,
    pub to: RoomId,
    pub frame: Frame,
}

impl EdgeRef {
    /// Slot on `to` that a consistent back-edge occupies.
    #[inline]
    pub fn back_dir(&self) -> Dir {
        self.frame.apply(self.dir).opposite()
    }
}

/// Room registry. Owns every room; rooms refer to each other by id.
///
/// Ids may be sparse (the connection parser allocates only the numbers it sees).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    pub(super) rooms: Vec<Option<Room>>,
    pub(super) cfg: GraphCfg,
}

impl Graph {
    pub fn new(cfg: GraphCfg) -> Self {
        Self {
            rooms: Vec::new(),
            cfg,
        }
    }

    /// Graph with rooms `1..=n` and no edges.
    pub fn with_rooms(n: usize, cfg: GraphCfg) -> Self {
        Self {
            rooms: (0..n).map(|i| Some(Room::new(RoomId(i)))).collect(),
            cfg,
        }
    }

    #[inline]
    pub fn cfg(&self) -> GraphCfg {
        self.cfg
    }

    /// Allocate `id` if it is not present yet.
    pub fn ensure_room(&mut self, id: RoomId) -> RoomId {
        if self.rooms.len() <= id.0 {
            self.rooms.resize_with(id.0 + 1, || None);
        }
        if self.rooms[id.0].is_none() {
            self.rooms[id.0] = Some(Room::new(id));
        }
        id
    }

    #[inline]
    pub fn contains(&self, id: RoomId) -> bool {
        self.room(id).is_some()
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Rooms in id order (holes skipped).
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().flatten()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms().map(|r| r.id)
    }

    /// Number of allocated rooms.
    pub fn len(&self) -> usize {
        self.rooms().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occupied slot count of `id`; `None` for an unknown room.
    pub fn degree(&self, id: RoomId) -> Option<usize> {
        self.room(id).map(Room::degree)
    }

    /// Every directed edge, by source room then direction.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.rooms().flat_map(|r| {
            Dir::ALL.into_iter().filter_map(move |dir| {
                r.to(dir).map(|to| EdgeRef {
                    from: r.id,
                    dir,
                    to,
                    frame: r.transition(dir),
                })
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.rooms().map(Room::degree).sum()
    }

    /// Whether `e` has the matching back-edge (`to` points back with `frame⁻¹`).
    pub fn is_two_way(&self, e: &EdgeRef) -> bool {
        let back = e.back_dir();
        self.room(e.to).is_some_and(|t| {
            t.to(back) == Some(e.from) && t.transition(back) == e.frame.inverse()
        })
    }

    /// Edges violating the mutual-consistency invariant (wormholes).
    pub fn one_way_edges(&self) -> Vec<EdgeRef> {
        self.edges().filter(|e| !self.is_two_way(e)).collect()
    }

    pub fn is_consistent(&self) -> bool {
        self.edges().all(|e| self.is_two_way(&e))
    }

    pub fn mark_visited(&mut self, id: RoomId) {
        if let Some(r) = self.room_mut(id) {
            r.visited = true;
        }
    }

    pub fn visit_all(&mut self) {
        for r in self.rooms.iter_mut().flatten() {
            r.visited = true;
        }
    }

    /// Rooms not visited yet, in id order.
    pub fn unvisited(&self) -> Vec<RoomId> {
        self.rooms().filter(|r| !r.visited).map(|r| r.id).collect()
    }
}
