//! Traversal cursor: an observer's room plus accumulated orientation.
//!
//! Purpose
//! - Walk a [`Graph`] in the observer's own frame: a requested direction is
//!   first mapped through the cursor's transform, then the crossed edge's
//!   transition is composed into the transform (holonomy).
//! - Answer local-flatness queries over a 2×2 block and assemble the 3×3
//!   neighborhood a renderer draws around the observer.
//!
//! Why this design
//! - A cursor is a `Copy` pair `(RoomId, Frame)`; stepping returns a new cursor
//!   instead of mutating, so the two diagonal paths of a flatness check are
//!   computed side by side from the same start.
//!
//! Conventions
//! - `step` composes on the left (`transition ∘ transform`); `rotate` composes
//!   on the right (`transform ∘ p`), i.e. it turns the observer in place.
//! - Flatness is a query, not a construction invariant: non-flat graphs are
//!   valid graphs.

use std::collections::VecDeque;

use crate::frame::Frame;
use crate::geometry::{Dir, Point};
use crate::graph::{Graph, RoomId};

use Dir::{E, N, S, W};

/// Observer state: current room and accumulated frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub room: RoomId,
    pub transform: Frame,
}

impl Cursor {
    /// Cursor at `room` with the identity transform.
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            transform: Frame::IDENTITY,
        }
    }

    /// Cross the edge the observer sees in direction `dir`.
    ///
    /// Returns `None` when the room is unknown or that slot is empty.
    pub fn step(&self, graph: &Graph, dir: Dir) -> Option<Cursor> {
        let actual = self.transform.apply(dir);
        let room = graph.room(self.room)?;
        let next = room.to(actual)?;
        Some(Cursor {
            room: next,
            transform: room.transition(actual).compose(&self.transform),
        })
    }

    /// Follow `dirs` in order; `None` as soon as a step is missing.
    pub fn walk(&self, graph: &Graph, dirs: impl IntoIterator<Item = Dir>) -> Option<Cursor> {
        dirs.into_iter().try_fold(*self, |cur, dir| cur.step(graph, dir))
    }

    /// Turn in place: `transform = transform ∘ p`.
    pub fn rotate(&mut self, p: Frame) {
        self.transform = self.transform.compose(&p);
    }

    pub fn visited(&self, graph: &Graph) -> bool {
        graph.room(self.room).is_some_and(|r| r.visited)
    }

    pub fn mark_visited(&self, graph: &mut Graph) {
        graph.mark_visited(self.room);
    }

    /// Commutative-diagram test at the `(a, b)` corner.
    ///
    /// `None` when `a` and `b` are not perpendicular or either two-step path
    /// is missing; otherwise whether `a then b` and `b then a` agree in both
    /// room and transform.
    pub fn is_flat(&self, graph: &Graph, a: Dir, b: Dir) -> Option<bool> {
        if a == b || a == b.opposite() {
            return None;
        }
        let via_a = self.step(graph, a)?.step(graph, b)?;
        let via_b = self.step(graph, b)?.step(graph, a)?;
        Some(via_a == via_b)
    }

    /// Shared `(a, b)` corner, only when the corner is flat.
    pub fn diagonal(&self, graph: &Graph, a: Dir, b: Dir) -> Option<Cursor> {
        match self.is_flat(graph, a, b)? {
            true => self.step(graph, a)?.step(graph, b),
            false => None,
        }
    }

    /// The 3×3 view around the observer.
    pub fn neighborhood(&self, graph: &Graph) -> Neighborhood {
        let sides = Dir::ALL.map(|d| self.step(graph, d));
        let corners = Neighborhood::CORNERS.map(|(a, b)| self.corner(graph, &sides, a, b));
        Neighborhood {
            center: *self,
            sides,
            corners,
        }
    }

    /// A corner is shown when it is reachable through a visited side: through
    /// the only present side, or through both when they agree.
    fn corner(
        &self,
        graph: &Graph,
        sides: &[Option<Cursor>; 4],
        a: Dir,
        b: Dir,
    ) -> Option<Cursor> {
        let seen = |c: &Cursor| c.visited(graph);
        match (sides[a.index()], sides[b.index()]) {
            (None, Some(rb)) if seen(&rb) => rb.step(graph, a),
            (Some(ra), None) if seen(&ra) => ra.step(graph, b),
            (Some(ra), Some(rb)) if seen(&ra) && seen(&rb) => {
                let c1 = ra.step(graph, b)?;
                let c2 = rb.step(graph, a)?;
                (c1 == c2).then_some(c1)
            }
            _ => None,
        }
    }
}

/// What a renderer draws around the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub center: Cursor,
    /// Indexed by [`Dir::index`].
    pub sides: [Option<Cursor>; 4],
    /// In [`Neighborhood::CORNERS`] order.
    pub corners: [Option<Cursor>; 4],
}

impl Neighborhood {
    pub const CORNERS: [(Dir, Dir); 4] = [(E, N), (W, N), (E, S), (W, S)];

    /// Cell at grid offset `p` (each coordinate in `-1..=1`, screen axes).
    pub fn at(&self, p: Point) -> Option<Cursor> {
        if p == Point::zeros() {
            return Some(self.center);
        }
        if let Some(d) = Dir::from_point(p) {
            return self.sides[d.index()];
        }
        Self::CORNERS
            .iter()
            .position(|&(a, b)| a.to_point() + b.to_point() == p)
            .and_then(|i| self.corners[i])
    }
}

/// A corner where the two diagonal paths disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kink {
    pub room: RoomId,
    pub a: Dir,
    pub b: Dir,
}

/// Every non-flat corner, checked from each room with the identity transform.
///
/// Starting transforms cancel on the right of both paths, so the identity
/// start covers every observer orientation.
pub fn non_flat_corners(graph: &Graph) -> Vec<Kink> {
    graph
        .ids()
        .flat_map(move |room| {
            let cur = Cursor::new(room);
            Neighborhood::CORNERS
                .into_iter()
                .filter(move |&(a, b)| cur.is_flat(graph, a, b) == Some(false))
                .map(move |(a, b)| Kink { room, a, b })
        })
        .collect()
}

/// Whether no closed walk reverses orientation.
///
/// Two-colors rooms by handedness along edges (a reflecting edge flips the
/// color); a conflict is an orientation-reversing loop.
pub fn is_orientable(graph: &Graph) -> bool {
    let slots = graph.ids().map(|id| id.0 + 1).max().unwrap_or(0);
    let mut hand: Vec<Option<bool>> = vec![None; slots];
    for start in graph.ids() {
        if hand[start.0].is_some() {
            continue;
        }
        hand[start.0] = Some(true);
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            let Some(room) = graph.room(id) else { continue };
            let here = hand[id.0].unwrap_or(true);
            for d in Dir::ALL {
                let Some(next) = room.to(d) else { continue };
                if next.0 >= hand.len() {
                    continue;
                }
                let there = here == room.transition(d).is_orientation_preserving();
                match hand[next.0] {
                    None => {
                        hand[next.0] = Some(there);
                        queue.push_back(next);
                    }
                    Some(h) if h != there => return false,
                    Some(_) => {}
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests;
