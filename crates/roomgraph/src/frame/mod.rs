//! Frames: the symmetry group of the square acting on cardinal directions.
//!
//! Purpose
//! - Label every edge with how crossing it relabels W/N/E/S for an observer,
//!   and carry the observer's accumulated orientation in the same type.
//!
//! Why this design (short)
//! - A frame is stored as a fixed 4-slot map `map[d] = image of d`; the group
//!   has 8 elements, so values are `Copy` and comparisons are pointwise.
//! - Only symmetries of the square are constructible: arbitrary maps go
//!   through [`Frame::from_map`], which rejects anything that does not
//!   preserve or exactly reverse the cycle W→N→E→S→W. `compose`/`inverse`
//!   are closed on that set.
//!
//! Conventions
//! - `a.compose(b)` applies `b` first, then `a`. `a * b` is the same product.
//! - `to_matrix` has the images of the E and S unit vectors as columns, so it
//!   acts on screen points the way the frame acts on directions.

use nalgebra::Matrix2;
use std::fmt;

use crate::geometry::{Dir, Point, NUM_DIRS};
use Dir::{E, N, S, W};

/// A symmetry of the square, as a permutation of the four directions.
///
/// Invariants:
/// - `map` is a bijection that is either a rotation (`map[d+1] = map[d] + 1`)
///   or a reflection (`map[d+1] = map[d] - 1`), indices mod 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    map: [Dir; NUM_DIRS],
}

impl Frame {
    pub const IDENTITY: Frame = Frame { map: [W, N, E, S] };
    pub const FLIP_HORIZONTAL: Frame = Frame { map: [E, N, W, S] };
    pub const FLIP_VERTICAL: Frame = Frame { map: [W, S, E, N] };
    pub const ROTATE_CW: Frame = Frame { map: [N, E, S, W] };
    pub const ROTATE_CCW: Frame = Frame { map: [S, W, N, E] };
    pub const ROTATE_180: Frame = Frame { map: [E, S, W, N] };
    /// Mirror across the NW–SE diagonal (swaps W↔N and E↔S).
    pub const FLIP_DIAGONAL: Frame = Frame { map: [N, W, S, E] };
    /// Mirror across the NE–SW diagonal (swaps W↔S and N↔E).
    pub const FLIP_ANTIDIAGONAL: Frame = Frame { map: [S, E, N, W] };

    /// Validate an arbitrary direction map; `None` unless it is a square symmetry.
    pub fn from_map(map: [Dir; NUM_DIRS]) -> Option<Frame> {
        let step = (map[1].index() + NUM_DIRS - map[0].index()) % NUM_DIRS;
        if step != 1 && step != NUM_DIRS - 1 {
            return None;
        }
        let rigid = (0..NUM_DIRS).all(|d| {
            map[(d + 1) % NUM_DIRS] == Dir::from_index(map[d].index() + step)
        });
        rigid.then_some(Frame { map })
    }

    /// The unique rigid motion sending `from` to `to`, reflected when `reflect`.
    ///
    /// `map[d] = (±(d - from) + to) mod 4`, which is a rotation for `+` and a
    /// reflection for `-`; both are symmetries for every choice of anchors.
    pub fn anchored(from: Dir, to: Dir, reflect: bool) -> Frame {
        let sign: i32 = if reflect { -1 } else { 1 };
        let n = NUM_DIRS as i32;
        let mut map = [W; NUM_DIRS];
        for (d, slot) in map.iter_mut().enumerate() {
            let offset = d as i32 - from.index() as i32;
            let image = (sign * offset + to.index() as i32).rem_euclid(n);
            *slot = Dir::from_index(image as usize);
        }
        Frame { map }
    }

    /// All 8 symmetries: the four rotations, then the four reflections.
    pub fn all() -> [Frame; 8] {
        [
            Self::IDENTITY,
            Self::ROTATE_CW,
            Self::ROTATE_180,
            Self::ROTATE_CCW,
            Self::FLIP_HORIZONTAL,
            Self::FLIP_VERTICAL,
            Self::FLIP_DIAGONAL,
            Self::FLIP_ANTIDIAGONAL,
        ]
    }

    #[inline]
    pub fn map(&self) -> [Dir; NUM_DIRS] {
        self.map
    }

    #[inline]
    pub fn apply(&self, dir: Dir) -> Dir {
        self.map[dir.index()]
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    #[inline]
    pub fn compose(&self, other: &Frame) -> Frame {
        let mut map = [W; NUM_DIRS];
        for (d, slot) in map.iter_mut().enumerate() {
            *slot = self.map[other.map[d].index()];
        }
        Frame { map }
    }

    #[inline]
    pub fn inverse(&self) -> Frame {
        let mut map = [W; NUM_DIRS];
        for d in Dir::ALL {
            map[self.apply(d).index()] = d;
        }
        Frame { map }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rotations preserve the clockwise order of directions; reflections reverse it.
    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.apply(N) == self.apply(W).clockwise()
    }

    /// Linear map on grid points with `M · d.to_point() == self.apply(d).to_point()`.
    pub fn to_matrix(&self) -> Matrix2<i32> {
        Matrix2::from_columns(&[self.apply(E).to_point(), self.apply(S).to_point()])
    }

    /// The `(a, b, c, d)` tuple of a canvas `transform(a, b, c, d, 0, 0)` call.
    pub fn canvas_transform(&self) -> [i32; 4] {
        let e: Point = self.apply(E).to_point();
        let s: Point = self.apply(S).to_point();
        [e.x, e.y, s.x, s.y]
    }

    /// Name of the frame when it is one of the named constants.
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::IDENTITY => Some("identity"),
            Self::FLIP_HORIZONTAL => Some("flip_horizontal"),
            Self::FLIP_VERTICAL => Some("flip_vertical"),
            Self::ROTATE_CW => Some("rotate_cw"),
            Self::ROTATE_CCW => Some("rotate_ccw"),
            Self::ROTATE_180 => Some("rotate_180"),
            Self::FLIP_DIAGONAL => Some("flip_diagonal"),
            Self::FLIP_ANTIDIAGONAL => Some("flip_antidiagonal"),
            _ => None,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Frame {
    type Output = Frame;
    #[inline]
    fn mul(self, rhs: Frame) -> Self::Output {
        self.compose(&rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.map;
        write!(f, "[{a},{b},{c},{d}]")
    }
}

#[cfg(test)]
mod tests;
