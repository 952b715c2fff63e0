//! Cardinal directions and integer grid points.
//!
//! Conventions
//! - Screen coordinates: x grows east, y grows south, so `N = (0, -1)`.
//! - Directions are numbered `W=0, N=1, E=2, S=3`; adding one is a clockwise turn.

use nalgebra::Vector2;
use std::fmt;

/// Integer point on the room grid (one unit per room).
pub type Point = Vector2<i32>;

pub const NUM_DIRS: usize = 4;

/// One of the four cardinal directions, in cyclic (clockwise) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    W = 0,
    N = 1,
    E = 2,
    S = 3,
}

impl Dir {
    pub const ALL: [Dir; NUM_DIRS] = [Dir::W, Dir::N, Dir::E, Dir::S];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction with index `i mod 4`.
    #[inline]
    pub fn from_index(i: usize) -> Dir {
        Self::ALL[i % NUM_DIRS]
    }

    #[inline]
    pub fn opposite(self) -> Dir {
        Self::from_index(self.index() + 2)
    }

    #[inline]
    pub fn clockwise(self) -> Dir {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub fn counterclockwise(self) -> Dir {
        Self::from_index(self.index() + 3)
    }

    /// Unit vector pointing in this direction.
    pub fn to_point(self) -> Point {
        match self {
            Dir::W => Point::new(-1, 0),
            Dir::N => Point::new(0, -1),
            Dir::E => Point::new(1, 0),
            Dir::S => Point::new(0, 1),
        }
    }

    /// Inverse of [`Dir::to_point`]; `None` unless `p` is an axis-aligned unit vector.
    pub fn from_point(p: Point) -> Option<Dir> {
        match (p.x, p.y) {
            (-1, 0) => Some(Dir::W),
            (0, -1) => Some(Dir::N),
            (1, 0) => Some(Dir::E),
            (0, 1) => Some(Dir::S),
            _ => None,
        }
    }

    /// Case-insensitive `W`/`N`/`E`/`S`.
    pub fn from_letter(c: char) -> Option<Dir> {
        match c.to_ascii_uppercase() {
            'W' => Some(Dir::W),
            'N' => Some(Dir::N),
            'E' => Some(Dir::E),
            'S' => Some(Dir::S),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Dir::W => 'W',
            Dir::N => 'N',
            Dir::E => 'E',
            Dir::S => 'S',
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_and_turns_cycle() {
        for d in Dir::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.clockwise().counterclockwise(), d);
            assert_eq!(d.clockwise().clockwise(), d.opposite());
            assert_eq!(d.to_point() + d.opposite().to_point(), Point::zeros());
        }
        assert_eq!(Dir::W.clockwise(), Dir::N);
        assert_eq!(Dir::S.clockwise(), Dir::W);
    }

    #[test]
    fn point_roundtrip_and_invalid_vectors() {
        for d in Dir::ALL {
            assert_eq!(Dir::from_point(d.to_point()), Some(d));
        }
        assert_eq!(Dir::from_point(Point::new(0, 0)), None);
        assert_eq!(Dir::from_point(Point::new(1, 1)), None);
        assert_eq!(Dir::from_point(Point::new(2, 0)), None);
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(Dir::from_letter('e'), Some(Dir::E));
        assert_eq!(Dir::from_letter('N'), Some(Dir::N));
        assert_eq!(Dir::from_letter('x'), None);
        assert_eq!(Dir::S.to_string(), "S");
    }
}
