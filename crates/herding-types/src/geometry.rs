//! Grid coordinates and step vectors.
//!
//! [`Position`] and [`Direction`] are plain value types. Arithmetic is
//! exposed through named operations rather than operator overloads, and all
//! of it saturates so that a position near `i32::MAX` cannot wrap into the
//! board from the other side.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board. `x` grows to the right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Position {
    /// Create a position from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position reached by taking one step of `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        Self {
            x: self.x.saturating_add(direction.dx),
            y: self.y.saturating_add(direction.dy),
        }
    }

    /// The vector that leads from `self` to `other`.
    pub const fn delta_to(self, other: Self) -> Direction {
        Direction {
            dx: other.x.saturating_sub(self.x),
            dy: other.y.saturating_sub(self.y),
        }
    }

    /// Manhattan distance `|dx| + |dy|`.
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// Whether `other` is one of the 8 cells surrounding `self`.
    pub const fn is_adjacent8(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx != 0 || dy != 0)
    }

    /// The 8 surrounding positions in row-major order (top row first, left
    /// to right), excluding `self`. Positions may lie outside the board.
    pub fn neighbors8(self) -> impl Iterator<Item = Self> {
        Direction::SURROUNDING.into_iter().map(move |d| self.offset(d))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// A step vector between cells.
///
/// Moves submitted by a player are only legal when the vector is a unit
/// cardinal step (see [`Direction::is_unit`]), but the type itself allows any
/// components so that malformed requests can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Direction {
    /// Horizontal component.
    pub dx: i32,
    /// Vertical component.
    pub dy: i32,
}

impl Direction {
    /// One column to the left.
    pub const LEFT: Self = Self::new(-1, 0);
    /// One column to the right.
    pub const RIGHT: Self = Self::new(1, 0);
    /// One row up.
    pub const UP: Self = Self::new(0, -1);
    /// One row down.
    pub const DOWN: Self = Self::new(0, 1);

    /// The four cardinal steps in the order agents scan them.
    pub const CARDINALS: [Self; 4] = [Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN];

    /// The eight offsets to the surrounding cells, row-major.
    pub const SURROUNDING: [Self; 8] = [
        Self::new(-1, -1),
        Self::new(0, -1),
        Self::new(1, -1),
        Self::new(-1, 0),
        Self::new(1, 0),
        Self::new(-1, 1),
        Self::new(0, 1),
        Self::new(1, 1),
    ];

    /// Create a direction from its components.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True iff exactly one component is `±1` and the other is `0`.
    pub const fn is_unit(self) -> bool {
        matches!(
            (self.dx, self.dy),
            (-1 | 1, 0) | (0, -1 | 1)
        )
    }

    /// The opposite vector (both components negated).
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            dx: self.dx.saturating_neg(),
            dy: self.dy.saturating_neg(),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_delta_are_inverse() {
        let a = Position::new(3, 4);
        let b = Position::new(1, 7);
        assert_eq!(a.offset(a.delta_to(b)), b);
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(3, -2);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
    }

    #[test]
    fn only_cardinal_unit_steps_are_unit() {
        for d in Direction::CARDINALS {
            assert!(d.is_unit(), "{d} should be a unit step");
        }
        assert!(!Direction::new(0, 0).is_unit());
        assert!(!Direction::new(1, 1).is_unit());
        assert!(!Direction::new(2, 0).is_unit());
        assert!(!Direction::new(0, -3).is_unit());
    }

    #[test]
    fn reversed_negates_both_components() {
        assert_eq!(Direction::LEFT.reversed(), Direction::RIGHT);
        assert_eq!(Direction::new(2, -5).reversed(), Direction::new(-2, 5));
    }

    #[test]
    fn neighbors8_is_row_major_and_excludes_center() {
        let center = Position::new(5, 5);
        let ns: Vec<Position> = center.neighbors8().collect();
        assert_eq!(ns.len(), 8);
        assert!(!ns.contains(&center));
        assert_eq!(ns.first(), Some(&Position::new(4, 4)));
        assert_eq!(ns.get(3), Some(&Position::new(4, 5)));
        assert_eq!(ns.last(), Some(&Position::new(6, 6)));
        assert!(ns.iter().all(|p| center.is_adjacent8(*p)));
    }

    #[test]
    fn adjacency_excludes_self_and_distance_two() {
        let p = Position::new(2, 2);
        assert!(!p.is_adjacent8(p));
        assert!(p.is_adjacent8(Position::new(3, 3)));
        assert!(!p.is_adjacent8(Position::new(4, 2)));
    }

    #[test]
    fn display_matches_comma_form() {
        assert_eq!(Position::new(1, -2).to_string(), "1, -2");
    }
}
