//! The game board: a fixed `width x height` grid of cell kinds.
//!
//! Cells are stored row-major in a flat vector. Every write goes through
//! [`Board::set_kind`], which also appends the written position to a change
//! log. The judge drains that log after each mutating operation and hands it
//! to the render hook, so renderers can redraw only what changed.

use std::collections::BTreeSet;

use herding_types::{CellKind, Position};
use rand::Rng;
use tracing::debug;

use crate::error::WorldError;

/// Rejection-sampling attempts per cell before [`Board::place_random`]
/// falls back to scanning for empty cells.
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// The authoritative grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
    /// Row-major cell storage, `width * height` long.
    cells: Vec<CellKind>,
    /// Positions written since the last [`Board::take_changes`].
    changes: Vec<Position>,
}

impl Board {
    /// Create an all-empty board.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero or
    /// the cell count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        let invalid = || WorldError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let w = i32::try_from(width).map_err(|_e| invalid())?;
        let h = i32::try_from(height).map_err(|_e| invalid())?;
        let len = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or_else(invalid)?;

        Ok(Self {
            width: w,
            height: h,
            cells: vec![CellKind::Empty; len],
            changes: Vec::new(),
        })
    }

    /// Build a board from rows of cell symbols (`E C W F S P`, or `.` for
    /// empty). Whitespace around each row is ignored; blank lines are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSymbol`] for an unrecognized character,
    /// [`WorldError::RaggedRows`] if rows differ in length, and
    /// [`WorldError::InvalidDimensions`] if there are no rows.
    pub fn parse(layout: &str) -> Result<Self, WorldError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let expected = rows.first().map_or(0, |r| r.chars().count());
        let width = u32::try_from(expected).unwrap_or(0);
        let height = u32::try_from(rows.len()).unwrap_or(0);
        let mut board = Self::new(width, height)?;

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(WorldError::RaggedRows {
                    row,
                    expected,
                    actual,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let kind = kind_for_symbol(symbol).ok_or(WorldError::UnknownSymbol {
                    symbol,
                    row,
                    column,
                })?;
                let index = row.saturating_mul(expected).saturating_add(column);
                if let Some(cell) = board.cells.get_mut(index) {
                    *cell = kind;
                }
            }
        }

        Ok(board)
    }

    /// Number of columns.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub const fn is_inside(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Flat index of an in-bounds position.
    fn index(&self, position: Position) -> Option<usize> {
        if !self.is_inside(position) {
            return None;
        }
        let flat = position
            .y
            .checked_mul(self.width)?
            .checked_add(position.x)?;
        usize::try_from(flat).ok()
    }

    /// The kind at `position`, or `None` outside the board.
    pub fn kind_at(&self, position: Position) -> Option<CellKind> {
        self.index(position)
            .and_then(|i| self.cells.get(i))
            .copied()
    }

    /// Whether `position` is inside the board and holds `kind`.
    pub fn is(&self, position: Position, kind: CellKind) -> bool {
        self.kind_at(position) == Some(kind)
    }

    /// Overwrite the cell at `position` and log the change.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` is off the board.
    pub fn set_kind(&mut self, position: Position, kind: CellKind) -> Result<(), WorldError> {
        let cell = self
            .index(position)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(WorldError::OutOfBounds(position))?;
        *cell = kind;
        self.changes.push(position);
        Ok(())
    }

    /// Every position on the board, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// All positions holding `kind`, row-major.
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.positions().filter(|p| self.is(*p, kind)).collect()
    }

    /// The first position holding `kind` in row-major order.
    pub fn find(&self, kind: CellKind) -> Option<Position> {
        self.positions().find(|p| self.is(*p, kind))
    }

    /// How many cells hold `kind`.
    pub fn count(&self, kind: CellKind) -> u32 {
        let n = self.cells.iter().filter(|k| **k == kind).count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    /// Put `kind` on a random empty cell and return where it landed.
    ///
    /// Samples random coordinates for a bounded number of attempts, then
    /// falls back to picking uniformly among the remaining empty cells, so
    /// a crowded board never loops forever.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BoardFull`] if no empty cell is left.
    pub fn place_random(
        &mut self,
        kind: CellKind,
        rng: &mut impl Rng,
    ) -> Result<Position, WorldError> {
        let attempts = self.cells.len().saturating_mul(PLACEMENT_ATTEMPTS_PER_CELL);
        for _ in 0..attempts {
            let candidate = Position::new(
                rng.random_range(0..self.width),
                rng.random_range(0..self.height),
            );
            if self.is(candidate, CellKind::Empty) {
                self.set_kind(candidate, kind)?;
                return Ok(candidate);
            }
        }

        let empty = self.positions_of(CellKind::Empty);
        if empty.is_empty() {
            return Err(WorldError::BoardFull { kind });
        }
        debug!(%kind, empty = empty.len(), "Placement sampling exhausted, scanning empty cells");
        let pick = rng.random_range(0..empty.len());
        let target = *empty.get(pick).ok_or(WorldError::BoardFull { kind })?;
        self.set_kind(target, kind)?;
        Ok(target)
    }

    /// Distinct non-empty kinds among the in-bounds 8-neighbors of
    /// `position`.
    pub fn neighbor_kinds(&self, position: Position) -> BTreeSet<CellKind> {
        position
            .neighbors8()
            .filter_map(|p| self.kind_at(p))
            .filter(|k| k.is_occupied())
            .collect()
    }

    /// Positions adjacent (8-neighborhood) to `position` that hold `kind`,
    /// row-major.
    pub fn neighbors_of_kind(&self, position: Position, kind: CellKind) -> Vec<Position> {
        position
            .neighbors8()
            .filter(|p| self.is(*p, kind))
            .collect()
    }

    /// Drain the change log.
    pub fn take_changes(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.changes)
    }

    /// Discard the change log without reading it.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

impl core::fmt::Display for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let kind = self.kind_at(Position::new(x, y)).unwrap_or_default();
                write!(f, "{}", kind.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Map a layout character to a cell kind.
const fn kind_for_symbol(symbol: char) -> Option<CellKind> {
    match symbol {
        'E' | '.' => Some(CellKind::Empty),
        'C' => Some(CellKind::Cow),
        'W' => Some(CellKind::Wolf),
        'F' => Some(CellKind::Flag),
        'S' => Some(CellKind::Stable),
        'P' => Some(CellKind::Player),
        _ => None,
    }
}
