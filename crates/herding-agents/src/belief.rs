//! Belief and visit bookkeeping.
//!
//! A [`BeliefMap`] is a sparse map from cell to accumulated score. Scores
//! only ever grow: there is no decay and no reset for the lifetime of a
//! game, so early observations keep their weight forever. Scores are
//! [`Decimal`] so that equal evidence compares equal regardless of the
//! order in which it was added.

use std::collections::BTreeMap;

use herding_types::Position;
use rand::Rng;
use rust_decimal::Decimal;

/// Accumulated evidence that some entity sits at (or near) each cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeliefMap {
    /// Score per cell. Cells never observed are absent (score zero).
    scores: BTreeMap<Position, Decimal>,
}

impl BeliefMap {
    /// Create an empty belief map.
    pub const fn new() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }

    /// The score at `position`, zero if never touched.
    pub fn score(&self, position: Position) -> Decimal {
        self.scores.get(&position).copied().unwrap_or(Decimal::ZERO)
    }

    /// Add `amount` to the score at `position`. Saturates at
    /// [`Decimal::MAX`].
    pub fn add(&mut self, position: Position, amount: Decimal) {
        let entry = self.scores.entry(position).or_insert(Decimal::ZERO);
        *entry = entry.checked_add(amount).unwrap_or(Decimal::MAX);
    }

    /// Share one unit of evidence evenly across `cells`.
    ///
    /// Each cell gains `1 / cells.len()`. Does nothing when `cells` is
    /// empty.
    pub fn spread(&mut self, cells: &[Position]) {
        let Some(share) = u32::try_from(cells.len())
            .ok()
            .filter(|k| *k > 0)
            .and_then(|k| Decimal::ONE.checked_div(Decimal::from(k)))
        else {
            return;
        };
        for &cell in cells {
            self.add(cell, share);
        }
    }

    /// The highest positive score, if any cell has one.
    pub fn max_score(&self) -> Option<Decimal> {
        self.scores
            .values()
            .copied()
            .filter(|s| *s > Decimal::ZERO)
            .max()
    }

    /// The cell with the highest positive score within a `width x height`
    /// board, scanning row-major. Ties are broken uniformly at random.
    pub fn strongest(&self, width: i32, height: i32, rng: &mut impl Rng) -> Option<Position> {
        let mut best = Decimal::ZERO;
        let mut choices: Vec<Position> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let position = Position::new(x, y);
                let score = self.score(position);
                if score <= Decimal::ZERO {
                    continue;
                }
                if score > best {
                    best = score;
                    choices.clear();
                    choices.push(position);
                } else if score == best {
                    choices.push(position);
                }
            }
        }

        if choices.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..choices.len());
        choices.get(pick).copied()
    }

    /// Number of cells with a recorded score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no cell has been scored yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// How many times the agent has stood on each cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitCounter {
    visits: BTreeMap<Position, u32>,
}

impl VisitCounter {
    /// Create an empty counter.
    pub const fn new() -> Self {
        Self {
            visits: BTreeMap::new(),
        }
    }

    /// Record a visit and return the updated count.
    pub fn record(&mut self, position: Position) -> u32 {
        let count = self.visits.entry(position).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Visits recorded for `position`.
    pub fn count(&self, position: Position) -> u32 {
        self.visits.get(&position).copied().unwrap_or(0)
    }
}
