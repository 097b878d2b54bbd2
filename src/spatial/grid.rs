//! Label grids and the cell-state grid shared between successive growth runs
//!
//! The label grid is a plain `ndarray::Array2` of signed integers owned by the
//! caller. The cell-state grid runs parallel to it and is owned by whichever
//! component drives the engine, so that a later run over the same domain can
//! reuse its storage and resume from the states an earlier run left behind.

use ndarray::Array2;
use num_traits::{PrimInt, Signed};
use std::fmt;

use crate::spatial::cell::{CellState, Position};

/// Integer type usable as a grid label
///
/// Any primitive signed integer qualifies. Labels must be signed because
/// normalization and sentinel handling rely on negative values.
pub trait Label: PrimInt + Signed + fmt::Debug + fmt::Display {}

impl<T> Label for T where T: PrimInt + Signed + fmt::Debug + fmt::Display {}

/// Mutable grid of labels, indexed `[row, col]`
pub type LabelGrid<L> = Array2<L>;

/// Per-cell growth states for one spatial domain
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    states: Array2<CellState>,
}

impl CellGrid {
    /// Create a grid with every cell `Unseen`
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            states: Array2::from_elem((rows, cols), CellState::Unseen),
        }
    }

    /// Grid dimensions as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.states.dim()
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.states.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.states.ncols()
    }

    /// Check whether no storage has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State at a position, `None` when out of bounds
    pub fn state(&self, position: Position) -> Option<CellState> {
        self.states.get(position.index()).copied()
    }

    /// Check whether a cell has not been reached yet
    pub fn is_unseen(&self, position: Position) -> bool {
        self.state(position) == Some(CellState::Unseen)
    }

    /// Move an `Unseen` cell into the frontier
    ///
    /// Returns `false` and leaves the state alone if the cell was not `Unseen`.
    pub fn open(&mut self, position: Position) -> bool {
        match self.states.get_mut(position.index()) {
            Some(state) if *state == CellState::Unseen => {
                *state = CellState::Opened;
                true
            }
            _ => false,
        }
    }

    /// Mark a cell as fully processed
    pub fn close(&mut self, position: Position) {
        if let Some(state) = self.states.get_mut(position.index()) {
            *state = CellState::Closed;
        }
    }

    /// Reinitialize every state from a per-position rule
    ///
    /// Reuses the existing allocation. Only seed hooks call this, at the start
    /// of a top-level operation.
    pub fn reset_with<F>(&mut self, mut initial: F)
    where
        F: FnMut(Position) -> CellState,
    {
        for ((row, col), state) in self.states.indexed_iter_mut() {
            *state = initial(Position::new(row, col));
        }
    }

    /// Count cells currently in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}

/// Read a label, `None` when out of bounds
pub fn label_at<L: Label>(grid: &LabelGrid<L>, position: Position) -> Option<L> {
    grid.get(position.index()).copied()
}

/// Overwrite a label, ignoring out-of-bounds positions
pub fn set_label<L: Label>(grid: &mut LabelGrid<L>, position: Position, label: L) {
    if let Some(value) = grid.get_mut(position.index()) {
        *value = label;
    }
}

/// Row-major scan cursor that resumes where the previous search stopped
///
/// Successive searches never revisit cells before the last hit, which keeps
/// repeated seeding linear in the grid size overall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    next: usize,
}

impl ScanCursor {
    /// Cursor positioned at the origin
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Find the next position at or after the cursor satisfying `predicate`
    ///
    /// On a hit the cursor moves just past the returned position; when the
    /// scan is exhausted the cursor stays at the end of the grid.
    pub fn find_next<F>(&mut self, rows: usize, cols: usize, mut predicate: F) -> Option<Position>
    where
        F: FnMut(Position) -> bool,
    {
        if cols == 0 {
            return None;
        }

        let total = rows * cols;
        while self.next < total {
            let position = Position::new(self.next / cols, self.next % cols);
            self.next += 1;
            if predicate(position) {
                return Some(position);
            }
        }
        None
    }
}
