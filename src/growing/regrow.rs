//! Reabsorption of rejected regions into their surviving neighbors
//!
//! After size rejection the separator leaves holes labeled 0. The regrow pass
//! reopens exactly those cells and grows every surviving region into them from
//! its border, so each hole cell ends up in the surviving region whose wave
//! reaches it first. Contested cells go to the lowest label. Holes that touch
//! no surviving region stay background.
//!
//! The pass works on the cell states and groups the separator left behind and
//! refuses to run without them.

use bitvec::prelude::*;
use log::debug;

use crate::growing::engine::{Frontier, GrowingEngine, GrowthStrategy};
use crate::io::error::Result;
use crate::spatial::cell::{CellState, Connectivity, Neighborhood, Position};
use crate::spatial::grid::{CellGrid, Label, LabelGrid, label_at};
use crate::spatial::groups::{Groups, add_to_group};

/// Regrows surviving regions over the area of rejected ones
#[derive(Debug, Clone)]
pub struct BorderRegrow<L> {
    engine: GrowingEngine<L>,
}

impl<L: Label> BorderRegrow<L> {
    /// Continue from the cell states and groups of a separation
    pub const fn new(cells: CellGrid, groups: Groups<L>) -> Self {
        Self {
            engine: GrowingEngine::with_state(Neighborhood::FourConnected, cells, groups),
        }
    }

    /// Reabsorb the `rejected` cells of `grid` and return the waves grown
    ///
    /// Rejected cells must currently be labeled 0 and listed in group 0.
    /// Absorbed cells move from group 0 to the group of their new label.
    ///
    /// # Errors
    ///
    /// Returns an error if no cell states were carried over or if they cover a
    /// grid of a different shape
    pub fn run(&mut self, grid: &mut LabelGrid<L>, rejected: &[Position]) -> Result<usize> {
        let (rows, cols) = grid.dim();
        let mut mask = bitvec![0; rows * cols];
        for position in rejected {
            if position.row < rows && position.col < cols {
                mask.set(position.flat(cols), true);
            }
        }

        let mut pass = RegrowPass {
            rejected: mask,
            rows,
            cols,
            absorbed: 0,
        };
        let steps = self.engine.run(grid, &mut pass)?;
        debug!(
            "regrow absorbed {} of {} rejected cells in {steps} waves",
            pass.absorbed,
            rejected.len()
        );
        Ok(steps)
    }

    /// Split into the final cell states and groups
    pub fn into_parts(self) -> (CellGrid, Groups<L>) {
        self.engine.into_parts()
    }
}

/// Growth hooks for one regrow pass
struct RegrowPass {
    rejected: BitVec,
    rows: usize,
    cols: usize,
    absorbed: usize,
}

impl RegrowPass {
    fn is_rejected(&self, position: Position) -> bool {
        position.row < self.rows
            && position.col < self.cols
            && self
                .rejected
                .get(position.flat(self.cols))
                .is_some_and(|bit| *bit)
    }

    const fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.cols, index % self.cols)
    }
}

impl<L: Label> GrowthStrategy<L> for RegrowPass {
    const NAME: &'static str = "BorderRegrow";

    fn supports_reset(&self) -> bool {
        false
    }

    fn seed(
        &mut self,
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        _groups: &mut Groups<L>,
    ) -> Result<Frontier> {
        // Surviving cells bordering a hole start the growth
        let mut frontier = Frontier::new();
        for index in self.rejected.iter_ones() {
            let hole = self.position_of(index);
            for neighbor in hole.neighbors(Connectivity::Four, self.rows, self.cols) {
                let surviving = label_at(grid, neighbor).is_some_and(|label| !label.is_zero());
                if surviving && !self.is_rejected(neighbor) {
                    frontier.insert(neighbor);
                }
            }
        }

        cells.reset_with(|position| {
            if self.is_rejected(position) {
                CellState::Unseen
            } else if frontier.contains(&position) {
                CellState::Opened
            } else {
                CellState::Closed
            }
        });
        Ok(frontier)
    }

    fn post_process(
        &mut self,
        processed: &[Position],
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<()> {
        let mut absorbed = bitvec![0; self.rows * self.cols];
        for &position in processed {
            if !self.is_rejected(position) {
                continue;
            }
            if let Some(label) = label_at(grid, position) {
                add_to_group(groups, label, position);
                absorbed.set(position.flat(self.cols), true);
                self.absorbed += 1;
            }
        }

        if let Some(background) = groups.get_mut(&L::zero()) {
            background.retain(|position| {
                !absorbed
                    .get(position.flat(self.cols))
                    .is_some_and(|bit| *bit)
            });
            if background.is_empty() {
                groups.remove(&L::zero());
            }
        }

        // Holes out of reach of every surviving region stay background
        for index in self.rejected.iter_ones() {
            let hole = self.position_of(index);
            if cells.open(hole) {
                cells.close(hole);
            }
        }
        Ok(())
    }
}
