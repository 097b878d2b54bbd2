//! Discrete Voronoi tessellation by alternating-connectivity growth
//!
//! Every nonzero cell of the grid is a generator. All generators grow at once
//! and each remaining cell takes the label of the generator whose wave reaches
//! it first. Alternating 8- and 4-connected waves make the wave fronts
//! octagonal, a close discrete stand-in for Euclidean distance.

use log::debug;

use crate::growing::engine::{Frontier, GrowingEngine, GrowthStrategy};
use crate::io::error::Result;
use crate::spatial::cell::{CellState, Neighborhood, Position};
use crate::spatial::grid::{CellGrid, Label, LabelGrid, label_at};
use crate::spatial::groups::{Groups, member_count};

/// Result of a tessellation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tessellation<L> {
    /// Waves grown until every reachable cell was labeled
    pub steps: usize,
    /// Members of every generator label
    pub groups: Groups<L>,
}

/// Labels every cell with its nearest generator
#[derive(Debug, Clone)]
pub struct VoronoiTessellator<L> {
    engine: GrowingEngine<L>,
}

impl<L: Label> Default for VoronoiTessellator<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> VoronoiTessellator<L> {
    /// Create a tessellator with fresh cell states
    pub fn new() -> Self {
        Self {
            engine: GrowingEngine::new(Neighborhood::Alternating),
        }
    }

    /// Create a tessellator reusing the cell-state storage of an earlier run
    /// over the same grid
    pub fn with_cells(cells: CellGrid) -> Self {
        Self {
            engine: GrowingEngine::with_state(Neighborhood::Alternating, cells, Groups::new()),
        }
    }

    /// Cell states left by the last tessellation
    pub const fn cells(&self) -> &CellGrid {
        self.engine.cells()
    }

    /// Release the cell-state storage
    pub fn into_cells(self) -> CellGrid {
        self.engine.into_parts().0
    }

    /// Grow every generator of `grid` until all reachable cells are labeled
    ///
    /// A grid without generators is left unchanged and yields zero steps and
    /// no groups.
    ///
    /// # Errors
    ///
    /// Returns an error if carried cell states cover a grid of a different
    /// shape
    pub fn tessellate(&mut self, grid: &mut LabelGrid<L>) -> Result<Tessellation<L>> {
        let mut pass = VoronoiPass;
        let steps = self.engine.run(grid, &mut pass)?;
        let groups = self.engine.take_groups();
        debug!(
            "tessellated {} cells into {} regions over {steps} waves",
            member_count(&groups),
            groups.len()
        );
        Ok(Tessellation { steps, groups })
    }
}

/// Growth hooks for one tessellation
struct VoronoiPass;

impl<L: Label> GrowthStrategy<L> for VoronoiPass {
    const NAME: &'static str = "VoronoiTessellator";

    fn seed(
        &mut self,
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        _groups: &mut Groups<L>,
    ) -> Result<Frontier> {
        let mut frontier = Frontier::new();
        cells.reset_with(|position: Position| {
            if label_at(grid, position).is_some_and(|label| !label.is_zero()) {
                frontier.insert(position);
                CellState::Opened
            } else {
                CellState::Unseen
            }
        });
        Ok(frontier)
    }
}
