//! Multi-source wavefront label propagation
//!
//! The engine owns the cell-state grid and the groups of the domain it works
//! on. A [`GrowthStrategy`] decides where growth starts, which neighbors a
//! wave may claim and what happens to the processed cells once growth stops.
//!
//! Each wave is resolved in two phases. First every frontier cell, in
//! lexicographic order, records a claim on each neighbor passing the growth
//! condition. Then every claimed cell takes the lowest label that claimed it,
//! is opened and joins the next frontier, while the old frontier is closed.
//! The result therefore never depends on which frontier cell happened to be
//! visited first.

use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

use crate::io::error::{GrowError, Result};
use crate::spatial::cell::{Connectivity, Neighborhood, Position};
use crate::spatial::grid::{CellGrid, Label, LabelGrid, label_at, set_label};
use crate::spatial::groups::{Groups, bucket_by_label};

/// Ordered set of cells active in the current wave
pub type Frontier = BTreeSet<Position>;

/// Hooks specializing the engine for one kind of growth
pub trait GrowthStrategy<L: Label> {
    /// Name used in logs and errors
    const NAME: &'static str;

    /// Whether the engine may allocate fresh cell states for this strategy
    ///
    /// Strategies that only make sense on top of the states left by a previous
    /// run return `false`; running them without carried states is an error.
    fn supports_reset(&self) -> bool {
        true
    }

    /// Open the initial cells, label them and return them as the first frontier
    ///
    /// An empty frontier means there is nothing to grow and the run performs
    /// zero waves.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding violates a precondition of the strategy
    fn seed(
        &mut self,
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<Frontier>;

    /// Whether `from` may pass its label on to the neighbor `to`
    fn grow_condition(
        &self,
        _grid: &LabelGrid<L>,
        cells: &CellGrid,
        _from: Position,
        to: Position,
    ) -> bool {
        cells.is_unseen(to)
    }

    /// Finish a run once the frontier is exhausted
    ///
    /// `processed` lists every cell closed during the run in closing order.
    /// The default buckets each of them by its final label.
    ///
    /// # Errors
    ///
    /// Returns an error if the processed cells violate a precondition of the
    /// strategy
    fn post_process(
        &mut self,
        processed: &[Position],
        grid: &mut LabelGrid<L>,
        _cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<()> {
        bucket_by_label(groups, processed, grid);
        Ok(())
    }
}

/// Generic wavefront region-growing engine
#[derive(Debug, Clone)]
pub struct GrowingEngine<L> {
    neighborhood: Neighborhood,
    cells: CellGrid,
    groups: Groups<L>,
}

impl<L: Label> GrowingEngine<L> {
    /// Create an engine without carried cell states or groups
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self::with_state(neighborhood, CellGrid::default(), Groups::new())
    }

    /// Create an engine continuing from the states and groups of a previous run
    pub const fn with_state(
        neighborhood: Neighborhood,
        cells: CellGrid,
        groups: Groups<L>,
    ) -> Self {
        Self {
            neighborhood,
            cells,
            groups,
        }
    }

    /// Neighborhood mode used by every run
    pub const fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Cell states left by the last run
    pub const fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Groups accumulated so far
    pub const fn groups(&self) -> &Groups<L> {
        &self.groups
    }

    /// Move the accumulated groups out, leaving the engine with none
    pub fn take_groups(&mut self) -> Groups<L> {
        std::mem::take(&mut self.groups)
    }

    /// Move the cell states out, leaving the engine without carried states
    pub fn take_cells(&mut self) -> CellGrid {
        std::mem::take(&mut self.cells)
    }

    /// Split the engine into its cell states and groups
    pub fn into_parts(self) -> (CellGrid, Groups<L>) {
        (self.cells, self.groups)
    }

    /// Grow labels over `grid` until no wave can claim another cell
    ///
    /// Groups produced by the strategy's post-processing are added to the ones
    /// the engine already holds. Returns the number of waves grown.
    ///
    /// # Errors
    ///
    /// Returns an error if carried cell states do not match the grid, if the
    /// strategy needs carried states but none exist, or if one of the
    /// strategy's hooks fails
    pub fn run<S>(&mut self, grid: &mut LabelGrid<L>, strategy: &mut S) -> Result<usize>
    where
        S: GrowthStrategy<L>,
    {
        self.prepare_cells(grid.dim(), strategy)?;

        let mut frontier = strategy.seed(grid, &mut self.cells, &mut self.groups)?;
        let mut connectivity = self.neighborhood.initial_connectivity();
        let mut processed = Vec::new();
        let mut steps = 0;

        while !frontier.is_empty() {
            trace!(
                "{} wave {}: {} frontier cells, {:?}-connected",
                S::NAME,
                steps + 1,
                frontier.len(),
                connectivity
            );
            frontier = self.grow_wave(grid, &*strategy, &frontier, connectivity, &mut processed);
            connectivity = self.neighborhood.next_connectivity(connectivity);
            steps += 1;
        }

        strategy.post_process(&processed, grid, &mut self.cells, &mut self.groups)?;

        if steps > 0 {
            debug!(
                "{} closed {} cells in {steps} waves",
                S::NAME,
                processed.len()
            );
        }
        Ok(steps)
    }

    fn prepare_cells<S>(&mut self, shape: (usize, usize), strategy: &S) -> Result<()>
    where
        S: GrowthStrategy<L>,
    {
        if self.cells.dim() == shape {
            return Ok(());
        }

        if !self.cells.is_empty() {
            return Err(GrowError::ShapeMismatch {
                expected: self.cells.dim(),
                found: shape,
            });
        }

        if !strategy.supports_reset() {
            return Err(GrowError::UnsupportedReset {
                component: S::NAME,
            });
        }

        self.cells = CellGrid::new(shape.0, shape.1);
        Ok(())
    }

    /// Expand the frontier by one wave and return the next frontier
    fn grow_wave<S>(
        &mut self,
        grid: &mut LabelGrid<L>,
        strategy: &S,
        frontier: &Frontier,
        connectivity: Connectivity,
        processed: &mut Vec<Position>,
    ) -> Frontier
    where
        S: GrowthStrategy<L>,
    {
        let (rows, cols) = grid.dim();

        // Lowest claiming label wins a contested cell
        let mut claims: BTreeMap<Position, L> = BTreeMap::new();
        for &cell in frontier {
            let Some(label) = label_at(grid, cell) else {
                continue;
            };
            for neighbor in cell.neighbors(connectivity, rows, cols) {
                if strategy.grow_condition(grid, &self.cells, cell, neighbor) {
                    claims
                        .entry(neighbor)
                        .and_modify(|claimed| *claimed = (*claimed).min(label))
                        .or_insert(label);
                }
            }
        }

        for &cell in frontier {
            self.cells.close(cell);
            processed.push(cell);
        }

        let mut next = Frontier::new();
        for (position, label) in claims {
            if self.cells.open(position) {
                set_label(grid, position, label);
                next.insert(position);
            }
        }
        next
    }
}
