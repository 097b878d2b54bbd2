//! Connected-component labeling of sentinel-valued cells
//!
//! Every cell holding the `unassigned` sentinel ends up in exactly one maximal
//! 4-connected component with its own sequential positive label. Components
//! below the size threshold are treated as noise and overwritten with the
//! `rejected` sentinel.
//!
//! Each engine run grows a single component. The seeding scan resumes from
//! where the previous run found its seed and the cell states persist between
//! runs, so labeling all components costs one pass over the grid plus the
//! growth itself.

use log::debug;
use num_traits::NumCast;

use crate::growing::engine::{Frontier, GrowingEngine, GrowthStrategy};
use crate::io::configuration::{DEFAULT_REJECTED, DEFAULT_SIZE_THRESHOLD, DEFAULT_UNASSIGNED};
use crate::io::error::{GrowError, Result, invalid_parameter};
use crate::spatial::cell::{CellState, Neighborhood, Position};
use crate::spatial::grid::{CellGrid, Label, LabelGrid, ScanCursor, label_at, set_label};
use crate::spatial::groups::{Groups, add_to_group, member_count};

/// Parameters of connected-component labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelerConfig<L> {
    /// Value marking cells that still need a component label
    pub unassigned: L,
    /// Value written over components smaller than the threshold
    pub rejected: L,
    /// Components with fewer cells are rejected
    pub threshold: usize,
}

impl<L: Label> Default for LabelerConfig<L> {
    fn default() -> Self {
        Self {
            unassigned: <L as NumCast>::from(DEFAULT_UNASSIGNED).unwrap_or_else(L::zero),
            rejected: <L as NumCast>::from(DEFAULT_REJECTED).unwrap_or_else(|| -L::one()),
            threshold: DEFAULT_SIZE_THRESHOLD,
        }
    }
}

/// Summary of a labeling pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling<L> {
    /// Total waves grown over all components
    pub steps: usize,
    /// Components found, rejected ones included
    pub components: usize,
    /// Components overwritten with the rejected sentinel
    pub rejected: usize,
    /// Members of every label in the grid, including cells that were never
    /// unassigned (bucketed under their own value)
    pub groups: Groups<L>,
}

/// Labels maximal 4-connected blobs of sentinel cells
#[derive(Debug, Clone)]
pub struct ConnectedComponentLabeler<L> {
    config: LabelerConfig<L>,
    engine: GrowingEngine<L>,
}

impl<L: Label> ConnectedComponentLabeler<L> {
    /// Create a labeler with fresh cell states
    pub fn new(config: LabelerConfig<L>) -> Self {
        Self {
            config,
            engine: GrowingEngine::new(Neighborhood::FourConnected),
        }
    }

    /// Labeling parameters
    pub const fn config(&self) -> &LabelerConfig<L> {
        &self.config
    }

    /// Cell states left by the last pass
    pub const fn cells(&self) -> &CellGrid {
        self.engine.cells()
    }

    /// Label every unassigned cell of `grid` in place
    ///
    /// New labels continue after the largest positive label already in the
    /// grid. A grid without unassigned cells is left untouched and reports
    /// zero steps.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the rejected and unassigned
    /// sentinels are equal, since rejected components would be labeled again
    /// by the next pass. Returns an error if the next label does not fit `L`,
    /// or if cell states carried from an earlier pass cover a grid of a
    /// different shape
    pub fn label(&mut self, grid: &mut LabelGrid<L>) -> Result<Labeling<L>> {
        if self.config.rejected == self.config.unassigned {
            return Err(invalid_parameter(
                "rejected",
                &self.config.rejected,
                &"must differ from the unassigned sentinel",
            ));
        }

        // States from an earlier pass over another grid are not reusable
        if self.engine.cells().dim() != grid.dim() {
            self.engine.take_cells();
        }

        let unassigned = self.config.unassigned;
        let first_label = grid
            .iter()
            .copied()
            .filter(|&value| value > L::zero() && value != unassigned)
            .max()
            .unwrap_or_else(L::zero)
            .to_usize()
            .map_or(1, |largest| largest + 1);

        let mut pass = LabelerPass::new(self.config, first_label);
        let mut steps = 0;

        loop {
            let grown = self.engine.run(grid, &mut pass)?;
            if grown == 0 {
                break;
            }
            steps += grown;
            pass.advance();
        }

        let groups = self.engine.take_groups();
        debug!(
            "labeled {} components ({} rejected) over {} cells in {steps} waves",
            pass.components,
            pass.rejected,
            member_count(&groups)
        );

        Ok(Labeling {
            steps,
            components: pass.components,
            rejected: pass.rejected,
            groups,
        })
    }
}

/// Growth hooks for one labeling pass
struct LabelerPass<L> {
    config: LabelerConfig<L>,
    cursor: ScanCursor,
    initialized: bool,
    next_label: usize,
    last_rejected: bool,
    components: usize,
    rejected: usize,
}

impl<L: Label> LabelerPass<L> {
    const fn new(config: LabelerConfig<L>, first_label: usize) -> Self {
        Self {
            config,
            cursor: ScanCursor::new(),
            initialized: false,
            next_label: first_label,
            last_rejected: false,
            components: 0,
            rejected: 0,
        }
    }

    /// Count the grown component and free its label again if it was rejected
    const fn advance(&mut self) {
        if !self.last_rejected {
            self.next_label += 1;
        }
        self.components += 1;
    }

    /// Sentinel cells become `Unseen`; every other cell is closed and grouped
    /// under its current value
    fn initialize(&self, grid: &LabelGrid<L>, cells: &mut CellGrid, groups: &mut Groups<L>) {
        let unassigned = self.config.unassigned;
        cells.reset_with(|position| {
            if label_at(grid, position) == Some(unassigned) {
                CellState::Unseen
            } else {
                CellState::Closed
            }
        });

        for ((row, col), &value) in grid.indexed_iter() {
            if value != unassigned {
                add_to_group(groups, value, Position::new(row, col));
            }
        }
    }
}

impl<L: Label> GrowthStrategy<L> for LabelerPass<L> {
    const NAME: &'static str = "ConnectedComponentLabeler";

    fn seed(
        &mut self,
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<Frontier> {
        if !self.initialized {
            self.initialize(grid, cells, groups);
            self.initialized = true;
        }

        let (rows, cols) = grid.dim();
        let unassigned = self.config.unassigned;
        let Some(seed) = self.cursor.find_next(rows, cols, |position| {
            cells.is_unseen(position) && label_at(grid, position) == Some(unassigned)
        }) else {
            return Ok(Frontier::new());
        };

        let label = <L as NumCast>::from(self.next_label).ok_or(GrowError::LabelOverflow {
            count: self.next_label,
        })?;
        cells.open(seed);
        set_label(grid, seed, label);
        Ok(Frontier::from([seed]))
    }

    fn post_process(
        &mut self,
        processed: &[Position],
        grid: &mut LabelGrid<L>,
        _cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<()> {
        let Some(&seed) = processed.first() else {
            return Ok(());
        };

        self.last_rejected = processed.len() < self.config.threshold;
        let label = if self.last_rejected {
            self.rejected += 1;
            for &position in processed {
                set_label(grid, position, self.config.rejected);
            }
            self.config.rejected
        } else {
            label_at(grid, seed).unwrap_or(self.config.rejected)
        };

        groups
            .entry(label)
            .or_default()
            .extend_from_slice(processed);
        Ok(())
    }
}
