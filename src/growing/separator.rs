//! Spatial segmentation of equal-valued regions
//!
//! The separator splits a grid into maximal 4-connected regions of identical
//! raw value. Two regions sharing a value but not touching each other get
//! distinct labels. Regions smaller than the size threshold are dropped, their
//! area is handed to the neighboring surviving regions by a border regrow
//! pass, and the surviving labels are finally renumbered densely.
//!
//! Before growing, raw values are normalized so that background becomes 0 and
//! everything else becomes negative. Positive sequential labels can then be
//! written without colliding with any value still waiting to be segmented.

use log::debug;
use num_traits::NumCast;

use crate::growing::engine::{Frontier, GrowingEngine, GrowthStrategy};
use crate::growing::regrow::BorderRegrow;
use crate::io::configuration::{DEFAULT_BACKGROUND, DEFAULT_SIZE_THRESHOLD};
use crate::io::error::{GrowError, Result};
use crate::spatial::cell::{CellState, Neighborhood, Position};
use crate::spatial::grid::{CellGrid, Label, LabelGrid, ScanCursor, label_at, set_label};
use crate::spatial::groups::{Groups, add_to_group, remap_dense};

/// Parameters of region separation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorConfig<L> {
    /// Regions with fewer cells are rejected and reabsorbed
    pub threshold: usize,
    /// Raw value that is never segmented
    pub background: L,
}

impl<L: Label> Default for SeparatorConfig<L> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIZE_THRESHOLD,
            background: <L as NumCast>::from(DEFAULT_BACKGROUND).unwrap_or_else(L::zero),
        }
    }
}

/// Result of separating a grid into regions
#[derive(Debug, Clone)]
pub struct Separation<L> {
    /// Region labels `1..=regions`, 0 for background
    pub labels: LabelGrid<L>,
    /// Members of every label, background included under 0
    pub groups: Groups<L>,
    /// Number of surviving regions
    pub regions: usize,
    /// Number of regions rejected by the size threshold
    pub rejected: usize,
    /// Waves grown while segmenting
    pub steps: usize,
    /// Waves grown while reabsorbing rejected regions
    pub regrow_steps: usize,
    /// Final cell states, reusable by a following component
    pub cells: CellGrid,
}

/// Segments a grid into spatially disjoint equal-valued regions
#[derive(Debug, Clone, Copy)]
pub struct RegionSeparator<L> {
    config: SeparatorConfig<L>,
}

impl<L: Label> RegionSeparator<L> {
    /// Create a separator
    pub const fn new(config: SeparatorConfig<L>) -> Self {
        Self { config }
    }

    /// Separation parameters
    pub const fn config(&self) -> &SeparatorConfig<L> {
        &self.config
    }

    /// Segment `input` without modifying it
    ///
    /// # Errors
    ///
    /// Returns an error if the number of regions exceeds what `L` can label
    pub fn separate(&self, input: &LabelGrid<L>) -> Result<Separation<L>> {
        let mut labels = normalize(input, self.config.background);
        let mut engine = GrowingEngine::new(Neighborhood::FourConnected);
        let mut pass = SeparatorPass::new(input, self.config.threshold);
        let mut steps = 0;

        loop {
            let grown = engine.run(&mut labels, &mut pass)?;
            if grown == 0 {
                break;
            }
            steps += grown;
            pass.advance();
        }

        let (cells, groups) = engine.into_parts();
        let (cells, mut groups, regrow_steps) = if pass.rejected_cells.is_empty() {
            (cells, groups, 0)
        } else {
            let mut regrow = BorderRegrow::new(cells, groups);
            let regrow_steps = regrow.run(&mut labels, &pass.rejected_cells)?;
            let (cells, groups) = regrow.into_parts();
            (cells, groups, regrow_steps)
        };

        let regions = remap_dense(&mut groups, &mut labels)?;
        debug!(
            "separated {regions} regions, rejected {} ({} cells), {steps} + {regrow_steps} waves",
            pass.rejected_regions,
            pass.rejected_cells.len()
        );

        Ok(Separation {
            labels,
            groups,
            regions,
            rejected: pass.rejected_regions,
            steps,
            regrow_steps,
            cells,
        })
    }
}

/// Map background to 0 and every other value to -1
pub fn normalize<L: Label>(input: &LabelGrid<L>, background: L) -> LabelGrid<L> {
    input.mapv(|value| {
        if value == background {
            L::zero()
        } else {
            -L::one()
        }
    })
}

/// Growth hooks for one separation
struct SeparatorPass<'a, L> {
    input: &'a LabelGrid<L>,
    threshold: usize,
    cursor: ScanCursor,
    initialized: bool,
    next_label: usize,
    last_rejected: bool,
    rejected_regions: usize,
    rejected_cells: Vec<Position>,
}

impl<'a, L: Label> SeparatorPass<'a, L> {
    const fn new(input: &'a LabelGrid<L>, threshold: usize) -> Self {
        Self {
            input,
            threshold,
            cursor: ScanCursor::new(),
            initialized: false,
            next_label: 1,
            last_rejected: false,
            rejected_regions: 0,
            rejected_cells: Vec::new(),
        }
    }

    /// Move to the next label unless the last region was rejected, whose
    /// label is free again
    const fn advance(&mut self) {
        if !self.last_rejected {
            self.next_label += 1;
        }
    }

    /// Negative cells become `Unseen`; background cells are closed into group 0
    fn initialize(grid: &LabelGrid<L>, cells: &mut CellGrid, groups: &mut Groups<L>) {
        cells.reset_with(|position| match label_at(grid, position) {
            Some(value) if value < L::zero() => CellState::Unseen,
            _ => CellState::Closed,
        });

        for ((row, col), value) in grid.indexed_iter() {
            if value.is_zero() {
                add_to_group(groups, L::zero(), Position::new(row, col));
            }
        }
    }
}

impl<L: Label> GrowthStrategy<L> for SeparatorPass<'_, L> {
    const NAME: &'static str = "RegionSeparator";

    fn seed(
        &mut self,
        grid: &mut LabelGrid<L>,
        cells: &mut CellGrid,
        groups: &mut Groups<L>,
    ) -> Result<Frontier> {
        if !self.initialized {
            Self::initialize(grid, cells, groups);
            self.initialized = true;
        }

        let (rows, cols) = grid.dim();
        let Some(seed) = self.cursor.find_next(rows, cols, |position| {
            cells.is_unseen(position)
                && label_at(grid, position).is_some_and(|value| value < L::zero())
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

    fn grow_condition(
        &self,
        _grid: &LabelGrid<L>,
        cells: &CellGrid,
        from: Position,
        to: Position,
    ) -> bool {
        // Compare raw input values; the working grid has lost them
        cells.is_unseen(to) && label_at(self.input, from) == label_at(self.input, to)
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

        self.last_rejected = processed.len() < self.threshold;
        if self.last_rejected {
            for &position in processed {
                set_label(grid, position, L::zero());
            }
            groups
                .entry(L::zero())
                .or_default()
                .extend_from_slice(processed);
            self.rejected_cells.extend_from_slice(processed);
            self.rejected_regions += 1;
        } else if let Some(label) = label_at(grid, seed) {
            groups.entry(label).or_default().extend_from_slice(processed);
        }
        Ok(())
    }
}
