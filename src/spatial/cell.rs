//! Grid positions, per-cell growth states and neighborhood enumeration
//!
//! Positions are plain `(row, col)` index pairs. Their derived ordering is
//! lexicographic by row then column, which fixes the iteration order of every
//! frontier and therefore the outcome of every growth run.

use std::fmt;

/// Grid coordinates of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index (0 = top)
    pub row: usize,
    /// Column index (0 = left)
    pub col: usize,
}

impl Position {
    /// Create a position from row and column indices
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index pair usable with `ndarray` element access
    pub const fn index(self) -> [usize; 2] {
        [self.row, self.col]
    }

    /// Row-major flat index for a grid with `cols` columns
    pub const fn flat(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Neighbors of this position under the given connectivity
    ///
    /// Offsets falling outside a `rows` x `cols` grid are dropped; there is
    /// no wraparound. Neighbors are yielded in lexicographic order.
    pub fn neighbors(self, connectivity: Connectivity, rows: usize, cols: usize) -> Vec<Self> {
        let offsets: &[(isize, isize)] = match connectivity {
            Connectivity::Four => &FOUR_OFFSETS,
            Connectivity::Eight => &EIGHT_OFFSETS,
        };

        offsets
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = self.row.checked_add_signed(dr)?;
                let col = self.col.checked_add_signed(dc)?;
                (row < rows && col < cols).then_some(Self::new(row, col))
            })
            .collect()
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Ordered so that the resulting neighbor lists are already lexicographic
const FOUR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const EIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Growth state of a cell
///
/// A run only ever moves a cell forward: `Unseen` to `Opened` when a wave
/// claims it, `Opened` to `Closed` once it has expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Not yet reached by any wave
    #[default]
    Unseen,
    /// Labeled and waiting in the frontier
    Opened,
    /// Fully processed, label final
    Closed,
}

/// Adjacency used for a single wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge-sharing neighbors only
    Four,
    /// Edge- and corner-sharing neighbors
    Eight,
}

impl Connectivity {
    /// The other connectivity
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Four => Self::Eight,
            Self::Eight => Self::Four,
        }
    }
}

/// Neighborhood mode of a growing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Every wave is 4-connected (diamond-shaped growth)
    FourConnected,
    /// Every wave is 8-connected (square-shaped growth)
    EightConnected,
    /// Waves alternate between 8- and 4-connectivity, starting with 8
    ///
    /// Approximates circular growth far better than either fixed mode.
    Alternating,
}

impl Neighborhood {
    /// Connectivity of the first wave
    pub const fn initial_connectivity(self) -> Connectivity {
        match self {
            Self::FourConnected => Connectivity::Four,
            Self::EightConnected | Self::Alternating => Connectivity::Eight,
        }
    }

    /// Connectivity of the wave following one grown with `current`
    pub const fn next_connectivity(self, current: Connectivity) -> Connectivity {
        match self {
            Self::Alternating => current.flipped(),
            Self::FourConnected | Self::EightConnected => current,
        }
    }
}
