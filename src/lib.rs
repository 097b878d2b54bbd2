//! Wavefront region growing on integer label grids
//!
//! A single deterministic engine grows labels outward from seed cells, one
//! wave at a time, and is specialized into connected-component labeling,
//! same-value region separation with hole filling, and discrete Voronoi
//! tessellation. Together they form the geometric core of a pipeline that
//! turns a quantized image into a stylized mosaic of regions.

#![forbid(unsafe_code)]

/// Growing engine and its specializations
pub mod growing;
/// Error handling and configuration defaults
pub mod io;
/// Positions, cell states, label grids and groups
pub mod spatial;

pub use growing::engine::{GrowingEngine, GrowthStrategy};
pub use io::error::{GrowError, Result};
pub use spatial::grid::{CellGrid, Label, LabelGrid};
pub use spatial::groups::Groups;
