//! Spatial data structures shared by every growth run
//!
//! This module contains:
//! - Positions, cell states and neighborhoods
//! - Label grids and the cell-state grid
//! - Label groups and dense renumbering

/// Positions, cell states and neighbor enumeration
pub mod cell;
/// Label grids and cell-state grids
pub mod grid;
/// Label to member position mappings
pub mod groups;

pub use cell::{CellState, Connectivity, Neighborhood, Position};
pub use grid::{CellGrid, Label, LabelGrid};
