//! Region growing components
//!
//! This module contains the wavefront engine and everything built on it:
//! - The generic engine and its strategy hooks
//! - Connected-component labeling
//! - Region separation with border regrow
//! - Voronoi tessellation and generator construction
//! - The separation-to-tessellation pipeline

/// Wavefront propagation core
pub mod engine;
/// Generator rasterization at region centroids
pub mod generators;
/// Connected-component labeling of sentinel cells
pub mod labeler;
/// Reabsorption of rejected regions
pub mod regrow;
/// Same-value region separation
pub mod separator;
/// Discrete Voronoi tessellation
pub mod voronoi;
/// Separation followed by tessellation
pub mod voronizer;

pub use engine::{Frontier, GrowingEngine, GrowthStrategy};
pub use labeler::{ConnectedComponentLabeler, LabelerConfig, Labeling};
pub use separator::{RegionSeparator, Separation, SeparatorConfig};
pub use voronoi::{Tessellation, VoronoiTessellator};
pub use voronizer::{GeneratorMode, Voronization, Voronizer, VoronizerConfig};
