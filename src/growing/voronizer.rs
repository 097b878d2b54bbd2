//! Region separation followed by Voronoi tessellation
//!
//! The pipeline turns a quantized grid into a tessellated one. Equal-valued
//! regions are separated first, then either the regions themselves or shapes
//! drawn at their centroids (disks, rings or segments joining nearby
//! centroids) serve as generators, and finally every cell is grown over by its
//! nearest generator. The cell-state storage of the separation is handed on
//! to the tessellation.

use log::debug;
use num_traits::NumCast;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::growing::generators::{centroid_generators, line_generators, ring_generators};
use crate::growing::separator::{RegionSeparator, SeparatorConfig};
use crate::growing::voronoi::VoronoiTessellator;
use crate::io::configuration::{
    DEFAULT_GENERATOR_RADIUS, DEFAULT_LINE_CANDIDATES, DEFAULT_LINE_SEED, DEFAULT_UNPAIRED_POINTS,
    FILLED_THICKNESS, ensure_field_count, parse_field, split_args,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Label, LabelGrid};
use crate::spatial::groups::Groups;

/// How generators are derived from the separated regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    /// Every surviving region is its own generator
    Regions,
    /// Each region contributes a disk around its centroid
    Centroids {
        /// Disk radius in cells, 0 for a single cell
        radius: usize,
    },
    /// Each region contributes a ring around its centroid
    Rings {
        /// Ring radius in cells
        radius: usize,
        /// Ring width in cells
        thickness: usize,
    },
    /// Centroids are paired into segments with a close partner
    Lines {
        /// Partners examined per segment
        candidates: usize,
        /// Seed of the pairing shuffle
        seed: u64,
    },
}

impl GeneratorMode {
    /// Name accepted by [`VoronizerConfig::from_args`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Centroids { .. } | Self::Rings { .. } => "centroids",
            Self::Lines { .. } => "lines",
        }
    }
}

/// Parameters of the full pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoronizerConfig<L> {
    /// Separation parameters
    pub separator: SeparatorConfig<L>,
    /// Generator construction
    pub generators: GeneratorMode,
}

impl<L: Label> Default for VoronizerConfig<L> {
    fn default() -> Self {
        Self {
            separator: SeparatorConfig::default(),
            generators: GeneratorMode::Regions,
        }
    }
}

impl<L: Label> VoronizerConfig<L> {
    /// Parse a mode name and its comma-separated arguments
    ///
    /// `regions` takes `"threshold,background"`, `centroids` takes
    /// `"threshold,background,radius,thickness"` and `lines` takes
    /// `"threshold,background,candidates,seed"`. A thickness of -1 fills the
    /// disk, a positive one draws a ring. Missing or empty fields keep their
    /// defaults, so `""` selects the default configuration of the mode.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for an unknown mode, a field that
    /// does not parse, a background that does not fit `L`, a thickness that is
    /// neither -1 nor positive, zero candidates, or surplus fields
    pub fn from_args(mode: &str, args: &str) -> Result<Self> {
        let fields = split_args(args);
        let defaults = SeparatorConfig::<L>::default();

        let max_fields = match mode {
            "regions" => 2,
            "centroids" | "lines" => 4,
            _ => {
                return Err(invalid_parameter(
                    "mode",
                    &mode,
                    &"expected 'regions', 'centroids' or 'lines'",
                ));
            }
        };
        ensure_field_count(&fields, max_fields)?;

        let threshold = parse_field(&fields, 0, "threshold", defaults.threshold)?;
        let default_background = defaults.background.to_i64().unwrap_or_default();
        let raw_background: i64 = parse_field(&fields, 1, "background", default_background)?;
        let background = <L as NumCast>::from(raw_background).ok_or_else(|| {
            invalid_parameter("background", &raw_background, &"does not fit the label type")
        })?;

        let generators = match mode {
            "centroids" => centroid_mode(&fields)?,
            "lines" => line_mode(&fields)?,
            _ => GeneratorMode::Regions,
        };

        Ok(Self {
            separator: SeparatorConfig {
                threshold,
                background,
            },
            generators,
        })
    }
}

fn centroid_mode(fields: &[&str]) -> Result<GeneratorMode> {
    let radius = parse_field(fields, 2, "radius", DEFAULT_GENERATOR_RADIUS)?;
    let thickness: i64 = parse_field(fields, 3, "thickness", FILLED_THICKNESS)?;
    if thickness == FILLED_THICKNESS {
        return Ok(GeneratorMode::Centroids { radius });
    }
    match usize::try_from(thickness) {
        Ok(thickness) if thickness > 0 => Ok(GeneratorMode::Rings { radius, thickness }),
        _ => Err(invalid_parameter(
            "thickness",
            &thickness,
            &"expected -1 for a filled disk or a positive ring width",
        )),
    }
}

fn line_mode(fields: &[&str]) -> Result<GeneratorMode> {
    let candidates = parse_field(fields, 2, "candidates", DEFAULT_LINE_CANDIDATES)?;
    if candidates == 0 {
        return Err(invalid_parameter(
            "candidates",
            &candidates,
            &"at least one partner must be examined",
        ));
    }
    let seed = parse_field(fields, 3, "seed", DEFAULT_LINE_SEED)?;
    Ok(GeneratorMode::Lines { candidates, seed })
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct Voronization<L> {
    /// Tessellated grid, each cell labeled with its generator
    pub labels: LabelGrid<L>,
    /// Members of every generator label
    pub groups: Groups<L>,
    /// Regions that survived separation
    pub regions: usize,
    /// Waves grown by separation, regrow and tessellation together
    pub steps: usize,
}

/// Separates a grid into regions and tessellates it around them
#[derive(Debug, Clone, Copy)]
pub struct Voronizer<L> {
    config: VoronizerConfig<L>,
}

impl<L: Label> Voronizer<L> {
    /// Create a pipeline
    pub const fn new(config: VoronizerConfig<L>) -> Self {
        Self { config }
    }

    /// Pipeline parameters
    pub const fn config(&self) -> &VoronizerConfig<L> {
        &self.config
    }

    /// Run separation, generator construction and tessellation on `input`
    ///
    /// # Errors
    ///
    /// Propagates errors of the separation, generator and tessellation stages
    pub fn run(&self, input: &LabelGrid<L>) -> Result<Voronization<L>> {
        let separation = RegionSeparator::new(self.config.separator).separate(input)?;

        let mut labels = match self.config.generators {
            GeneratorMode::Regions => separation.labels,
            GeneratorMode::Centroids { radius } => {
                centroid_generators(&separation.groups, input.dim(), radius)?
            }
            GeneratorMode::Rings { radius, thickness } => {
                ring_generators(&separation.groups, input.dim(), radius, thickness)?
            }
            GeneratorMode::Lines { candidates, seed } => line_generators(
                &separation.groups,
                input.dim(),
                candidates,
                DEFAULT_UNPAIRED_POINTS,
                &mut StdRng::seed_from_u64(seed),
            )?,
        };

        let mut tessellator = VoronoiTessellator::with_cells(separation.cells);
        let tessellation = tessellator.tessellate(&mut labels)?;
        let steps = separation.steps + separation.regrow_steps + tessellation.steps;
        debug!(
            "{} generators from {} regions, {steps} waves in total",
            self.config.generators.name(),
            separation.regions
        );

        Ok(Voronization {
            labels,
            groups: tessellation.groups,
            regions: separation.regions,
            steps,
        })
    }
}
