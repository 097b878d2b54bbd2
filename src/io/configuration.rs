//! Default parameters and parsing of comma-separated argument strings

use std::fmt;
use std::str::FromStr;

use crate::io::error::{Result, invalid_parameter};

/// Regions or components with fewer cells are rejected
pub const DEFAULT_SIZE_THRESHOLD: usize = 15;

/// Raw value treated as background by the separator
pub const DEFAULT_BACKGROUND: i8 = 0;

/// Raw value marking cells the component labeler still has to assign
pub const DEFAULT_UNASSIGNED: i8 = 0;

/// Label given to components rejected by the labeler
pub const DEFAULT_REJECTED: i8 = -1;

/// Radius of centroid generators (0 places a single cell)
pub const DEFAULT_GENERATOR_RADIUS: usize = 0;

/// Outline thickness meaning a filled disk
pub const FILLED_THICKNESS: i64 = -1;

/// Closest-partner candidates examined per line generator
pub const DEFAULT_LINE_CANDIDATES: usize = 25;

/// Centroids left without a partner once line pairing stops
pub const DEFAULT_UNPAIRED_POINTS: usize = 3;

/// Seed of the centroid shuffle used for line generators
pub const DEFAULT_LINE_SEED: u64 = 0;

/// Split an argument string on commas
///
/// An empty string yields no fields; a trailing comma yields a trailing empty
/// field so that `"5,"` is two fields.
pub fn split_args(args: &str) -> Vec<&str> {
    if args.is_empty() {
        return Vec::new();
    }
    args.split(',').map(str::trim).collect()
}

/// Parse the field at `index`, keeping `default` when it is absent or empty
///
/// # Errors
///
/// Returns an invalid parameter error if the field is present but does not
/// parse as `T`
pub fn parse_field<T>(
    fields: &[&str],
    index: usize,
    parameter: &'static str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match fields.get(index) {
        None => Ok(default),
        Some(field) if field.is_empty() => Ok(default),
        Some(field) => field
            .parse()
            .map_err(|error| invalid_parameter(parameter, field, &error)),
    }
}

/// Reject argument lists with more fields than a mode accepts
///
/// # Errors
///
/// Returns an invalid parameter error naming the first surplus field
pub fn ensure_field_count(fields: &[&str], max: usize) -> Result<()> {
    match fields.get(max) {
        Some(extra) => Err(invalid_parameter(
            "args",
            extra,
            &format!("at most {max} comma-separated values are accepted"),
        )),
        None => Ok(()),
    }
}
