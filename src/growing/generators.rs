//! Generator rasterization from segmented regions
//!
//! Every region except background contributes its integer centroid. The
//! centroid is then drawn as a filled disk, a ring, or paired with a nearby
//! centroid into a line segment. Where shapes overlap, the cell keeps the
//! lowest label drawn on it.

use ndarray::Array2;
use num_traits::NumCast;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::io::error::{GrowError, Result, computation_error};
use crate::spatial::cell::Position;
use crate::spatial::grid::{Label, LabelGrid, label_at, set_label};
use crate::spatial::groups::Groups;

/// Integer centroid of a group, the floor of its mean row and column
pub fn centroid(members: &[Position]) -> Option<Position> {
    if members.is_empty() {
        return None;
    }
    let (rows, cols) = members
        .iter()
        .fold((0_usize, 0_usize), |(rows, cols), position| {
            (rows + position.row, cols + position.col)
        });
    Some(Position::new(rows / members.len(), cols / members.len()))
}

/// Rasterize one filled disk per group at the group's centroid
///
/// Disks have `radius` cells and are clipped to the grid; a radius of 0
/// places a single cell. Group 0 and empty groups produce nothing.
///
/// # Errors
///
/// Returns a computation error if a group member lies outside `shape`
pub fn centroid_generators<L: Label>(
    groups: &Groups<L>,
    shape: (usize, usize),
    radius: usize,
) -> Result<LabelGrid<L>> {
    let (rows, cols) = shape;
    let mut generators = Array2::from_elem(shape, L::zero());
    for (label, center) in labeled_centroids(groups, shape)? {
        stamp(&mut generators, &disk(center, radius, rows, cols), label);
    }
    Ok(generators)
}

/// Rasterize one ring per group around the group's centroid
///
/// A cell belongs to the ring when its distance from the centroid is within
/// half of `thickness` of `radius`.
///
/// # Errors
///
/// Returns a computation error if a group member lies outside `shape`
pub fn ring_generators<L: Label>(
    groups: &Groups<L>,
    shape: (usize, usize),
    radius: usize,
    thickness: usize,
) -> Result<LabelGrid<L>> {
    let (rows, cols) = shape;
    let mut generators = Array2::from_elem(shape, L::zero());
    for (label, center) in labeled_centroids(groups, shape)? {
        stamp(
            &mut generators,
            &ring(center, radius, thickness, rows, cols),
            label,
        );
    }
    Ok(generators)
}

/// Pair centroids into line segments labeled `1, 2, ...`
///
/// Points are shuffled and the last one is joined to the closest of the
/// first `candidates` remaining points; both then leave the pool. Pairing
/// stops once at most `unpaired` points are left, one more when needed to
/// pair the rest evenly. Region labels are not kept.
///
/// # Errors
///
/// Returns a computation error if a group member lies outside `shape`, or a
/// label overflow if there are more segments than `L` can label
pub fn line_generators<L, R>(
    groups: &Groups<L>,
    shape: (usize, usize),
    candidates: usize,
    unpaired: usize,
    rng: &mut R,
) -> Result<LabelGrid<L>>
where
    L: Label,
    R: Rng + ?Sized,
{
    let mut points: Vec<Position> = labeled_centroids(groups, shape)?
        .into_iter()
        .map(|(_, center)| center)
        .collect();

    let mut left_out = unpaired;
    if left_out < 2 && points.len() % 2 != left_out % 2 {
        left_out += 1;
    }

    let mut generators = Array2::from_elem(shape, L::zero());
    let mut segments = 0;
    while points.len() > left_out {
        points.shuffle(rng);
        let Some((&from, others)) = points.split_last() else {
            break;
        };
        let Some((closest, &to)) = others
            .iter()
            .take(candidates.max(1))
            .enumerate()
            .min_by_key(|(_, point)| squared_distance(from, **point))
        else {
            break;
        };

        segments += 1;
        let label = <L as NumCast>::from(segments)
            .ok_or(GrowError::LabelOverflow { count: segments })?;
        stamp(&mut generators, &segment(from, to), label);

        let last_pair = points.len() - 2;
        points.swap(closest, last_pair);
        points.truncate(last_pair);
    }
    Ok(generators)
}

/// Centroids of every nonzero, nonempty group in ascending label order
fn labeled_centroids<L: Label>(
    groups: &Groups<L>,
    shape: (usize, usize),
) -> Result<Vec<(L, Position)>> {
    let (rows, cols) = shape;
    let mut centers = Vec::with_capacity(groups.len());
    for (&label, members) in groups {
        if label.is_zero() {
            continue;
        }
        if let Some(outside) = members
            .iter()
            .find(|position| position.row >= rows || position.col >= cols)
        {
            return Err(computation_error(
                "generators",
                &format!("member {outside} of label {label} lies outside a {rows}x{cols} grid"),
            ));
        }
        if let Some(center) = centroid(members) {
            centers.push((label, center));
        }
    }
    Ok(centers)
}

/// Write `label` into every still empty cell
fn stamp<L: Label>(generators: &mut LabelGrid<L>, cells: &[Position], label: L) {
    for &position in cells {
        if label_at(generators, position).is_some_and(|value| value.is_zero()) {
            set_label(generators, position, label);
        }
    }
}

const fn squared_distance(a: Position, b: Position) -> usize {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    dr * dr + dc * dc
}

/// Cells of the square of half-width `reach` around `center`, clipped
fn window(center: Position, reach: usize, rows: usize, cols: usize) -> Vec<Position> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let bottom = center.row.saturating_add(reach).min(rows - 1);
    let right = center.col.saturating_add(reach).min(cols - 1);
    let mut cells = Vec::new();
    for row in center.row.saturating_sub(reach)..=bottom {
        for col in center.col.saturating_sub(reach)..=right {
            cells.push(Position::new(row, col));
        }
    }
    cells
}

/// Cells within Euclidean distance `radius` of `center`, clipped to the grid
fn disk(center: Position, radius: usize, rows: usize, cols: usize) -> Vec<Position> {
    let limit = radius * radius;
    window(center, radius, rows, cols)
        .into_iter()
        .filter(|&position| squared_distance(center, position) <= limit)
        .collect()
}

/// Cells whose distance from `center` is within `thickness / 2` of `radius`
fn ring(
    center: Position,
    radius: usize,
    thickness: usize,
    rows: usize,
    cols: usize,
) -> Vec<Position> {
    let half = thickness as f64 / 2.0;
    window(center, radius + thickness, rows, cols)
        .into_iter()
        .filter(|&position| {
            let distance = (squared_distance(center, position) as f64).sqrt();
            (distance - radius as f64).abs() <= half
        })
        .collect()
}

/// Bresenham segment between two cells, both ends included
fn segment(from: Position, to: Position) -> Vec<Position> {
    let (mut row, mut col) = (from.row as isize, from.col as isize);
    let (end_row, end_col) = (to.row as isize, to.col as isize);
    let d_col = (end_col - col).abs();
    let d_row = -(end_row - row).abs();
    let step_col = if col < end_col { 1 } else { -1 };
    let step_row = if row < end_row { 1 } else { -1 };
    let mut error = d_col + d_row;

    let mut cells = vec![Position::new(row as usize, col as usize)];
    while row != end_row || col != end_col {
        let doubled = 2 * error;
        if doubled >= d_row {
            error += d_row;
            col += step_col;
        }
        if doubled <= d_col {
            error += d_col;
            row += step_row;
        }
        cells.push(Position::new(row as usize, col as usize));
    }
    cells
}
