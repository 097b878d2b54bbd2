//! Label groups: the member positions of every label produced by a run

use std::collections::BTreeMap;

use crate::io::error::{Result, computation_error};
use crate::spatial::cell::Position;
use crate::spatial::grid::{Label, LabelGrid, label_at, set_label};

/// Ordered mapping from label to the positions carrying it
///
/// Member lists keep the order in which cells were closed.
pub type Groups<L> = BTreeMap<L, Vec<Position>>;

/// Append a cell to the group of `label`, creating the group if needed
pub fn add_to_group<L: Label>(groups: &mut Groups<L>, label: L, position: Position) {
    groups.entry(label).or_default().push(position);
}

/// Bucket every processed cell by its current label in `grid`
pub fn bucket_by_label<L: Label>(
    groups: &mut Groups<L>,
    processed: &[Position],
    grid: &LabelGrid<L>,
) {
    for &position in processed {
        if let Some(label) = label_at(grid, position) {
            add_to_group(groups, label, position);
        }
    }
}

/// Total number of member positions over all groups
pub fn member_count<L: Label>(groups: &Groups<L>) -> usize {
    groups.values().map(Vec::len).sum()
}

/// Renumber positive labels to the dense range `1..=k`
///
/// Labels keep their relative order and group 0 keeps its key. Grid values of
/// every moved group are rewritten to the new label. Returns the number of
/// positive labels.
///
/// # Errors
///
/// Returns a computation error if a negative label is present, since the
/// dense range is only defined over background and positive labels
pub fn remap_dense<L: Label>(groups: &mut Groups<L>, grid: &mut LabelGrid<L>) -> Result<usize> {
    if let Some((&lowest, _)) = groups.first_key_value() {
        if lowest < L::zero() {
            return Err(computation_error(
                "dense remap",
                &format!("found negative group label {lowest}"),
            ));
        }
    }

    let mut remapped = Groups::new();
    let mut next = L::zero();
    for (label, members) in std::mem::take(groups) {
        if label.is_zero() {
            remapped.insert(label, members);
            continue;
        }

        next = next + L::one();
        if next != label {
            for &position in &members {
                set_label(grid, position, next);
            }
        }
        remapped.insert(next, members);
    }

    let positive = remapped.keys().filter(|label| label.is_positive()).count();
    *groups = remapped;
    Ok(positive)
}
