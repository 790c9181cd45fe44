//! Row grouping and per-row horizontal gaps.

use crate::geometry::BoundingBox;
use crate::utils::safe_float_cmp;

use super::gaps::Gap;

/// A region as seen by the sorter: its input index and box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Unit {
    pub index: usize,
    pub bbox: BoundingBox,
}

/// Group units into rows.
///
/// Units are visited top to bottom. A row is opened by its first unit and
/// absorbs every following unit whose top edge is not below that first
/// unit's bottom edge. Taller units absorbed later do not extend the row.
/// Each row is returned sorted left to right.
pub(crate) fn group_rows(mut units: Vec<Unit>) -> Vec<Vec<Unit>> {
    units.sort_by(|a, b| safe_float_cmp(a.bbox.y0, b.bbox.y0));

    let mut rows: Vec<Vec<Unit>> = Vec::new();
    let mut current: Vec<Unit> = Vec::new();
    let mut row_bottom = f64::NEG_INFINITY;
    for unit in units {
        if !current.is_empty() && unit.bbox.y0 > row_bottom {
            rows.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            row_bottom = unit.bbox.y1;
        }
        current.push(unit);
    }
    if !current.is_empty() {
        rows.push(current);
    }

    for row in &mut rows {
        row.sort_by(|a, b| safe_float_cmp(a.bbox.x0, b.bbox.x0));
    }
    rows
}

/// Horizontal whitespace of one row, from `page_left` to `page_right`.
///
/// `row` must be sorted left to right. Overlapping units shadow each other,
/// so a gap only opens once the cursor has passed every unit to its left.
pub(crate) fn row_gaps(row: &[Unit], row_index: usize, page_left: f64, page_right: f64) -> Vec<Gap> {
    let mut gaps = Vec::with_capacity(row.len() + 1);
    let mut cursor = page_left;
    for unit in row {
        if unit.bbox.x0 > cursor {
            gaps.push(Gap::new(cursor, unit.bbox.x0, row_index));
        }
        cursor = cursor.max(unit.bbox.x1);
    }
    gaps.push(Gap::new(cursor, page_right, row_index));
    gaps
}
