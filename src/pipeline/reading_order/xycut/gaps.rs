//! Vertical whitespace channels.
//!
//! Every row contributes its horizontal gaps. Gaps that line up with gaps of
//! the rows above stay open, narrowed to the common part; a gap that no
//! longer lines up with anything closes into a [`Cut`] spanning the rows it
//! was open for.

use serde::Serialize;

use crate::utils::safe_float_cmp;

/// Horizontal whitespace interval, tagged with the row it opened in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gap {
    /// Left edge
    pub left: f64,
    /// Right edge
    pub right: f64,
    /// Row the gap opened in
    pub row: usize,
}

impl Gap {
    /// Create a gap.
    pub fn new(left: f64, right: f64, row: usize) -> Self {
        Self { left, right, row }
    }
}

/// Closed whitespace channel spanning rows `row_start..=row_end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cut {
    /// Left edge
    pub left: f64,
    /// Right edge
    pub right: f64,
    /// First row the channel spans
    pub row_start: usize,
    /// Last row the channel spans
    pub row_end: usize,
}

impl Cut {
    fn close(gap: Gap, row_end: usize) -> Self {
        Self {
            left: gap.left,
            right: gap.right,
            row_start: gap.row,
            row_end,
        }
    }

    /// Whether the cut spans the given row.
    pub fn spans_row(&self, row: usize) -> bool {
        self.row_start <= row && row <= self.row_end
    }
}

/// Accumulates row gaps into cuts, one row at a time.
#[derive(Debug, Default)]
pub(crate) struct GapTracker {
    open: Vec<Gap>,
    cuts: Vec<Cut>,
}

impl GapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the gaps of row `row_index` into the open channels.
    ///
    /// Each overlapping (open, new) pair yields its intersection, which keeps
    /// the open gap's starting row. New gaps overlapping nothing open as they
    /// are. Open gaps overlapping nothing close at the previous row.
    pub fn advance(&mut self, row_gaps: &[Gap], row_index: usize) {
        let mut open_matched = vec![false; self.open.len()];
        let mut new_matched = vec![false; row_gaps.len()];
        let mut next = Vec::with_capacity(self.open.len() + row_gaps.len());

        for (i, open) in self.open.iter().enumerate() {
            for (j, gap) in row_gaps.iter().enumerate() {
                let left = open.left.max(gap.left);
                let right = open.right.min(gap.right);
                if left <= right {
                    next.push(Gap::new(left, right, open.row));
                    open_matched[i] = true;
                    new_matched[j] = true;
                }
            }
        }
        next.extend(
            row_gaps
                .iter()
                .zip(&new_matched)
                .filter(|(_, &matched)| !matched)
                .map(|(gap, _)| *gap),
        );

        let row_end = row_index.saturating_sub(1);
        for (gap, _) in self
            .open
            .iter()
            .zip(&open_matched)
            .filter(|(_, &matched)| !matched)
        {
            self.cuts.push(Cut::close(*gap, row_end));
        }

        self.open = next;
    }

    /// Close every open gap at `last_row` and return all cuts, ordered by left
    /// edge (stable).
    pub fn finish(mut self, last_row: usize) -> Vec<Cut> {
        let open = std::mem::take(&mut self.open);
        self.cuts.extend(open.into_iter().map(|gap| Cut::close(gap, last_row)));
        self.cuts.sort_by(|a, b| safe_float_cmp(a.left, b.left));
        self.cuts
    }
}
