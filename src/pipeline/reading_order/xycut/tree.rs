//! Layout tree built from cuts and rows.
//!
//! Nodes are column blocks: horizontal intervals between two adjacent cuts
//! that stay open for as long as the same pair of cuts bounds them. Nodes
//! live in a flat arena and refer to each other by [`NodeId`].

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::utils::safe_float_cmp;

use super::gaps::Cut;
use super::rows::Unit;
use super::EPSILON;

/// Distance from a node's right edge to the point used to find its parent.
const PARENT_PROBE_INSET: f64 = 2.0;

/// Index of a node in its [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

/// A column block of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Left edge (right edge of the bounding cut)
    pub x_left: f64,
    /// Right edge (left edge of the bounding cut)
    pub x_right: f64,
    /// First row of the block, `-1` for the root
    pub row_top: isize,
    /// Last row of the block, `-1` for the root
    pub row_bottom: isize,
    /// Region indices in the block, top to bottom
    pub units: Vec<usize>,
    /// Child blocks, left to right
    pub children: Vec<NodeId>,
}

impl LayoutNode {
    fn new(x_left: f64, x_right: f64, row: isize) -> Self {
        Self {
            x_left,
            x_right,
            row_top: row,
            row_bottom: row,
            units: Vec::new(),
            children: Vec::new(),
        }
    }

    fn bounded_by(&self, x_left: f64, x_right: f64) -> bool {
        (self.x_left - x_left).abs() < EPSILON && (self.x_right - x_right).abs() < EPSILON
    }
}

/// Arena of layout nodes rooted at a page-wide node.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    root: NodeId,
}

impl LayoutTree {
    /// Build the tree for a page.
    ///
    /// `rows` come from row grouping, `cuts` from gap accumulation over those
    /// rows, `boxes` is indexed by region index. Returns `None` when there
    /// are no cuts, i.e. no rows.
    pub(crate) fn build(cuts: &[Cut], rows: &[Vec<Unit>], boxes: &[BoundingBox]) -> Result<Option<Self>> {
        let Some(first) = cuts.first() else {
            return Ok(None);
        };

        if let Some(cut) = cuts.iter().find(|c| c.row_end >= rows.len()) {
            return Err(Error::InvariantViolation(format!(
                "cut [{}, {}] ends on row {} of a {}-row page",
                cut.left,
                cut.right,
                cut.row_end,
                rows.len()
            )));
        }
        let rows_cuts: Vec<Vec<(f64, f64)>> = (0..rows.len())
            .map(|row| {
                cuts.iter()
                    .filter(|c| c.spans_row(row))
                    .map(|c| (c.left, c.right))
                    .collect()
            })
            .collect();

        let right = cuts.iter().map(|c| c.right).fold(f64::NEG_INFINITY, f64::max);
        let mut builder = TreeBuilder {
            nodes: vec![LayoutNode::new(first.left - 1.0, right + 1.0, -1)],
            completed: vec![0],
        };

        let mut open: Vec<usize> = Vec::new();
        for (row_index, (row, spans)) in rows.iter().zip(&rows_cuts).enumerate() {
            let row_index = row_index as isize;

            let mut still_open = Vec::with_capacity(open.len());
            for id in open {
                if builder.still_bounded(id, spans) {
                    builder.nodes[id].row_bottom = row_index;
                    still_open.push(id);
                } else {
                    builder.complete(id)?;
                }
            }
            open = still_open;

            if spans.len() < 2 {
                return Err(Error::InvariantViolation(format!(
                    "row {} is bounded by {} cut(s)",
                    row_index,
                    spans.len()
                )));
            }

            let mut interval = 0;
            for unit in row {
                while unit.bbox.x0 + EPSILON > spans[interval + 1].0 && interval + 2 < spans.len() {
                    interval += 1;
                }
                let x_left = spans[interval].1;
                let x_right = spans[interval + 1].0;

                let existing = open
                    .iter()
                    .copied()
                    .find(|&id| builder.nodes[id].bounded_by(x_left, x_right));
                match existing {
                    Some(id) => builder.nodes[id].units.push(unit.index),
                    None => {
                        let mut node = LayoutNode::new(x_left, x_right, row_index);
                        node.units.push(unit.index);
                        builder.nodes.push(node);
                        open.push(builder.nodes.len() - 1);
                    },
                }
            }
        }

        for id in open {
            builder.complete(id)?;
        }

        Ok(Some(builder.finish(boxes)))
    }

    /// The page-wide root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, root first, then in completion order.
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in preorder: a node, then its children left to right.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Region indices in reading order.
    pub fn unit_order(&self) -> Vec<usize> {
        self.preorder()
            .into_iter()
            .filter_map(|id| self.nodes.get(id.0))
            .flat_map(|node| node.units.iter().copied())
            .collect()
    }
}

struct TreeBuilder {
    nodes: Vec<LayoutNode>,
    completed: Vec<usize>,
}

impl TreeBuilder {
    /// An open node survives a row when both of its bounding cuts continue
    /// into the row and no cut edge of the row falls strictly inside it.
    fn still_bounded(&self, id: usize, spans: &[(f64, f64)]) -> bool {
        let node = &self.nodes[id];
        let inside = |x: f64| node.x_left < x && x < node.x_right;
        if spans.iter().any(|&(left, right)| inside(left) || inside(right)) {
            return false;
        }
        let left_edge = spans.iter().any(|&(_, right)| (right - node.x_left).abs() < EPSILON);
        let right_edge = spans.iter().any(|&(left, _)| (left - node.x_right).abs() < EPSILON);
        left_edge && right_edge
    }

    /// Attach a finished node to its parent.
    ///
    /// The parent is the completed node that ended closest above this one
    /// and horizontally covers a point just inside its right edge. Among
    /// equally close candidates the widest-reaching one (largest right edge)
    /// wins, the earliest completed on a tie.
    fn complete(&mut self, id: usize) -> Result<()> {
        let node = &self.nodes[id];
        let probe = node.x_right - PARENT_PROBE_INSET;

        let mut parent: Option<usize> = None;
        for &candidate in &self.completed {
            let c = &self.nodes[candidate];
            if !(c.x_left <= probe && probe < c.x_right + EPSILON) || c.row_bottom >= node.row_top {
                continue;
            }
            let better = match parent {
                None => true,
                Some(best) => {
                    let b = &self.nodes[best];
                    c.row_bottom > b.row_bottom || (c.row_bottom == b.row_bottom && c.x_right > b.x_right)
                },
            };
            if better {
                parent = Some(candidate);
            }
        }

        let Some(parent) = parent else {
            return Err(Error::InvariantViolation(format!(
                "no parent for block [{}, {}] at rows {}..={}",
                node.x_left, node.x_right, node.row_top, node.row_bottom
            )));
        };

        log::trace!(
            "block [{}, {}] rows {}..={} attached to node {}",
            node.x_left,
            node.x_right,
            node.row_top,
            node.row_bottom,
            parent
        );
        self.nodes[parent].children.push(NodeId(id));
        self.completed.push(id);
        Ok(())
    }

    fn finish(mut self, boxes: &[BoundingBox]) -> LayoutTree {
        let top = |index: usize| boxes.get(index).map_or(f64::NAN, |b| b.y0);
        for id in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[id].children);
            children.sort_by(|a, b| safe_float_cmp(self.nodes[a.0].x_left, self.nodes[b.0].x_left));
            let node = &mut self.nodes[id];
            node.children = children;
            node.units.sort_by(|&a, &b| safe_float_cmp(top(a), top(b)));
        }
        LayoutTree {
            nodes: self.nodes,
            root: NodeId(0),
        }
    }
}
