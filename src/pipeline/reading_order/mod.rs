//! Reading order strategies for layout regions.
//!
//! This module provides pluggable strategies for determining the order in
//! which the regions of a page are read.
//!
//! # Available Strategies
//!
//! - [`XYCutStrategy`]: Row/gap XY-Cut analysis (multi-column pages, spanning titles)
//! - [`SimpleStrategy`]: Simple top-to-bottom, left-to-right ordering
//!
//! Orders computed elsewhere enter through [`ReadingOrder::from_indices`] or
//! [`ReadingOrder::from_positions`].

mod order;
mod simple;
mod xycut;

pub use order::ReadingOrder;
pub use simple::SimpleStrategy;
pub use xycut::{Cut, Gap, LayoutNode, LayoutTree, NodeId, XYCutStrategy, EPSILON};

use crate::error::Result;
use crate::pipeline::config::{ReadingOrderConfig, ReadingOrderStrategyType};
use crate::pipeline::ReadingOrderSource;
use crate::region::Region;

/// Trait for determining reading order of regions.
///
/// Implementations only look at geometry; categories, scores and content
/// never influence the order.
pub trait ReadingOrderStrategy: Send + Sync {
    /// Compute the reading order of one page.
    ///
    /// An empty page yields an empty order.
    ///
    /// # Errors
    ///
    /// Fails when a region's polygon is malformed, or when the strategy's
    /// internal invariants break.
    fn order(&self, regions: &[Region]) -> Result<ReadingOrder>;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;

    /// Source tag attached to orders produced by this strategy.
    fn source(&self) -> ReadingOrderSource;

    /// Order each page independently. One page failing does not affect the
    /// others.
    fn order_pages(&self, pages: &[Vec<Region>]) -> Vec<Result<ReadingOrder>> {
        pages.iter().map(|page| self.order(page)).collect()
    }
}

/// Create a reading order strategy based on configuration.
pub fn create_strategy(config: &ReadingOrderConfig) -> Box<dyn ReadingOrderStrategy> {
    match config.strategy {
        ReadingOrderStrategyType::XYCut => Box::new(XYCutStrategy::new()),
        ReadingOrderStrategyType::Simple => Box::new(SimpleStrategy),
    }
}
