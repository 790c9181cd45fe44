//! Page pipeline: detection filtering followed by reading order.
//!
//! ```text
//! Detector output
//!     ↓
//! Region[] (category, polygon, score, page size)
//!     ↓
//! [DetectionFilter] (exclusions, containment and IoU dedup, crop padding)
//!     ↓
//! Region[] (survivors, input order)
//!     ↓
//! [ReadingOrderStrategy] (pluggable ordering)
//!     ↓
//! OrderedPage
//! ```
//!
//! Pages are independent: nothing is shared between calls and a failing page
//! never affects the others in a batch.

pub mod config;
pub mod ordered_region;
pub mod reading_order;

// Re-export main types
pub use config::{FilterConfig, PipelineConfig, ReadingOrderConfig, ReadingOrderStrategyType};
pub use ordered_region::{OrderedPage, OrderedRegion, ReadingOrderInfo, ReadingOrderSource};
pub use reading_order::{
    create_strategy, ReadingOrder, ReadingOrderStrategy, SimpleStrategy, XYCutStrategy,
};

use crate::error::Result;
use crate::filter::DetectionFilter;
use crate::region::Region;

/// The page pipeline - orchestrates filtering and ordering.
///
/// # Examples
///
/// ```
/// use order_oxide::pipeline::PagePipeline;
/// use order_oxide::region::{Category, Region};
///
/// let page = (1000.0, 1000.0);
/// let regions = vec![
///     Region::new(Category::PlainText, vec![0.0, 60.0, 100.0, 110.0], 0.9, page),
///     Region::new(Category::Abandon, vec![0.0, 980.0, 100.0, 995.0], 0.9, page),
///     Region::new(Category::Title, vec![0.0, 0.0, 100.0, 50.0], 0.9, page),
/// ];
///
/// let ordered = PagePipeline::new().process_page(regions).unwrap();
/// assert_eq!(ordered.source_indices(), vec![2, 0]);
/// ```
pub struct PagePipeline {
    config: PipelineConfig,
    filter: DetectionFilter,
    reading_order_strategy: Box<dyn ReadingOrderStrategy>,
}

impl PagePipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let strategy = create_strategy(&config.reading_order);
        Self {
            filter: DetectionFilter::new(config.filter.clone()),
            config,
            reading_order_strategy: strategy,
        }
    }

    /// Replace the configured strategy, e.g. with an externally backed one.
    pub fn with_strategy(mut self, strategy: Box<dyn ReadingOrderStrategy>) -> Self {
        self.reading_order_strategy = strategy;
        self
    }

    /// Process one page.
    ///
    /// 1. Filter excluded and duplicate detections
    /// 2. Apply the reading order strategy to the survivors
    ///
    /// # Errors
    ///
    /// Fails as a unit when a region is malformed or ordering breaks an
    /// internal invariant.
    pub fn process_page(&self, regions: Vec<Region>) -> Result<OrderedPage> {
        let input_len = regions.len();
        let (indices, survivors): (Vec<usize>, Vec<Region>) =
            self.filter.filter_indexed(regions)?.into_iter().unzip();

        let order = self.reading_order_strategy.order(&survivors)?;
        log::debug!(
            "{}: ordered {} of {} regions",
            self.reading_order_strategy.name(),
            survivors.len(),
            input_len
        );

        let info = ReadingOrderInfo::from_source(self.reading_order_strategy.source());
        Ok(OrderedPage::assemble(
            indices.into_iter().zip(survivors).collect(),
            order,
            info,
        ))
    }

    /// Process each page independently, preserving page order.
    pub fn process_pages(&self, pages: Vec<Vec<Region>>) -> Vec<Result<OrderedPage>> {
        pages
            .into_iter()
            .enumerate()
            .map(|(page_index, page)| {
                let result = self.process_page(page);
                if let Err(e) = &result {
                    log::warn!("Page {} failed: {}", page_index, e);
                }
                result
            })
            .collect()
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Name of the active reading order strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.reading_order_strategy.name()
    }
}

impl Default for PagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::region::Category;

    fn rect(category: Category, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
        Region::new(category, vec![x0, y0, x1, y0, x1, y1, x0, y1], 0.9, (1000.0, 1000.0))
    }

    struct ReverseStrategy;

    impl ReadingOrderStrategy for ReverseStrategy {
        fn order(&self, regions: &[Region]) -> Result<ReadingOrder> {
            ReadingOrder::from_indices((0..regions.len()).rev().collect())
        }

        fn name(&self) -> &'static str {
            "ReverseStrategy"
        }

        fn source(&self) -> ReadingOrderSource {
            ReadingOrderSource::External
        }
    }

    #[test]
    fn test_empty_page() {
        let page = PagePipeline::new().process_page(Vec::new()).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_filter_then_order() {
        let regions = vec![
            rect(Category::PlainText, 0.0, 60.0, 100.0, 110.0),
            rect(Category::PlainText, 10.0, 70.0, 50.0, 90.0), // inside region 0
            rect(Category::Title, 0.0, 0.0, 100.0, 50.0),
        ];
        let page = PagePipeline::new().process_page(regions).unwrap();
        assert_eq!(page.source_indices(), vec![2, 0]);
        assert_eq!(page.order().as_slice(), &[1, 0]);
        assert_eq!(page.regions()[0].source(), ReadingOrderSource::XYCut);
        assert_eq!(page.regions()[0].confidence(), 0.90);
    }

    #[test]
    fn test_simple_strategy_from_config() {
        let config = PipelineConfig::default().with_strategy(ReadingOrderStrategyType::Simple);
        let pipeline = PagePipeline::with_config(config);
        assert_eq!(pipeline.strategy_name(), "SimpleStrategy");

        let regions = vec![
            rect(Category::PlainText, 0.0, 60.0, 100.0, 110.0),
            rect(Category::PlainText, 0.0, 0.0, 100.0, 50.0),
        ];
        let page = pipeline.process_page(regions).unwrap();
        assert_eq!(page.source_indices(), vec![1, 0]);
        assert_eq!(page.regions()[0].source(), ReadingOrderSource::Simple);
    }

    #[test]
    fn test_custom_strategy() {
        let pipeline = PagePipeline::new().with_strategy(Box::new(ReverseStrategy));
        let regions = vec![
            rect(Category::PlainText, 0.0, 0.0, 100.0, 50.0),
            rect(Category::PlainText, 0.0, 60.0, 100.0, 110.0),
        ];
        let page = pipeline.process_page(regions).unwrap();
        assert_eq!(page.source_indices(), vec![1, 0]);
        assert_eq!(page.regions()[0].source(), ReadingOrderSource::External);
    }

    #[test]
    fn test_process_pages_isolates_failures() {
        let good = vec![rect(Category::PlainText, 0.0, 0.0, 10.0, 10.0)];
        let mut broken = rect(Category::PlainText, 0.0, 0.0, 10.0, 10.0);
        broken.polygon = vec![0.0, 0.0];
        let results = PagePipeline::new().process_pages(vec![good.clone(), vec![broken], good]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::MalformedRegion { index: 0, .. })));
        assert!(results[2].is_ok());
    }
}
