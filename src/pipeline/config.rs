//! Configuration for the page pipeline.
//!
//! Every stage has its own small config struct with sensible defaults and
//! `with_*` builders; [`PipelineConfig`] bundles them. All of them can be
//! loaded from JSON, missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::region::Category;

/// Default IoU above which the smaller of two overlapping boxes is dropped.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Default minimum crop side, in pixels, for downstream recognizers.
pub const DEFAULT_MIN_CROP_SIZE: u32 = 28;

/// Configuration for the detection filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Overlap ratio above which the smaller-area box is discarded.
    ///
    /// Boxes fully inside another box are discarded regardless of this value.
    pub iou_threshold: f64,

    /// Categories removed before deduplication.
    pub excluded_categories: Vec<Category>,

    /// Crops narrower or shorter than this are padded onto a white canvas.
    pub min_crop_size: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            excluded_categories: vec![Category::Abandon, Category::FormulaCaption],
            min_crop_size: DEFAULT_MIN_CROP_SIZE,
        }
    }
}

impl FilterConfig {
    /// Config that also collapses lightly overlapping boxes.
    ///
    /// Suited to detectors that emit many near-duplicate proposals.
    pub fn aggressive() -> Self {
        Self {
            iou_threshold: 0.05,
            ..Self::default()
        }
    }

    /// Set the IoU threshold.
    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// Replace the excluded categories.
    pub fn with_excluded_categories(mut self, categories: Vec<Category>) -> Self {
        self.excluded_categories = categories;
        self
    }

    /// Set the minimum crop side.
    pub fn with_min_crop_size(mut self, min_crop_size: u32) -> Self {
        self.min_crop_size = min_crop_size;
        self
    }

    /// Whether regions of this category are dropped outright.
    pub fn is_excluded(&self, category: Category) -> bool {
        self.excluded_categories.contains(&category)
    }
}

/// Configuration for reading order strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingOrderConfig {
    /// The reading order strategy to use.
    pub strategy: ReadingOrderStrategyType,
}

impl ReadingOrderConfig {
    /// Select the strategy.
    pub fn with_strategy(mut self, strategy: ReadingOrderStrategyType) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Available reading order strategy types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingOrderStrategyType {
    /// XY-Cut row/gap analysis.
    ///
    /// Tracks vertical whitespace channels across rows of regions and orders
    /// the resulting column blocks like a tree. Handles multi-column pages,
    /// spanning titles and figures.
    #[default]
    #[serde(rename = "xycut")]
    XYCut,

    /// Top-to-bottom, left-to-right ordering.
    ///
    /// Sorts regions by top edge then left edge. Only correct for
    /// single-column pages.
    #[serde(rename = "simple")]
    Simple,
}

/// Configuration for the whole page pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Detection filter settings
    pub filter: FilterConfig,

    /// Reading order settings
    pub reading_order: ReadingOrderConfig,
}

impl PipelineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::pipeline::{PipelineConfig, ReadingOrderStrategyType};
    ///
    /// let config = PipelineConfig::from_json(
    ///     r#"{"filter": {"iou_threshold": 0.3}, "reading_order": {"strategy": "simple"}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.filter.iou_threshold, 0.3);
    /// assert_eq!(config.filter.min_crop_size, 28);
    /// assert_eq!(config.reading_order.strategy, ReadingOrderStrategyType::Simple);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the filter config.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the reading order config.
    pub fn with_reading_order(mut self, reading_order: ReadingOrderConfig) -> Self {
        self.reading_order = reading_order;
        self
    }

    /// Select the reading order strategy.
    pub fn with_strategy(mut self, strategy: ReadingOrderStrategyType) -> Self {
        self.reading_order.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_filter_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.min_crop_size, 28);
        assert!(config.is_excluded(Category::Abandon));
        assert!(config.is_excluded(Category::FormulaCaption));
        assert!(!config.is_excluded(Category::PlainText));
    }

    #[test]
    fn test_filter_builders() {
        let config = FilterConfig::default()
            .with_iou_threshold(0.2)
            .with_excluded_categories(vec![Category::Figure])
            .with_min_crop_size(32);
        assert_eq!(config.iou_threshold, 0.2);
        assert!(config.is_excluded(Category::Figure));
        assert!(!config.is_excluded(Category::Abandon));
        assert_eq!(config.min_crop_size, 32);
    }

    #[test]
    fn test_aggressive_preset() {
        let config = FilterConfig::aggressive();
        assert_eq!(config.iou_threshold, 0.05);
        assert_eq!(config.excluded_categories, FilterConfig::default().excluded_categories);
    }

    #[test]
    fn test_reading_order_default_is_xycut() {
        assert_eq!(ReadingOrderConfig::default().strategy, ReadingOrderStrategyType::XYCut);
        let config = PipelineConfig::default().with_strategy(ReadingOrderStrategyType::Simple);
        assert_eq!(config.reading_order.strategy, ReadingOrderStrategyType::Simple);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PipelineConfig::from_json(r#"{"filter": {"excluded_categories": [2]}}"#)
            .unwrap();
        assert_eq!(config.filter.excluded_categories, vec![Category::Abandon]);
        assert_eq!(config.filter.iou_threshold, DEFAULT_IOU_THRESHOLD);
        assert_eq!(config.reading_order.strategy, ReadingOrderStrategyType::XYCut);

        let empty = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(empty, PipelineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_strategy() {
        let result = PipelineConfig::from_json(r#"{"reading_order": {"strategy": "neural"}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::default().with_filter(FilterConfig::aggressive());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }
}
