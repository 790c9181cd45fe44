//! Regions annotated with their reading order.
//!
//! [`OrderedRegion`] wraps a [`Region`] with its position in the page's
//! reading order and the strategy that produced it. [`OrderedPage`] is the
//! pipeline's per-page output.

use crate::pipeline::reading_order::ReadingOrder;
use crate::region::Region;

/// Source of reading order assignment.
///
/// Tracks which strategy or method determined the reading order of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingOrderSource {
    /// Order from XY-Cut row/gap analysis.
    ///
    /// Confidence: 0.90 (robust for multi-column layouts).
    #[default]
    XYCut,
    /// Order from simple top-to-bottom, left-to-right.
    ///
    /// Confidence: 0.75 (basic, works for single-column).
    Simple,
    /// Order computed outside the crate, e.g. by a neural model.
    ///
    /// Confidence: 0.85.
    External,
    /// Order explicitly set by user/API.
    ///
    /// Confidence: 1.0 (explicit assignment).
    UserAssigned,
    /// Input order kept as-is.
    ///
    /// Confidence: 0.5.
    Fallback,
}

impl ReadingOrderSource {
    /// Get the default confidence for this source type.
    pub fn default_confidence(&self) -> f32 {
        match self {
            ReadingOrderSource::XYCut => 0.90,
            ReadingOrderSource::Simple => 0.75,
            ReadingOrderSource::External => 0.85,
            ReadingOrderSource::UserAssigned => 1.0,
            ReadingOrderSource::Fallback => 0.5,
        }
    }

    /// Get strategy name for debugging.
    pub fn name(&self) -> &'static str {
        match self {
            ReadingOrderSource::XYCut => "XYCut",
            ReadingOrderSource::Simple => "Simple",
            ReadingOrderSource::External => "External",
            ReadingOrderSource::UserAssigned => "UserAssigned",
            ReadingOrderSource::Fallback => "Fallback",
        }
    }
}

/// Reading order metadata: which source assigned it, and how far to trust it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadingOrderInfo {
    /// Which strategy assigned this reading order.
    pub source: ReadingOrderSource,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl ReadingOrderInfo {
    /// Create with source and default confidence.
    pub fn from_source(source: ReadingOrderSource) -> Self {
        Self {
            confidence: source.default_confidence(),
            source,
        }
    }

    /// Create with explicit confidence.
    pub fn with_confidence(source: ReadingOrderSource, confidence: f32) -> Self {
        Self {
            source,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Create for XY-Cut source.
    pub fn xycut() -> Self {
        Self::from_source(ReadingOrderSource::XYCut)
    }

    /// Create for simple source.
    pub fn simple() -> Self {
        Self::from_source(ReadingOrderSource::Simple)
    }
}

/// A region with an assigned reading order position.
#[derive(Debug, Clone)]
pub struct OrderedRegion {
    /// The underlying region.
    pub region: Region,

    /// Position in reading order (0 = first to be read).
    pub reading_order: usize,

    /// Index of the region in the page as originally supplied, before
    /// filtering.
    pub source_index: usize,

    /// Reading order source and confidence information.
    pub order_info: ReadingOrderInfo,
}

impl OrderedRegion {
    /// Get the reading order source.
    pub fn source(&self) -> ReadingOrderSource {
        self.order_info.source
    }

    /// Get the reading order confidence.
    pub fn confidence(&self) -> f32 {
        self.order_info.confidence
    }
}

/// One processed page: surviving regions in reading order.
#[derive(Debug, Clone, Default)]
pub struct OrderedPage {
    regions: Vec<OrderedRegion>,
    order: ReadingOrder,
}

impl OrderedPage {
    /// Assemble a page from the filter survivors and their order.
    ///
    /// `survivors` pairs each kept region with its index in the original
    /// input; `order` permutes `survivors`.
    pub(crate) fn assemble(
        survivors: Vec<(usize, Region)>,
        order: ReadingOrder,
        order_info: ReadingOrderInfo,
    ) -> Self {
        let regions = order
            .apply(survivors)
            .into_iter()
            .enumerate()
            .map(|(reading_order, (source_index, region))| OrderedRegion {
                region,
                reading_order,
                source_index,
                order_info,
            })
            .collect();
        Self { regions, order }
    }

    /// Number of regions on the page after filtering.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region survived.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in reading order.
    pub fn regions(&self) -> &[OrderedRegion] {
        &self.regions
    }

    /// The order over the filter survivors (in their input order).
    pub fn order(&self) -> &ReadingOrder {
        &self.order
    }

    /// Original input indices, in reading order.
    pub fn source_indices(&self) -> Vec<usize> {
        self.regions.iter().map(|r| r.source_index).collect()
    }

    /// Regions in reading order whose category is meant for text recognition.
    pub fn ocr_targets(&self) -> impl Iterator<Item = &OrderedRegion> {
        self.regions
            .iter()
            .filter(|r| r.region.category.is_ocr_target())
    }

    /// Drop the ordering metadata, keeping the regions in reading order.
    pub fn into_regions(self) -> Vec<Region> {
        self.regions.into_iter().map(|r| r.region).collect()
    }
}

impl IntoIterator for OrderedPage {
    type Item = OrderedRegion;
    type IntoIter = std::vec::IntoIter<OrderedRegion>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}
