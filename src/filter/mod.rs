//! Detection filtering.
//!
//! Detectors report the same block several times: once as a whole and again
//! as fragments, or as two overlapping proposals. [`DetectionFilter`] keeps
//! one representative per block before ordering.
//!
//! Rules, applied in this order:
//!
//! 1. regions of an excluded [`Category`](crate::region::Category) are removed
//! 2. regions are visited from largest to smallest area (stable on ties)
//! 3. a region lying entirely inside a visited survivor is removed
//! 4. otherwise a region overlapping a visited survivor with IoU above the
//!    threshold is removed
//!
//! Boxes are compared on whole pixels (see [`Region::pixel_box`]), so a
//! fragment overhanging its block by less than a pixel still counts as
//! contained. Survivors keep their input order. The larger box always wins;
//! detector scores are not consulted.

mod crop;

pub use crop::pad_to_min_size;

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::pipeline::config::FilterConfig;
use crate::region::Region;
use crate::utils::safe_float_cmp;

/// Removes excluded categories and duplicate detections.
#[derive(Debug, Clone, Default)]
pub struct DetectionFilter {
    config: FilterConfig,
}

impl DetectionFilter {
    /// Create a filter with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The filter's configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Indices of the regions that survive filtering, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRegion`](crate::Error::MalformedRegion) when a
    /// non-excluded region has an unusable polygon. The index is the region's
    /// position in `regions`.
    pub fn survivor_indices(&self, regions: &[Region]) -> Result<Vec<usize>> {
        let mut candidates: Vec<(usize, BoundingBox)> = Vec::with_capacity(regions.len());
        for (index, region) in regions.iter().enumerate() {
            if self.config.is_excluded(region.category) {
                continue;
            }
            candidates.push((index, region.pixel_box(index)?));
        }

        // Largest first; sort_by is stable so equal areas keep input order
        let mut by_area: Vec<usize> = (0..candidates.len()).collect();
        by_area.sort_by(|&a, &b| safe_float_cmp(candidates[b].1.area(), candidates[a].1.area()));

        let mut keep = vec![true; candidates.len()];
        for (pos, &outer) in by_area.iter().enumerate() {
            if !keep[outer] {
                continue;
            }
            let outer_box = &candidates[outer].1;
            for &inner in &by_area[pos + 1..] {
                if !keep[inner] {
                    continue;
                }
                let inner_box = &candidates[inner].1;
                if outer_box.contains(inner_box)
                    || outer_box.iou(inner_box) > self.config.iou_threshold
                {
                    keep[inner] = false;
                }
            }
        }

        let survivors: Vec<usize> = candidates
            .iter()
            .zip(&keep)
            .filter_map(|((index, _), &kept)| kept.then_some(*index))
            .collect();

        log::debug!(
            "Detection filter kept {} of {} regions ({} excluded by category)",
            survivors.len(),
            regions.len(),
            regions.len() - candidates.len()
        );
        Ok(survivors)
    }

    /// Filter a page of regions, padding the crops of the survivors.
    ///
    /// # Errors
    ///
    /// Fails as a unit on the first malformed region; see
    /// [`survivor_indices`](Self::survivor_indices).
    pub fn filter(&self, regions: Vec<Region>) -> Result<Vec<Region>> {
        Ok(self
            .filter_indexed(regions)?
            .into_iter()
            .map(|(_, region)| region)
            .collect())
    }

    /// Like [`filter`](Self::filter), pairing each survivor with its index in
    /// `regions`.
    pub fn filter_indexed(&self, regions: Vec<Region>) -> Result<Vec<(usize, Region)>> {
        let survivors = self.survivor_indices(&regions)?;
        let mut wanted = survivors.into_iter().peekable();

        let mut kept = Vec::with_capacity(regions.len());
        for (index, region) in regions.into_iter().enumerate() {
            if wanted.peek() == Some(&index) {
                wanted.next();
                kept.push((index, self.prepare(region)));
            }
        }
        Ok(kept)
    }

    /// Filter each page independently. A malformed page yields an error in
    /// its slot without affecting the others.
    pub fn filter_pages(&self, pages: Vec<Vec<Region>>) -> Vec<Result<Vec<Region>>> {
        pages.into_iter().map(|page| self.filter(page)).collect()
    }

    fn prepare(&self, mut region: Region) -> Region {
        if let Some(crop) = region.crop.take() {
            region.crop = Some(pad_to_min_size(crop, self.config.min_crop_size));
        }
        region
    }
}

/// Filter a page with the default exclusions and the given IoU threshold.
///
/// # Examples
///
/// ```
/// use order_oxide::filter::filter_regions;
/// use order_oxide::region::{Category, Region};
///
/// let page = (1000.0, 1000.0);
/// let outer = Region::new(Category::PlainText, vec![0.0, 0.0, 100.0, 100.0], 0.5, page);
/// let inner = Region::new(Category::PlainText, vec![10.0, 10.0, 50.0, 50.0], 0.99, page);
///
/// let kept = filter_regions(vec![inner, outer], 0.5).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].score, 0.5);
/// ```
pub fn filter_regions(regions: Vec<Region>, iou_threshold: f64) -> Result<Vec<Region>> {
    DetectionFilter::new(FilterConfig::default().with_iou_threshold(iou_threshold)).filter(regions)
}

/// Batch form of [`filter_regions`], one result per page.
pub fn filter_pages(pages: Vec<Vec<Region>>, iou_threshold: f64) -> Vec<Result<Vec<Region>>> {
    DetectionFilter::new(FilterConfig::default().with_iou_threshold(iou_threshold))
        .filter_pages(pages)
}
