//! Detected layout regions.
//!
//! A [`Region`] is one detection on a page: its layout [`Category`], the
//! polygon the detector returned, a confidence score, and the page size the
//! coordinates refer to. Content recognized later and the pixel crop of the
//! region travel with it but never influence ordering.

mod category;

pub use category::Category;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

/// Side of the integer grid used by [`Region::normalized_bbox`].
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// A single detected layout region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Layout class
    #[serde(rename = "category_id")]
    pub category: Category,

    /// Corner coordinates `[x0, y0, x1, y1, x2, y2, x3, y3]`, or the
    /// `[x0, y0, x1, y1]` shorthand
    #[serde(rename = "poly", default)]
    pub polygon: Vec<f64>,

    /// Detector confidence in `[0, 1]`
    #[serde(default)]
    pub score: f32,

    /// `(width, height)` of the page in pixels
    #[serde(default)]
    pub page_size: (f64, f64),

    /// Recognized content, opaque to this crate
    #[serde(rename = "text", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Pixel crop of the region
    #[serde(skip)]
    pub crop: Option<RgbImage>,
}

impl Region {
    /// Create a region without content or crop.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::region::{Category, Region};
    ///
    /// let region = Region::new(
    ///     Category::PlainText,
    ///     vec![0.0, 0.0, 100.0, 0.0, 100.0, 50.0, 0.0, 50.0],
    ///     0.98,
    ///     (1700.0, 2200.0),
    /// );
    /// assert_eq!(region.bounding_box(0).unwrap().area(), 5000.0);
    /// ```
    pub fn new(category: Category, polygon: Vec<f64>, score: f32, page_size: (f64, f64)) -> Self {
        Self {
            category,
            polygon,
            score,
            page_size,
            content: None,
            crop: None,
        }
    }

    /// Attach recognized content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Attach the pixel crop of the region.
    pub fn with_crop(mut self, crop: RgbImage) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Axis-aligned box of the polygon.
    ///
    /// `index` is the region's position in the caller's input and is only used
    /// to label the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRegion`] when the polygon does not have 8 (or 4)
    /// coordinates, or when a coordinate is not finite.
    pub fn bounding_box(&self, index: usize) -> Result<BoundingBox> {
        let len = self.polygon.len();
        if len != 8 && len != 4 {
            return Err(Error::malformed_polygon(
                index,
                format!("expected 8 or 4 coordinates, found {}", len),
            ));
        }
        if self.polygon.iter().any(|v| !v.is_finite()) {
            return Err(Error::malformed_polygon(index, "non-finite coordinate"));
        }
        BoundingBox::from_polygon(&self.polygon)
            .ok_or_else(|| Error::malformed_polygon(index, "unusable polygon"))
    }

    /// Box on whole pixels, as used for deduplication and model input.
    ///
    /// Corners of an 8-coordinate polygon are truncated toward zero; the
    /// 4-coordinate shorthand is taken as given.
    ///
    /// # Errors
    ///
    /// Same as [`bounding_box`](Self::bounding_box).
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    /// use order_oxide::region::{Category, Region};
    ///
    /// let page = (1000.0, 1000.0);
    /// let poly = vec![10.9, 20.5, 99.7, 20.5, 99.7, 60.2, 10.9, 60.2];
    /// let region = Region::new(Category::PlainText, poly, 0.9, page);
    /// assert_eq!(region.pixel_box(0).unwrap(), BoundingBox::new(10.0, 20.0, 99.0, 60.0));
    /// ```
    pub fn pixel_box(&self, index: usize) -> Result<BoundingBox> {
        let bbox = self.bounding_box(index)?;
        if self.polygon.len() == 8 {
            Ok(bbox.truncated())
        } else {
            Ok(bbox)
        }
    }

    /// Box scaled onto a 1000 x 1000 integer grid using `page_size`.
    ///
    /// Starts from [`pixel_box`](Self::pixel_box), then rounds half to even.
    ///
    /// # Errors
    ///
    /// Fails on a malformed polygon, or on a page size that is zero, negative
    /// or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::region::{Category, Region};
    ///
    /// let region = Region::new(
    ///     Category::Title,
    ///     vec![170.0, 220.0, 850.0, 1100.0],
    ///     0.9,
    ///     (1700.0, 2200.0),
    /// );
    /// assert_eq!(region.normalized_bbox(0).unwrap(), [100, 100, 500, 500]);
    /// ```
    pub fn normalized_bbox(&self, index: usize) -> Result<[i64; 4]> {
        let bbox = self.pixel_box(index)?;
        let (width, height) = self.page_size;
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(Error::MalformedRegion {
                index,
                field: "page_size",
                reason: format!("page size must be positive, got {}x{}", width, height),
            });
        }
        Ok(bbox.normalized(width, height, NORMALIZED_SCALE))
    }
}

/// Normalized boxes of a page, in input order.
///
/// This is the layout input neural reading-order models expect.
pub fn normalize_page(regions: &[Region]) -> Result<Vec<[i64; 4]>> {
    regions
        .iter()
        .enumerate()
        .map(|(index, region)| region.normalized_bbox(index))
        .collect()
}

/// [`normalize_page`] over a batch, one result per page.
pub fn normalize_pages(pages: &[Vec<Region>]) -> Vec<Result<Vec<[i64; 4]>>> {
    pages.iter().map(|page| normalize_page(page)).collect()
}

/// Compute the bounding box of every region, failing on the first bad one.
pub(crate) fn bounding_boxes(regions: &[Region]) -> Result<Vec<BoundingBox>> {
    regions
        .iter()
        .enumerate()
        .map(|(index, region)| region.bounding_box(index))
        .collect()
}
