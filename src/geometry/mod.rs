//! Geometric primitives for layout analysis.
//!
//! Detections arrive as polygons in page pixel space (origin top-left, y grows
//! downwards). Everything downstream works on the axis-aligned
//! [`BoundingBox`] derived from them.

use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its corners, `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl BoundingBox {
    /// Create a box from two corners, normalizing their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(100.0, 50.0, 0.0, 0.0);
    /// assert_eq!(bbox.x0, 0.0);
    /// assert_eq!(bbox.y1, 50.0);
    /// ```
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Derive the enclosing box of a flattened polygon `[x, y, x, y, ...]`.
    ///
    /// Returns `None` for an empty or odd-length list, or when a coordinate
    /// is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let poly = [0.0, 0.0, 100.0, 0.0, 100.0, 50.0, 0.0, 50.0];
    /// let bbox = BoundingBox::from_polygon(&poly).unwrap();
    /// assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 50.0));
    /// ```
    pub fn from_polygon(poly: &[f64]) -> Option<Self> {
        if poly.is_empty() || poly.len() % 2 != 0 || poly.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let mut bbox = Self {
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        };
        for corner in poly.chunks_exact(2) {
            bbox.x0 = bbox.x0.min(corner[0]);
            bbox.x1 = bbox.x1.max(corner[0]);
            bbox.y0 = bbox.y0.min(corner[1]);
            bbox.y1 = bbox.y1.max(corner[1]);
        }
        Some(bbox)
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Area of the box. Degenerate boxes have area zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// assert_eq!(BoundingBox::new(0.0, 0.0, 100.0, 50.0).area(), 5000.0);
    /// ```
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Overlapping part of two boxes, if any. Touching boxes yield a
    /// zero-area intersection.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(BoundingBox { x0, y0, x1, y1 })
    }

    /// Intersection over union of two boxes, in `[0, 1]`.
    ///
    /// Disjoint boxes, and pairs whose union has no area, score zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    /// let b = BoundingBox::new(50.0, 0.0, 150.0, 100.0);
    /// assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-9);
    /// ```
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };
        let inter_area = inter.area();
        let union_area = self.area() + other.area() - inter_area;
        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }

    /// Check whether `other` lies entirely inside this box (edges may touch).
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    /// let inner = BoundingBox::new(10.0, 10.0, 100.0, 60.0);
    /// assert!(outer.contains(&inner));
    /// assert!(!inner.contains(&outer));
    /// ```
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Box with every edge truncated toward zero to whole pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.9, 20.2, 100.7, 60.5).truncated();
    /// assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 100.0, 60.0));
    /// ```
    pub fn truncated(&self) -> BoundingBox {
        BoundingBox {
            x0: self.x0.trunc(),
            y0: self.y0.trunc(),
            x1: self.x1.trunc(),
            y1: self.y1.trunc(),
        }
    }

    /// Scale the box onto a `scale x scale` integer grid for a page of the
    /// given size. Coordinates are rounded half to even.
    ///
    /// The caller guarantees a positive, finite page size.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(170.0, 220.0, 850.0, 1100.0);
    /// assert_eq!(bbox.normalized(1700.0, 2200.0, 1000.0), [100, 100, 500, 500]);
    /// ```
    pub fn normalized(&self, page_width: f64, page_height: f64, scale: f64) -> [i64; 4] {
        let sx = scale / page_width;
        let sy = scale / page_height;
        [
            (self.x0 * sx).round_ties_even() as i64,
            (self.y0 * sy).round_ties_even() as i64,
            (self.x1 * sx).round_ties_even() as i64,
            (self.y1 * sy).round_ties_even() as i64,
        ]
    }
}
