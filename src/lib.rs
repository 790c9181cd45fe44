// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Order Oxide
//!
//! Reading order reconstruction for document layout detections.
//!
//! A layout detector turns a page image into a set of regions (titles, text
//! blocks, figures, tables, formulas, captions). Order Oxide cleans that set
//! up and works out the order a person would read it in, from geometry alone.
//!
//! ## Core Features
//!
//! - **Detection Filter**: drops page furniture and equation numbers, then
//!   removes nested and heavily overlapping duplicates, keeping the larger box
//! - **XY-Cut Ordering**: row grouping, whitespace channel tracking and a
//!   block tree walked in preorder; handles multi-column pages with spanning
//!   titles, figures and tables
//! - **Pluggable Strategies**: a [`ReadingOrderStrategy`] trait, with externally
//!   computed orders accepted through [`ReadingOrder::from_indices`]
//! - **Model Input**: regions normalized onto a 1000 x 1000 grid
//! - **Crop Padding**: survivors' crops padded to a minimum recognizer size
//!
//! ## Quick Start
//!
//! ```
//! use order_oxide::pipeline::PagePipeline;
//! use order_oxide::region::{Category, Region};
//!
//! # fn main() -> order_oxide::Result<()> {
//! let page = (1700.0, 2200.0);
//! let regions = vec![
//!     Region::new(Category::PlainText, vec![866.0, 526.0, 1564.0, 858.0], 0.98, page),
//!     Region::new(Category::PlainText, vec![136.0, 526.0, 835.0, 858.0], 0.98, page),
//!     Region::new(Category::Title, vec![287.0, 162.0, 1413.0, 311.0], 0.97, page),
//! ];
//!
//! let ordered = PagePipeline::new().process_page(regions)?;
//! assert_eq!(ordered.source_indices(), vec![2, 1, 0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Layout geometry
pub mod geometry;

// Detector output
pub mod region;

// Detection filtering
pub mod filter;

// Pipeline architecture for reading order
pub mod pipeline;

// Re-exports
pub use error::{Error, Result};
pub use filter::{filter_pages, filter_regions, DetectionFilter};
pub use geometry::BoundingBox;
pub use pipeline::{
    OrderedPage, PagePipeline, PipelineConfig, ReadingOrder, ReadingOrderStrategy, XYCutStrategy,
};
pub use region::{normalize_page, normalize_pages, Category, Region};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// # use std::cmp::Ordering;
    /// # use order_oxide::utils::safe_float_cmp;
    /// assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
    /// assert_eq!(safe_float_cmp(f64::NAN, 1.0), Ordering::Greater);
    /// ```
    #[inline]
    pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f64::NAN, f64::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f64::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f64::NAN), Ordering::Less);
        }

        #[test]
        fn test_safe_float_cmp_infinity() {
            assert_eq!(safe_float_cmp(f64::INFINITY, f64::INFINITY), Ordering::Equal);
            assert_eq!(safe_float_cmp(f64::INFINITY, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(f64::NEG_INFINITY, f64::INFINITY), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
