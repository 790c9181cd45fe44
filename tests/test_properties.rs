//! Property-based tests
//!
//! Invariants that must hold for arbitrary pages:
//! - XY-Cut output is a permutation of the input indices
//! - Filter survivors contain no nested pair and no pair above the threshold
//! - Reading order conversions are mutually inverse

use order_oxide::filter::DetectionFilter;
use order_oxide::pipeline::{FilterConfig, XYCutStrategy};
use order_oxide::region::{Category, Region};
use order_oxide::{BoundingBox, ReadingOrder};
use proptest::prelude::*;

fn region_from(bbox: (f64, f64, f64, f64)) -> Region {
    let (x0, y0, w, h) = bbox;
    let (x1, y1) = (x0 + w, y0 + h);
    Region::new(
        Category::PlainText,
        vec![x0, y0, x1, y0, x1, y1, x0, y1],
        0.9,
        (2000.0, 2000.0),
    )
}

/// Boxes on a coarse grid so that shared edges, touching boxes and exact
/// duplicates show up often, mixed with off-grid and zero-size boxes.
fn arb_box() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    prop_oneof![
        (0u32..20, 0u32..20, 0u32..6, 0u32..6)
            .prop_map(|(x, y, w, h)| (x as f64 * 50.0, y as f64 * 50.0, w as f64 * 50.0, h as f64 * 50.0)),
        (0.0..1500.0f64, 0.0..1500.0f64, 0.0..400.0f64, 0.0..400.0f64),
    ]
}

fn arb_page() -> impl Strategy<Value = Vec<Region>> {
    prop::collection::vec(arb_box(), 0..40)
        .prop_map(|boxes| boxes.into_iter().map(region_from).collect())
}

/// Pages of boxes with positive area.
fn arb_solid_page() -> impl Strategy<Value = Vec<Region>> {
    let solid = prop_oneof![
        (0u32..20, 0u32..20, 1u32..6, 1u32..6)
            .prop_map(|(x, y, w, h)| (x as f64 * 50.0, y as f64 * 50.0, w as f64 * 50.0, h as f64 * 50.0)),
        (0.0..1500.0f64, 0.0..1500.0f64, 1.0..400.0f64, 1.0..400.0f64),
    ];
    prop::collection::vec(solid, 0..40)
        .prop_map(|boxes| boxes.into_iter().map(region_from).collect())
}

// ============================================================================
// XY-Cut Properties
// ============================================================================

/// Property: every region appears exactly once in the output order
#[test]
fn proptest_xycut_is_permutation() {
    proptest!(|(page in arb_page())| {
        let order = XYCutStrategy::new().sorted_indices(&page);
        prop_assert!(order.is_ok(), "ordering failed: {:?}", order.as_ref().err());

        let mut order = order.unwrap_or_default();
        order.sort_unstable();
        prop_assert_eq!(order, (0..page.len()).collect::<Vec<_>>());
    });
}

/// Property: ordering is deterministic
#[test]
fn proptest_xycut_deterministic() {
    proptest!(|(page in arb_page())| {
        let strategy = XYCutStrategy::new();
        prop_assert_eq!(strategy.sorted_indices(&page).ok(), strategy.sorted_indices(&page).ok());
    });
}

/// Property: a single column is read top to bottom
#[test]
fn proptest_single_column_top_to_bottom() {
    proptest!(|(heights in prop::collection::vec(1u32..100, 1..20))| {
        let mut y = 0.0;
        let mut page = Vec::new();
        for h in heights {
            page.push(region_from((100.0, y, 400.0, h as f64)));
            y += h as f64 + 10.0;
        }
        // Feed the column bottom-up
        page.reverse();
        let n = page.len();
        let order = XYCutStrategy::new().sorted_indices(&page).unwrap();
        prop_assert_eq!(order, (0..n).rev().collect::<Vec<_>>());
    });
}

// ============================================================================
// Filter Properties
// ============================================================================

/// Property: no survivor is nested in, or overlaps too much with, another
#[test]
fn proptest_filter_survivors_are_distinct() {
    proptest!(|(page in arb_solid_page(), threshold in 0.05..0.95f64)| {
        let filter = DetectionFilter::new(FilterConfig::default().with_iou_threshold(threshold));
        let kept = filter.survivor_indices(&page).unwrap();

        let boxes: Vec<BoundingBox> = kept
            .iter()
            .map(|&i| page[i].pixel_box(i).unwrap())
            .collect();
        for (a, box_a) in boxes.iter().enumerate() {
            for box_b in boxes.iter().skip(a + 1) {
                prop_assert!(!box_a.contains(box_b) && !box_b.contains(box_a));
                prop_assert!(box_a.iou(box_b) <= threshold);
            }
        }
    });
}

/// Property: survivors are a subsequence of the input, and a non-empty page
/// always keeps at least one region
#[test]
fn proptest_filter_keeps_input_order() {
    proptest!(|(page in arb_page())| {
        let kept = DetectionFilter::default().survivor_indices(&page).unwrap();
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(kept.is_empty(), page.is_empty());
    });
}

// ============================================================================
// Reading Order Properties
// ============================================================================

/// Property: positions and indices are inverse views of one permutation
#[test]
fn proptest_positions_round_trip() {
    proptest!(|(perm in Just((0..30usize).collect::<Vec<_>>()).prop_shuffle())| {
        let order = ReadingOrder::from_indices(perm.clone()).unwrap();
        let positions = order.positions();
        for (position, &index) in perm.iter().enumerate() {
            prop_assert_eq!(positions[index], position);
        }
        prop_assert_eq!(ReadingOrder::from_positions(&positions).unwrap(), order);
    });
}
