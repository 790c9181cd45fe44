//! Simple top-to-bottom, left-to-right reading order strategy.

use crate::error::Result;
use crate::pipeline::ReadingOrderSource;
use crate::region::{bounding_boxes, Region};
use crate::utils::safe_float_cmp;

use super::{ReadingOrder, ReadingOrderStrategy};

/// Simple top-to-bottom, left-to-right reading order.
///
/// This strategy sorts regions by top edge (page coordinates grow downwards,
/// so smaller comes first) then by left edge.
///
/// This is the simplest strategy and works well for single-column pages.
pub struct SimpleStrategy;

impl ReadingOrderStrategy for SimpleStrategy {
    fn order(&self, regions: &[Region]) -> Result<ReadingOrder> {
        let boxes = bounding_boxes(regions)?;
        let mut indices: Vec<usize> = (0..boxes.len()).collect();
        indices.sort_by(|&a, &b| {
            safe_float_cmp(boxes[a].y0, boxes[b].y0)
                .then_with(|| safe_float_cmp(boxes[a].x0, boxes[b].x0))
        });
        Ok(ReadingOrder::from_trusted(indices))
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }

    fn source(&self) -> ReadingOrderSource {
        ReadingOrderSource::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Category;

    fn make_region(x: f64, y: f64) -> Region {
        Region::new(Category::PlainText, vec![x, y, x + 50.0, y + 12.0], 0.9, (1000.0, 1000.0))
    }

    #[test]
    fn test_simple_ordering() {
        let regions = vec![
            make_region(0.0, 100.0), // bottom
            make_region(0.0, 50.0),  // top
            make_region(0.0, 75.0),  // middle
        ];

        let order = SimpleStrategy.order(&regions).unwrap();
        assert_eq!(order.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_left_to_right_on_same_line() {
        let regions = vec![
            make_region(100.0, 100.0),
            make_region(0.0, 100.0),
            make_region(50.0, 100.0),
        ];

        let order = SimpleStrategy.order(&regions).unwrap();
        assert_eq!(order.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let regions = vec![make_region(10.0, 10.0), make_region(10.0, 10.0)];
        assert_eq!(SimpleStrategy.order(&regions).unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_empty_page() {
        assert!(SimpleStrategy.order(&[]).unwrap().is_empty());
    }
}
