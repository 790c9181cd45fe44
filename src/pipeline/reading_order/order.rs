//! Validated reading order permutations.

use serde::Serialize;

use crate::error::{Error, Result};

/// A permutation of `0..n` listing input indices in reading order.
///
/// `as_slice()[k]` is the input index read at position `k`. The inverse view,
/// [`positions`](Self::positions), gives the position of every input index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadingOrder {
    indices: Vec<usize>,
}

impl ReadingOrder {
    /// Accept an order computed elsewhere, e.g. by a neural reading-order
    /// model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPermutation`] when an index is out of range or
    /// repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::ReadingOrder;
    ///
    /// let order = ReadingOrder::from_indices(vec![2, 0, 1]).unwrap();
    /// assert_eq!(order.apply(vec!["a", "b", "c"]), vec!["c", "a", "b"]);
    ///
    /// assert!(ReadingOrder::from_indices(vec![0, 0]).is_err());
    /// ```
    pub fn from_indices(indices: Vec<usize>) -> Result<Self> {
        let n = indices.len();
        let mut seen = vec![false; n];
        for (position, &index) in indices.iter().enumerate() {
            if index >= n {
                return Err(Error::InvalidPermutation(format!(
                    "index {} at position {} is out of range for {} items",
                    index, position, n
                )));
            }
            if seen[index] {
                return Err(Error::InvalidPermutation(format!(
                    "index {} appears more than once (again at position {})",
                    index, position
                )));
            }
            seen[index] = true;
        }
        Ok(Self { indices })
    }

    /// Build an order from per-item ranks: `positions[i]` is where input `i`
    /// is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_oxide::ReadingOrder;
    ///
    /// // Item 0 is read second, item 1 third, item 2 first
    /// let order = ReadingOrder::from_positions(&[1, 2, 0]).unwrap();
    /// assert_eq!(order.as_slice(), &[2, 0, 1]);
    /// ```
    pub fn from_positions(positions: &[usize]) -> Result<Self> {
        Self::from_indices(positions.to_vec()).map(|inverse| Self {
            indices: inverse.positions(),
        })
    }

    /// The order that reads items as given.
    pub fn identity(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
        }
    }

    /// Wrap indices already known to form a permutation.
    pub(crate) fn from_trusted(indices: Vec<usize>) -> Self {
        debug_assert!(Self::from_indices(indices.clone()).is_ok());
        Self { indices }
    }

    /// Inverse permutation: for each input index, its reading position.
    pub fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.indices.len()];
        for (position, &index) in self.indices.iter().enumerate() {
            positions[index] = position;
        }
        positions
    }

    /// Reorder `items` into reading order.
    ///
    /// `items` must have as many entries as the order; extra items are
    /// dropped and missing ones skipped.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        self.indices
            .iter()
            .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
            .collect()
    }

    /// Input indices in reading order.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Consume the order, returning the indices.
    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }

    /// Number of items ordered.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the order is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<ReadingOrder> for Vec<usize> {
    fn from(order: ReadingOrder) -> Self {
        order.indices
    }
}
