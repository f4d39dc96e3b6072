//! This module contains tools for working with indices as a mask of boolean values. The
//! selection passes use one mask per flag, sized to the candidate set, so that every piece of
//! mutable state is an explicit array indexed by point position.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMask {
    mask: Vec<bool>,
}

impl IndexMask {
    /// Create a new IndexMask with the specified length and initial value.
    ///
    /// # Arguments
    ///
    /// * `len`: the length of the mask
    /// * `value`: the initial value for each index in the mask
    ///
    /// returns: IndexMask
    pub fn new(len: usize, value: bool) -> Self {
        IndexMask {
            mask: vec![value; len],
        }
    }

    /// Get the index values stored in the mask as a vector of usize, in ascending order.
    pub fn to_indices(&self) -> Vec<usize> {
        self.iter_true().collect()
    }

    /// Iterate over the indices which are set to true, in ascending order.
    pub fn iter_true(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v { Some(i) } else { None })
    }

    pub fn count_true(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    /// Set the value at the specified index
    pub fn set(&mut self, index: usize, value: bool) {
        if index < self.mask.len() {
            self.mask[index] = value;
        }
    }

    /// Get the value at the specified index.
    pub fn get(&self, index: usize) -> bool {
        self.mask[index]
    }

    /// Get the length of the mask.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_collect() {
        let mut mask = IndexMask::new(6, false);
        mask.set(4, true);
        mask.set(1, true);
        mask.set(10, true);
        assert_eq!(mask.to_indices(), vec![1, 4]);
        assert_eq!(mask.count_true(), 2);
        assert!(mask.get(4));
        assert!(!mask.get(0));
    }
}
