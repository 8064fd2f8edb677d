//! Combinations
//!
//! Iterative generation of k-element index combinations in lexicographic order.

use smallvec::SmallVec;

/// Indices of a single combination.
pub type Combination = SmallVec<[usize; 8]>;

/// Iterator over every `k`-element combination of `0..n`, in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Combination,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Create an iterator over the `k`-element combinations of `0..n`.
    ///
    /// Yields nothing when `k` is zero or larger than `n`.
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k == 0 || k > n,
        }
    }

    fn advance(&mut self) -> bool {
        let k = self.indices.len();

        // Rightmost position that can still move right.
        let Some((position, value)) = self
            .indices
            .iter()
            .copied()
            .enumerate()
            .rev()
            .find(|&(i, value)| value < self.n - k + i)
        else {
            return false;
        };

        for (offset, slot) in self.indices.iter_mut().skip(position).enumerate() {
            *slot = value + 1 + offset;
        }

        true
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;

            return Some(self.indices.clone());
        }

        if self.advance() {
            Some(self.indices.clone())
        } else {
            self.done = true;

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(n: usize, k: usize) -> Vec<Vec<usize>> {
        Combinations::new(n, k).map(|c| c.to_vec()).collect()
    }

    #[test]
    fn four_choose_two_in_lexicographic_order() {
        assert_eq!(
            collect(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn choose_all_yields_single_combination() {
        assert_eq!(collect(3, 3), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn choose_one_yields_each_index() {
        assert_eq!(collect(3, 1), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn degenerate_sizes_yield_nothing() {
        assert!(collect(3, 0).is_empty());
        assert!(collect(2, 3).is_empty());
        assert!(collect(0, 1).is_empty());
    }

    #[test]
    fn count_matches_binomial_coefficient() {
        assert_eq!(Combinations::new(10, 4).count(), 210);
    }
}
