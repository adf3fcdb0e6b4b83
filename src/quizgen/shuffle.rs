use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Strategy that decides the order of a question's options.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Uniform Fisher-Yates shuffle backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves options in construction order: answer first, then the distractors.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Applies the same permutation every time: position `k` receives the item
/// that was at `order[k]`. Slices whose length differs from the permutation
/// are left untouched.
#[derive(Debug, Clone)]
pub struct FixedPermutation {
    order: Vec<usize>,
}

impl FixedPermutation {
    /// Returns `None` unless `order` is a permutation of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; order.len()];
        for &idx in &order {
            if idx >= order.len() || seen[idx] {
                return None;
            }
            seen[idx] = true;
        }
        Some(Self { order })
    }
}

impl Shuffler for FixedPermutation {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() != self.order.len() {
            return;
        }
        // pos[original] = current index, at[current index] = original
        let mut pos: Vec<usize> = (0..items.len()).collect();
        let mut at: Vec<usize> = (0..items.len()).collect();
        for (k, &wanted) in self.order.iter().enumerate() {
            let src = pos[wanted];
            items.swap(k, src);
            let displaced = at[k];
            at[src] = displaced;
            pos[displaced] = src;
            at[k] = wanted;
            pos[wanted] = k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_keep_order_is_identity() {
        let mut items = vec![1, 2, 3, 4];
        KeepOrder.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_fixed_permutation_reorders() {
        let mut shuffler = FixedPermutation::new(vec![3, 1, 0, 2]).unwrap();
        let mut items = vec!["a", "b", "c", "d"];
        shuffler.shuffle(&mut items);
        assert_eq!(items, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_fixed_permutation_rejects_invalid_order() {
        assert!(FixedPermutation::new(vec![0, 0, 1]).is_none());
        assert!(FixedPermutation::new(vec![0, 3]).is_none());
    }

    #[test]
    fn test_fixed_permutation_ignores_length_mismatch() {
        let mut shuffler = FixedPermutation::new(vec![1, 0]).unwrap();
        let mut items = vec![1, 2, 3];
        shuffler.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_random_shuffle_keeps_elements() {
        let mut shuffler = RandomShuffler::new(StdRng::seed_from_u64(7));
        let mut items = vec![1, 2, 3, 4, 5];
        shuffler.shuffle(&mut items);
        items.sort();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }
}
