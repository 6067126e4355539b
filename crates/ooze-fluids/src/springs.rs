use std::collections::HashMap;

/// Rest length that the spring arithmetic sees for a pair without a spring.
pub const ABSENT: f64 = -1.0;

/// Sparse, symmetric map from particle pairs to spring rest lengths.
///
/// Pairs are keyed as `(min(i, j), max(i, j))`, so `(i, j)` and `(j, i)` always address the
/// same spring.
#[derive(Debug, Clone, Default)]
pub struct SpringGraph {
    springs: HashMap<(usize, usize), f64>,
}

#[inline(always)]
fn key(i: usize, j: usize) -> (usize, usize) {
    debug_assert_ne!(i, j, "a particle cannot be sprung to itself");
    (i.min(j), i.max(j))
}

impl SpringGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.springs.get(&key(i, j)).copied()
    }

    /// The rest length of spring `(i, j)`, or [`ABSENT`] if there is none.
    pub fn rest_length(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).unwrap_or(ABSENT)
    }

    /// Inserts a spring, returning the previous rest length if there was one.
    pub fn insert(&mut self, i: usize, j: usize, rest_length: f64) -> Option<f64> {
        self.springs.insert(key(i, j), rest_length)
    }

    pub fn remove(&mut self, i: usize, j: usize) -> Option<f64> {
        self.springs.remove(&key(i, j))
    }

    /// Removes every spring longer than `max_rest_length`, returning how many were removed.
    pub fn prune(&mut self, max_rest_length: f64) -> usize {
        let before = self.springs.len();
        self.springs.retain(|_, &mut l| l <= max_rest_length);
        before - self.springs.len()
    }

    /// All springs in ascending `(i, j)` order.
    pub fn sorted(&self) -> Vec<((usize, usize), f64)> {
        let mut springs: Vec<_> = self.springs.iter().map(|(&k, &l)| (k, l)).collect();
        springs.sort_unstable_by_key(|&(k, _)| k);
        springs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &f64)> {
        self.springs.iter()
    }
}
