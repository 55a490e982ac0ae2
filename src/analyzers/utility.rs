/// Running total and count for one aggregation bucket.
///
/// Buckets built from disjoint subsets can be combined with [`merge`](Self::merge)
/// in any order; the mean is always derived from the merged total and count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DelayAccumulator {
    pub total: f64,
    pub count: usize,
}

impl DelayAccumulator {
    pub fn push(&mut self, minutes: f64) {
        self.total += minutes;
        self.count += 1;
    }

    pub fn merge(&mut self, other: DelayAccumulator) {
        self.total += other.total;
        self.count += other.count;
    }

    /// Arithmetic mean. Returns 0.0 for an empty bucket.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(DelayAccumulator::default().mean(), 0.0);
    }

    #[test]
    fn test_push_and_mean() {
        let mut acc = DelayAccumulator::default();
        acc.push(5.0);
        acc.push(10.0);
        assert_eq!(acc.count, 2);
        assert_eq!(acc.total, 15.0);
        assert_eq!(acc.mean(), 7.5);
    }

    #[test]
    fn test_merge_is_not_average_of_averages() {
        let mut left = DelayAccumulator::default();
        left.push(1.0);

        let mut right = DelayAccumulator::default();
        right.push(4.0);
        right.push(4.0);
        right.push(4.0);

        let mut merged = left;
        merged.merge(right);
        let mut reversed = right;
        reversed.merge(left);

        assert_eq!(merged, reversed);
        assert_eq!(merged.mean(), 13.0 / 4.0);
        assert_ne!(merged.mean(), (left.mean() + right.mean()) / 2.0);
    }
}
