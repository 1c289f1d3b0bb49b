use serde::Serialize;

/// One `(dimension value, count)` pair of a derived table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
}

/// Ordered output of an aggregator.
///
/// Group counters keep buckets sorted by count descending; the daily counter
/// keeps them in date order. `top` and `bottom` are plain slices of that
/// order, so for short tables they can overlap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary<K> {
    buckets: Vec<Bucket<K>>,
}

impl<K> Summary<K> {
    pub fn new(buckets: Vec<Bucket<K>>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket<K>> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Largest count, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// First `n` buckets.
    pub fn top(&self, n: usize) -> &[Bucket<K>] {
        &self.buckets[..n.min(self.buckets.len())]
    }

    /// Last `n` buckets, still in table order.
    pub fn bottom(&self, n: usize) -> &[Bucket<K>] {
        &self.buckets[self.buckets.len().saturating_sub(n)..]
    }
}

impl<K> Default for Summary<K> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<K> FromIterator<(K, usize)> for Summary<K> {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, count)| Bucket { key, count })
                .collect(),
        )
    }
}

impl<'a, K> IntoIterator for &'a Summary<K> {
    type Item = &'a Bucket<K>;
    type IntoIter = std::slice::Iter<'a, Bucket<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Summary<&'static str> {
        [("a", 5), ("b", 4), ("c", 2), ("d", 1)].into_iter().collect()
    }

    #[test]
    fn slices_clamp_to_length() {
        let s = sample();
        assert_eq!(s.top(2).len(), 2);
        assert_eq!(s.top(10).len(), 4);
        assert_eq!(s.bottom(10).len(), 4);
        assert_eq!(s.bottom(1)[0].key, "d");
        assert_eq!(s.total(), 12);
        assert_eq!(s.max_count(), 5);
    }

    #[test]
    fn top_and_bottom_overlap_on_short_tables() {
        let s = sample();
        let top: Vec<_> = s.top(3).iter().map(|b| b.key).collect();
        let bottom: Vec<_> = s.bottom(3).iter().map(|b| b.key).collect();
        assert_eq!(top, vec!["a", "b", "c"]);
        assert_eq!(bottom, vec!["b", "c", "d"]);
    }

    #[test]
    fn empty_summary() {
        let s: Summary<String> = Summary::default();
        assert!(s.is_empty());
        assert_eq!(s.total(), 0);
        assert_eq!(s.max_count(), 0);
        assert!(s.top(5).is_empty());
        assert!(s.bottom(5).is_empty());
    }
}
