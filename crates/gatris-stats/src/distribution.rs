use std::fmt;

/// One bucket of a [`Distribution`]: the half-open range `[low, high)`, with
/// `high == None` for the open-ended last bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub low: u64,
    pub high: Option<u64>,
    pub count: usize,
}

impl Bucket {
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        value >= self.low && self.high.is_none_or(|high| value < high)
    }
}

/// Renders `"50-100"` or `"1000+"`.
impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.high {
            Some(high) => write!(f, "{}-{high}", self.low),
            None => write!(f, "{}+", self.low),
        }
    }
}

/// Counts of values falling into fixed, ascending buckets.
///
/// # Example
///
/// ```
/// use gatris_stats::distribution::Distribution;
///
/// let dist = Distribution::new(&[0, 50, 100], [10, 49, 50, 250]);
/// let counts: Vec<_> = dist.buckets().iter().map(|b| b.count).collect();
/// assert_eq!(counts, [2, 1, 1]);
/// assert_eq!(dist.buckets()[2].to_string(), "100+");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    buckets: Vec<Bucket>,
}

impl Distribution {
    /// Bucket edges for lines cleared per game.
    pub const LINES_CLEARED_EDGES: [u64; 6] = [0, 50, 100, 200, 500, 1000];

    /// Builds a distribution over `edges`, which must be strictly ascending.
    /// Values below the first edge are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `edges` is empty or not strictly ascending.
    #[must_use]
    pub fn new<I>(edges: &[u64], values: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        assert!(!edges.is_empty(), "at least one bucket edge is required");
        assert!(
            edges.is_sorted_by(|a, b| a < b),
            "bucket edges must be strictly ascending"
        );

        let mut buckets: Vec<Bucket> = edges
            .iter()
            .enumerate()
            .map(|(i, &low)| Bucket {
                low,
                high: edges.get(i + 1).copied(),
                count: 0,
            })
            .collect();
        for value in values {
            if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(value)) {
                bucket.count += 1;
            }
        }
        Self { buckets }
    }

    /// Distribution of lines cleared per game over [`Self::LINES_CLEARED_EDGES`].
    #[must_use]
    pub fn lines_cleared<I>(values: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(
            &Self::LINES_CLEARED_EDGES,
            values.into_iter().map(|v| v as u64),
        )
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
