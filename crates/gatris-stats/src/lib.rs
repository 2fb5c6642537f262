//! Statistics helpers for training reports and play summaries.
//!
//! - [`descriptive`]: min, max, mean, median and standard deviation of a dataset
//! - [`distribution`]: counts over fixed buckets (e.g. lines cleared per game)
//!
//! # Examples
//!
//! ```
//! use gatris_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
pub mod distribution;
