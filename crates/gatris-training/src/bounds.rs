use gatris_evaluator::{Feature, WeightVector};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Closed range `[low, high]` a single weight may take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureBound {
    pub low: f32,
    pub high: f32,
}

impl FeatureBound {
    #[must_use]
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.low..=self.high).contains(&value)
    }

    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.low, self.high)
    }

    /// Samples uniformly from the bound.
    pub fn sample<R>(&self, rng: &mut R) -> f32
    where
        R: Rng + ?Sized,
    {
        rng.random_range(self.low..=self.high)
    }

    fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }
}

/// Per-feature search bounds of the genetic optimizer.
///
/// Defaults: height in `[-2, 0]`, lines in `[0, 2]`, holes in `[-2, 0]`,
/// bumpiness in `[-2, 0]`.
///
/// # Example
///
/// ```
/// use gatris_evaluator::WeightVector;
/// use gatris_training::WeightBounds;
///
/// let bounds = WeightBounds::default();
/// let clamped = bounds.clamp(WeightVector::from_array([-3.0, 0.5, 1.0, -0.1]));
/// assert_eq!(clamped.to_array(), [-2.0, 0.5, 0.0, -0.1]);
/// assert!(bounds.contains(&clamped));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightBounds {
    pub height: FeatureBound,
    pub lines: FeatureBound,
    pub holes: FeatureBound,
    pub bumpiness: FeatureBound,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            height: FeatureBound::new(-2.0, 0.0),
            lines: FeatureBound::new(0.0, 2.0),
            holes: FeatureBound::new(-2.0, 0.0),
            bumpiness: FeatureBound::new(-2.0, 0.0),
        }
    }
}

impl WeightBounds {
    #[must_use]
    pub const fn get(&self, feature: Feature) -> &FeatureBound {
        match feature {
            Feature::Height => &self.height,
            Feature::Lines => &self.lines,
            Feature::Holes => &self.holes,
            Feature::Bumpiness => &self.bumpiness,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for feature in Feature::ALL {
            let bound = self.get(feature);
            if !bound.is_valid() {
                return Err(ConfigError::InvalidBound {
                    feature,
                    low: bound.low,
                    high: bound.high,
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if every weight lies within its bound.
    #[must_use]
    pub fn contains(&self, weights: &WeightVector) -> bool {
        weights.iter().all(|(f, w)| self.get(f).contains(w))
    }

    /// Clamps every weight into its bound.
    #[must_use]
    pub fn clamp(&self, mut weights: WeightVector) -> WeightVector {
        for feature in Feature::ALL {
            let w = weights.get_mut(feature);
            *w = self.get(feature).clamp(*w);
        }
        weights
    }

    /// Draws a weight vector uniformly within the bounds.
    pub fn sample<R>(&self, rng: &mut R) -> WeightVector
    where
        R: Rng + ?Sized,
    {
        WeightVector::from_array(Feature::ALL.map(|f| self.get(f).sample(rng)))
    }
}
