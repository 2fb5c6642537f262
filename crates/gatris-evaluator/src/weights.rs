use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::board_feature::BoardFeatures;

/// The four weighted features, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    #[display("height")]
    Height,
    #[display("lines")]
    Lines,
    #[display("holes")]
    Holes,
    #[display("bumpiness")]
    Bumpiness,
}

impl Feature {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [
        Feature::Height,
        Feature::Lines,
        Feature::Holes,
        Feature::Bumpiness,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Weights of the heuristic evaluator, one per [`Feature`].
///
/// Field order is the canonical feature order and is kept by serde, so the
/// JSON form reads `{"height": .., "lines": .., "holes": .., "bumpiness": ..}`.
/// The text form `h,l,o,b` round-trips through [`FromStr`] and [`fmt::Display`].
///
/// Weights and scores are `f32` on purpose. Near-equal move scores may round
/// differently than in `f64`, so a tie broken by the strict `>` in
/// [`MoveSearch`](crate::MoveSearch) can pick another move than `f64` would.
///
/// # Example
///
/// ```
/// use gatris_evaluator::{Feature, WeightVector};
///
/// let w: WeightVector = "-0.5,0.75,-0.35,-0.2".parse().unwrap();
/// assert_eq!(w.get(Feature::Lines), 0.75);
/// assert_eq!(w.to_string().parse::<WeightVector>().unwrap(), w);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub height: f32,
    pub lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WeightVector {
    /// Hand-tuned weights used when no trained model is supplied.
    pub const DEFAULT: Self = Self {
        height: -0.510_066,
        lines: 0.760_666,
        holes: -0.356_63,
        bumpiness: -0.184_483,
    };

    #[must_use]
    pub const fn from_array([height, lines, holes, bumpiness]: [f32; Feature::LEN]) -> Self {
        Self {
            height,
            lines,
            holes,
            bumpiness,
        }
    }

    #[must_use]
    pub const fn to_array(&self) -> [f32; Feature::LEN] {
        [self.height, self.lines, self.holes, self.bumpiness]
    }

    #[must_use]
    pub const fn get(&self, feature: Feature) -> f32 {
        match feature {
            Feature::Height => self.height,
            Feature::Lines => self.lines,
            Feature::Holes => self.holes,
            Feature::Bumpiness => self.bumpiness,
        }
    }

    pub const fn get_mut(&mut self, feature: Feature) -> &mut f32 {
        match feature {
            Feature::Height => &mut self.height,
            Feature::Lines => &mut self.lines,
            Feature::Holes => &mut self.holes,
            Feature::Bumpiness => &mut self.bumpiness,
        }
    }

    /// Iterates `(feature, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Weighted sum of the features.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn dot(&self, features: &BoardFeatures) -> f32 {
        self.height * features.aggregate_height as f32
            + self.lines * features.complete_lines as f32
            + self.holes * features.holes as f32
            + self.bumpiness * features.bumpiness as f32
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.height, self.lines, self.holes, self.bumpiness
        )
    }
}

/// Error returned when parsing a `h,l,o,b` weight string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseWeightsError {
    #[display("expected {} comma-separated weights (height,lines,holes,bumpiness), got {count}", Feature::LEN)]
    WrongCount { count: usize },
    #[display("invalid weight {value:?}: {source}")]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },
    #[display("weight {value:?} is not finite")]
    NotFinite { value: String },
}

impl FromStr for WeightVector {
    type Err = ParseWeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let Ok(parts) = <[&str; Feature::LEN]>::try_from(parts.as_slice()) else {
            return Err(ParseWeightsError::WrongCount { count: parts.len() });
        };
        let mut values = [0.0; Feature::LEN];
        for (value, part) in values.iter_mut().zip(parts) {
            *value = part
                .parse::<f32>()
                .map_err(|source| ParseWeightsError::InvalidNumber {
                    value: part.to_owned(),
                    source,
                })?;
            if !value.is_finite() {
                return Err(ParseWeightsError::NotFinite {
                    value: part.to_owned(),
                });
            }
        }
        Ok(Self::from_array(values))
    }
}

/// Named, hand-picked weight sets.
///
/// These also seed the first individuals of a fresh GA population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::FromStr)]
pub enum Preset {
    /// [`WeightVector::DEFAULT`].
    #[display("lee")]
    Lee,
    /// Punishes holes and height hard.
    #[display("defensive")]
    Defensive,
    /// Favors clearing lines over keeping the stack low.
    #[display("aggressive")]
    Aggressive,
    #[display("balanced")]
    Balanced,
}

impl Preset {
    pub const ALL: [Self; 4] = [
        Preset::Lee,
        Preset::Defensive,
        Preset::Aggressive,
        Preset::Balanced,
    ];

    #[must_use]
    pub const fn weights(self) -> WeightVector {
        match self {
            Preset::Lee => WeightVector::DEFAULT,
            Preset::Defensive => WeightVector::from_array([-0.6, 0.5, -0.8, -0.3]),
            Preset::Aggressive => WeightVector::from_array([-0.4, 1.0, -0.3, -0.15]),
            Preset::Balanced => WeightVector::from_array([-0.55, 0.65, -0.55, -0.25]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let w: WeightVector = " -0.51, 0.76 ,-0.36,-0.18".parse().unwrap();
        assert_eq!(w.to_array(), [-0.51, 0.76, -0.36, -0.18]);
    }

    #[test]
    fn test_parse_wrong_count() {
        assert_eq!(
            "1,2,3".parse::<WeightVector>(),
            Err(ParseWeightsError::WrongCount { count: 3 })
        );
        assert_eq!(
            "1,2,3,4,5".parse::<WeightVector>(),
            Err(ParseWeightsError::WrongCount { count: 5 })
        );
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = "1,two,3,4".parse::<WeightVector>().unwrap_err();
        assert!(matches!(err, ParseWeightsError::InvalidNumber { ref value, .. } if value == "two"));
        assert!(err.to_string().contains("two"));
        assert!(matches!(
            "1,2,NaN,4".parse::<WeightVector>(),
            Err(ParseWeightsError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for preset in Preset::ALL {
            let w = preset.weights();
            assert_eq!(w.to_string().parse::<WeightVector>().unwrap(), w);
        }
    }

    #[test]
    fn test_serde_field_order() {
        let json = serde_json::to_string(&WeightVector::from_array([1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(
            json,
            r#"{"height":1.0,"lines":2.0,"holes":3.0,"bumpiness":4.0}"#
        );
    }

    #[test]
    fn test_get_and_get_mut_agree_with_array() {
        let mut w = WeightVector::DEFAULT;
        for feature in Feature::ALL {
            assert_eq!(w.get(feature), w.to_array()[feature.index()]);
        }
        *w.get_mut(Feature::Holes) = -1.0;
        assert_eq!(w.holes, -1.0);
    }

    #[test]
    fn test_dot() {
        let w = WeightVector::from_array([-1.0, 2.0, -3.0, -0.5]);
        let features = BoardFeatures {
            aggregate_height: 10,
            complete_lines: 1,
            holes: 2,
            bumpiness: 4,
        };
        assert!((w.dot(&features) - (-10.0 + 2.0 - 6.0 - 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("defensive".parse::<Preset>().unwrap(), Preset::Defensive);
        assert_eq!(Preset::Lee.weights(), WeightVector::default());
    }
}
