//! Genetic operators on [`WeightVector`]s.
//!
//! - **Initialization**: [`seed_individuals`] and [`WeightBounds::sample`]
//! - **Selection**: [`tournament_select`]
//! - **Crossover**: [`uniform_crossover`]
//! - **Mutation**: [`mutate`]
//!
//! # Uniform Crossover
//!
//! Each feature of the child is taken from either parent with probability
//! 1/2. With only four features per individual this keeps parent values
//! intact instead of blending them.
//!
//! # Gaussian Mutation
//!
//! Each feature is perturbed with probability `rate` by noise drawn from
//! `N(0, strength)` and then clamped to its bound, so mutated individuals
//! never leave the search space.

use gatris_evaluator::{Feature, Preset, WeightVector};
use rand::{Rng, seq::IndexedRandom};
use rand_distr::Normal;

use crate::{bounds::WeightBounds, genetic::Individual};

/// Known-good starting points placed at the front of a fresh population,
/// clamped to `bounds`.
#[must_use]
pub fn seed_individuals(bounds: &WeightBounds) -> [WeightVector; 4] {
    Preset::ALL.map(|preset| bounds.clamp(preset.weights()))
}

/// Selects an individual using tournament selection.
///
/// Samples `tournament_size` distinct individuals uniformly and returns the
/// one with the highest fitness. On equal fitness the individual sampled first
/// wins.
///
/// # Panics
///
/// Panics if `population` is empty or `tournament_size` is 0.
pub fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .reduce(|best, ind| if ind.fitness() > best.fitness() { ind } else { best })
        .expect("population must not be empty")
}

/// Builds a child by picking each feature from `p1` or `p2` with equal probability.
pub fn uniform_crossover<R>(p1: &WeightVector, p2: &WeightVector, rng: &mut R) -> WeightVector
where
    R: Rng + ?Sized,
{
    WeightVector::from_array(Feature::ALL.map(|f| {
        if rng.random_bool(0.5) {
            p1.get(f)
        } else {
            p2.get(f)
        }
    }))
}

/// Applies Gaussian mutation in place.
///
/// For each feature, with probability `rate`, adds a sample of `N(0, strength)`
/// and clamps the result to the feature's bound. A zero `strength` leaves the
/// weights unchanged.
///
/// # Panics
///
/// Panics if `strength` is negative or not finite, or `rate` is outside
/// `[0, 1]`. Both are rejected earlier by
/// [`GeneticConfig::validate`](crate::GeneticConfig::validate).
pub fn mutate<R>(
    weights: &mut WeightVector,
    rate: f32,
    strength: f32,
    bounds: &WeightBounds,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, strength).expect("mutation strength must be finite and >= 0");
    for feature in Feature::ALL {
        if rng.random_bool(rate.into()) {
            let w = weights.get_mut(feature);
            *w = bounds.get(feature).clamp(*w + rng.sample(normal));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::bounds::FeatureBound;

    fn individuals(fitnesses: &[f32]) -> Vec<Individual> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &fitness)| {
                #[expect(clippy::cast_precision_loss)]
                let w = WeightVector::from_array([-(i as f32), 0.0, 0.0, 0.0]);
                Individual::new(w, fitness)
            })
            .collect()
    }

    #[test]
    fn test_tournament_returns_population_member() {
        let population = individuals(&[1.0, 5.0, 3.0, 2.0, 4.0]);
        let mut rng = Pcg32::seed_from_u64(0);
        for _ in 0..100 {
            let winner = tournament_select(&population, 2, &mut rng);
            assert!(population.iter().any(|ind| ind.weights() == winner.weights()));
        }
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let population = individuals(&[1.0, 5.0, 3.0, 2.0, 4.0]);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..20 {
            let winner = tournament_select(&population, population.len(), &mut rng);
            assert_eq!(winner.fitness(), 5.0);
        }
    }

    #[test]
    fn test_crossover_takes_each_feature_from_a_parent() {
        let p1 = WeightVector::from_array([-1.0, 1.0, -1.0, -1.0]);
        let p2 = WeightVector::from_array([-2.0, 2.0, -2.0, -2.0]);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut saw_mixed = false;
        for _ in 0..50 {
            let child = uniform_crossover(&p1, &p2, &mut rng);
            for feature in Feature::ALL {
                let v = child.get(feature);
                assert!(v == p1.get(feature) || v == p2.get(feature));
            }
            saw_mixed |= child != p1 && child != p2;
        }
        assert!(saw_mixed);
    }

    #[test]
    fn test_mutation_stays_within_bounds() {
        let bounds = WeightBounds::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut w = WeightVector::DEFAULT;
        for _ in 0..500 {
            mutate(&mut w, 1.0, 5.0, &bounds, &mut rng);
            assert!(bounds.contains(&w), "{w:?}");
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let bounds = WeightBounds::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut w = WeightVector::DEFAULT;
        mutate(&mut w, 0.0, 1.0, &bounds, &mut rng);
        assert_eq!(w, WeightVector::DEFAULT);
    }

    #[test]
    fn test_seed_individuals_are_clamped() {
        let bounds = WeightBounds {
            lines: FeatureBound::new(0.0, 0.6),
            ..WeightBounds::default()
        };
        let seeds = seed_individuals(&bounds);
        assert_eq!(seeds[0], WeightVector::from_array([-0.510_066, 0.6, -0.356_63, -0.184_483]));
        assert!(seeds.iter().all(|w| bounds.contains(w)));
    }
}
