use gatris_evaluator::WeightVector;
use gatris_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation number.
    pub generation: usize,
    pub max_fitness: f32,
    pub avg_fitness: f32,
    pub min_fitness: f32,
    /// Weights of the fittest individual of this generation.
    pub best_weights: WeightVector,
}

impl GenerationRecord {
    /// Summarizes `fitnesses`; `best_weights` must belong to the maximum.
    ///
    /// Returns `None` for an empty generation.
    #[must_use]
    pub fn new(generation: usize, fitnesses: &[f32], best_weights: WeightVector) -> Option<Self> {
        let stats = DescriptiveStats::new(fitnesses.iter().copied())?;
        Some(Self {
            generation,
            max_fitness: stats.max,
            avg_fitness: stats.mean,
            min_fitness: stats.min,
            best_weights,
        })
    }
}

/// Append-only list of generation records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<GenerationRecord>,
}

impl History {
    #[must_use]
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    #[must_use]
    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: GenerationRecord) {
        debug_assert!(
            self.records
                .last()
                .is_none_or(|last| last.generation < record.generation)
        );
        self.records.push(record);
    }
}
