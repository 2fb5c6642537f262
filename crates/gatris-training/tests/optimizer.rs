use gatris_training::{
    ConfigError, FeatureBound, GeneticConfig, GeneticOptimizer, ScopedThreads, Sequential,
    WeightBounds,
};

fn small_config(seed: u64) -> GeneticConfig {
    GeneticConfig {
        population_size: 10,
        generations: 4,
        games_per_individual: 2,
        elite_size: 2,
        tournament_size: 3,
        mutation_rate: 0.5,
        max_pieces: Some(40),
        seed: Some(seed),
        ..GeneticConfig::default()
    }
}

#[test]
fn best_ever_never_decreases() {
    let mut optimizer = GeneticOptimizer::new(small_config(11)).unwrap();
    let mut previous: Option<f32> = None;
    optimizer
        .run(&Sequential, |report| {
            if let Some(previous) = previous {
                assert!(report.best_ever.fitness >= previous);
            }
            assert!(report.best_ever.fitness >= report.record.max_fitness);
            previous = Some(report.best_ever.fitness);
            Ok::<_, ()>(())
        })
        .unwrap();
    let best = optimizer.best_ever().unwrap();
    let history_max = optimizer
        .history()
        .records()
        .iter()
        .map(|r| r.max_fitness)
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(best.fitness, history_max);
}

#[test]
fn population_size_is_constant() {
    let mut optimizer = GeneticOptimizer::new(small_config(3)).unwrap();
    assert_eq!(optimizer.population().len(), 10);
    while optimizer.step(&Sequential).is_some() {
        assert_eq!(optimizer.population().len(), 10);
    }
    assert_eq!(optimizer.history().len(), 4);
}

#[test]
fn population_stays_within_narrow_bounds() {
    let bounds = WeightBounds {
        height: FeatureBound::new(-0.6, -0.4),
        lines: FeatureBound::new(0.5, 0.9),
        holes: FeatureBound::new(-0.5, -0.2),
        bumpiness: FeatureBound::new(-0.3, -0.1),
    };
    let config = GeneticConfig {
        bounds,
        mutation_rate: 1.0,
        mutation_strength: 2.0,
        ..small_config(5)
    };
    let mut optimizer = GeneticOptimizer::new(config).unwrap();
    assert!(optimizer.population().iter().all(|w| bounds.contains(w)));
    while optimizer.step(&Sequential).is_some() {
        assert!(optimizer.population().iter().all(|w| bounds.contains(w)));
    }
    assert!(bounds.contains(&optimizer.best_ever().unwrap().weights));
}

#[test]
fn seeded_runs_are_reproducible_across_runners() {
    let mut sequential = GeneticOptimizer::new(small_config(21)).unwrap();
    sequential.run(&Sequential, |_| Ok::<_, ()>(())).unwrap();

    let mut threaded = GeneticOptimizer::new(small_config(21)).unwrap();
    threaded.run(&ScopedThreads::new(4), |_| Ok::<_, ()>(())).unwrap();

    assert_eq!(sequential.history(), threaded.history());
    assert_eq!(sequential.best_ever(), threaded.best_ever());
    assert_eq!(sequential.population(), threaded.population());
}

#[test]
fn lookahead_training_runs() {
    let config = GeneticConfig {
        population_size: 4,
        generations: 2,
        games_per_individual: 1,
        elite_size: 1,
        tournament_size: 2,
        lookahead: true,
        max_pieces: Some(15),
        seed: Some(2),
        ..GeneticConfig::default()
    };
    let mut optimizer = GeneticOptimizer::new(config).unwrap();
    optimizer.run(&Sequential, |_| Ok::<_, ()>(())).unwrap();
    assert!(optimizer.is_finished());
    assert!(optimizer.best_ever().unwrap().generation <= 2);
}

#[test]
fn invalid_tournament_is_rejected() {
    let config = GeneticConfig {
        tournament_size: 0,
        ..small_config(0)
    };
    assert!(matches!(
        GeneticOptimizer::new(config),
        Err(ConfigError::InvalidTournamentSize { .. })
    ));
}
