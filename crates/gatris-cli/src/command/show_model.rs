use std::path::PathBuf;

use crate::schema::model::TrainedModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowModelArg {
    /// Trained model file
    #[arg(long, default_value = "best_model.json")]
    model: PathBuf,
}

pub(crate) fn run(arg: &ShowModelArg) -> anyhow::Result<()> {
    let model = TrainedModel::open(&arg.model)?;

    println!("Model: {}", arg.model.display());
    println!("  {}", model.info);
    println!("  Fitness:                {:.1} lines", model.fitness);
    println!("  Generation:             {}", model.generation);
    println!("  Trained with lookahead: {}", model.trained_with_lookahead);
    println!("  Trained at:             {}", model.trained_at);
    println!("Weights:");
    for (feature, value) in model.weights.iter() {
        println!("  {:<12}: {value:+.6}", feature.to_string());
    }
    println!();
    println!(
        "Use them with: gatris play --weights={}",
        model.weights
    );
    Ok(())
}
