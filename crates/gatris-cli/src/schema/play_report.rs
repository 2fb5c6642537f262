use std::path::Path;

use gatris_engine::{PieceSeed, PieceSource};
use gatris_evaluator::{GameSummary, WeightVector};
use serde::{Deserialize, Serialize};

use crate::util;

/// Settings and results of a `gatris play` run.
///
/// Holds everything needed to play the same games again with `--replay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayReport {
    pub weights: WeightVector,
    pub lookahead: bool,
    pub piece_source: PieceSource,
    pub max_pieces: Option<usize>,
    pub games: Vec<PlayedGame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayedGame {
    pub piece_seed: PieceSeed,
    pub summary: GameSummary,
}

impl PlayReport {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let report: Self = util::read_json_file("play report", path)?;
        anyhow::ensure!(
            !report.games.is_empty(),
            "Play report {} records no games",
            path.display()
        );
        Ok(report)
    }

    pub fn piece_seeds(&self) -> Vec<PieceSeed> {
        self.games.iter().map(|game| game.piece_seed).collect()
    }
}
