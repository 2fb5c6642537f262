use std::fmt;

use gatris_evaluator::GameSummary;
use gatris_stats::{descriptive::DescriptiveStats, distribution::Distribution};

const CLEAR_LABELS: [&str; 4] = ["Singles", "Doubles", "Triples", "Tetrises"];

/// Multi-game report: lines statistics, totals and the lines distribution.
#[derive(Debug, Clone, Copy)]
pub struct GamesSummaryView<'a> {
    games: &'a [GameSummary],
}

impl<'a> GamesSummaryView<'a> {
    pub fn new(games: &'a [GameSummary]) -> Self {
        Self { games }
    }
}

impl fmt::Display for GamesSummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(lines) = DescriptiveStats::from_counts(self.games.iter().map(|g| g.lines_cleared))
        else {
            return write!(f, "No games played");
        };
        let pieces = DescriptiveStats::from_counts(self.games.iter().map(|g| g.pieces_placed));
        let score = DescriptiveStats::from_counts(self.games.iter().map(|g| g.score));

        writeln!(f, "Games:   {}", lines.count)?;
        writeln!(f, "Lines:")?;
        writeln!(f, "  Average: {:.1}", lines.mean)?;
        writeln!(f, "  Median:  {:.1}", lines.median)?;
        writeln!(f, "  Std dev: {:.1}", lines.std_dev)?;
        writeln!(f, "  Best:    {}", lines.max)?;
        writeln!(f, "  Worst:   {}", lines.min)?;
        if let Some(pieces) = pieces {
            writeln!(f, "Pieces:  {:.1} on average", pieces.mean)?;
        }
        if let Some(score) = score {
            writeln!(f, "Score:   {:.1} on average", score.mean)?;
        }

        writeln!(f, "Line clears:")?;
        for (i, label) in CLEAR_LABELS.iter().enumerate() {
            let total: usize = self.games.iter().map(|g| g.line_clear_counts[i + 1]).sum();
            writeln!(f, "  {label:<9} {total}")?;
        }

        let distribution = Distribution::lines_cleared(self.games.iter().map(|g| g.lines_cleared));
        write!(f, "Lines distribution:")?;
        for bucket in distribution.buckets() {
            write!(f, "\n  {:<10} {}", bucket.to_string(), bucket.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(lines: usize, clears: [usize; 5]) -> GameSummary {
        GameSummary {
            lines_cleared: lines,
            pieces_placed: lines * 3,
            score: lines * 40,
            line_clear_counts: clears,
            game_over: true,
            ..GameSummary::default()
        }
    }

    #[test]
    fn test_no_games() {
        assert_eq!(GamesSummaryView::new(&[]).to_string(), "No games played");
    }

    #[test]
    fn test_summary_lines() {
        let games = [game(40, [10, 4, 0, 0, 9]), game(120, [5, 0, 0, 0, 30])];
        let text = GamesSummaryView::new(&games).to_string();
        assert!(text.contains("Games:   2"), "{text}");
        assert!(text.contains("Average: 80.0"), "{text}");
        assert!(text.contains("Best:    120"), "{text}");
        assert!(text.contains("Worst:   40"), "{text}");
        assert!(text.contains("Singles   4"), "{text}");
        assert!(text.contains("Tetrises  39"), "{text}");
        assert!(text.contains("0-50       1"), "{text}");
        assert!(text.contains("100-200    1"), "{text}");
        assert!(text.contains("1000+      0"), "{text}");
    }
}
