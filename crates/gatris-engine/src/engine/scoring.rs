/// Points awarded per placement, indexed by the number of lines it cleared.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_CLEAR_SCORES: [usize; 5] = [0, 40, 100, 300, 1200];

/// Returns the points awarded for clearing `lines` lines in one placement.
///
/// Counts beyond the table (unreachable with standard pieces) score
/// `lines * 400`.
///
/// # Example
///
/// ```
/// use gatris_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(4), 1200);
/// assert_eq!(line_clear_score(5), 2000);
/// ```
#[must_use]
pub const fn line_clear_score(lines: usize) -> usize {
    if lines < LINE_CLEAR_SCORES.len() {
        LINE_CLEAR_SCORES[lines]
    } else {
        lines * 400
    }
}

/// Running totals for a single game.
///
/// # Example
///
/// ```
/// use gatris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_placement(0);
/// stats.record_placement(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.lines_cleared(), 4);
/// assert_eq!(stats.pieces_placed(), 2);
/// assert_eq!(stats.line_clear_counts(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    pieces_placed: usize,
    lines_cleared: usize,
    line_clear_counts: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            pieces_placed: 0,
            lines_cleared: 0,
            line_clear_counts: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn pieces_placed(&self) -> usize {
        self.pieces_placed
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Returns how many placements cleared 0, 1, 2, 3 and 4 lines.
    #[must_use]
    pub const fn line_clear_counts(&self) -> &[usize; 5] {
        &self.line_clear_counts
    }

    /// Records one successful placement that cleared `lines` lines.
    pub const fn record_placement(&mut self, lines: usize) {
        self.pieces_placed += 1;
        self.lines_cleared += lines;
        if lines < self.line_clear_counts.len() {
            self.line_clear_counts[lines] += 1;
        }
        self.score += line_clear_score(lines);
    }
}
