use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator's RNG. The same seed and the same
/// [`PieceSource`] always produce the same piece sequence, which is what makes
/// fitness evaluation and model comparison reproducible.
///
/// The text form is 32 lowercase hex digits. It is used both by
/// [`fmt::Display`]/[`FromStr`] and by serde, so a seed printed after a game
/// can be stored in a report and fed back to replay that game.
///
/// # Example
///
/// ```
/// use gatris_engine::{PieceGenerator, PieceSeed, PieceSource};
///
/// let seed = PieceSeed::from_u64(42);
/// let a: Vec<_> = PieceGenerator::new(PieceSource::Bag, seed).take(14).collect();
/// let replayed: PieceSeed = seed.to_string().parse().unwrap();
/// let b: Vec<_> = PieceGenerator::new(PieceSource::Bag, replayed).take(14).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    const HEX_DIGITS: usize = 32;

    /// Expands a 64-bit integer into a full piece seed.
    ///
    /// Convenient for command-line seeds and for deriving per-game seeds.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Pcg32::seed_from_u64(seed).random()
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing the hex form of a [`PieceSeed`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("expected {} hex digits in piece seed, got {len} characters", PieceSeed::HEX_DIGITS)]
    WrongLength { len: usize },
    #[display("invalid hex digit {digit:?} in piece seed")]
    InvalidDigit { digit: char },
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != Self::HEX_DIGITS {
            return Err(ParsePieceSeedError::WrongLength { len });
        }
        let digits = s
            .chars()
            .map(|digit| {
                digit
                    .to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(ParsePieceSeedError::InvalidDigit { digit })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        let mut bytes = [0; 16];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }
}

impl From<PieceSeed> for String {
    fn from(seed: PieceSeed) -> Self {
        seed.to_string()
    }
}

impl TryFrom<String> for PieceSeed {
    type Error = ParsePieceSeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How upcoming pieces are drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum PieceSource {
    /// Each piece is drawn independently and uniformly from the seven kinds.
    #[default]
    #[display("uniform")]
    Uniform,
    /// 7-bag randomizer: every run of seven consecutive draws aligned to a bag
    /// boundary contains each kind exactly once.
    #[display("bag")]
    Bag,
}

impl PieceSource {
    /// Source used when none is configured: the bag for lookahead play,
    /// uniform draws otherwise.
    #[must_use]
    pub const fn default_for(lookahead: bool) -> Self {
        if lookahead { Self::Bag } else { Self::Uniform }
    }
}

/// 7-bag randomizer.
///
/// Holds at most seven pending pieces. When the bag is empty it is refilled
/// with one of each kind in shuffled order, then pieces are drawn from it
/// until it is empty again.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use gatris_engine::{PieceBag, PieceSeed};
///
/// let mut bag = PieceBag::with_seed(PieceSeed::from_u64(1));
/// let first_bag: HashSet<_> = (0..7).map(|_| bag.draw()).collect();
/// assert_eq!(first_bag.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    pending: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl PieceBag {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            pending: ArrayVec::new(),
        }
    }

    fn refill(&mut self) {
        debug_assert!(self.pending.is_empty());
        let mut new_bag = PieceKind::ALL;
        new_bag.shuffle(&mut self.rng);
        self.pending.extend(new_bag);
    }

    /// Draws the next piece, refilling the bag first if it is empty.
    ///
    /// # Panics
    ///
    /// Never in practice: an empty bag is refilled with all seven kinds
    /// before the draw.
    pub fn draw(&mut self) -> PieceKind {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending
            .pop()
            .expect("piece bag should never be empty after a refill")
    }

    /// Returns the pieces still waiting in the current bag, in no particular order.
    #[must_use]
    pub fn pending(&self) -> &[PieceKind] {
        &self.pending
    }
}

/// Independent uniform piece draws.
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: Pcg32,
}

impl UniformPieces {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    pub fn draw(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// A seeded stream of pieces from either source.
///
/// The generator is an endless [`Iterator`]; `next()` never returns `None`.
#[derive(Debug, Clone)]
pub enum PieceGenerator {
    Uniform(UniformPieces),
    Bag(PieceBag),
}

impl PieceGenerator {
    #[must_use]
    pub fn new(source: PieceSource, seed: PieceSeed) -> Self {
        match source {
            PieceSource::Uniform => Self::Uniform(UniformPieces::with_seed(seed)),
            PieceSource::Bag => Self::Bag(PieceBag::with_seed(seed)),
        }
    }

    #[must_use]
    pub fn source(&self) -> PieceSource {
        match self {
            Self::Uniform(_) => PieceSource::Uniform,
            Self::Bag(_) => PieceSource::Bag,
        }
    }

    pub fn draw(&mut self) -> PieceKind {
        match self {
            Self::Uniform(uniform) => uniform.draw(),
            Self::Bag(bag) => bag.draw(),
        }
    }
}

impl Iterator for PieceGenerator {
    type Item = PieceKind;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}
