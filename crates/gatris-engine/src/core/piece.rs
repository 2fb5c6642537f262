use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Offset of a single cell as `(row, col)`, relative to the piece origin.
///
/// The origin is the top-left corner of the piece's bounding box. Rows grow
/// downward and columns grow rightward, matching [`Board`](super::board::Board).
pub type CellOffset = (usize, usize);

/// One rotation state of a tetromino: the four cells it occupies.
pub type PieceShape = [CellOffset; 4];

/// The seven tetromino types.
///
/// Each kind owns a fixed, ordered list of distinct rotation states. Pieces
/// with rotational symmetry list fewer states (O has one; I, S and Z have two).
///
/// # Example
///
/// ```
/// use gatris_engine::PieceKind;
///
/// assert_eq!(PieceKind::O.rotation_count(), 1);
/// assert_eq!(PieceKind::T.rotation_count(), 4);
/// assert_eq!(PieceKind::I.shape(0), Some(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns every distinct rotation state of this piece, in rotation index order.
    #[must_use]
    pub const fn shapes(self) -> &'static [PieceShape] {
        PIECE_SHAPES[self as usize]
    }

    /// Number of distinct rotation states (always at least 1).
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.shapes().len()
    }

    /// Returns the cells of the given rotation state, or `None` for an unknown index.
    #[must_use]
    pub fn shape(self, rotation: usize) -> Option<&'static PieceShape> {
        self.shapes().get(rotation)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

// Indexed by `PieceKind as usize`.
const PIECE_SHAPES: [&[PieceShape]; PieceKind::LEN] = [
    // I-piece: horizontal, vertical
    &[
        [(0, 0), (0, 1), (0, 2), (0, 3)],
        [(0, 0), (1, 0), (2, 0), (3, 0)],
    ],
    // O-piece
    &[[(0, 0), (0, 1), (1, 0), (1, 1)]],
    // T-piece: up, right, down, left
    &[
        [(0, 1), (1, 0), (1, 1), (1, 2)],
        [(0, 0), (1, 0), (1, 1), (2, 0)],
        [(1, 0), (1, 1), (1, 2), (2, 1)],
        [(0, 1), (1, 0), (1, 1), (2, 1)],
    ],
    // S-piece: horizontal, vertical
    &[
        [(0, 1), (0, 2), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (1, 1), (2, 1)],
    ],
    // Z-piece: horizontal, vertical
    &[
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(0, 1), (1, 0), (1, 1), (2, 0)],
    ],
    // J-piece: up, right, down, left
    &[
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(0, 0), (0, 1), (1, 0), (2, 0)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 0), (2, 1)],
    ],
    // L-piece: up, right, down, left
    &[
        [(0, 2), (1, 0), (1, 1), (1, 2)],
        [(0, 0), (1, 0), (2, 0), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 0)],
        [(0, 0), (0, 1), (1, 1), (2, 1)],
    ],
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn cell_set(shape: &PieceShape) -> BTreeSet<CellOffset> {
        shape.iter().copied().collect()
    }

    #[test]
    fn test_rotation_counts() {
        let counts: Vec<_> = PieceKind::ALL.iter().map(|k| k.rotation_count()).collect();
        assert_eq!(counts, [2, 1, 4, 2, 2, 4, 4]);
    }

    #[test]
    fn test_shapes_have_four_distinct_cells() {
        for kind in PieceKind::ALL {
            assert!(kind.rotation_count() >= 1);
            for shape in kind.shapes() {
                assert_eq!(cell_set(shape).len(), 4, "{kind:?} has duplicate cells");
            }
        }
    }

    #[test]
    fn test_rotation_states_are_distinct() {
        for kind in PieceKind::ALL {
            let states: BTreeSet<_> = kind.shapes().iter().map(cell_set).collect();
            assert_eq!(states.len(), kind.rotation_count(), "{kind:?}");
        }
    }

    #[test]
    fn test_unknown_rotation_is_none() {
        assert!(PieceKind::O.shape(1).is_none());
        assert!(PieceKind::T.shape(3).is_some());
        assert!(PieceKind::T.shape(4).is_none());
    }

    #[test]
    fn test_catalog_order_matches_discriminant() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn test_piece_kind_chars_are_distinct() {
        let chars: BTreeSet<char> = PieceKind::ALL.iter().map(|kind| kind.as_char()).collect();
        assert_eq!(chars.len(), PieceKind::LEN);
        assert_eq!(PieceKind::T.as_char(), 'T');
    }

    #[test]
    fn test_uniform_sampling_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let seen: BTreeSet<u8> = (0..500)
            .map(|_| rng.random::<PieceKind>() as u8)
            .collect();
        assert_eq!(seen.len(), PieceKind::LEN);
    }
}
