//! Candidate destinations for each piece kind
//!
//! Everything here is pure geometry: candidates ignore the board contents and may lie outside
//! of it. Filtering is up to the caller.

use crate::types::{PieceKind, Square};

use arrayvec::ArrayVec;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("empty cell has no moves")]
    EmptyPiece,
}

/// Position which may lie outside the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub row: isize,
    pub col: isize,
}

impl Candidate {
    pub const fn new(row: isize, col: isize) -> Candidate {
        Candidate { row, col }
    }

    pub const fn shifted(origin: Square, delta: (isize, isize)) -> Candidate {
        Candidate {
            row: origin.row() as isize + delta.0,
            col: origin.col() as isize + delta.1,
        }
    }

    /// Returns the square for this candidate, or `None` if it lies outside the board
    pub fn to_square(self) -> Option<Square> {
        Square::try_from_parts(self.row, self.col)
    }
}

impl From<Square> for Candidate {
    fn from(sq: Square) -> Candidate {
        Candidate::new(sq.row() as isize, sq.col() as isize)
    }
}

pub type Candidates = ArrayVec<Candidate, 8>;

const ROOK_RAYS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_RAYS: [(isize, isize); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const QUEEN_RAYS: [(isize, isize); 8] = [
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Pawns move both ways and may always advance by two.
const PAWN_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, 0),
    (-2, 0),
    (1, 0),
    (2, 0),
];

/// Ray directions of a sliding piece, empty for other kinds
///
/// The order matches the order of candidates returned by [`candidate_offsets`].
pub const fn rays(kind: PieceKind) -> &'static [(isize, isize)] {
    match kind {
        PieceKind::Rook => &ROOK_RAYS,
        PieceKind::Bishop => &BISHOP_RAYS,
        PieceKind::Queen => &QUEEN_RAYS,
        PieceKind::Knight | PieceKind::King | PieceKind::Pawn | PieceKind::Empty => &[],
    }
}

/// Number of rays of a sliding piece, zero for other kinds
pub const fn ray_count(kind: PieceKind) -> usize {
    rays(kind).len()
}

/// Fixed offsets of a leaper, empty for other kinds
pub const fn leaps(kind: PieceKind) -> &'static [(isize, isize)] {
    match kind {
        PieceKind::Knight => &KNIGHT_OFFSETS,
        PieceKind::King => &KING_OFFSETS,
        PieceKind::Pawn => &PAWN_OFFSETS,
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen | PieceKind::Empty => &[],
    }
}

/// Returns candidate destinations for piece `kind` standing on `origin`
///
/// For sliding pieces, the result contains one candidate per ray at distance `step`. For leapers,
/// `step` is ignored and the whole offset table is returned.
pub fn candidate_offsets(
    kind: PieceKind,
    origin: Square,
    step: usize,
) -> Result<Candidates, GeometryError> {
    let step = step as isize;
    let res = match kind {
        PieceKind::Empty => return Err(GeometryError::EmptyPiece),
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => rays(kind)
            .iter()
            .map(|&(dr, dc)| Candidate::shifted(origin, (dr * step, dc * step)))
            .collect(),
        PieceKind::Knight | PieceKind::King | PieceKind::Pawn => leaps(kind)
            .iter()
            .map(|&delta| Candidate::shifted(origin, delta))
            .collect(),
    };
    Ok(res)
}
