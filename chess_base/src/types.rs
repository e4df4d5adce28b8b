use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("square ({x}, {y}) is outside the board")]
    OutOfBounds { x: u8, y: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceKindParseError {
    #[error("unknown piece name {0:?}")]
    UnknownName(String),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("piece kind {kind:?} cannot have owner {owner:?}")]
    OwnerMismatch {
        kind: PieceKind,
        owner: Option<Color>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const fn from_index(val: usize) -> Square {
        assert!(val < 64, "square must be between 0 and 63");
        Square(val as u8)
    }

    pub const fn from_parts(row: usize, col: usize) -> Square {
        assert!(row < 8 && col < 8, "row and column must be between 0 and 7");
        Square(((row as u8) << 3) | col as u8)
    }

    pub fn try_from_parts(row: isize, col: isize) -> Option<Square> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        Some(Square::from_parts(row as usize, col as usize))
    }

    /// Converts public 1-indexed coordinates into a square
    ///
    /// `x` selects the row and `y` selects the column.
    pub fn from_public(x: u8, y: u8) -> Result<Square, SquareError> {
        if !(1..=8).contains(&x) || !(1..=8).contains(&y) {
            return Err(SquareError::OutOfBounds { x, y });
        }
        Ok(Square::from_parts((x - 1) as usize, (y - 1) as usize))
    }

    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    pub const fn x(&self) -> u8 {
        (self.0 >> 3) + 1
    }

    pub const fn y(&self) -> u8 {
        (self.0 & 7) + 1
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Square({}, {})", self.x(), self.y());
        }
        write!(f, "Square(?{:?})", self.0)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match *self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Empty = 0,
    Rook = 1,
    Queen = 2,
    King = 3,
    Knight = 4,
    Bishop = 5,
    Pawn = 6,
}

impl PieceKind {
    pub const fn from_index(val: usize) -> PieceKind {
        match val {
            0 => PieceKind::Empty,
            1 => PieceKind::Rook,
            2 => PieceKind::Queen,
            3 => PieceKind::King,
            4 => PieceKind::Knight,
            5 => PieceKind::Bishop,
            6 => PieceKind::Pawn,
            _ => panic!("piece kind index must be between 0 and 6"),
        }
    }

    /// Display name of the piece kind, `*` for an empty cell
    pub const fn name(&self) -> &'static str {
        match *self {
            PieceKind::Empty => "*",
            PieceKind::Rook => "ROOK",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Pawn => "PAWN",
        }
    }

    /// First character of the display name
    ///
    /// Note that both `King` and `Knight` render as `K`.
    pub const fn glyph(&self) -> char {
        self.name().as_bytes()[0] as char
    }

    /// Returns `true` for pieces which move along rays (rook, bishop and queen)
    pub const fn is_sliding(&self) -> bool {
        matches!(*self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..7).map(PieceKind::from_index)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PieceKind {
    type Err = PieceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| PieceKindParseError::UnknownName(s.to_string()))
    }
}

/// Contents of a single board cell
///
/// A cell is either empty or holds a piece together with its owner. There is no way to build
/// an empty cell with an owner or a piece without one.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::MAX_INDEX, "index too large");
        Cell(val as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_parts(c: Color, k: PieceKind) -> Cell {
        assert!(!matches!(k, PieceKind::Empty), "empty cell cannot have an owner");
        Cell(match c {
            Color::White => k as u8,
            Color::Black => 6 + k as u8,
        })
    }

    pub fn new(kind: PieceKind, owner: Option<Color>) -> Result<Cell, CellError> {
        match (kind, owner) {
            (PieceKind::Empty, None) => Ok(Cell::EMPTY),
            (PieceKind::Empty, Some(_)) | (_, None) => {
                Err(CellError::OwnerMismatch { kind, owner })
            }
            (kind, Some(color)) => Ok(Cell::from_parts(color, kind)),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn kind(&self) -> PieceKind {
        match self.0 {
            0 => PieceKind::Empty,
            1..=6 => PieceKind::from_index(self.0 as usize),
            _ => PieceKind::from_index(self.0 as usize - 6),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX).map(Cell::from_index)
    }

    pub const fn as_char(&self) -> char {
        self.kind().glyph()
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '·', '♖', '♕', '♔', '♘', '♗', '♙', '♜', '♛', '♚', '♞', '♝', '♟',
        ][self.0 as usize]
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.color() {
            _ if self.index() >= Self::MAX_INDEX => write!(f, "Cell(?{:?})", self.0),
            Some(c) => write!(f, "Cell({} {})", c, self.kind()),
            None => write!(f, "Cell(*)"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}
