//! Board and related things

use crate::geometry::{self, GeometryError};
use crate::setup::Setup;
use crate::square_set::SquareSet;
use crate::types::{Cell, Color, PieceKind, Square, SquareError};

use std::fmt::{self, Display};

use thiserror::Error;
use tracing::{debug, trace};

/// Error querying or changing the board
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum BoardError {
    /// One of the coordinates is not between 1 and 8
    #[error("bad coordinate: {0}")]
    OutOfBounds(#[from] SquareError),
    /// There is no piece on the source square
    #[error("no piece on square {0}")]
    EmptySquare(Square),
    /// Destination is occupied by a piece of the same color or is not reachable
    #[error("cannot move from {src} to {dst}")]
    IllegalDestination { src: Square, dst: Square },
}

/// Chess board
///
/// The board is an 8x8 grid of cells. Rows `0` and `1` initially belong to White, rows `6` and `7`
/// belong to Black.
///
/// Public methods taking plain integers (such as [`Board::get_possible_moves()`]) use 1-indexed
/// coordinates `(x, y)`, where `x` selects the row and `y` selects the column. Methods taking
/// [`Square`] work with the same squares.
///
/// # Example
///
/// ```
/// # use raychess::{Board, Setup, Cell, Color, PieceKind, Square};
/// #
/// let mut board = Board::from_setup(&Setup::standard());
/// board.move_figure(7, 1, 5, 1).unwrap();
///
/// assert_eq!(board.get(Square::from_public(7, 1).unwrap()), Cell::EMPTY);
/// assert_eq!(
///     board.get(Square::from_public(5, 1).unwrap()),
///     Cell::from_parts(Color::Black, PieceKind::Pawn),
/// );
/// ```
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [[Cell::EMPTY; 8]; 8],
        }
    }

    /// Builds the initial position from `setup`
    ///
    /// Each record puts its piece on rows `0` (White) and `7` (Black) and a pawn of the same color
    /// right in front of it.
    pub fn from_setup(setup: &Setup) -> Board {
        let mut res = Board::empty();
        for rec in setup.records() {
            let col = rec.col();
            res.cells[0][col] = Cell::from_parts(Color::White, rec.kind());
            res.cells[1][col] = Cell::from_parts(Color::White, PieceKind::Pawn);
            res.cells[7][col] = Cell::from_parts(Color::Black, rec.kind());
            res.cells[6][col] = Cell::from_parts(Color::Black, PieceKind::Pawn);
        }
        debug!(records = setup.records().len(), "board set up");
        res
    }

    /// Returns the contents of square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.row()][sq.col()]
    }

    /// Puts `cell` to square `sq`
    #[inline]
    pub fn put(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row()][sq.col()] = cell;
    }

    /// Returns the grid, indexed by row and then by column
    #[inline]
    pub fn cells(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    /// Returns the squares occupied by the pieces of color `c`
    pub fn occupied_by(&self, c: Color) -> SquareSet {
        Square::iter().filter(|&sq| self.get(sq).color() == Some(c)).collect()
    }

    /// Returns the squares where the piece on `src` may go
    ///
    /// Squares occupied by the pieces of the same color are never included. Sliding pieces stop
    /// only at the pieces of their own color and keep going through the opponent's pieces.
    pub fn legal_destinations(&self, src: Square) -> Result<SquareSet, BoardError> {
        let cell = self.get(src);
        let color = cell.color().ok_or(BoardError::EmptySquare(src))?;
        let kind = cell.kind();
        let res = if kind.is_sliding() {
            self.gen_sliding(kind, color, src)
        } else {
            self.gen_leaps(kind, color, src)
        };
        let res = res.map_err(|e| match e {
            GeometryError::EmptyPiece => BoardError::EmptySquare(src),
        })?;
        trace!(%src, %kind, count = res.len(), "generated destinations");
        Ok(res)
    }

    fn gen_sliding(
        &self,
        kind: PieceKind,
        color: Color,
        src: Square,
    ) -> Result<SquareSet, GeometryError> {
        let mut rays = [true; 8];
        let open = &mut rays[..geometry::ray_count(kind)];
        let mut res = SquareSet::EMPTY;
        for step in 1..8 {
            for (dir, cand) in geometry::candidate_offsets(kind, src, step)?
                .into_iter()
                .enumerate()
            {
                let Some(dst) = cand.to_square() else {
                    continue;
                };
                if self.get(dst).color() == Some(color) {
                    open[dir] = false;
                }
                if open[dir] {
                    res.set(dst);
                }
            }
        }
        Ok(res)
    }

    fn gen_leaps(
        &self,
        kind: PieceKind,
        color: Color,
        src: Square,
    ) -> Result<SquareSet, GeometryError> {
        let targets: SquareSet = geometry::candidate_offsets(kind, src, 0)?
            .into_iter()
            .filter_map(|cand| cand.to_square())
            .collect();
        Ok(targets & !self.occupied_by(color))
    }

    /// Returns the squares where the piece on `(x, y)` may go
    ///
    /// Coordinates are 1-indexed. See [`Board::legal_destinations()`] for details.
    pub fn get_possible_moves(&self, x: u8, y: u8) -> Result<SquareSet, BoardError> {
        self.legal_destinations(Square::from_public(x, y)?)
    }

    /// Moves the piece from `src` to `dst`, replacing anything that stood on `dst`
    ///
    /// Returns the previous contents of `dst`. If the move is rejected, the board is left intact.
    pub fn make_move(&mut self, src: Square, dst: Square) -> Result<Cell, BoardError> {
        let moves = self.legal_destinations(src)?;
        let cell = self.get(src);
        let captured = self.get(dst);
        if captured.color() == cell.color() || !moves.has(dst) {
            debug!(%src, %dst, kind = %cell.kind(), "move rejected");
            return Err(BoardError::IllegalDestination { src, dst });
        }
        self.put(src, Cell::EMPTY);
        self.put(dst, cell);
        debug!(%src, %dst, kind = %cell.kind(), color = ?cell.color(), "move applied");
        Ok(captured)
    }

    /// Moves the piece from `(x, y)` to `(new_x, new_y)`
    ///
    /// Coordinates are 1-indexed. All of them are validated before the board is touched.
    pub fn move_figure(&mut self, x: u8, y: u8, new_x: u8, new_y: u8) -> Result<(), BoardError> {
        let src = Square::from_public(x, y)?;
        let dst = Square::from_public(new_x, new_y)?;
        self.make_move(src, dst)?;
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use raychess::{Board, Setup, board::PrettyStyle};
    /// #
    /// let b = Board::from_setup(&"1 ROOK\n4 QUEEN\n".parse::<Setup>().unwrap());
    ///
    /// let res = r#"
    /// R * * Q * * * *
    /// P * * P * * * *
    /// * * * * * * * *
    /// * * * * * * * *
    /// * * * * * * * *
    /// * * * * * * * *
    /// P * * P * * * *
    /// R * * Q * * * *
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Wraps the board to print it with the destinations of the piece on `(x, y)` marked as `X`
    ///
    /// The output is framed by lines of underscores.
    pub fn pretty_moves(
        &self,
        x: u8,
        y: u8,
        style: PrettyStyle,
    ) -> Result<PrettyMoves<'_>, BoardError> {
        Ok(PrettyMoves {
            board: self,
            moves: self.get_possible_moves(x, y)?,
            style,
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.pretty(PrettyStyle::Ascii).fmt(f)
    }
}

/// Board pretty-printing style
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrettyStyle {
    /// First letters of the piece names, `*` for empty cells
    Ascii,
    /// Unicode chess symbols
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See [`Board::pretty()`] for details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

/// Wrapper to pretty-print the board with marked destinations
///
/// See [`Board::pretty_moves()`] for details.
pub struct PrettyMoves<'a> {
    board: &'a Board,
    moves: SquareSet,
    style: PrettyStyle,
}

const FRAME_WIDTH: usize = 15;

trait StyleTable {
    const MARK: char = 'X';
    const SEPARATOR: char = ' ';

    fn cell(c: Cell) -> char;

    fn fmt(b: &Board, marked: SquareSet, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (row, line) in b.cells.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if col != 0 {
                    write!(f, "{}", Self::SEPARATOR)?;
                }
                if marked.has(Square::from_parts(row, col)) {
                    write!(f, "{}", Self::MARK)?;
                } else {
                    write!(f, "{}", Self::cell(cell))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn fmt_framed(
        b: &Board,
        marked: SquareSet,
        f: &mut fmt::Formatter<'_>,
    ) -> Result<(), fmt::Error> {
        writeln!(f, "{}", "_".repeat(FRAME_WIDTH))?;
        Self::fmt(b, marked, f)?;
        writeln!(f, "{}", "_".repeat(FRAME_WIDTH))
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, SquareSet::EMPTY, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, SquareSet::EMPTY, f),
        }
    }
}

impl<'a> Display for PrettyMoves<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt_framed(self.board, self.moves, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt_framed(self.board, self.moves, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sq(x: u8, y: u8) -> Square {
        Square::from_public(x, y).unwrap()
    }

    fn squares(items: &[(u8, u8)]) -> SquareSet {
        items.iter().map(|&(x, y)| sq(x, y)).collect()
    }

    fn with_pieces(pieces: &[(u8, u8, Color, PieceKind)]) -> Board {
        let mut b = Board::empty();
        for &(x, y, color, kind) in pieces {
            b.put(sq(x, y), Cell::from_parts(color, kind));
        }
        b
    }

    fn random_board(rng: &mut StdRng) -> Board {
        let mut b = Board::empty();
        for s in Square::iter() {
            let cell = Cell::from_index(rng.gen_range(0..Cell::MAX_INDEX));
            if rng.gen_bool(0.35) {
                b.put(s, cell);
            }
        }
        b
    }

    #[test]
    fn test_initial() {
        let b = Board::from_setup(&Setup::standard());
        let res = r#"
R K B Q K B K R
P P P P P P P P
* * * * * * * *
* * * * * * * *
* * * * * * * *
* * * * * * * *
P P P P P P P P
R K B Q K B K R
"#;
        assert_eq!(b.to_string().trim(), res.trim());
        assert_eq!(b.get(sq(1, 5)), Cell::from_parts(Color::White, PieceKind::King));
        assert_eq!(b.get(sq(8, 2)), Cell::from_parts(Color::Black, PieceKind::Knight));
        assert_eq!(b.get(sq(7, 8)), Cell::from_parts(Color::Black, PieceKind::Pawn));
    }

    #[test]
    fn test_partial_setup() {
        let b = Board::from_setup(&"3 BISHOP\n".parse().unwrap());
        let occupied: SquareSet = Square::iter().filter(|&s| b.get(s).is_occupied()).collect();
        assert_eq!(occupied, squares(&[(1, 3), (2, 3), (7, 3), (8, 3)]));
    }

    #[test]
    fn test_occupied() {
        let b = Board::from_setup(&"2 KING\n".parse().unwrap());
        let white = b.occupied_by(Color::White);
        let black = b.occupied_by(Color::Black);
        assert_eq!(white, squares(&[(1, 2), (2, 2)]));
        assert_eq!(black, squares(&[(7, 2), (8, 2)]));
        assert!((white & black).is_empty());
        let all: SquareSet = Square::iter().filter(|&s| b.get(s).is_occupied()).collect();
        assert_eq!(white | black, all);
    }

    #[test]
    fn test_utf8() {
        let b = Board::from_setup(&"1 ROOK\n".parse().unwrap());
        let res = b.pretty(PrettyStyle::Utf8).to_string();
        assert_eq!(res.lines().next(), Some("♖ · · · · · · ·"));
        assert_eq!(res.lines().last(), Some("♜ · · · · · · ·"));
    }

    #[test]
    fn test_pretty_moves() {
        let b = with_pieces(&[(1, 1, Color::White, PieceKind::Knight)]);
        let res = r#"
_______________
K * * * * * * *
* * X * * * * *
* X * * * * * *
* * * * * * * *
* * * * * * * *
* * * * * * * *
* * * * * * * *
* * * * * * * *
_______________
"#;
        assert_eq!(
            b.pretty_moves(1, 1, PrettyStyle::Ascii).unwrap().to_string().trim(),
            res.trim()
        );
        assert!(b.pretty_moves(2, 2, PrettyStyle::Ascii).is_err());
    }

    #[test]
    fn test_errors() {
        let mut b = Board::from_setup(&Setup::standard());
        assert_eq!(
            b.get_possible_moves(9, 1),
            Err(BoardError::OutOfBounds(SquareError::OutOfBounds { x: 9, y: 1 }))
        );
        assert_eq!(b.get_possible_moves(4, 4), Err(BoardError::EmptySquare(sq(4, 4))));
        assert_eq!(
            b.move_figure(7, 1, 0, 1),
            Err(BoardError::OutOfBounds(SquareError::OutOfBounds { x: 0, y: 1 }))
        );
        assert_eq!(b.move_figure(4, 4, 5, 4), Err(BoardError::EmptySquare(sq(4, 4))));
        assert_eq!(
            b.move_figure(8, 1, 7, 1),
            Err(BoardError::IllegalDestination {
                src: sq(8, 1),
                dst: sq(7, 1)
            })
        );
        assert_eq!(
            b.move_figure(7, 1, 4, 1),
            Err(BoardError::IllegalDestination {
                src: sq(7, 1),
                dst: sq(4, 1)
            })
        );
        assert_eq!(b, Board::from_setup(&Setup::standard()));
    }

    #[test]
    fn test_pawn_advance() {
        let mut b = Board::from_setup(&Setup::standard());
        let pawn = b.get(sq(7, 1));
        assert_eq!(b.make_move(sq(7, 1), sq(5, 1)), Ok(Cell::EMPTY));
        assert_eq!(b.get(sq(7, 1)), Cell::EMPTY);
        assert_eq!(b.get(sq(5, 1)), pawn);
        assert_eq!(pawn, Cell::from_parts(Color::Black, PieceKind::Pawn));
    }

    #[test]
    fn test_pawn_omnidirectional() {
        let b = with_pieces(&[(4, 4, Color::White, PieceKind::Pawn)]);
        assert_eq!(
            b.get_possible_moves(4, 4),
            Ok(squares(&[
                (3, 3),
                (5, 3),
                (3, 5),
                (5, 5),
                (3, 4),
                (2, 4),
                (5, 4),
                (6, 4)
            ]))
        );
    }

    #[test]
    fn test_king_and_knight_corners() {
        let b = with_pieces(&[
            (1, 1, Color::White, PieceKind::King),
            (1, 2, Color::White, PieceKind::Rook),
            (2, 2, Color::Black, PieceKind::Rook),
        ]);
        assert_eq!(b.get_possible_moves(1, 1), Ok(squares(&[(2, 1), (2, 2)])));

        let b = with_pieces(&[(8, 8, Color::Black, PieceKind::Knight)]);
        assert_eq!(b.get_possible_moves(8, 8), Ok(squares(&[(6, 7), (7, 6)])));
    }

    #[test]
    fn test_rook_blocked_by_own_piece() {
        let b = with_pieces(&[
            (1, 1, Color::White, PieceKind::Rook),
            (1, 4, Color::White, PieceKind::Knight),
        ]);
        let mut expected: Vec<(u8, u8)> = (2..=8).map(|x| (x, 1)).collect();
        expected.extend([(1, 2), (1, 3)]);
        assert_eq!(b.get_possible_moves(1, 1), Ok(squares(&expected)));
    }

    #[test]
    fn test_ray_passes_enemy_piece() {
        let b = with_pieces(&[
            (1, 1, Color::White, PieceKind::Bishop),
            (3, 3, Color::Black, PieceKind::Pawn),
        ]);
        let expected: Vec<(u8, u8)> = (2..=8).map(|i| (i, i)).collect();
        assert_eq!(b.get_possible_moves(1, 1), Ok(squares(&expected)));
    }

    #[test]
    fn test_queen_rays_independent() {
        let b = with_pieces(&[
            (4, 4, Color::White, PieceKind::Queen),
            (5, 5, Color::White, PieceKind::Pawn),
            (4, 6, Color::White, PieceKind::Pawn),
            (2, 4, Color::Black, PieceKind::Pawn),
        ]);
        let moves = b.get_possible_moves(4, 4).unwrap();
        assert!(!moves.has(sq(5, 5)));
        assert!(!moves.has(sq(6, 6)));
        assert!(moves.has(sq(4, 5)));
        assert!(!moves.has(sq(4, 6)));
        assert!(!moves.has(sq(4, 7)));
        assert!(moves.has(sq(2, 4)));
        assert!(moves.has(sq(1, 4)));
        assert!(moves.has(sq(3, 5)));
        assert!(moves.has(sq(1, 7)));
        assert!(moves.has(sq(8, 4)));
        assert!(moves.has(sq(1, 1)));
        assert!(moves.has(sq(7, 1)));
        assert_eq!(moves.len(), 27 - 4 - 3);
    }

    #[test]
    fn test_capture() {
        let mut b = with_pieces(&[
            (1, 1, Color::White, PieceKind::Rook),
            (5, 1, Color::Black, PieceKind::Queen),
        ]);
        assert_eq!(b.move_figure(1, 1, 5, 1), Ok(()));
        assert_eq!(b.get(sq(5, 1)), Cell::from_parts(Color::White, PieceKind::Rook));
        assert_eq!(b.get(sq(1, 1)), Cell::EMPTY);
        assert_eq!(b.make_move(sq(5, 1), sq(8, 1)), Ok(Cell::EMPTY));
    }

    #[test]
    fn test_random_no_own_color() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let b = random_board(&mut rng);
            for s in Square::iter() {
                let cell = b.get(s);
                let Some(color) = cell.color() else {
                    assert_eq!(b.legal_destinations(s), Err(BoardError::EmptySquare(s)));
                    continue;
                };
                let moves = b.legal_destinations(s).unwrap();
                for dst in moves {
                    assert_ne!(b.get(dst).color(), Some(color));
                }
                if matches!(cell.kind(), PieceKind::King | PieceKind::Knight | PieceKind::Pawn) {
                    assert!(moves.len() <= 8);
                }
            }
        }
    }

    #[test]
    fn test_random_rays_stop() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let b = random_board(&mut rng);
            for s in Square::iter() {
                let cell = b.get(s);
                if !cell.kind().is_sliding() {
                    continue;
                }
                let moves = b.legal_destinations(s).unwrap();
                for &(dr, dc) in geometry::rays(cell.kind()) {
                    let mut blocked = false;
                    for step in 1..8 {
                        let Some(dst) = Square::try_from_parts(
                            s.row() as isize + dr * step,
                            s.col() as isize + dc * step,
                        ) else {
                            break;
                        };
                        if b.get(dst).color() == cell.color() {
                            blocked = true;
                        }
                        assert_eq!(moves.has(dst), !blocked);
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_moves() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let mut b = random_board(&mut rng);
            let src = Square::from_index(rng.gen_range(0..64));
            let dst = Square::from_index(rng.gen_range(0..64));
            let before = b;
            let legal = b.legal_destinations(src).map(|m| m.has(dst));
            match b.make_move(src, dst) {
                Ok(captured) => {
                    assert_eq!(legal, Ok(true));
                    assert_eq!(captured, before.get(dst));
                    assert_eq!(b.get(src), Cell::EMPTY);
                    assert_eq!(b.get(dst), before.get(src));
                    for s in Square::iter().filter(|&s| s != src && s != dst) {
                        assert_eq!(b.get(s), before.get(s));
                    }
                }
                Err(_) => {
                    assert_ne!(legal, Ok(true));
                    assert_eq!(b, before);
                }
            }
        }
    }
}
