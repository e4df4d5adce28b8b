//! # Raychess
//!
//! Chessboard model which generates destinations for a single piece and applies moves.
//!
//! This is not a chess engine: there are no turns, checks, castling, en passant or promotions.
//! Pawns move in both directions, and sliding pieces are stopped only by the pieces of their own
//! color.
//!
//! Start with [`Board::from_setup()`], then use [`Board::get_possible_moves()`] and
//! [`Board::move_figure()`].

pub mod board;
pub mod setup;

pub use raychess_base::{geometry, square_set, types};

pub use board::{Board, BoardError, PrettyStyle};
pub use setup::{RecordParseError, Setup, SetupError, SetupRecord};
pub use square_set::SquareSet;
pub use types::{Cell, Color, PieceKind, Square};
