//! Initial position setup
//!
//! The setup source is line-oriented. Each record names a file and a special piece:
//!
//! ```text
//! # file piece
//! 1 ROOK
//! 2 KNIGHT
//! ```
//!
//! The piece is placed on both back rows of its file, with a pawn in front of it. Older setup
//! files carry an extra rank column (`1 1 ROOK`), which is accepted and ignored.

use crate::types::{PieceKind, PieceKindParseError};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Error parsing a single setup record
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RecordParseError {
    /// Record must contain two or three tokens
    #[error("expected 2 or 3 tokens, got {0}")]
    BadTokenCount(usize),
    /// File is not a number
    #[error("bad file {0:?}")]
    BadFile(String),
    /// File is not between 1 and 8
    #[error("file {0} is out of range")]
    FileOutOfRange(i64),
    /// Legacy rank column is not a number
    #[error("bad rank {0:?}")]
    BadRank(String),
    /// Legacy rank column is not between 1 and 8
    #[error("rank {0} is out of range")]
    RankOutOfRange(i64),
    /// Piece name is not recognized
    #[error("bad piece: {0}")]
    UnknownPiece(#[from] PieceKindParseError),
    /// Piece name is followed by another token
    #[error("unexpected token {0:?} after piece name")]
    TrailingToken(String),
    /// Piece cannot stand on the back row
    #[error("piece {0} cannot be placed on the back row")]
    NotSpecial(PieceKind),
}

/// Error loading the setup
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot read setup: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        source: RecordParseError,
    },
}

/// One setup record: a special piece placed on file `file`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SetupRecord {
    file: u8,
    kind: PieceKind,
}

impl SetupRecord {
    /// Creates a record for 1-indexed `file`
    pub fn new(file: u8, kind: PieceKind) -> Result<SetupRecord, RecordParseError> {
        if !(1..=8).contains(&file) {
            return Err(RecordParseError::FileOutOfRange(file.into()));
        }
        match kind {
            PieceKind::Rook
            | PieceKind::Queen
            | PieceKind::King
            | PieceKind::Knight
            | PieceKind::Bishop => Ok(SetupRecord { file, kind }),
            PieceKind::Pawn | PieceKind::Empty => Err(RecordParseError::NotSpecial(kind)),
        }
    }

    /// 1-indexed file
    #[inline]
    pub fn file(&self) -> u8 {
        self.file
    }

    /// 0-indexed column
    #[inline]
    pub fn col(&self) -> usize {
        (self.file - 1) as usize
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
}

fn parse_in_range(
    s: &str,
    bad: fn(String) -> RecordParseError,
    out_of_range: fn(i64) -> RecordParseError,
) -> Result<u8, RecordParseError> {
    let val = i64::from_str(s).map_err(|_| bad(s.to_string()))?;
    if !(1..=8).contains(&val) {
        return Err(out_of_range(val));
    }
    Ok(val as u8)
}

impl FromStr for SetupRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<SetupRecord, Self::Err> {
        type Error = RecordParseError;
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let (file, piece) = match tokens[..] {
            [file, piece] => (file, piece),
            [file, second, third] => {
                if i64::from_str(second).is_err() && PieceKind::from_str(second).is_ok() {
                    return Err(Error::TrailingToken(third.to_string()));
                }
                parse_in_range(second, Error::BadRank, Error::RankOutOfRange)?;
                (file, third)
            }
            _ => return Err(Error::BadTokenCount(tokens.len())),
        };
        let file = parse_in_range(file, Error::BadFile, Error::FileOutOfRange)?;
        SetupRecord::new(file, PieceKind::from_str(piece)?)
    }
}

/// Initial position description
///
/// Records are applied in order, so a later record for the same file wins.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Setup {
    records: Vec<SetupRecord>,
}

impl Setup {
    pub fn new(records: Vec<SetupRecord>) -> Setup {
        Setup { records }
    }

    /// Returns the conventional back row, from file 1 to file 8
    pub fn standard() -> Setup {
        let kinds = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let records = (1_u8..)
            .zip(kinds)
            .map(|(file, kind)| SetupRecord { file, kind })
            .collect();
        Setup { records }
    }

    pub fn records(&self) -> &[SetupRecord] {
        &self.records
    }

    /// Reads the setup from `reader`, line by line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Setup, SetupError> {
        let mut records: Vec<SetupRecord> = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let rec = SetupRecord::from_str(trimmed).map_err(|source| SetupError::Record {
                line: idx + 1,
                source,
            })?;
            if records.iter().any(|r| r.file == rec.file) {
                debug!(file = rec.file, kind = %rec.kind, "setup record overrides earlier one");
            }
            records.push(rec);
        }
        Ok(Setup { records })
    }

    /// Reads the setup from the file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Setup, SetupError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading setup");
        Setup::from_reader(BufReader::new(File::open(path)?))
    }
}

impl FromStr for Setup {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Setup, Self::Err> {
        Setup::from_reader(s.as_bytes())
    }
}
