//! Opening book for the matto chess engine: a CSV-backed library of named
//! openings, looked up by ECO code or by FEN.
//!
//! The data format is `Moves,ECO,Name,ResultFEN,SequenceFENs`, where `Moves`
//! is a numbered SAN sequence (`1. e4 e5 2. Nf3`) and `SequenceFENs` lists
//! the position after every ply. A compact dataset is embedded so consumers
//! need no file on disk.

mod csv;

use std::path::Path;

use tracing::warn;

/// A single opening: its classification, name, moves, and positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    /// Encyclopedia of Chess Openings code, e.g. `C60`.
    pub eco: String,
    /// Common name, e.g. `Ruy Lopez`.
    pub name: String,
    /// The SAN move tokens, turn numbers stripped.
    pub moves: Vec<String>,
    /// FEN of the final position of the sequence.
    pub result_fen: String,
    /// FEN after each ply of the sequence, in order.
    pub sequence_fens: Vec<String>,
    /// The raw numbered move text as it appeared in the data.
    pub sequence_moves: String,
}

/// Errors from loading opening data.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The data contained no records at all.
    #[error("opening data is empty")]
    Empty,
    /// The data file could not be read.
    #[error("failed to read opening data: {0}")]
    Read(#[from] std::io::Error),
}

/// An in-memory library of chess openings.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    openings: Vec<Opening>,
}

impl OpeningBook {
    /// Load the embedded dataset.
    pub fn embedded() -> OpeningBook {
        OpeningBook::from_csv_str(include_str!("data/openings.csv"))
            .expect("embedded opening data is well-formed")
    }

    /// Load openings from a CSV file on disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<OpeningBook, BookError> {
        let data = std::fs::read_to_string(path)?;
        OpeningBook::from_csv_str(&data)
    }

    /// Parse openings from CSV text with a `Moves,ECO,Name,ResultFEN,SequenceFENs`
    /// header. Rows with the wrong field count are skipped.
    pub fn from_csv_str(data: &str) -> Result<OpeningBook, BookError> {
        let records = csv::parse_records(data);
        if records.is_empty() {
            return Err(BookError::Empty);
        }

        let mut openings = Vec::new();
        // The first record is the header row.
        for record in &records[1..] {
            if record.len() != 5 {
                warn!(fields = record.len(), "skipping malformed opening row");
                continue;
            }

            openings.push(Opening {
                moves: strip_turn_numbers(&record[0]),
                eco: record[1].clone(),
                name: record[2].clone(),
                result_fen: record[3].clone(),
                sequence_fens: record[4].split(',').map(str::to_string).collect(),
                sequence_moves: record[0].clone(),
            });
        }

        Ok(OpeningBook { openings })
    }

    /// Number of openings in the library.
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// Iterate over every opening.
    pub fn iter(&self) -> impl Iterator<Item = &Opening> {
        self.openings.iter()
    }

    /// Find the opening classified by the given ECO code.
    pub fn find_by_eco(&self, eco: &str) -> Option<&Opening> {
        self.openings.iter().find(|op| op.eco == eco)
    }

    /// Find an opening whose final position matches the given FEN.
    pub fn find_by_result_fen(&self, fen: &str) -> Option<&Opening> {
        self.openings.iter().find(|op| op.result_fen == fen)
    }

    /// Find continuations for a position reached mid-sequence.
    ///
    /// Returns, for every opening whose sequence passes through `fen` before
    /// its final position, the FENs from that point up to (but excluding) the
    /// final one, deduplicated across openings.
    pub fn variations_by_fen(&self, fen: &str) -> Vec<String> {
        let mut matches: Vec<String> = Vec::new();

        for op in &self.openings {
            let len = op.sequence_fens.len();
            if len < 2 {
                continue;
            }

            if let Some(at) = op.sequence_fens[..len - 1]
                .iter()
                .position(|f| f == fen)
            {
                for candidate in &op.sequence_fens[at..len - 1] {
                    if !matches.iter().any(|m| m == candidate) {
                        matches.push(candidate.clone());
                    }
                }
            }
        }

        matches
    }
}

/// Drop the `1.`-style turn markers, keeping only SAN tokens.
fn strip_turn_numbers(moves: &str) -> Vec<String> {
    moves
        .split_whitespace()
        .enumerate()
        .filter(|(i, _)| i % 3 != 0)
        .map(|(_, token)| token.to_string())
        .collect()
}
