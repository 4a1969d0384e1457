//! FEN Decoder
//!
//! Field-by-field validation of FEN position descriptions. The parser is pure
//! and deterministic: the same input always yields the same `BoardPosition`
//! or the same `PositionError`.

use thiserror::Error;

use super::types::{BoardPosition, CastlingRights, Color, Piece, PieceKind, Square};

/// Why a position description failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("expected 6 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: usize, files: usize },
    #[error("illegal piece character '{0}'")]
    IllegalPiece(char),
    #[error("side to move must be 'w' or 'b', found \"{0}\"")]
    SideToMove(String),
    #[error("malformed castling rights \"{0}\"")]
    CastlingRights(String),
    #[error("malformed en passant target \"{0}\"")]
    EnPassant(String),
    #[error("{field} counter \"{value}\" is not a valid number")]
    Counter {
        field: &'static str,
        value: String,
    },
    #[error("{side} must have exactly one king, found {found}")]
    KingCount { side: &'static str, found: usize },
}

impl BoardPosition {
    /// Parses and validates a FEN string.
    ///
    /// This is the only way to obtain a `BoardPosition`; every downstream
    /// component relies on input having passed this gate.
    pub fn parse(input: &str) -> Result<BoardPosition, PositionError> {
        let fields: Vec<&str> = input.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(PositionError::FieldCount(fields.len()));
        }

        let board = parse_placement(fields[0])?;
        let side_to_move = parse_side(fields[1])?;
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmove_clock = parse_counter("halfmove", fields[4])?;
        let fullmove_number = parse_counter("fullmove", fields[5])?;
        if fullmove_number == 0 {
            return Err(PositionError::Counter {
                field: "fullmove",
                value: fields[5].to_string(),
            });
        }
        check_kings(&board)?;

        Ok(BoardPosition {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

fn parse_placement(placement: &str) -> Result<[[Option<Piece>; 8]; 8], PositionError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::RankCount(ranks.len()));
    }

    let mut board = [[None; 8]; 8];
    // FEN lists ranks from 8 down to 1.
    for (idx, rank_str) in ranks.iter().enumerate() {
        let rank_number = 8 - idx;
        let mut row: Vec<Option<Piece>> = Vec::with_capacity(8);
        for c in rank_str.chars() {
            match c.to_digit(10) {
                Some(run) if (1..=8).contains(&run) => {
                    for _ in 0..run {
                        row.push(None);
                    }
                }
                Some(_) => return Err(PositionError::IllegalPiece(c)),
                None => row.push(Some(
                    piece_from_char(c).ok_or(PositionError::IllegalPiece(c))?,
                )),
            }
        }
        if row.len() != 8 {
            return Err(PositionError::RankWidth {
                rank: rank_number,
                files: row.len(),
            });
        }
        for (file, piece) in row.into_iter().enumerate() {
            board[rank_number - 1][file] = piece;
        }
    }

    Ok(board)
}

fn piece_from_char(c: char) -> Option<Piece> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some(Piece { color, kind })
}

fn parse_side(field: &str) -> Result<Color, PositionError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(PositionError::SideToMove(other.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, PositionError> {
    let mut rights = CastlingRights::default();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let flag = match c {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => return Err(PositionError::CastlingRights(field.to_string())),
        };
        if *flag {
            // Repeated letter.
            return Err(PositionError::CastlingRights(field.to_string()));
        }
        *flag = true;
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, PositionError> {
    if field == "-" {
        return Ok(None);
    }
    let square = Square::from_name(field)
        .ok_or_else(|| PositionError::EnPassant(field.to_string()))?;
    // An en passant target can only ever sit on rank 3 or rank 6.
    if square.rank != 2 && square.rank != 5 {
        return Err(PositionError::EnPassant(field.to_string()));
    }
    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, PositionError> {
    value.parse().map_err(|_| PositionError::Counter {
        field,
        value: value.to_string(),
    })
}

fn check_kings(board: &[[Option<Piece>; 8]; 8]) -> Result<(), PositionError> {
    let count = |color: Color| {
        board
            .iter()
            .flatten()
            .filter(|p| **p == Some(Piece { color, kind: PieceKind::King }))
            .count()
    };
    let white = count(Color::White);
    if white != 1 {
        return Err(PositionError::KingCount {
            side: "white",
            found: white,
        });
    }
    let black = count(Color::Black);
    if black != 1 {
        return Err(PositionError::KingCount {
            side: "black",
            found: black,
        });
    }
    Ok(())
}
