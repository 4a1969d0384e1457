//! Builtin Greedy Engine
//!
//! A minimal deterministic `SearchEngine` so the gateway binary runs end to
//! end without an external engine process. It generates pseudo-legal moves
//! over the 8x8 board and takes the largest immediate material gain, ties
//! broken by lexicographic notation. It ignores depth beyond accepting the
//! parameter and makes no claim to playing strength; the real engine is an
//! external collaborator plugged in through the `SearchEngine` trait.

use super::types::SearchEngine;
use crate::position::{BoardPosition, Color, PieceKind, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Material-greedy one-ply mover.
pub struct GreedyEngine;

struct Candidate {
    notation: String,
    gain: u32,
}

impl SearchEngine for GreedyEngine {
    fn best_move(&mut self, position: &BoardPosition, _depth: u8) -> anyhow::Result<String> {
        let mut candidates = pseudo_legal_moves(position);
        anyhow::ensure!(
            !candidates.is_empty(),
            "no pseudo-legal moves in this position"
        );
        candidates.sort_by(|a, b| {
            b.gain
                .cmp(&a.gain)
                .then_with(|| a.notation.cmp(&b.notation))
        });
        Ok(candidates.swap_remove(0).notation)
    }
}

fn pseudo_legal_moves(position: &BoardPosition) -> Vec<Candidate> {
    let us = position.side_to_move();
    let mut out = Vec::new();

    for rank in 0..8u8 {
        for file in 0..8u8 {
            let from = Square { file, rank };
            let Some(piece) = position.piece_at(from) else {
                continue;
            };
            if piece.color != us {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => pawn_moves(position, from, us, &mut out),
                PieceKind::Knight => step_moves(position, from, us, &KNIGHT_OFFSETS, &mut out),
                PieceKind::King => step_moves(position, from, us, &KING_OFFSETS, &mut out),
                PieceKind::Bishop => slide_moves(position, from, us, &BISHOP_DIRS, &mut out),
                PieceKind::Rook => slide_moves(position, from, us, &ROOK_DIRS, &mut out),
                PieceKind::Queen => {
                    slide_moves(position, from, us, &BISHOP_DIRS, &mut out);
                    slide_moves(position, from, us, &ROOK_DIRS, &mut out);
                }
            }
        }
    }

    out
}

fn pawn_moves(position: &BoardPosition, from: Square, us: Color, out: &mut Vec<Candidate>) {
    let (dir, start_rank, promotion_rank) = match us {
        Color::White => (1i8, 1u8, 7u8),
        Color::Black => (-1i8, 6u8, 0u8),
    };

    if let Some(to) = shift(from, 0, dir) {
        if position.piece_at(to).is_none() {
            out.push(pawn_candidate(from, to, 0, promotion_rank));
            if from.rank == start_rank {
                if let Some(jump) = shift(from, 0, 2 * dir) {
                    if position.piece_at(jump).is_none() {
                        out.push(pawn_candidate(from, jump, 0, promotion_rank));
                    }
                }
            }
        }
    }

    for df in [-1i8, 1] {
        let Some(to) = shift(from, df, dir) else {
            continue;
        };
        match position.piece_at(to) {
            Some(target) if target.color != us => {
                out.push(pawn_candidate(from, to, piece_value(target.kind), promotion_rank));
            }
            None if position.en_passant() == Some(to) => {
                out.push(pawn_candidate(from, to, 1, promotion_rank));
            }
            _ => {}
        }
    }
}

fn pawn_candidate(from: Square, to: Square, capture: u32, promotion_rank: u8) -> Candidate {
    if to.rank == promotion_rank {
        Candidate {
            notation: format!("{from}{to}q"),
            // Promotion trades a pawn for a queen on top of any capture.
            gain: capture + 8,
        }
    } else {
        Candidate {
            notation: format!("{from}{to}"),
            gain: capture,
        }
    }
}

fn step_moves(
    position: &BoardPosition,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Candidate>,
) {
    for &(df, dr) in offsets {
        let Some(to) = shift(from, df, dr) else {
            continue;
        };
        match position.piece_at(to) {
            None => out.push(Candidate {
                notation: format!("{from}{to}"),
                gain: 0,
            }),
            Some(target) if target.color != us => out.push(Candidate {
                notation: format!("{from}{to}"),
                gain: piece_value(target.kind),
            }),
            Some(_) => {}
        }
    }
}

fn slide_moves(
    position: &BoardPosition,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    out: &mut Vec<Candidate>,
) {
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(to) = shift(current, df, dr) {
            match position.piece_at(to) {
                None => {
                    out.push(Candidate {
                        notation: format!("{from}{to}"),
                        gain: 0,
                    });
                    current = to;
                }
                Some(target) if target.color != us => {
                    out.push(Candidate {
                        notation: format!("{from}{to}"),
                        gain: piece_value(target.kind),
                    });
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

fn shift(square: Square, df: i8, dr: i8) -> Option<Square> {
    let file = square.file as i8 + df;
    let rank = square.rank as i8 + dr;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square {
            file: file as u8,
            rank: rank as u8,
        })
    } else {
        None
    }
}

fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        // Pseudo-legal generation can target a king; value it above
        // everything so the move ordering stays total.
        PieceKind::King => 100,
    }
}
