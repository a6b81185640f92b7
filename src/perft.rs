//! Perft: count leaf nodes of the legal move tree to a fixed depth. The
//! reference numbers for well-known positions pin down generator and
//! make-move correctness.

use crate::{position::Position, types::Move};

pub fn perft(board: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    board
        .legal_moves()
        .into_iter()
        .map(|move_| {
            let mut child = *board;
            child.make_move(move_);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Node count per root move, for comparing against a reference engine.
pub fn perft_divide(board: &Position, depth: u32) -> Vec<(Move, u64)> {
    board
        .legal_moves()
        .into_iter()
        .map(|move_| {
            let mut child = *board;
            child.make_move(move_);
            let nodes = if depth > 1 { perft(&child, depth - 1) } else { 1 };
            (move_, nodes)
        })
        .collect()
}
