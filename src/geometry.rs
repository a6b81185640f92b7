//! Side-relative stepping on a 0..63 square index. "Front" advances toward
//! the opponent's back rank; "right" is toward the h-file for White and the
//! a-file for Black. Steps are plain arithmetic and may leave the board;
//! callers validate with `on_board` and the square-colour comparators.

use crate::{
    constants::{DARK_SQUARES, NUM_SQUARES},
    types::Side,
};

pub fn on_board(index: i32) -> bool {
    (0..NUM_SQUARES as i32).contains(&index)
}

/// Colour of an on-board square.
pub fn is_dark(index: i32) -> bool {
    (DARK_SQUARES >> index) & 1 == 1
}

/// A lateral step must flip the square colour; if it does not, the step
/// wrapped around a file boundary.
pub fn lateral_step_ok(from: i32, to: i32) -> bool {
    on_board(to) && is_dark(to) != is_dark(from)
}

/// A diagonal step must keep the square colour.
pub fn diagonal_step_ok(from: i32, to: i32) -> bool {
    on_board(to) && is_dark(to) == is_dark(from)
}

pub fn front(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index + 8,
        Side::Black => index - 8,
    }
}

pub fn back(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index - 8,
        Side::Black => index + 8,
    }
}

pub fn left(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index - 1,
        Side::Black => index + 1,
    }
}

pub fn right(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index + 1,
        Side::Black => index - 1,
    }
}

pub fn front_left(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index + 7,
        Side::Black => index - 7,
    }
}

pub fn front_right(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index + 9,
        Side::Black => index - 9,
    }
}

pub fn back_left(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index - 9,
        Side::Black => index + 9,
    }
}

pub fn back_right(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index - 7,
        Side::Black => index + 7,
    }
}

pub fn double_push(index: i32, side: Side) -> i32 {
    match side {
        Side::White => index + 16,
        Side::Black => index - 16,
    }
}

/// True for pawns one rank short of promotion.
pub fn promotion_candidate(index: i32, side: Side) -> bool {
    match side {
        Side::White => (48..56).contains(&index),
        Side::Black => (8..16).contains(&index),
    }
}

/// True for pawns still on their home rank.
pub fn double_push_candidate(index: i32, side: Side) -> bool {
    match side {
        Side::White => (8..16).contains(&index),
        Side::Black => (48..56).contains(&index),
    }
}

/// The side's own back rank.
pub fn on_first_rank(index: i32, side: Side) -> bool {
    match side {
        Side::White => index <= 7,
        Side::Black => index >= 56,
    }
}

/// The opponent's back rank.
pub fn on_last_rank(index: i32, side: Side) -> bool {
    match side {
        Side::White => index >= 56,
        Side::Black => index <= 7,
    }
}
