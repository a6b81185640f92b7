//! Static evaluation: material plus space, always from the side-to-move's
//! perspective (negamax convention).

use crate::{
    constants::{BLACK_HALF, CENTER_SCORE, CENTER_SQUARES, SPACE_SCORE, WHITE_HALF},
    position::Position,
    types::{PieceKind, Side},
};

impl Position {
    pub fn evaluate(&self) -> i32 {
        self.material_score() + self.space_score()
    }

    fn material_score(&self) -> i32 {
        let mover = self.turn();
        let opponent = mover.opponent();
        let mut score = 0;

        for kind in [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            score += kind.value()
                * (self.piece_count(mover, kind) as i32 - self.piece_count(opponent, kind) as i32);
        }

        score
    }

    /// Presence on the opponent's half of the board, and on the four
    /// central squares.
    fn space_score(&self) -> i32 {
        let mover = self.turn();
        let mine = self.color_positions().bitboard(mover).0;
        let theirs = self.color_positions().bitboard(mover.opponent()).0;

        let center_score = CENTER_SCORE
            * ((mine & CENTER_SQUARES).count_ones() as i32
                - (theirs & CENTER_SQUARES).count_ones() as i32);

        let (advanced, their_advanced) = match mover {
            Side::White => (mine & BLACK_HALF, theirs & WHITE_HALF),
            Side::Black => (mine & WHITE_HALF, theirs & BLACK_HALF),
        };

        let occupation_score =
            SPACE_SCORE * (advanced.count_ones() as i32 - their_advanced.count_ones() as i32);

        center_score + occupation_score
    }
}
