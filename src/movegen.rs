//! Pseudo-legal move generation per piece kind, and the copy-and-test
//! legality filter on top of it.

use crate::{
    geometry,
    position::{knight_targets, Position},
    types::{CastlingRights, Move, PieceKind, Side, Square},
};

/// Per-step validation for the sliding rays.
#[derive(Copy, Clone)]
enum StepRule {
    /// Front/back: bounded by the 0..63 range alone.
    Vertical,
    /// Left/right: the square colour must flip.
    Lateral,
    /// The square colour must be preserved.
    Diagonal,
}

impl StepRule {
    fn allows(self, from: i32, to: i32) -> bool {
        match self {
            StepRule::Vertical => geometry::on_board(to),
            StepRule::Lateral => geometry::lateral_step_ok(from, to),
            StepRule::Diagonal => geometry::diagonal_step_ok(from, to),
        }
    }
}

impl Position {
    /// All pseudo-legal moves for the side to move, in generation order.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        let own = self.color_positions().bitboard(self.turn());

        for square in Square::iter() {
            if own.is_bit_set(square) {
                self.moves_from_index(square as i32, &mut moves);
            }
        }

        moves
    }

    /// Pseudo-legal moves from one square, appended to `moves`. Nothing is
    /// generated when the square is empty or holds an opponent piece.
    pub fn pseudo_legal_moves_from(&self, from: Square, moves: &mut Vec<Move>) {
        let index = from as i32;

        if self.occupant(index) == Some(self.turn()) {
            self.moves_from_index(index, moves);
        }
    }

    /// Pseudo-legal moves that do not leave the mover's own king attacked.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mover = self.turn();

        self.pseudo_legal_moves()
            .into_iter()
            .filter(|&move_| {
                let mut copy = *self;
                copy.make_move(move_);
                !copy.is_in_check(mover)
            })
            .collect()
    }

    fn moves_from_index(&self, from: i32, moves: &mut Vec<Move>) {
        match self.piece_at_index(from).map(|piece| piece.kind) {
            Some(PieceKind::Pawn) => self.pawn_moves_from(from, moves),
            Some(PieceKind::Knight) => self.knight_moves_from(from, moves),
            Some(PieceKind::Bishop) => self.bishop_moves_from(from, moves),
            Some(PieceKind::Rook) => self.rook_moves_from(from, moves),
            Some(PieceKind::Queen) => self.queen_moves_from(from, moves),
            Some(PieceKind::King) => self.king_moves_from(from, moves),
            None => {}
        }
    }

    fn pawn_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        let side = self.turn();
        let front = geometry::front(from, side);

        if geometry::on_board(front) && self.occupant(front).is_none() {
            if geometry::promotion_candidate(from, side) {
                push_promotions(moves, from, front);
            } else {
                push_move(moves, from, front);

                if geometry::double_push_candidate(from, side) {
                    let double = geometry::double_push(from, side);

                    if self.occupant(double).is_none() {
                        push_move(moves, from, double);
                    }
                }
            }
        }

        for target in [
            geometry::front_left(from, side),
            geometry::front_right(from, side),
        ] {
            if !geometry::diagonal_step_ok(from, target) {
                continue;
            }

            if let Some(occupant) = self.occupant(target) {
                if occupant != side {
                    if geometry::promotion_candidate(from, side) {
                        push_promotions(moves, from, target);
                    } else {
                        push_move(moves, from, target);
                    }
                }
            }
        }

        // En-passant capture; promotion is impossible from these ranks.
        if let Some(en_passant) = self.en_passant_target() {
            for target in [
                geometry::front_right(from, side),
                geometry::front_left(from, side),
            ] {
                if geometry::diagonal_step_ok(from, target) && target == en_passant as i32 {
                    push_move(moves, from, target);
                }
            }
        }
    }

    fn knight_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        let side = self.turn();

        for target in knight_targets(from, side) {
            // A true knight move always flips the square colour; a wrapped
            // one never does.
            if !geometry::on_board(target) || geometry::is_dark(target) == geometry::is_dark(from) {
                continue;
            }

            if self.occupant(target) != Some(side) {
                push_move(moves, from, target);
            }
        }
    }

    fn rook_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        self.ray_moves(from, geometry::front, StepRule::Vertical, moves);
        self.ray_moves(from, geometry::back, StepRule::Vertical, moves);
        self.ray_moves(from, geometry::left, StepRule::Lateral, moves);
        self.ray_moves(from, geometry::right, StepRule::Lateral, moves);
    }

    fn bishop_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        self.ray_moves(from, geometry::front_left, StepRule::Diagonal, moves);
        self.ray_moves(from, geometry::front_right, StepRule::Diagonal, moves);
        self.ray_moves(from, geometry::back_right, StepRule::Diagonal, moves);
        self.ray_moves(from, geometry::back_left, StepRule::Diagonal, moves);
    }

    fn queen_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        self.rook_moves_from(from, moves);
        self.bishop_moves_from(from, moves);
    }

    fn ray_moves(
        &self,
        from: i32,
        step: fn(i32, Side) -> i32,
        rule: StepRule,
        moves: &mut Vec<Move>,
    ) {
        let side = self.turn();
        let mut previous = from;
        let mut current = step(from, side);

        while rule.allows(previous, current) {
            match self.occupant(current) {
                None => {
                    push_move(moves, from, current);
                    previous = current;
                    current = step(current, side);
                }
                Some(occupant) => {
                    if occupant != side {
                        push_move(moves, from, current);
                    }
                    break;
                }
            }
        }
    }

    fn king_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        let side = self.turn();

        if !geometry::on_last_rank(from, side) {
            self.king_step(from, geometry::front(from, side), moves);

            for target in [
                geometry::front_left(from, side),
                geometry::front_right(from, side),
            ] {
                if geometry::diagonal_step_ok(from, target) {
                    self.king_step(from, target, moves);
                }
            }
        }

        if !geometry::on_first_rank(from, side) {
            self.king_step(from, geometry::back(from, side), moves);

            for target in [
                geometry::back_left(from, side),
                geometry::back_right(from, side),
            ] {
                if geometry::diagonal_step_ok(from, target) {
                    self.king_step(from, target, moves);
                }
            }
        }

        for target in [geometry::left(from, side), geometry::right(from, side)] {
            if geometry::lateral_step_ok(from, target) {
                self.king_step(from, target, moves);
            }
        }

        self.castling_moves_from(from, moves);
    }

    fn king_step(&self, from: i32, target: i32, moves: &mut Vec<Move>) {
        if self.occupant(target) != Some(self.turn()) {
            push_move(moves, from, target);
        }
    }

    fn castling_moves_from(&self, from: i32, moves: &mut Vec<Move>) {
        let side = self.turn();

        let Ok(king_square) = Square::try_from(from) else {
            return;
        };

        if self.is_attacked(king_square, side) {
            return;
        }

        // Toward the h-file. The rights imply the king is on its home
        // square, so the file arithmetic cannot wrap.
        if self.castling_rights().contains(CastlingRights::kingside(side))
            && self.castle_path_clear(from + 1, side)
            && self.castle_path_clear(from + 2, side)
        {
            push_move(moves, from, from + 2);
        }

        // Toward the a-file. The rook crosses the b-file square, so it must
        // be empty even though the king never touches it.
        if self
            .castling_rights()
            .contains(CastlingRights::queenside(side))
            && self.castle_path_clear(from - 1, side)
            && self.castle_path_clear(from - 2, side)
            && self.occupant(from - 3).is_none()
        {
            push_move(moves, from, from - 2);
        }
    }

    fn castle_path_clear(&self, index: i32, side: Side) -> bool {
        match Square::try_from(index) {
            Ok(square) => self.occupant(index).is_none() && !self.is_attacked(square, side),
            Err(_) => false,
        }
    }
}

fn push_move(moves: &mut Vec<Move>, from: i32, to: i32) {
    if let (Ok(from), Ok(to)) = (Square::try_from(from), Square::try_from(to)) {
        moves.push(Move::new(from, to));
    }
}

fn push_promotions(moves: &mut Vec<Move>, from: i32, to: i32) {
    if let (Ok(from), Ok(to)) = (Square::try_from(from), Square::try_from(to)) {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(from, to, kind));
        }
    }
}
