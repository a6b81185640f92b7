use std::fmt;

use crate::{
    constants::BACK_RANK,
    geometry,
    types::{BitBoard, CastlingRights, Move, Piece, PieceKind, Side, Square},
};

/// One bitboard per piece kind. The six masks are pairwise disjoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PiecePositions {
    pub pawns: BitBoard,
    pub knights: BitBoard,
    pub bishops: BitBoard,
    pub rooks: BitBoard,
    pub queens: BitBoard,
    pub kings: BitBoard,
}

impl PiecePositions {
    pub fn bitboard(&self, kind: PieceKind) -> BitBoard {
        match kind {
            PieceKind::Pawn => self.pawns,
            PieceKind::Knight => self.knights,
            PieceKind::Bishop => self.bishops,
            PieceKind::Rook => self.rooks,
            PieceKind::Queen => self.queens,
            PieceKind::King => self.kings,
        }
    }

    fn bitboard_mut(&mut self, kind: PieceKind) -> &mut BitBoard {
        match kind {
            PieceKind::Pawn => &mut self.pawns,
            PieceKind::Knight => &mut self.knights,
            PieceKind::Bishop => &mut self.bishops,
            PieceKind::Rook => &mut self.rooks,
            PieceKind::Queen => &mut self.queens,
            PieceKind::King => &mut self.kings,
        }
    }

    fn clear_index(&mut self, index: i32) {
        let mask = !(1u64 << index);
        self.pawns.0 &= mask;
        self.knights.0 &= mask;
        self.bishops.0 &= mask;
        self.rooks.0 &= mask;
        self.queens.0 &= mask;
        self.kings.0 &= mask;
    }

    fn kind_at(&self, index: i32) -> Option<PieceKind> {
        let bit = 1u64 << index;

        if self.pawns.0 & bit != 0 {
            Some(PieceKind::Pawn)
        } else if self.knights.0 & bit != 0 {
            Some(PieceKind::Knight)
        } else if self.bishops.0 & bit != 0 {
            Some(PieceKind::Bishop)
        } else if self.rooks.0 & bit != 0 {
            Some(PieceKind::Rook)
        } else if self.queens.0 & bit != 0 {
            Some(PieceKind::Queen)
        } else if self.kings.0 & bit != 0 {
            Some(PieceKind::King)
        } else {
            None
        }
    }
}

/// One bitboard per side. Disjoint, and their union equals the union of the
/// six piece masks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ColorPositions {
    pub white: BitBoard,
    pub black: BitBoard,
}

impl ColorPositions {
    pub fn bitboard(&self, side: Side) -> BitBoard {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    fn bitboard_mut(&mut self, side: Side) -> &mut BitBoard {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    fn clear_index(&mut self, index: i32) {
        let mask = !(1u64 << index);
        self.white.0 &= mask;
        self.black.0 &= mask;
    }
}

/// Transposition-table key: the full chess state including the half-move
/// clock. The std hasher over the derived fields is the position hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TranspositionKey {
    pieces: PiecePositions,
    colors: ColorPositions,
    turn: Side,
    castling: CastlingRights,
    en_passant: Option<Square>,
    half_move_clock: u32,
}

/// Repetition key: the half-move clock is deliberately excluded so that
/// chess-identical positions collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RepetitionKey {
    pieces: PiecePositions,
    colors: ColorPositions,
    turn: Side,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pieces: PiecePositions,
    colors: ColorPositions,
    turn: Side,
    castling: CastlingRights,
    en_passant: Option<Square>,
    half_move_clock: u32,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            pieces: PiecePositions::default(),
            colors: ColorPositions::default(),
            turn: Side::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            half_move_clock: 0,
        }
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut position = Self::empty();

        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;

            if let Some(square) = Square::from_coordinates(file, 0) {
                position.set_piece(square, Piece::new(Side::White, kind));
            }
            if let Some(square) = Square::from_coordinates(file, 1) {
                position.set_piece(square, Piece::new(Side::White, PieceKind::Pawn));
            }
            if let Some(square) = Square::from_coordinates(file, 6) {
                position.set_piece(square, Piece::new(Side::Black, PieceKind::Pawn));
            }
            if let Some(square) = Square::from_coordinates(file, 7) {
                position.set_piece(square, Piece::new(Side::Black, kind));
            }
        }

        position.castling = CastlingRights::ALL;
        position
    }

    /// Place `piece` on `square`, replacing whatever was there.
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        let index = square as i32;

        self.pieces.clear_index(index);
        self.colors.clear_index(index);
        self.pieces.bitboard_mut(piece.kind).set_bit(square);
        self.colors.bitboard_mut(piece.side).set_bit(square);
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.piece_at_index(square as i32)
    }

    pub(crate) fn piece_at_index(&self, index: i32) -> Option<Piece> {
        let side = self.occupant(index)?;

        self.pieces
            .kind_at(index)
            .map(|kind| Piece::new(side, kind))
    }

    /// Side occupying a square, if any. Off-board indices read as empty.
    pub(crate) fn occupant(&self, index: i32) -> Option<Side> {
        if !geometry::on_board(index) {
            return None;
        }

        let bit = 1u64 << index;

        if self.colors.white.0 & bit != 0 {
            Some(Side::White)
        } else if self.colors.black.0 & bit != 0 {
            Some(Side::Black)
        } else {
            None
        }
    }

    fn clear_index(&mut self, index: i32) {
        self.pieces.clear_index(index);
        self.colors.clear_index(index);
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Side) {
        self.turn = turn;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant_target(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    pub fn set_half_move_clock(&mut self, clock: u32) {
        self.half_move_clock = clock;
    }

    pub fn piece_positions(&self) -> &PiecePositions {
        &self.pieces
    }

    pub fn color_positions(&self) -> &ColorPositions {
        &self.colors
    }

    pub fn piece_count(&self, side: Side, kind: PieceKind) -> u32 {
        (self.colors.bitboard(side) & self.pieces.bitboard(kind)).count()
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        (self.colors.bitboard(side) & self.pieces.kings).lsb_square()
    }

    pub fn transposition_key(&self) -> TranspositionKey {
        TranspositionKey {
            pieces: self.pieces,
            colors: self.colors,
            turn: self.turn,
            castling: self.castling,
            en_passant: self.en_passant,
            half_move_clock: self.half_move_clock,
        }
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            pieces: self.pieces,
            colors: self.colors,
            turn: self.turn,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(square) => self.is_attacked(square, side),
            None => false,
        }
    }

    /// True iff any piece of the side opposite `defender` attacks `square`.
    /// Rays fan out from the square using the defender's own orientation, so
    /// pawn attacks come from the two forward diagonals.
    pub fn is_attacked(&self, square: Square, defender: Side) -> bool {
        let origin = square as i32;

        // Vertical rays: only the 0..63 range bounds them.
        for step in [geometry::front, geometry::back] {
            let mut current = step(origin, defender);
            let mut first = true;

            while geometry::on_board(current) {
                match self.occupant(current) {
                    None => {
                        current = step(current, defender);
                        first = false;
                    }
                    Some(side) if side == defender => break,
                    Some(_) => {
                        if first && self.pieces.kings.is_bit_set_index(current) {
                            return true;
                        }
                        if self.pieces.rooks.is_bit_set_index(current)
                            || self.pieces.queens.is_bit_set_index(current)
                        {
                            return true;
                        }
                        break;
                    }
                }
            }
        }

        // Lateral rays: each step must flip the square colour.
        for step in [geometry::left, geometry::right] {
            let mut previous = origin;
            let mut current = step(origin, defender);
            let mut first = true;

            while geometry::lateral_step_ok(previous, current) {
                match self.occupant(current) {
                    None => {
                        previous = current;
                        current = step(current, defender);
                        first = false;
                    }
                    Some(side) if side == defender => break,
                    Some(_) => {
                        if first && self.pieces.kings.is_bit_set_index(current) {
                            return true;
                        }
                        if self.pieces.rooks.is_bit_set_index(current)
                            || self.pieces.queens.is_bit_set_index(current)
                        {
                            return true;
                        }
                        break;
                    }
                }
            }
        }

        // Diagonal rays: each step must keep the square colour. A pawn
        // attacks only from the two forward diagonals.
        for (step, forward) in [
            (geometry::front_left as fn(i32, Side) -> i32, true),
            (geometry::front_right, true),
            (geometry::back_left, false),
            (geometry::back_right, false),
        ] {
            let mut previous = origin;
            let mut current = step(origin, defender);
            let mut first = true;

            while geometry::diagonal_step_ok(previous, current) {
                match self.occupant(current) {
                    None => {
                        previous = current;
                        current = step(current, defender);
                        first = false;
                    }
                    Some(side) if side == defender => break,
                    Some(_) => {
                        if first {
                            if self.pieces.kings.is_bit_set_index(current) {
                                return true;
                            }
                            if forward && self.pieces.pawns.is_bit_set_index(current) {
                                return true;
                            }
                        }
                        if self.pieces.bishops.is_bit_set_index(current)
                            || self.pieces.queens.is_bit_set_index(current)
                        {
                            return true;
                        }
                        break;
                    }
                }
            }
        }

        // Knights: the colour comparator against the origin encodes exactly
        // the L-shape file pattern, so range plus colour-flip suffices.
        for target in knight_targets(origin, defender) {
            if !geometry::on_board(target) || geometry::is_dark(target) == geometry::is_dark(origin)
            {
                continue;
            }

            match self.occupant(target) {
                Some(side) if side != defender => {
                    if self.pieces.knights.is_bit_set_index(target) {
                        return true;
                    }
                }
                _ => {}
            }
        }

        // En passant is reported as an attack on the square directly in
        // front of the target, so the defender sees the capture threat.
        if let Some(en_passant) = self.en_passant {
            if en_passant as i32 == geometry::back(origin, defender) {
                return true;
            }
        }

        false
    }

    /// Apply `move_` to this position. The mover is the side to move; the
    /// caller keeps its own copy when it needs the previous state.
    pub fn make_move(&mut self, move_: Move) {
        let from = move_.from as i32;
        let to = move_.to as i32;

        let Some(mover) = self.piece_at(move_.from) else {
            return;
        };
        let victim = self.piece_at(move_.to);

        // An attempted king capture leaves the board untouched; only the
        // turn flips, which the legality filter turns into a rejection.
        if victim.map(|piece| piece.kind) != Some(PieceKind::King) {
            if victim.is_some() || mover.kind == PieceKind::Pawn {
                self.half_move_clock = 0;
            } else {
                self.half_move_clock += 1;
            }

            self.clear_index(to);
            self.clear_index(from);

            if mover.kind == PieceKind::King {
                let distance = to - from;

                if distance.abs() == 2 {
                    // Castle: bring the home-corner rook over the square the
                    // king crossed.
                    let (corner, rook_to) = if distance < 0 {
                        (to - 2, to + 1)
                    } else {
                        (to + 1, to - 1)
                    };

                    self.clear_index(corner);
                    self.set_piece_index(rook_to, Piece::new(mover.side, PieceKind::Rook));
                }

                self.castling = self.castling & !CastlingRights::side(mover.side);
            }

            if mover.kind == PieceKind::Rook {
                self.castling = self.castling & !corner_right(from);
            }

            // Covers a rook captured on (or a piece landing on) a corner.
            self.castling = self.castling & !corner_right(to);

            if mover.kind == PieceKind::Pawn {
                if let Some(en_passant) = self.en_passant {
                    if move_.to == en_passant {
                        self.clear_index(geometry::back(en_passant as i32, mover.side));
                    }
                    self.en_passant = None;
                }

                // A double push keeps the square colour and the file. The new
                // target only appears when an enemy pawn can actually use it.
                if geometry::is_dark(from) == geometry::is_dark(to) && from % 8 == to % 8 {
                    let passed = geometry::front(from, mover.side);

                    for neighbour in [
                        geometry::left(to, mover.side),
                        geometry::right(to, mover.side),
                    ] {
                        if !geometry::lateral_step_ok(to, neighbour) {
                            continue;
                        }

                        if let Some(piece) = self.piece_at_index(neighbour) {
                            if piece.kind == PieceKind::Pawn && piece.side != mover.side {
                                self.en_passant = Square::try_from(passed).ok();
                            }
                        }
                    }
                }
            } else if self.en_passant.is_some() {
                self.en_passant = None;
            }

            let placed = match move_.promote {
                Some(kind) => Piece::new(mover.side, kind),
                None => mover,
            };
            self.set_piece_index(to, placed);
        }

        self.turn = self.turn.opponent();
    }

    fn set_piece_index(&mut self, index: i32, piece: Piece) {
        if let Ok(square) = Square::try_from(index) {
            self.set_piece(square, piece);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// The eight L-shape neighbours, composed from the side-relative steps.
/// The set is the same for both sides; only the visiting order differs.
pub(crate) fn knight_targets(origin: i32, side: Side) -> [i32; 8] {
    let front = geometry::front(origin, side);
    let back = geometry::back(origin, side);
    let left = geometry::left(origin, side);
    let right = geometry::right(origin, side);

    [
        geometry::front_left(front, side),
        geometry::front_right(front, side),
        geometry::back_left(back, side),
        geometry::back_right(back, side),
        geometry::front_left(left, side),
        geometry::back_left(left, side),
        geometry::front_right(right, side),
        geometry::back_right(right, side),
    ]
}

/// The castling right lost when a rook leaves, or anything lands on, a
/// home corner. `NONE` for every other square.
fn corner_right(index: i32) -> CastlingRights {
    match index {
        0 => CastlingRights::WHITE_QUEENSIDE,
        7 => CastlingRights::WHITE_KINGSIDE,
        56 => CastlingRights::BLACK_QUEENSIDE,
        63 => CastlingRights::BLACK_KINGSIDE,
        _ => CastlingRights::NONE,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let symbol = Square::from_coordinates(file, rank)
                    .and_then(|square| self.piece_at(square))
                    .map(Piece::symbol)
                    .unwrap_or('.');

                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
