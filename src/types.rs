use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Right-most bit represents A1
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct BitBoard(pub u64);

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub fn iter() -> impl Iterator<Item = Side> {
        [Side::White, Side::Black].into_iter()
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A concrete piece: its owner and its kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }
}

/// The four castling capabilities as a 4-bit flag set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0b0000);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(0b0001);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(0b0010);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(0b0100);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(0b1000);
    pub const WHITE: CastlingRights = CastlingRights(0b0011);
    pub const BLACK: CastlingRights = CastlingRights(0b1100);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn contains(self, rights: CastlingRights) -> bool {
        self.0 & rights.0 == rights.0
    }

    /// Both rights of one side.
    pub fn side(side: Side) -> CastlingRights {
        match side {
            Side::White => CastlingRights::WHITE,
            Side::Black => CastlingRights::BLACK,
        }
    }

    pub fn kingside(side: Side) -> CastlingRights {
        match side {
            Side::White => CastlingRights::WHITE_KINGSIDE,
            Side::Black => CastlingRights::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(side: Side) -> CastlingRights {
        match side {
            Side::White => CastlingRights::WHITE_QUEENSIDE,
            Side::Black => CastlingRights::BLACK_QUEENSIDE,
        }
    }
}

impl BitAnd for CastlingRights {
    type Output = CastlingRights;

    fn bitand(self, rhs: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & rhs.0)
    }
}

impl BitOr for CastlingRights {
    type Output = CastlingRights;

    fn bitor(self, rhs: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | rhs.0)
    }
}

impl Not for CastlingRights {
    type Output = CastlingRights;

    fn not(self) -> CastlingRights {
        CastlingRights(!self.0 & CastlingRights::ALL.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promote: None,
        }
    }

    pub fn promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promote: Some(kind),
        }
    }

    /// Parse UCI move text: from-square, to-square, optional lowercase
    /// promotion letter (e.g. "e2e4", "e7e8q").
    pub fn from_uci(uci: &str) -> Option<Move> {
        if uci.len() != 4 && uci.len() != 5 {
            return None;
        }

        let from = Square::from_name(uci.get(0..2)?)?;
        let to = Square::from_name(uci.get(2..4)?)?;

        let promote = match uci.get(4..5) {
            None => None,
            Some("n") => Some(PieceKind::Knight),
            Some("b") => Some(PieceKind::Bishop),
            Some("r") => Some(PieceKind::Rook),
            Some("q") => Some(PieceKind::Queen),
            Some(_) => return None,
        };

        Some(Move { from, to, promote })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;

        if let Some(kind) = self.promote {
            write!(f, "{}", kind.symbol())?;
        }

        Ok(())
    }
}
