//! Forsyth-Edwards Notation: parsing into a `Position` and emitting one
//! back. The full-move number is accepted but not tracked.

use crate::{
    position::Position,
    types::{CastlingRights, Piece, Side, Square},
};

impl Position {
    /// Parse the six whitespace-separated FEN fields.
    pub fn from_fen(fen: &str) -> Result<Position, String> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() != 6 {
            return Err(format!(
                "FEN must have 6 fields, found {}: {}",
                fields.len(),
                fen
            ));
        }

        let mut position = Position::empty();

        parse_placement(&mut position, fields[0])?;

        position.set_turn(match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(format!("Invalid active color: {}", other)),
        });

        position.set_castling_rights(parse_castling(fields[2])?);

        position.set_en_passant_target(match fields[3] {
            "-" => None,
            name => Some(
                Square::from_name(name).ok_or_else(|| format!("Invalid en passant square: {}", name))?,
            ),
        });

        // Negative half-move clocks appear in the wild; clamp them to zero.
        let half_moves: i64 = fields[4]
            .parse()
            .map_err(|_| format!("Invalid half-move clock: {}", fields[4]))?;
        position.set_half_move_clock(half_moves.max(0) as u32);

        fields[5]
            .parse::<u64>()
            .map_err(|_| format!("Invalid full-move number: {}", fields[5]))?;

        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty_run = 0;

            for file in 0..8u8 {
                let piece = Square::from_coordinates(file, rank).and_then(|sq| self.piece_at(sq));

                match piece {
                    Some(piece) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.turn() {
            Side::White => 'w',
            Side::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&castling_field(self.castling_rights()));

        fen.push(' ');
        match self.en_passant_target() {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        // The full-move number is not tracked by the engine.
        fen.push_str(&format!(" {} 1", self.half_move_clock()));

        fen
    }
}

fn parse_placement(position: &mut Position, placement: &str) -> Result<(), String> {
    let ranks: Vec<&str> = placement.split('/').collect();

    if ranks.len() != 8 {
        return Err(format!(
            "Placement must have 8 ranks, found {}: {}",
            ranks.len(),
            placement
        ));
    }

    // FEN lists ranks from 8 down to 1.
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for symbol in rank_text.chars() {
            if let Some(run) = symbol.to_digit(10) {
                file += run as u8;
                if file > 8 {
                    return Err(format!("Rank overflows 8 files: {}", rank_text));
                }
                continue;
            }

            let piece = Piece::from_symbol(symbol)
                .ok_or_else(|| format!("Invalid piece symbol: {}", symbol))?;
            let square = Square::from_coordinates(file, rank)
                .ok_or_else(|| format!("Rank overflows 8 files: {}", rank_text))?;

            position.set_piece(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(format!("Rank does not sum to 8 files: {}", rank_text));
        }
    }

    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, String> {
    if field == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;

    for symbol in field.chars() {
        rights = rights
            | match symbol {
                'K' => CastlingRights::WHITE_KINGSIDE,
                'Q' => CastlingRights::WHITE_QUEENSIDE,
                'k' => CastlingRights::BLACK_KINGSIDE,
                'q' => CastlingRights::BLACK_QUEENSIDE,
                other => return Err(format!("Invalid castling symbol: {}", other)),
            };
    }

    Ok(rights)
}

fn castling_field(rights: CastlingRights) -> String {
    if rights == CastlingRights::NONE {
        return "-".to_string();
    }

    let mut field = String::new();

    if rights.contains(CastlingRights::WHITE_KINGSIDE) {
        field.push('K');
    }
    if rights.contains(CastlingRights::WHITE_QUEENSIDE) {
        field.push('Q');
    }
    if rights.contains(CastlingRights::BLACK_KINGSIDE) {
        field.push('k');
    }
    if rights.contains(CastlingRights::BLACK_QUEENSIDE) {
        field.push('q');
    }

    field
}
