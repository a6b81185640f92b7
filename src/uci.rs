use std::io::{self, Write};
use std::time::Duration;

use crate::{
    constants::{
        HASH_OPTION_DEFAULT_MB, HASH_OPTION_MAX_MB, HASH_OPTION_MIN_MB, MAX_HASH_BYTES,
        MIN_HASH_BYTES, START_FEN,
    },
    engine::Engine,
    position::Position,
    time::TimeBudget,
    types::{Move, Side},
};

const ENGINE_NAME: &str = "Cheess Engine";
const ENGINE_VERSION: &str = "1";
const ENGINE_AUTHOR: &str = "Elias Stalpaert";

pub fn uci_loop(engine: &mut Engine) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut board = Position::new();

    loop {
        let mut input = String::new();
        if stdin.read_line(&mut input).is_err() {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts[0];

        match command {
            "uci" => {
                println!("id name {} {}", ENGINE_NAME, ENGINE_VERSION);
                println!("id author {}", ENGINE_AUTHOR);
                println!(
                    "option name Hash type spin default {} min {} max {}",
                    HASH_OPTION_DEFAULT_MB, HASH_OPTION_MIN_MB, HASH_OPTION_MAX_MB
                );
                println!("uciok");
                stdout.flush().ok();
            }
            "isready" => {
                println!("readyok");
                stdout.flush().ok();
            }
            "ucinewgame" => {
                engine.new_game();
                board = Position::new();
            }
            "setoption" => {
                if let Err(e) = parse_setoption_command(engine, input) {
                    eprintln!("Error parsing setoption: {}", e);
                }
            }
            "position" => {
                if let Err(e) = parse_position_command(engine, &mut board, input) {
                    eprintln!("Error parsing position: {}", e);
                }
            }
            "go" => {
                let budget = parse_go_command(&board, input);
                let pv = engine.pv(&board, budget);

                print_info(engine, &pv);

                match pv.best_move() {
                    Some(best) => println!("bestmove {}", best),
                    None => println!("bestmove 0000"),
                }
                stdout.flush().ok();
            }
            "stop" => {
                // The search runs synchronously; there is nothing to interrupt.
            }
            "quit" => {
                break;
            }
            "d" | "display" => {
                print!("{}", board);
            }
            _ => {
                // Unknown command - silently ignore per UCI spec
            }
        }
    }
}

fn print_info(engine: &Engine, pv: &crate::pv::PrincipalVariation) {
    let mut line = String::new();
    for move_ in pv {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&move_.to_string());
    }

    let score = if pv.is_mate() {
        format!("mate {}", (pv.len() + 1) / 2)
    } else {
        format!("cp {}", pv.score())
    };

    println!(
        "info depth {} score {} nodes {} pv {}",
        engine.depth_reached(),
        score,
        engine.nodes(),
        line
    );
}

/// Parse UCI setoption command
/// Example: setoption name Hash value 512
fn parse_setoption_command(engine: &mut Engine, command: &str) -> Result<(), String> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    let name_index = parts
        .iter()
        .position(|&part| part == "name")
        .ok_or("Missing option name")?;
    let value_index = parts
        .iter()
        .position(|&part| part == "value")
        .ok_or("Missing option value")?;

    let name = parts
        .get(name_index + 1)
        .ok_or("Missing option name")?
        .to_lowercase();

    match name.as_str() {
        "hash" => {
            let megabytes: usize = parts
                .get(value_index + 1)
                .ok_or("Missing Hash value")?
                .parse()
                .map_err(|_| "Hash value must be an integer".to_string())?;

            let bytes = (megabytes * 1_000_000).clamp(MIN_HASH_BYTES, MAX_HASH_BYTES);
            engine.set_hash_size(bytes);
            Ok(())
        }
        other => Err(format!("Unknown option: {}", other)),
    }
}

/// Parse UCI position command
/// Examples:
///   position startpos
///   position startpos moves e2e4 e7e5
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 moves e2e4
pub fn parse_position_command(
    engine: &mut Engine,
    board: &mut Position,
    command: &str,
) -> Result<(), String> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    if parts.len() < 2 {
        return Err("Invalid position command".to_string());
    }

    let mut index = 1;

    if parts[index] == "startpos" {
        *board = Position::from_fen(START_FEN)?;
        index += 1;
    } else if parts[index] == "fen" {
        index += 1;

        let mut fen_parts = Vec::new();
        // FEN has 6 space-separated fields
        for _ in 0..6 {
            if index < parts.len() && parts[index] != "moves" {
                fen_parts.push(parts[index]);
                index += 1;
            }
        }

        *board = Position::from_fen(&fen_parts.join(" "))?;
    } else {
        return Err(format!("Unknown position type: {}", parts[index]));
    }

    // Rebuild the over-the-board history so the search can claim draws
    // against positions that actually occurred.
    engine.clear_repetitions();
    engine.record_position(board);

    if index < parts.len() && parts[index] == "moves" {
        index += 1;

        while index < parts.len() {
            let move_text = parts[index];

            let move_ = Move::from_uci(move_text)
                .ok_or_else(|| format!("Invalid move: {}", move_text))?;

            if !board.legal_moves().contains(&move_) {
                return Err(format!("Illegal move: {}", move_text));
            }

            board.make_move(move_);
            engine.record_position(board);

            index += 1;
        }
    }

    Ok(())
}

/// Parse UCI go command into a time budget for the side to move
/// Examples:
///   go movetime 5000
///   go wtime 300000 btime 300000 winc 0 binc 0
///   go infinite
pub fn parse_go_command(board: &Position, command: &str) -> Option<TimeBudget> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    let mut wtime = None;
    let mut btime = None;
    let mut winc = None;
    let mut binc = None;
    let mut movetime = None;

    let mut i = 1; // Skip "go"
    while i < parts.len() {
        match parts[i] {
            "wtime" | "btime" | "winc" | "binc" | "movetime" => {
                let value = parts.get(i + 1).and_then(|text| text.parse::<u64>().ok());

                match parts[i] {
                    "wtime" => wtime = value,
                    "btime" => btime = value,
                    "winc" => winc = value,
                    "binc" => binc = value,
                    _ => movetime = value,
                }

                i += 2;
            }
            "infinite" => {
                return None;
            }
            _ => {
                i += 1;
            }
        }
    }

    if let Some(movetime) = movetime {
        return Some(TimeBudget::PerMove(Duration::from_millis(movetime)));
    }

    let (remaining, increment) = match board.turn() {
        Side::White => (wtime, winc),
        Side::Black => (btime, binc),
    };

    remaining.map(|remaining| TimeBudget::Clock {
        remaining: Duration::from_millis(remaining),
        increment: Duration::from_millis(increment.unwrap_or(0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Square};

    #[test]
    fn test_move_from_uci() {
        let move_ = Move::from_uci("e2e4").unwrap();
        assert_eq!(move_.from, Square::E2);
        assert_eq!(move_.to, Square::E4);
        assert_eq!(move_.promote, None);
    }

    #[test]
    fn test_move_from_uci_promotion() {
        let move_ = Move::from_uci("e7e8q").unwrap();
        assert_eq!(move_.from, Square::E7);
        assert_eq!(move_.to, Square::E8);
        assert_eq!(move_.promote, Some(PieceKind::Queen));
    }

    #[test]
    fn test_startpos_position() {
        let mut engine = Engine::new();
        let mut board = Position::new();
        let result = parse_position_command(&mut engine, &mut board, "position startpos");
        assert!(result.is_ok());
    }

    #[test]
    fn test_position_with_moves() {
        let mut engine = Engine::new();
        let mut board = Position::new();
        let result = parse_position_command(
            &mut engine,
            &mut board,
            "position startpos moves e2e4 e7e5",
        );
        assert!(result.is_ok());
        assert_eq!(board.turn(), Side::White);
        assert!(board.piece_at(Square::E4).is_some());
        assert!(board.piece_at(Square::E5).is_some());
    }

    #[test]
    fn test_position_rejects_illegal_move() {
        let mut engine = Engine::new();
        let mut board = Position::new();
        let result =
            parse_position_command(&mut engine, &mut board, "position startpos moves e2e5");
        assert!(result.is_err());
    }

    #[test]
    fn test_go_movetime_budget() {
        let board = Position::new();
        let budget = parse_go_command(&board, "go movetime 5000");
        assert!(matches!(
            budget,
            Some(TimeBudget::PerMove(duration)) if duration == Duration::from_millis(5000)
        ));
    }

    #[test]
    fn test_go_infinite_has_no_budget() {
        let board = Position::new();
        assert!(parse_go_command(&board, "go infinite").is_none());
    }

    #[test]
    fn test_go_clock_budget_uses_mover_clock() {
        let board = Position::new();
        let budget = parse_go_command(&board, "go wtime 300000 btime 100 winc 2000 binc 0");
        assert!(matches!(
            budget,
            Some(TimeBudget::Clock { remaining, increment })
                if remaining == Duration::from_millis(300000)
                    && increment == Duration::from_millis(2000)
        ));
    }
}
