//! Programmatic analysis interface for embedding the engine without the
//! UCI loop. Enabled by the `api` feature.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{engine::Engine, position::Position, time::TimeBudget};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub movetime_ms: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,      // The best move in UCI format (e.g., e2e4)
    pub score: i32,             // Evaluation in centipawns, or the mate depth
    pub mate: bool,             // Whether a forced mate was found
    pub pv: Vec<String>,        // Principal variation (best line of play)
    pub nodes: usize,           // Nodes visited by the search
    pub fen_after_move: String, // FEN string after applying the best move
}

/// Analyze a position given as FEN and return the best move.
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse, String> {
    let board = Position::from_fen(&request.fen).map_err(|e| format!("Invalid FEN: {}", e))?;

    let budget = request
        .movetime_ms
        .map(|ms| TimeBudget::PerMove(Duration::from_millis(ms)));

    let mut engine = Engine::new();
    let pv = engine.pv(&board, budget);

    let best_move = pv
        .best_move()
        .ok_or_else(|| "No legal moves in position (checkmate or stalemate)".to_string())?;

    let mut after = board;
    after.make_move(best_move);

    Ok(AnalyzeResponse {
        best_move: best_move.to_string(),
        score: pv.score(),
        mate: pv.is_mate(),
        pv: pv.moves().iter().map(|move_| move_.to_string()).collect(),
        nodes: engine.nodes(),
        fen_after_move: after.to_fen(),
    })
}

/// Simpler interface with just a FEN.
pub fn get_best_move(fen: &str) -> Result<AnalyzeResponse, String> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        movetime_ms: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn test_analyze_starting_position() {
        let response = get_best_move(START_FEN).unwrap();
        assert!(!response.best_move.is_empty());
        assert!(!response.mate);
        assert!(response.nodes > 0);
    }

    #[test]
    fn test_invalid_fen() {
        let result = analyze_position(AnalyzeRequest {
            fen: "invalid fen string".to_string(),
            movetime_ms: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_mated_position_has_no_move() {
        // Fool's mate: White is checkmated
        let result = get_best_move("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_fen_after_move_differs() {
        let response = get_best_move(START_FEN).unwrap();
        assert_ne!(response.fen_after_move, START_FEN);
        assert!(response.fen_after_move.contains('/'));
    }
}
