use std::collections::HashMap;

use crate::{
    constants::{
        ALPHA_FLOOR, BASE_SEARCH_DEPTH, DEFAULT_HASH_BYTES, MATE_SCORE, MAX_SEARCH_DEPTH,
        TT_ENTRY_BYTES,
    },
    position::{Position, RepetitionKey, TranspositionKey},
    pv::PrincipalVariation,
    time::{TimeBudget, TimeManager},
    types::Move,
};

/// Iterative-deepening negamax with alpha-beta pruning. The transposition
/// table only remembers the best move per position for move ordering; the
/// repetition map carries occurrence counts for threefold claims, seeded
/// with the played game and incremented transiently during the search.
pub struct Engine {
    transposition_table: HashMap<TranspositionKey, Move>,
    repetition_map: HashMap<RepetitionKey, u32>,
    max_table_entries: usize,
    nodes: usize,
    depth_reached: u32,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            transposition_table: HashMap::new(),
            repetition_map: HashMap::new(),
            max_table_entries: DEFAULT_HASH_BYTES / TT_ENTRY_BYTES,
            nodes: 0,
            depth_reached: 0,
        }
    }

    /// Forget everything learned from the previous game.
    pub fn new_game(&mut self) {
        self.transposition_table.clear();
        self.repetition_map.clear();
    }

    /// Resize the transposition cap. Nothing is evicted; insertions simply
    /// stop once the cap is reached.
    pub fn set_hash_size(&mut self, bytes: usize) {
        self.max_table_entries = bytes / TT_ENTRY_BYTES;
    }

    /// Register a position reached over the board, so in-search lines that
    /// revisit it can claim the threefold draw.
    pub fn record_position(&mut self, position: &Position) {
        *self
            .repetition_map
            .entry(position.repetition_key())
            .or_insert(0) += 1;
    }

    /// Drop the played-game history, keeping the move-ordering table.
    pub fn clear_repetitions(&mut self) {
        self.repetition_map.clear();
    }

    /// Nodes visited by the most recent `pv` call.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Deepest completed iteration of the most recent `pv` call.
    pub fn depth_reached(&self) -> u32 {
        self.depth_reached
    }

    /// Search `board` and return the principal variation.
    ///
    /// Depths 0..=5 are searched in turn; a forced mate returns immediately
    /// with the mate flag set and the depth as the score. If the final
    /// score is still negative the search keeps deepening, hoping to reach
    /// a claimable draw, up to a hard depth cap.
    pub fn pv(&mut self, board: &Position, budget: Option<TimeBudget>) -> PrincipalVariation {
        let timer = TimeManager::start(budget);

        self.nodes = 0;
        self.depth_reached = 0;

        let mut moves = Vec::new();
        let mut score = 0;

        let mut depth = 0;
        while depth <= BASE_SEARCH_DEPTH {
            if depth > 0 && timer.is_soft_limit_reached() {
                break;
            }

            (moves, score) = self.negamax(board, depth, ALPHA_FLOOR, MATE_SCORE, &timer);
            self.depth_reached = depth;

            if score.abs() == MATE_SCORE {
                moves.reverse();
                return PrincipalVariation::new(moves, depth as i32, true);
            }

            depth += 1;
        }

        // Losing: keep deepening until a non-negative line (a claimed draw)
        // appears or the depth cap ends the hunt.
        while score < 0 && depth <= MAX_SEARCH_DEPTH && !timer.is_soft_limit_reached() {
            (moves, score) = self.negamax(board, depth, ALPHA_FLOOR, MATE_SCORE, &timer);
            self.depth_reached = depth;
            depth += 1;
        }

        moves.reverse();
        PrincipalVariation::new(moves, score, false)
    }

    /// Fail-hard alpha-beta negamax. Returns the line in reverse order (the
    /// best move is appended last); the root reverses it once.
    pub fn negamax(
        &mut self,
        board: &Position,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        timer: &TimeManager,
    ) -> (Vec<Move>, i32) {
        self.nodes += 1;

        let mut moves = board.legal_moves();

        if moves.is_empty() {
            if board.is_in_check(board.turn()) {
                return (Vec::new(), -MATE_SCORE);
            }
            return (Vec::new(), 0);
        }

        if depth == 0 {
            return (Vec::new(), board.evaluate());
        }

        // Visit the previously best move first: pull it out, push it to the
        // back, and reverse so it leads the iteration.
        let key = board.transposition_key();
        if let Some(&ordered_first) = self.transposition_table.get(&key) {
            if let Some(found) = moves.iter().position(|&move_| move_ == ordered_first) {
                moves.remove(found);
            }
            moves.push(ordered_first);
            moves.reverse();
        }

        let mut best_move: Option<Move> = None;
        let mut best_line = Vec::new();

        for move_ in moves {
            if timer.is_hard_limit_reached() {
                break;
            }

            let mut child = *board;
            child.make_move(move_);

            let repetition = child.repetition_key();
            *self.repetition_map.entry(repetition).or_insert(0) += 1;

            let (line, child_score) = self.negamax(&child, depth - 1, -beta, -alpha, timer);
            let mut score = -child_score;

            // Claim the draw only when it helps: a losing line becomes 0
            // under the fifty-move rule or threefold repetition.
            if score < 0
                && (child.half_move_clock() >= 100 || self.repetition_map[&repetition] >= 3)
            {
                score = 0;
            }

            if score > alpha {
                alpha = score;
                best_move = Some(move_);
                best_line = line;
            }

            if let Some(count) = self.repetition_map.get_mut(&repetition) {
                *count -= 1;
                if *count == 0 {
                    self.repetition_map.remove(&repetition);
                }
            }

            if alpha >= beta {
                break;
            }
        }

        if let Some(best) = best_move {
            if let Some(entry) = self.transposition_table.get_mut(&key) {
                *entry = best;
            } else if self.transposition_table.len() < self.max_table_entries {
                self.transposition_table.insert(key, best);
            }

            best_line.push(best);
        }

        (best_line, alpha)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
