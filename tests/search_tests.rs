use test_utils::*;

use std::time::Duration;

use cheess::{
    constants::{ALPHA_FLOOR, MATE_SCORE, START_FEN},
    engine::Engine,
    time::{TimeBudget, TimeManager},
    types::Square,
};

mod basic_search {
    use super::*;

    #[test]
    fn test_starting_position_search() {
        let position = position_from_fen(START_FEN);
        let mut engine = Engine::new();

        let pv = engine.pv(&position, None);

        assert!(!pv.is_mate(), "Nobody is mated in the opening");
        assert!(!pv.is_empty(), "A best line must be found");
        assert!(
            pv.score().abs() < MATE_SCORE,
            "Score must stay below the mate sentinel"
        );

        let best = pv.best_move().expect("PV cannot be empty here");
        assert!(
            position.legal_moves().contains(&best),
            "Best move {} must be legal",
            best
        );

        assert!(engine.depth_reached() >= 5);
        assert!(engine.nodes() > 0);
    }

    #[test]
    fn test_starting_king_is_not_attacked() {
        let position = position_from_fen(START_FEN);
        assert!(!position.is_attacked(Square::E1, cheess::types::Side::White));
    }

    #[test]
    fn test_search_is_deterministic() {
        let position = position_from_fen("4k3/7r/8/8/8/8/4Q3/4K3 w - - 0 1");

        let first = Engine::new().pv(&position, None);
        let second = Engine::new().pv(&position, None);

        assert_eq!(first, second);
    }

    #[test]
    fn test_negamax_symmetry_with_best_child() {
        let position = position_from_fen(START_FEN);
        let timer = TimeManager::start(None);

        let mut engine = Engine::new();
        let (line, score) = engine.negamax(&position, 2, ALPHA_FLOOR, MATE_SCORE, &timer);

        // The line comes back in reverse order: the root move is last
        let best = *line.last().expect("search must find a move");
        let mut child = position;
        child.make_move(best);

        let (_, child_score) =
            Engine::new().negamax(&child, 1, ALPHA_FLOOR, MATE_SCORE, &timer);

        assert_eq!(score, -child_score);
    }
}

mod mate_handling {
    use super::*;

    #[test]
    fn test_fools_mate_position_is_over() {
        let mut position = position_from_fen(START_FEN);
        apply_moves(&mut position, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert!(position.legal_moves().is_empty());
        assert!(position.is_attacked(Square::E1, cheess::types::Side::White));
        assert!(position.is_in_check(cheess::types::Side::White));
    }

    #[test]
    fn test_fools_mate_is_found_at_depth_one() {
        let mut position = position_from_fen(START_FEN);
        apply_moves(&mut position, &["f2f3", "e7e5", "g2g4"]);

        let pv = Engine::new().pv(&position, None);

        assert!(pv.is_mate());
        assert_eq!(pv.score(), 1, "Mate found at depth 1 reports 1");
        assert_eq!(pv.best_move().map(|m| m.to_string()), Some("d8h4".into()));
    }

    #[test]
    fn test_back_rank_mate_in_one() {
        let position = position_from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");
        let pv = Engine::new().pv(&position, None);

        assert!(pv.is_mate());
        assert_eq!(pv.best_move().map(|m| m.to_string()), Some("a1a8".into()));
    }

    #[test]
    fn test_mated_root_returns_the_sentinel() {
        let mut position = position_from_fen(START_FEN);
        apply_moves(&mut position, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let timer = TimeManager::start(None);
        let (line, score) =
            Engine::new().negamax(&position, 3, ALPHA_FLOOR, MATE_SCORE, &timer);

        assert!(line.is_empty());
        assert_eq!(score, -MATE_SCORE);
    }

    #[test]
    fn test_mated_root_pv_has_the_mate_flag() {
        let mut position = position_from_fen(START_FEN);
        apply_moves(&mut position, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let pv = Engine::new().pv(&position, None);

        assert!(pv.is_mate());
        assert!(pv.is_empty());
        assert_eq!(pv.score(), 0, "Mate at the root is found at depth 0");
    }

    #[test]
    fn test_stalemate_scores_zero() {
        // Black to move has no moves and is not in check
        let position = position_from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");

        assert!(position.legal_moves().is_empty());
        assert!(!position.is_in_check(cheess::types::Side::Black));

        let pv = Engine::new().pv(&position, None);
        assert!(!pv.is_mate());
        assert_eq!(pv.score(), 0);
    }
}

mod configuration {
    use super::*;

    #[test]
    fn test_search_survives_a_full_transposition_table() {
        let position = position_from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");

        // A zero-byte table holds nothing; insertions are dropped silently
        let mut engine = Engine::new();
        engine.set_hash_size(0);

        let pv = engine.pv(&position, None);
        assert!(pv.is_mate());
        assert_eq!(pv.best_move().map(|m| m.to_string()), Some("a1a8".into()));
    }

    #[test]
    fn test_new_game_clears_state_without_changing_results() {
        let position = position_from_fen(START_FEN);
        let mut engine = Engine::new();

        let first = engine.pv(&position, None);
        engine.new_game();
        let second = engine.pv(&position, None);

        assert_eq!(first, second);
    }

    #[test]
    fn test_exhausted_budget_still_returns_quickly() {
        let position = position_from_fen(START_FEN);
        let mut engine = Engine::new();

        let pv = engine.pv(&position, Some(TimeBudget::PerMove(Duration::ZERO)));

        // Only the depth-0 evaluation pass runs before the limit trips
        assert_eq!(engine.depth_reached(), 0);
        assert!(!pv.is_mate());
    }
}
