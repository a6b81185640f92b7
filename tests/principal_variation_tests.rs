use test_utils::*;

use cheess::{pv::PrincipalVariation, types::Move};

mod display {
    use super::*;

    #[test]
    fn test_positive_score_carries_a_plus_sign() {
        let pv = PrincipalVariation::new(vec![parse_move("e2e4"), parse_move("e7e5")], 35, false);
        assert_eq!(pv.to_string(), "+35 [ e2e4 e7e5 ]");
    }

    #[test]
    fn test_zero_is_non_negative() {
        let pv = PrincipalVariation::new(Vec::new(), 0, false);
        assert_eq!(pv.to_string(), "+0 [ ]");
    }

    #[test]
    fn test_negative_score() {
        let pv = PrincipalVariation::new(vec![parse_move("g8f6")], -120, false);
        assert_eq!(pv.to_string(), "-120 [ g8f6 ]");
    }

    #[test]
    fn test_mate_prints_the_literal() {
        let pv = PrincipalVariation::new(vec![parse_move("d8h4")], 1, true);
        assert_eq!(pv.to_string(), "CHECKMATE [ d8h4 ]");
    }

    #[test]
    fn test_promotion_moves_keep_their_letter() {
        let pv = PrincipalVariation::new(vec![parse_move("e7e8q")], 900, false);
        assert_eq!(pv.to_string(), "+900 [ e7e8q ]");
    }
}

mod accessors {
    use super::*;

    #[test]
    fn test_length_and_emptiness() {
        let empty = PrincipalVariation::new(Vec::new(), 0, false);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.best_move(), None);

        let pv = PrincipalVariation::new(vec![parse_move("e2e4"), parse_move("e7e5")], 10, false);
        assert_eq!(pv.len(), 2);
        assert!(!pv.is_empty());
    }

    #[test]
    fn test_iteration_yields_moves_in_play_order() {
        let line = vec![parse_move("e2e4"), parse_move("e7e5"), parse_move("g1f3")];
        let pv = PrincipalVariation::new(line.clone(), 10, false);

        let collected: Vec<Move> = pv.into_iter().copied().collect();
        assert_eq!(collected, line);
        assert_eq!(pv.best_move(), Some(line[0]));
    }
}

mod move_text {
    use super::*;

    #[test]
    fn test_round_trip() {
        for text in ["e2e4", "e7e8q", "a7a8n", "h1a8", "b7b8r", "c2c1b"] {
            let move_ = Move::from_uci(text)
                .unwrap_or_else(|| panic!("{} should parse", text));
            assert_eq!(move_.to_string(), text);
            assert_eq!(Move::from_uci(&move_.to_string()), Some(move_));
        }
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        for text in ["", "e2", "e2e", "e2e9", "i2e4", "e7e8x", "e2e4q1", "0000"] {
            assert_eq!(Move::from_uci(text), None, "{:?} should not parse", text);
        }
    }
}
