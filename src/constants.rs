use crate::types::PieceKind;

pub const NUM_SQUARES: usize = 64;
pub const NUM_FILES: usize = 8;
pub const NUM_RANKS: usize = 8;

/// Dark squares of the board. Stepping sideways flips this colour, stepping
/// diagonally keeps it; a step that breaks the rule crossed a file boundary.
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;

/// Ranks 1-4. The complement is Black's half.
pub const WHITE_HALF: u64 = 0x0000_0000_FFFF_FFFF;
pub const BLACK_HALF: u64 = !WHITE_HALF;

/// d4, e4, d5, e5
pub const CENTER_SQUARES: u64 = 0x0000_0018_1800_0000;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// White's back rank from the a-file; mirrored for Black.
pub const BACK_RANK: [PieceKind; NUM_FILES] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Reserved for forced mates; never produced by the evaluation.
pub const MATE_SCORE: i32 = 100_000;

/// Root alpha bound. Sits below -MATE_SCORE so even a mated root raises alpha.
pub const ALPHA_FLOOR: i32 = -150_000;

/// Depths searched by the fixed iterative-deepening schedule (0..=5).
pub const BASE_SEARCH_DEPTH: u32 = 5;

/// Hard cap for the deepen-while-losing phase so it always terminates.
pub const MAX_SEARCH_DEPTH: u32 = 32;

/// Estimated bytes per transposition entry; the entry cap is bytes / this.
pub const TT_ENTRY_BYTES: usize = 40;

pub const DEFAULT_HASH_BYTES: usize = 2_000_000_000;
pub const MIN_HASH_BYTES: usize = 128_000_000;
pub const MAX_HASH_BYTES: usize = 2_000_000_000;

// UCI "Hash" option bounds, in megabytes.
pub const HASH_OPTION_DEFAULT_MB: usize = 2000;
pub const HASH_OPTION_MIN_MB: usize = 128;
pub const HASH_OPTION_MAX_MB: usize = 2000;

/// A remaining-clock budget is divided by this to get the per-move slice.
pub const EXPECTED_MOVES_REMAINING: u32 = 30;

/// New depths are not started once this fraction of the slice is spent.
pub const SOFT_TO_HARD_LIMIT_RATIO: f64 = 0.75;

// Evaluation weights (centipawns).
pub const SPACE_SCORE: i32 = 10;
pub const CENTER_SCORE: i32 = 50;
