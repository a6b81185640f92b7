use cheess::{engine::Engine, position::Position, uci};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut engine = Engine::new();

    if args.is_empty() {
        uci::uci_loop(&mut engine);
        return;
    }

    // A FEN on the command line: print the principal variation and exit.
    let fen = args.join(" ");

    match Position::from_fen(&fen) {
        Ok(board) => {
            let pv = engine.pv(&board, None);
            println!("PV: {}", pv);
        }
        Err(e) => {
            eprintln!("Parsing FEN failed: {}", e);
            std::process::exit(1);
        }
    }
}
