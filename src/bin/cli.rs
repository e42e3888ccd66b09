use indicatif::{ProgressBar, ProgressStyle};
use sable::board::{Board, Color};
use sable::logger::init_logging;
use sable::moves::execute::{make_move, unmake_move};
use sable::moves::magic::MagicTables;
use sable::moves::magic::loader::load_magic_tables;
use sable::moves::movegen::legal_moves;
use sable::moves::perft::perft;
use sable::moves::types::MoveList;
use sable::search::search::{MAX_SEARCH_DEPTH, search, search_to_depth};
use sable::search::tt::TranspositionTable;
use sable::uci::apply_uci_move;
use std::io::{self, BufRead};
use std::str::FromStr;

const DEFAULT_MOVES_TO_GO: u64 = 30;

fn main() {
    init_logging("logs/sable.log", "info");

    // Attack tables must exist before the first position is parsed.
    let tables = load_magic_tables();

    let mut board = Board::new();
    let mut tt = TranspositionTable::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "uci" => {
                println!("id name Sable 0.1.0");
                println!("id author the Sable authors");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                board = Board::new();
                tt.clear();
            }
            "position" => match build_position(&parts, &tables, &mut tt) {
                Ok(new_board) => board = new_board,
                Err(e) => eprintln!("info string position error: {}", e),
            },
            "go" => handle_go(&parts, &mut board, &tables, &mut tt),
            "stop" => {
                // The search is synchronous; by the time we read "stop"
                // it has already produced its bestmove.
            }
            "perft" => {
                let depth = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                run_perft(&mut board, &tables, depth);
            }
            "fen" | "d" => println!("{}", board),
            "quit" => break,
            _ => {}
        }
    }
}

/// `position [startpos | fen <fen>] [moves <m>...]`, replaying the moves
/// and pre-seeding the repetition counter with every visited position.
fn build_position(
    parts: &[&str],
    tables: &MagicTables,
    tt: &mut TranspositionTable,
) -> Result<Board, String> {
    let mut board = match parts.get(1) {
        Some(&"startpos") | None => Board::new(),
        Some(&"fen") => {
            let end = parts
                .iter()
                .position(|&p| p == "moves")
                .unwrap_or(parts.len());
            Board::from_str(&parts[2..end].join(" "))?
        }
        Some(other) => return Err(format!("unknown position kind {:?}", other)),
    };

    // The replayed history is the only game state that survives into the
    // search; it arrives as visit counts.
    tt.reset_visits();
    tt.increment_visits(board.zobrist);

    if let Some(idx) = parts.iter().position(|&p| p == "moves") {
        for text in &parts[idx + 1..] {
            apply_uci_move(&mut board, tables, text)?;
            tt.increment_visits(board.zobrist);
        }
    }
    Ok(board)
}

fn handle_go(
    parts: &[&str],
    board: &mut Board,
    tables: &MagicTables,
    tt: &mut TranspositionTable,
) {
    let mut wtime: Option<u64> = None;
    let mut btime: Option<u64> = None;
    let mut movestogo: Option<u64> = None;
    let mut movetime: Option<u64> = None;
    let mut depth: Option<u64> = None;
    let mut infinite = false;

    let mut i = 1;
    while i < parts.len() {
        let value = parts.get(i + 1).and_then(|s| s.parse::<u64>().ok());
        match parts[i] {
            "depth" => {
                depth = value;
                i += 2;
            }
            "wtime" => {
                wtime = value;
                i += 2;
            }
            "btime" => {
                btime = value;
                i += 2;
            }
            "movestogo" => {
                movestogo = value;
                i += 2;
            }
            "movetime" => {
                movetime = value;
                i += 2;
            }
            "infinite" => {
                infinite = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    // A bare depth limit searches without a clock; otherwise the budget
    // is movetime, or an even split of the remaining clock.
    let best = if let Some(d) = depth
        && movetime.is_none()
        && !infinite
    {
        let d = (d as i32).clamp(1, MAX_SEARCH_DEPTH);
        search_to_depth(board, tables, tt, d).1
    } else {
        let clock = match board.side_to_move {
            Color::White => wtime,
            Color::Black => btime,
        };
        let time_limit_ms = if infinite {
            u64::MAX
        } else if let Some(ms) = movetime {
            ms
        } else if let Some(remaining) = clock {
            remaining / movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1)
        } else {
            u64::MAX
        };
        search(board, tables, tt, time_limit_ms)
    };

    match best {
        Some(mv) => println!("bestmove {}", mv),
        None => println!("bestmove 0000"),
    }
}

fn run_perft(board: &mut Board, tables: &MagicTables, depth: u32) {
    let mut roots = MoveList::new();
    legal_moves(board, tables, &mut roots);

    let bar = ProgressBar::new(roots.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("perft {bar:30} {pos}/{len} {msg}")
            .expect("static progress template"),
    );

    let mut total = 0u64;
    for &mv in roots.iter() {
        let undo = make_move(board, mv);
        let nodes = if depth <= 1 {
            1
        } else {
            perft(board, tables, depth - 1)
        };
        unmake_move(board, undo);

        bar.println(format!("{}: {}", mv, nodes));
        bar.inc(1);
        total += nodes;
    }
    bar.finish_and_clear();
    println!("Total: {}", total);
}
