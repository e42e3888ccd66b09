use sable::board::Board;
use sable::moves::magic::MagicTables;
use sable::moves::magic::loader::load_magic_tables;
use sable::moves::perft::{perft, perft_divide, perft_with_stats};
use std::str::FromStr;
use std::sync::OnceLock;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWI_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
// Endgame net full of en-passant pins and promotion races.
const POS3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
// Mirror-heavy middlegame with under-promotion checks.
const POS4_FEN: &str = "r3k2r/Ppp2ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POS5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn tables() -> &'static MagicTables {
    static TABLES: OnceLock<MagicTables> = OnceLock::new();
    TABLES.get_or_init(load_magic_tables)
}

fn assert_perft(fen: &str, depth: u32, expected: u64) {
    let mut board = Board::from_str(fen).expect("valid FEN");
    let nodes = perft(&mut board, tables(), depth);
    assert_eq!(
        nodes, expected,
        "perft mismatch at depth {} for {}: got {}, expected {}",
        depth, fen, nodes, expected
    );
    // A perft run must leave the position exactly as it found it.
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.zobrist, board.compute_zobrist_full());
}

#[test]
fn perft_startpos_d1() {
    assert_perft(START_FEN, 1, 20);
}

#[test]
fn perft_startpos_d2() {
    assert_perft(START_FEN, 2, 400);
}

#[test]
fn perft_startpos_d3() {
    assert_perft(START_FEN, 3, 8_902);
}

#[test]
fn perft_startpos_d4() {
    assert_perft(START_FEN, 4, 197_281);
}

#[test]
fn perft_startpos_d5() {
    assert_perft(START_FEN, 5, 4_865_609);
}

#[test]
#[ignore] // heavy; run with --ignored
fn perft_startpos_d6() {
    assert_perft(START_FEN, 6, 119_060_324);
}

#[test]
fn perft_kiwipete_shallow() {
    assert_perft(KIWI_FEN, 1, 48);
    assert_perft(KIWI_FEN, 2, 2_039);
    assert_perft(KIWI_FEN, 3, 97_862);
}

#[test]
#[ignore] // heavy; run with --ignored
fn perft_kiwipete_d4() {
    assert_perft(KIWI_FEN, 4, 4_085_603);
}

#[test]
fn perft_position3_en_passant_pins() {
    assert_perft(POS3_FEN, 1, 14);
    assert_perft(POS3_FEN, 2, 191);
    assert_perft(POS3_FEN, 3, 2_812);
    assert_perft(POS3_FEN, 4, 43_238);
    assert_perft(POS3_FEN, 5, 674_624);
}

#[test]
fn perft_position4_promotions() {
    assert_perft(POS4_FEN, 1, 6);
    assert_perft(POS4_FEN, 2, 264);
    assert_perft(POS4_FEN, 3, 9_467);
}

#[test]
fn perft_position5() {
    assert_perft(POS5_FEN, 1, 44);
    assert_perft(POS5_FEN, 2, 1_486);
    assert_perft(POS5_FEN, 3, 62_379);
}

#[test]
fn divide_sums_to_the_full_count() {
    let mut board = Board::from_str(START_FEN).unwrap();
    let (rows, total) = perft_divide(&mut board, tables(), 3);
    assert_eq!(rows.len(), 20);
    assert_eq!(total, 8_902);
    assert_eq!(rows.iter().map(|&(_, n)| n).sum::<u64>(), total);

    // Known child counts from the startpos divide.
    let e2e4 = rows
        .iter()
        .find(|(mv, _)| mv.to_uci() == "e2e4")
        .map(|&(_, n)| n)
        .unwrap();
    assert_eq!(e2e4, 600);
}

#[test]
fn startpos_d3_breakdown_matches_published_tallies() {
    let mut board = Board::from_str(START_FEN).unwrap();
    let stats = perft_with_stats(&mut board, tables(), 3);
    assert_eq!(stats.nodes, 8_902);
    assert_eq!(stats.captures, 34);
    assert_eq!(stats.ep_captures, 0);
    assert_eq!(stats.castles, 0);
    assert_eq!(stats.promotions, 0);
    assert_eq!(stats.checks, 12);
    assert_eq!(stats.checkmates, 0);
}

#[test]
fn kiwipete_breakdown_matches_published_tallies() {
    let mut board = Board::from_str(KIWI_FEN).unwrap();
    let d1 = perft_with_stats(&mut board, tables(), 1);
    assert_eq!(d1.nodes, 48);
    assert_eq!(d1.captures, 8);
    assert_eq!(d1.castles, 2);
    assert_eq!(d1.checks, 0);

    let d2 = perft_with_stats(&mut board, tables(), 2);
    assert_eq!(d2.nodes, 2_039);
    assert_eq!(d2.captures, 351);
    assert_eq!(d2.ep_captures, 1);
    assert_eq!(d2.castles, 91);
    assert_eq!(d2.promotions, 0);
    assert_eq!(d2.checks, 3);
}

#[test]
fn position3_d4_breakdown_counts_en_passant_work() {
    let mut board = Board::from_str(POS3_FEN).unwrap();
    let stats = perft_with_stats(&mut board, tables(), 4);
    assert_eq!(stats.nodes, 43_238);
    assert_eq!(stats.captures, 3_348);
    assert_eq!(stats.ep_captures, 123);
    assert_eq!(stats.checks, 1_680);
}

#[test]
fn legal_move_count_matches_perft1() {
    use sable::moves::movegen::legal_moves;
    use sable::moves::types::MoveList;

    for fen in [START_FEN, KIWI_FEN, POS3_FEN, POS4_FEN, POS5_FEN] {
        let mut board = Board::from_str(fen).unwrap();
        let mut moves = MoveList::new();
        legal_moves(&board, tables(), &mut moves);
        let p1 = perft(&mut board, tables(), 1);
        assert_eq!(moves.len() as u64, p1, "count mismatch for {}", fen);

        // No duplicates either.
        let mut seen: Vec<u16> = moves.iter().map(|m| m.raw()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), moves.len(), "duplicate moves for {}", fen);
    }
}
