use sable::board::{Board, Piece};
use sable::moves::magic::MagicTables;
use sable::moves::magic::loader::load_magic_tables;
use sable::search::see::see;
use sable::square::Square;
use std::str::FromStr;
use std::sync::OnceLock;

fn tables() -> &'static MagicTables {
    static TABLES: OnceLock<MagicTables> = OnceLock::new();
    TABLES.get_or_init(load_magic_tables)
}

fn sq(name: &str) -> Square {
    Square::from_str(name).unwrap()
}

#[test]
fn winning_exchange_is_positive() {
    // Nxe5 on an undefended pawn.
    let b = Board::from_str("4k3/8/8/4p3/8/3N4/8/4K3 w - - 0 1").unwrap();
    let gain = see(&b, sq("e5"), Piece::Pawn, sq("d3"), Piece::Knight, tables());
    assert!(gain > 0);
    assert_eq!(gain, 100);
}

#[test]
fn losing_exchange_is_negative() {
    // Bxe5 where f6 recaptures: minor for a pawn.
    let b = Board::from_str("4k3/8/5p2/4p3/8/2B5/8/4K3 w - - 0 1").unwrap();
    let gain = see(&b, sq("e5"), Piece::Pawn, sq("c3"), Piece::Bishop, tables());
    assert!(gain < 0);
    assert_eq!(gain, 100 - 330);
}

#[test]
fn cheaper_attacker_fares_better_on_the_same_square() {
    // Knight and bishop both attack the defended e5 pawn; the knight
    // leaves less hanging, so its exchange score must dominate.
    let b = Board::from_str("4k3/8/5p2/4p3/8/2BN4/8/4K3 w - - 0 1").unwrap();
    let n = see(&b, sq("e5"), Piece::Pawn, sq("d3"), Piece::Knight, tables());
    let bb = see(&b, sq("e5"), Piece::Pawn, sq("c3"), Piece::Bishop, tables());
    assert!(n > bb, "Nxe5 ({}) must beat Bxe5 ({})", n, bb);
    assert!(n < 0 && bb < 0, "both captures still lose material");
}

#[test]
fn equal_trade_is_zero() {
    // RxR with a defended rook: 500 - 500.
    let b = Board::from_str("3rk3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
    let gain = see(&b, sq("d8"), Piece::Rook, sq("d1"), Piece::Rook, tables());
    assert_eq!(gain, 500 - 500);
}

#[test]
fn queen_grabbing_a_defended_pawn_loses_the_queen() {
    let b = Board::from_str("4k3/8/5p2/4p3/8/8/8/Q3K3 w - - 0 1").unwrap();
    let gain = see(&b, sq("e5"), Piece::Pawn, sq("a1"), Piece::Queen, tables());
    assert_eq!(gain, 100 - 900);
}

#[test]
fn defender_declines_a_bad_recapture() {
    // RxP with the pawn "defended" by a queen: the queen recapture would
    // lose queen for rook with a second rook behind, so the swap stops.
    let b = Board::from_str("3qk3/8/8/3p4/8/8/3R4/3R1K2 w - - 0 1").unwrap();
    let gain = see(&b, sq("d5"), Piece::Pawn, sq("d2"), Piece::Rook, tables());
    assert_eq!(gain, 100);
}

#[test]
fn king_never_walks_into_a_defended_square() {
    // KxP where the pawn is defended: the king sentinel makes the fold
    // refuse the capture chain.
    let b = Board::from_str("4k3/8/3r4/8/3p4/4K3/8/8 w - - 0 1").unwrap();
    let gain = see(&b, sq("d4"), Piece::Pawn, sq("e3"), Piece::King, tables());
    assert!(gain < 0, "Kxd4 into Rxd4 must read as losing: {}", gain);
}
