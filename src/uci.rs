//! Long-algebraic move I/O for the UCI layer. Special flags (castling,
//! en passant, double push, promotions) are inferred by matching against
//! the legal move list, never parsed out of the string.

use crate::board::{Board, Piece};
use crate::moves::execute::make_move;
use crate::moves::magic::MagicTables;
use crate::moves::movegen::legal_moves;
use crate::moves::types::{Move, MoveList};
use crate::square::Square;
use std::str::FromStr;

/// Parse "e2e4" / "e7e8q" against the current position. Errors if the
/// text is malformed or names no legal move.
pub fn parse_uci_move(board: &Board, tables: &MagicTables, text: &str) -> Result<Move, String> {
    if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
        return Err(format!("malformed move {:?}", text));
    }

    let from = Square::from_str(&text[0..2])?;
    let to = Square::from_str(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(Piece::Queen),
        Some(b'n') => Some(Piece::Knight),
        Some(b'r') => Some(Piece::Rook),
        Some(b'b') => Some(Piece::Bishop),
        Some(_) => return Err(format!("malformed promotion in {:?}", text)),
    };

    let mut moves = MoveList::new();
    legal_moves(board, tables, &mut moves);

    moves
        .iter()
        .copied()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
        .ok_or_else(|| format!("illegal move {:?} in {}", text, board.to_fen()))
}

/// Parse and apply. The board is untouched on error.
pub fn apply_uci_move(
    board: &mut Board,
    tables: &MagicTables,
    text: &str,
) -> Result<Move, String> {
    let mv = parse_uci_move(board, tables, text)?;
    make_move(board, mv);
    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::magic::loader::load_magic_tables;

    #[test]
    fn infers_flags_from_context() {
        let t = load_magic_tables();
        let mut b = Board::new();

        let mv = apply_uci_move(&mut b, &t, "e2e4").unwrap();
        assert!(mv.is_double_push());

        apply_uci_move(&mut b, &t, "d7d5").unwrap();
        let ep = parse_uci_move(&b, &t, "e4d5").unwrap();
        assert!(!ep.is_en_passant()); // plain capture, not ep

        // Castling comes out flagged from the square pair alone.
        let mut c = Board::from_str("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let castle = apply_uci_move(&mut c, &t, "e1g1").unwrap();
        assert!(castle.is_kingside_castle());
    }

    #[test]
    fn real_en_passant_is_flagged() {
        let t = load_magic_tables();
        let b = Board::from_str("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let mv = parse_uci_move(&b, &t, "e5d6").unwrap();
        assert!(mv.is_en_passant());
    }

    #[test]
    fn promotion_letter_selects_the_move() {
        let t = load_magic_tables();
        let b = Board::from_str("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            parse_uci_move(&b, &t, "a7a8n").unwrap().promotion(),
            Some(Piece::Knight)
        );
        // A bare push to the last rank is not a legal move on its own.
        assert!(parse_uci_move(&b, &t, "a7a8").is_err());
    }

    #[test]
    fn rejects_illegal_and_malformed_moves() {
        let t = load_magic_tables();
        let mut b = Board::new();
        let before = b.clone();

        assert!(apply_uci_move(&mut b, &t, "e2e5").is_err()); // too far
        assert!(apply_uci_move(&mut b, &t, "e7e5").is_err()); // wrong side
        assert!(apply_uci_move(&mut b, &t, "e2").is_err());
        assert!(apply_uci_move(&mut b, &t, "e2e4x").is_err());
        assert_eq!(b, before);
    }
}
