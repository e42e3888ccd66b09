use crate::board::castle_bits::*;
use crate::board::{Board, Color, Piece};
use crate::hash::zobrist::{xor_castling_delta, zobrist_keys};
use crate::moves::types::{Move, Undo};
use crate::square::Square;

/// Rook relocation for a castling move, keyed by the king's destination.
#[inline(always)]
fn castle_rook_squares(king_to: u8) -> Option<(Square, Square)> {
    match king_to {
        6 => Some((Square::from_index(7), Square::from_index(5))), // white O-O
        2 => Some((Square::from_index(0), Square::from_index(3))), // white O-O-O
        62 => Some((Square::from_index(63), Square::from_index(61))), // black O-O
        58 => Some((Square::from_index(56), Square::from_index(59))), // black O-O-O
        _ => None,
    }
}

/// The castling right tied to a rook standing on its starting corner.
#[inline(always)]
fn corner_right(color: Color, rook_sq: u8) -> u8 {
    match (color, rook_sq) {
        (Color::White, 0) => CASTLE_WQ,
        (Color::White, 7) => CASTLE_WK,
        (Color::Black, 56) => CASTLE_BQ,
        (Color::Black, 63) => CASTLE_BK,
        _ => 0,
    }
}

#[inline(always)]
fn remove_piece(board: &mut Board, color: Color, piece: Piece, sq: Square) {
    let bb = board.bb(color, piece) & !sq.bb();
    board.set_bb(color, piece, bb);
}

#[inline(always)]
fn place_piece(board: &mut Board, color: Color, piece: Piece, sq: Square) {
    let bb = board.bb(color, piece) | sq.bb();
    board.set_bb(color, piece, bb);
}

/// Apply `mv` to the board, updating occupancies, castling rights, the
/// en-passant square, both clocks and the Zobrist hash incrementally.
/// Returns the record that `unmake_move` needs for a bit-for-bit restore.
///
/// The move must come from `legal_moves` (or equivalent validation); a
/// move with no piece on its origin square is an internal invariant
/// violation and aborts.
pub fn make_move(board: &mut Board, mv: Move) -> Undo {
    let keys = zobrist_keys();
    let color = board.side_to_move;
    let them = color.opposite();
    let from = mv.from();
    let to = mv.to();

    let piece = match board.piece_at(from) {
        Some((c, p)) if c == color => p,
        other => panic!(
            "make_move: no {:?} piece on {} (found {:?}) in {}",
            color,
            from,
            other,
            board.to_fen()
        ),
    };

    let mut undo = Undo {
        mv,
        piece,
        color,
        capture: None,
        castling_rook: None,
        prev_castling_rights: board.castling_rights,
        prev_en_passant: board.en_passant,
        prev_halfmove_clock: board.halfmove_clock,
        prev_fullmove_number: board.fullmove_number,
        prev_zobrist: board.zobrist,
    };

    // The old en-passant file leaves the hash no matter what this move is.
    if let Some(ep) = board.en_passant {
        board.zobrist ^= keys.ep_file[ep.file() as usize];
    }
    board.en_passant = None;

    // Captures. En passant takes the pawn one rank behind the landing
    // square, not the landing square itself.
    if mv.is_en_passant() {
        let cap_sq = match color {
            Color::White => Square::from_index(to.index() - 8),
            Color::Black => Square::from_index(to.index() + 8),
        };
        undo.capture = Some((them, Piece::Pawn, cap_sq));
        remove_piece(board, them, Piece::Pawn, cap_sq);
    } else if let Some((cap_color, cap_piece)) = board.piece_at(to) {
        debug_assert_eq!(cap_color, them, "capturing own piece");
        undo.capture = Some((cap_color, cap_piece, to));
        remove_piece(board, cap_color, cap_piece, to);
    }

    // Castling rights: king move drops both of ours, a rook leaving its
    // corner drops that one, and capturing a rook on its corner drops the
    // opponent's. The capture case is the one implementations forget.
    let old_rights = board.castling_rights;
    let mut clear_mask = 0u8;
    if piece == Piece::King {
        clear_mask |= match color {
            Color::White => CASTLE_WK | CASTLE_WQ,
            Color::Black => CASTLE_BK | CASTLE_BQ,
        };
    }
    if piece == Piece::Rook {
        clear_mask |= corner_right(color, from.index());
    }
    if let Some((cap_color, cap_piece, cap_sq)) = undo.capture
        && cap_piece == Piece::Rook
    {
        clear_mask |= corner_right(cap_color, cap_sq.index());
    }
    let new_rights = old_rights & !clear_mask;
    if new_rights != old_rights {
        board.castling_rights = new_rights;
        xor_castling_delta(&mut board.zobrist, keys, old_rights, new_rights);
    }

    // Move the piece; promotions swap the pawn for the promoted kind.
    remove_piece(board, color, piece, from);
    match mv.promotion() {
        Some(promoted) => {
            debug_assert_eq!(piece, Piece::Pawn, "only pawns promote");
            place_piece(board, color, promoted, to);
        }
        None => place_piece(board, color, piece, to),
    }

    if mv.is_castling() {
        let (rook_from, rook_to) =
            castle_rook_squares(to.index()).expect("castle flag with bad king destination");
        remove_piece(board, color, Piece::Rook, rook_from);
        place_piece(board, color, Piece::Rook, rook_to);
        undo.castling_rook = Some((rook_from, rook_to));
    }

    // A fresh en-passant square only exists after a double push with an
    // enemy pawn in position to use it; anything else would put dead
    // state into the hash.
    if mv.is_double_push() {
        let ep = match color {
            Color::White => Square::from_index(from.index() + 8),
            Color::Black => Square::from_index(from.index() - 8),
        };
        if board.ep_capturable(ep, them) {
            board.en_passant = Some(ep);
            board.zobrist ^= keys.ep_file[ep.file() as usize];
        }
    }

    if undo.capture.is_some() || piece == Piece::Pawn {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock += 1;
    }
    if color == Color::Black {
        board.fullmove_number += 1;
    }

    board.side_to_move = them;
    board.zobrist ^= keys.side_to_move;

    #[cfg(debug_assertions)]
    board.assert_hash();

    undo
}

/// Reverse `make_move`. The resulting position equals the pre-make
/// position bit for bit, Zobrist included.
pub fn unmake_move(board: &mut Board, undo: Undo) {
    let keys = zobrist_keys();

    if let Some(ep) = board.en_passant {
        board.zobrist ^= keys.ep_file[ep.file() as usize];
    }

    board.side_to_move = undo.color;
    board.zobrist ^= keys.side_to_move;

    let current_rights = board.castling_rights;
    xor_castling_delta(&mut board.zobrist, keys, current_rights, undo.prev_castling_rights);
    board.castling_rights = undo.prev_castling_rights;

    board.halfmove_clock = undo.prev_halfmove_clock;
    board.fullmove_number = undo.prev_fullmove_number;

    let from = undo.mv.from();
    let to = undo.mv.to();

    match undo.mv.promotion() {
        Some(promoted) => {
            remove_piece(board, undo.color, promoted, to);
            place_piece(board, undo.color, Piece::Pawn, from);
        }
        None => {
            remove_piece(board, undo.color, undo.piece, to);
            place_piece(board, undo.color, undo.piece, from);
        }
    }

    if let Some((cap_color, cap_piece, cap_sq)) = undo.capture {
        place_piece(board, cap_color, cap_piece, cap_sq);
    }

    if let Some((rook_from, rook_to)) = undo.castling_rook {
        remove_piece(board, undo.color, Piece::Rook, rook_to);
        place_piece(board, undo.color, Piece::Rook, rook_from);
    }

    board.en_passant = undo.prev_en_passant;
    if let Some(ep) = board.en_passant {
        board.zobrist ^= keys.ep_file[ep.file() as usize];
    }

    debug_assert_eq!(
        board.zobrist, undo.prev_zobrist,
        "unmake did not restore the hash"
    );
    #[cfg(debug_assertions)]
    board.assert_hash();
}
