use crate::board::{Board, Piece};
use crate::moves::magic::MagicTables;
use crate::moves::square_control::attacks_from;
use crate::moves::types::{
    FLAG_PROMO_BISHOP, FLAG_PROMO_KNIGHT, FLAG_PROMO_QUEEN, FLAG_PROMO_ROOK, Move,
};
use crate::search::see::see;

const CHECK_BONUS: i32 = 5;
const CASTLE_BONUS: i32 = 4;
const QUIET_PAWN_KING_PENALTY: i32 = -1;

// Under-promotions are deliberately pushed behind quiet moves.
const PROMO_QUEEN_BONUS: i32 = 9;
const PROMO_KNIGHT_BONUS: i32 = 2;
const PROMO_ROOK_BONUS: i32 = -4;
const PROMO_BISHOP_BONUS: i32 = -3;

/// Does the moved piece attack the enemy king from its destination?
/// Deliberately cheap: discovered checks are not counted.
#[inline]
pub fn gives_check(board: &Board, mv: Move, tables: &MagicTables) -> bool {
    let us = board.side_to_move;
    let Some(moving) = board.piece_type_at(mv.from()) else {
        return false;
    };
    let enemy_king = board.pieces(Piece::King, us.opposite());
    attacks_from(moving, us, mv.to().index(), board.occupied(), tables) & enemy_king != 0
}

/// Heuristic score for alpha-beta efficiency. Good captures land on top
/// via their exchange value; checks, promotions and castling get flat
/// nudges; quiet pawn and king moves sink to the bottom.
pub fn score_move(board: &Board, mv: Move, tables: &MagicTables) -> i32 {
    let us = board.side_to_move;
    let moving = match board.piece_type_at(mv.from()) {
        Some(p) => p,
        None => return 0,
    };

    let mut score = 0;

    if let Some((victim_color, victim)) = board.piece_at(mv.to())
        && victim_color != us
    {
        score += see(board, mv.to(), victim, mv.from(), moving, tables);
    }

    if gives_check(board, mv, tables) {
        score += CHECK_BONUS;
    }

    score += match mv.flag() {
        FLAG_PROMO_QUEEN => PROMO_QUEEN_BONUS,
        FLAG_PROMO_KNIGHT => PROMO_KNIGHT_BONUS,
        FLAG_PROMO_ROOK => PROMO_ROOK_BONUS,
        FLAG_PROMO_BISHOP => PROMO_BISHOP_BONUS,
        _ => 0,
    };

    if mv.is_castling() {
        score += CASTLE_BONUS;
    }

    if moving == Piece::Pawn || moving == Piece::King {
        score += QUIET_PAWN_KING_PENALTY;
    }

    score
}

/// Sort descending by score. Stable, so equally scored moves keep their
/// generation order.
pub fn order_moves(moves: &mut [Move], board: &Board, tables: &MagicTables) {
    moves.sort_by_cached_key(|&mv| -score_move(board, mv, tables));
}
