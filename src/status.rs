use crate::board::{Board, Color, Piece};
use crate::moves::magic::MagicTables;
use crate::moves::square_control::in_check;
use crate::moves::types::Move;
use crate::search::tt::TranspositionTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawInsufficientMaterial,
    DrawThreefold,
}

impl GameStatus {
    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawInsufficientMaterial
                | GameStatus::DrawThreefold
        )
    }
}

pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.halfmove_clock >= 100
}

/// Threefold via the table's visit counter; the UCI layer pre-seeds it
/// from the replayed game history and the search stacks its own visits.
pub fn is_draw_by_threefold(board: &Board, tt: &TranspositionTable) -> bool {
    tt.visit_count(board.zobrist) >= 3
}

/// Dead positions: K vs K, a single minor piece, or same-colored lone
/// bishops. Anything with a pawn, rook or queen can still mate.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn, Color::White)
        | board.pieces(Piece::Pawn, Color::Black)
        | board.pieces(Piece::Rook, Color::White)
        | board.pieces(Piece::Rook, Color::Black)
        | board.pieces(Piece::Queen, Color::White)
        | board.pieces(Piece::Queen, Color::Black);
    if heavy != 0 {
        return false;
    }

    let white_bishops = board.pieces(Piece::Bishop, Color::White);
    let black_bishops = board.pieces(Piece::Bishop, Color::Black);
    let minors = white_bishops
        | black_bishops
        | board.pieces(Piece::Knight, Color::White)
        | board.pieces(Piece::Knight, Color::Black);

    if minors.count_ones() <= 1 {
        return true; // K vs K, or one minor in total
    }

    // Only bishops left: dead when they all stand on one square color.
    if minors == white_bishops | black_bishops {
        const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;
        let bishops = white_bishops | black_bishops;
        if bishops & LIGHT_SQUARES == 0 || bishops & !LIGHT_SQUARES == 0 {
            return true;
        }
    }

    false
}

/// Classify the position given its legal moves. Sits between the move
/// generator and the search; the search maps every draw to one score.
pub fn position_status(
    board: &Board,
    legal: &[Move],
    tt: &TranspositionTable,
    tables: &MagicTables,
) -> GameStatus {
    if legal.is_empty() {
        return if in_check(board, board.side_to_move, tables) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if is_draw_by_fifty_move(board) {
        return GameStatus::DrawFiftyMove;
    }
    if is_insufficient_material(board) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if is_draw_by_threefold(board, tt) {
        return GameStatus::DrawThreefold;
    }
    GameStatus::InPlay
}
