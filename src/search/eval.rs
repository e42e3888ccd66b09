use crate::board::{Board, Color, Piece};

const MATERIAL: [(Piece, i32); 5] = [
    (Piece::Pawn, 100),
    (Piece::Knight, 320),
    (Piece::Bishop, 330),
    (Piece::Rook, 500),
    (Piece::Queen, 900),
];

/// Material balance in centipawns from the side to move's perspective.
/// This is the whole evaluation contract the search relies on; anything
/// richer belongs to an external evaluator.
pub fn evaluate(board: &Board) -> i32 {
    let mut white = 0;
    for (piece, value) in MATERIAL {
        white += board.pieces(piece, Color::White).count_ones() as i32 * value;
        white -= board.pieces(piece, Color::Black).count_ones() as i32 * value;
    }
    match board.side_to_move {
        Color::White => white,
        Color::Black => -white,
    }
}
