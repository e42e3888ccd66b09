use crate::board::{Board, Color, Piece};
use crate::moves::king::KING_ATTACKS;
use crate::moves::knight::KNIGHT_ATTACKS;
use crate::moves::magic::MagicTables;
use crate::moves::pawn::pawn_attacks;
use crate::square::Square;

/// Attack set of `piece` standing on `square`. `blockers` carries both
/// colors; the result may include own pieces, callers mask them out.
pub fn attacks_from(
    piece: Piece,
    color: Color,
    square: u8,
    blockers: u64,
    tables: &MagicTables,
) -> u64 {
    let sq = square as usize;
    match piece {
        Piece::Pawn => pawn_attacks(square, color),
        Piece::Knight => KNIGHT_ATTACKS[sq],
        Piece::Bishop => tables.bishop.get_attacks(sq, blockers),
        Piece::Rook => tables.rook.get_attacks(sq, blockers),
        Piece::Queen => tables.queen_attacks(sq, blockers),
        Piece::King => KING_ATTACKS[sq],
    }
}

/// Every piece of either color standing on `occ` that attacks `square`,
/// computed symmetrically: kind K attacks the square iff K placed there
/// would attack the piece's square (color-flipped tables for pawns).
/// Used by SEE and by checker detection.
pub fn attackers_to(board: &Board, square: u8, occ: u64, tables: &MagicTables) -> u64 {
    let sq = square as usize;

    let white_pawns =
        pawn_attacks(square, Color::Black) & board.pieces(Piece::Pawn, Color::White);
    let black_pawns =
        pawn_attacks(square, Color::White) & board.pieces(Piece::Pawn, Color::Black);

    let knights = board.pieces(Piece::Knight, Color::White) | board.pieces(Piece::Knight, Color::Black);
    let kings = board.pieces(Piece::King, Color::White) | board.pieces(Piece::King, Color::Black);

    let bishop_queens = board.pieces(Piece::Bishop, Color::White)
        | board.pieces(Piece::Bishop, Color::Black)
        | board.pieces(Piece::Queen, Color::White)
        | board.pieces(Piece::Queen, Color::Black);
    let rook_queens = board.pieces(Piece::Rook, Color::White)
        | board.pieces(Piece::Rook, Color::Black)
        | board.pieces(Piece::Queen, Color::White)
        | board.pieces(Piece::Queen, Color::Black);

    let diag = tables.bishop.get_attacks(sq, occ) & bishop_queens;
    let orth = tables.rook.get_attacks(sq, occ) & rook_queens;

    (white_pawns | black_pawns | (KNIGHT_ATTACKS[sq] & knights) | (KING_ATTACKS[sq] & kings) | diag | orth)
        & occ
}

/// Is `square` attacked by `attacker`, with slider rays traced over an
/// explicit occupancy? Passing the occupancy without our own king is the
/// trick that stops the king sliding along a checking ray.
pub fn is_square_attacked_on_occ(
    board: &Board,
    square: Square,
    attacker: Color,
    occ: u64,
    tables: &MagicTables,
) -> bool {
    let sq = square.index() as usize;

    // Squares from which an `attacker` pawn would hit `square` are the
    // defender-colored attack diagonals of that square.
    if pawn_attacks(square.index(), attacker.opposite()) & board.pieces(Piece::Pawn, attacker) != 0
    {
        return true;
    }
    if KNIGHT_ATTACKS[sq] & board.pieces(Piece::Knight, attacker) != 0 {
        return true;
    }
    if KING_ATTACKS[sq] & board.pieces(Piece::King, attacker) != 0 {
        return true;
    }

    let rook_rays = tables.rook.get_attacks(sq, occ);
    if rook_rays & (board.pieces(Piece::Rook, attacker) | board.pieces(Piece::Queen, attacker)) != 0
    {
        return true;
    }

    let bishop_rays = tables.bishop.get_attacks(sq, occ);
    bishop_rays & (board.pieces(Piece::Bishop, attacker) | board.pieces(Piece::Queen, attacker))
        != 0
}

#[inline(always)]
pub fn is_square_attacked(
    board: &Board,
    square: Square,
    attacker: Color,
    tables: &MagicTables,
) -> bool {
    is_square_attacked_on_occ(board, square, attacker, board.occupied(), tables)
}

#[inline(always)]
pub fn in_check(board: &Board, side: Color, tables: &MagicTables) -> bool {
    is_square_attacked(board, board.king_square(side), side.opposite(), tables)
}
