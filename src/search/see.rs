use crate::board::{Board, Color, Piece};
use crate::moves::magic::MagicTables;
use crate::moves::square_control::attackers_to;
use crate::square::Square;
use crate::utils::pop_lsb;

/// Exchange values. The king gets a sentinel large enough that the swap
/// fold never lets it be profitably traded away.
#[inline(always)]
fn exchange_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => 20_000,
        other => other.value(),
    }
}

/// Least valuable attacker of `side` among `attackers`; returns the
/// square and kind, or `None` when that side is out of attackers.
fn least_valuable_attacker(board: &Board, attackers: u64, side: Color) -> Option<(u8, Piece)> {
    let side_attackers = attackers & board.occupancy(side);
    if side_attackers == 0 {
        return None;
    }
    for piece in [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        let mut subset = side_attackers & board.pieces(piece, side);
        if subset != 0 {
            return Some((pop_lsb(&mut subset), piece));
        }
    }
    None
}

/// Static exchange evaluation: the material outcome, for the mover, of
/// `attacker_kind` capturing `victim_kind` on `to_sq`, with both sides
/// always recapturing with their least valuable attacker and bailing out
/// of losing continuations. The board is not modified.
pub fn see(
    board: &Board,
    to_sq: Square,
    victim_kind: Piece,
    from_sq: Square,
    attacker_kind: Piece,
    tables: &MagicTables,
) -> i32 {
    let to = to_sq.index();
    let mover = board
        .piece_at(from_sq)
        .map(|(c, _)| c)
        .unwrap_or(board.side_to_move);

    let mut gain = [0i32; 32];
    let mut d = 0usize;
    gain[0] = exchange_value(victim_kind);

    // Simulated occupancy: the initial attacker has already left home.
    let mut occ = board.occupied() & !from_sq.bb();
    let mut attackers = attackers_to(board, to, occ, tables);
    // The piece currently standing on the target square.
    let mut on_square = attacker_kind;
    let mut side = mover.opposite();

    while d + 1 < gain.len() {
        let Some((att_sq, att_kind)) = least_valuable_attacker(board, attackers & occ, side)
        else {
            break;
        };

        d += 1;
        gain[d] = exchange_value(on_square) - gain[d - 1];

        let att_bb = 1u64 << att_sq;
        occ &= !att_bb;
        attackers &= !att_bb;
        // Everything but a knight sits on a line through the target, so
        // its departure can expose an x-ray slider behind it.
        if att_kind != Piece::Knight {
            attackers = attackers_to(board, to, occ, tables);
        }

        on_square = att_kind;
        side = side.opposite();
    }

    while d > 0 {
        gain[d - 1] = -std::cmp::max(-gain[d - 1], gain[d]);
        d -= 1;
    }
    gain[0]
}
