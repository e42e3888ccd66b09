// O(1) FEN glyph <-> (piece, color) maps.

use super::{Color, Piece};

pub(super) const CHAR_TO_PC: [Option<(Piece, Color)>; 128] = {
    let mut t: [Option<(Piece, Color)>; 128] = [None; 128];

    t['P' as usize] = Some((Piece::Pawn, Color::White));
    t['N' as usize] = Some((Piece::Knight, Color::White));
    t['B' as usize] = Some((Piece::Bishop, Color::White));
    t['R' as usize] = Some((Piece::Rook, Color::White));
    t['Q' as usize] = Some((Piece::Queen, Color::White));
    t['K' as usize] = Some((Piece::King, Color::White));

    t['p' as usize] = Some((Piece::Pawn, Color::Black));
    t['n' as usize] = Some((Piece::Knight, Color::Black));
    t['b' as usize] = Some((Piece::Bishop, Color::Black));
    t['r' as usize] = Some((Piece::Rook, Color::Black));
    t['q' as usize] = Some((Piece::Queen, Color::Black));
    t['k' as usize] = Some((Piece::King, Color::Black));

    t
};

#[inline]
const fn pc_index(piece: Piece, color: Color) -> usize {
    (color as usize) * 6 + (piece as usize)
}

pub(super) const PC_TO_CHAR: [char; 12] = {
    let mut t = ['\0'; 12];
    t[pc_index(Piece::Pawn, Color::White)] = 'P';
    t[pc_index(Piece::Knight, Color::White)] = 'N';
    t[pc_index(Piece::Bishop, Color::White)] = 'B';
    t[pc_index(Piece::Rook, Color::White)] = 'R';
    t[pc_index(Piece::Queen, Color::White)] = 'Q';
    t[pc_index(Piece::King, Color::White)] = 'K';
    t[pc_index(Piece::Pawn, Color::Black)] = 'p';
    t[pc_index(Piece::Knight, Color::Black)] = 'n';
    t[pc_index(Piece::Bishop, Color::Black)] = 'b';
    t[pc_index(Piece::Rook, Color::Black)] = 'r';
    t[pc_index(Piece::Queen, Color::Black)] = 'q';
    t[pc_index(Piece::King, Color::Black)] = 'k';
    t
};

#[inline]
pub(super) fn glyph_for(piece: Piece, color: Color) -> char {
    PC_TO_CHAR[pc_index(piece, color)]
}
