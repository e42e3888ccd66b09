use super::fen_tables::{CHAR_TO_PC, glyph_for};
use super::{Board, Color, Piece};
use crate::bitboard::{FILE_A, FILE_H};
use crate::board::castle_bits::*;
use crate::square::Square;
use std::str::FromStr;

impl Board {
    /// Can any `capturer` pawn take en passant onto `ep`? Pseudo-legal
    /// only; pins and king safety are the move generator's business.
    pub(crate) fn ep_capturable(&self, ep: Square, capturer: Color) -> bool {
        let ep_bb = ep.bb();
        let sources = match capturer {
            Color::White => ((ep_bb >> 9) & !FILE_H) | ((ep_bb >> 7) & !FILE_A),
            Color::Black => ((ep_bb << 9) & !FILE_A) | ((ep_bb << 7) & !FILE_H),
        };
        sources & self.pieces(Piece::Pawn, capturer) != 0
    }

    /// Parse a FEN string into this board. The clock fields may be
    /// omitted (EPD style); everything else is required. On error the
    /// board is left untouched.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("FEN needs at least 4 fields, got {}", fields.len()));
        }

        let mut b = Board::new_empty();

        // 1) Piece placement, rank 8 down to rank 1.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(format!("FEN board needs 8 ranks, got {}", ranks.len()));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(format!("rank {} overflows 8 files", rank + 1));
                    }
                } else {
                    let (piece, color) = CHAR_TO_PC
                        .get(ch as usize)
                        .copied()
                        .flatten()
                        .ok_or_else(|| format!("invalid piece char {:?}", ch))?;
                    if file >= 8 {
                        return Err(format!("rank {} overflows 8 files", rank + 1));
                    }
                    let sq = Square::from_file_rank(file, rank);
                    b.set_bb(color, piece, b.bb(color, piece) | sq.bb());
                    file += 1;
                }
            }
            if file != 8 {
                return Err(format!("rank {} covers {} files", rank + 1, file));
            }
        }

        // 2) Side to move.
        b.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("invalid side to move {:?}", other)),
        };

        // 3) Castling rights.
        b.castling_rights = 0;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                b.castling_rights |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("invalid castling char {:?}", other)),
                };
            }
        }

        // 4) En passant target. Only kept when one of our pawns can
        // actually take it, so an unreachable ep square never leaks into
        // the hash or back out through to_fen.
        b.en_passant = None;
        if fields[3] != "-" {
            let ep = Square::from_str(fields[3])?;
            let expected_rank = match b.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if ep.rank() != expected_rank {
                return Err(format!("en passant square {} on wrong rank", ep));
            }
            if b.ep_capturable(ep, b.side_to_move) {
                b.en_passant = Some(ep);
            }
        }

        // 5/6) Clocks, defaulted when absent.
        b.halfmove_clock = match fields.get(4) {
            Some(s) => s
                .parse()
                .map_err(|_| format!("invalid halfmove clock {:?}", s))?,
            None => 0,
        };
        b.fullmove_number = match fields.get(5) {
            Some(s) => s
                .parse()
                .map_err(|_| format!("invalid fullmove number {:?}", s))?,
            None => 1,
        };

        b.refresh_zobrist();
        b.validate()?;
        *self = b;
        Ok(())
    }

    /// Emit the position as a 6-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empties = 0;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empties > 0 {
                            out.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        out.push(glyph_for(piece, color));
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                out.push((b'0' + empties) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling_rights == 0 {
            out.push('-');
        } else {
            if self.castling_rights & CASTLE_WK != 0 {
                out.push('K');
            }
            if self.castling_rights & CASTLE_WQ != 0 {
                out.push('Q');
            }
            if self.castling_rights & CASTLE_BK != 0 {
                out.push('k');
            }
            if self.castling_rights & CASTLE_BQ != 0 {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&ep.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}
