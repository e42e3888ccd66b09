use crate::board::Board;
use crate::moves::execute::{make_move, unmake_move};
use crate::moves::magic::MagicTables;
use crate::moves::movegen::legal_moves;
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, MoveList};
use tracing::{debug, instrument};

/// Breakdown of the last ply of a perft run, in the usual published
/// format: each field counts leaf-reaching moves with that property.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn add(&mut self, other: &PerftCounters) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.ep_captures += other.ep_captures;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

fn perft_inner(board: &mut Board, tables: &MagicTables, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    legal_moves(board, tables, &mut moves);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        #[cfg(debug_assertions)]
        let hash_before = board.zobrist;

        let undo = make_move(board, mv);
        nodes += perft_inner(board, tables, depth - 1);
        unmake_move(board, undo);

        #[cfg(debug_assertions)]
        debug_assert_eq!(board.zobrist, hash_before, "hash drift across make/unmake");
    }
    nodes
}

/// Count the leaves of the legal-move tree to `depth`. The primary
/// correctness gate for the generator and make/unmake.
#[instrument(skip(board, tables))]
pub fn perft(board: &mut Board, tables: &MagicTables, depth: u32) -> u64 {
    perft_inner(board, tables, depth)
}

fn perft_stats_inner(
    board: &mut Board,
    tables: &MagicTables,
    depth: u32,
    out: &mut PerftCounters,
) {
    let mut moves = MoveList::new();
    legal_moves(board, tables, &mut moves);

    if depth == 1 {
        for &mv in moves.iter() {
            out.nodes += 1;
            if board.piece_at(mv.to()).is_some() || mv.is_en_passant() {
                out.captures += 1;
            }
            if mv.is_en_passant() {
                out.ep_captures += 1;
            }
            if mv.is_castling() {
                out.castles += 1;
            }
            if mv.is_promotion() {
                out.promotions += 1;
            }

            let undo = make_move(board, mv);
            if in_check(board, board.side_to_move, tables) {
                out.checks += 1;
                let mut replies = MoveList::new();
                legal_moves(board, tables, &mut replies);
                if replies.is_empty() {
                    out.checkmates += 1;
                }
            }
            unmake_move(board, undo);
        }
        return;
    }

    for &mv in moves.iter() {
        let undo = make_move(board, mv);
        perft_stats_inner(board, tables, depth - 1, out);
        unmake_move(board, undo);
    }
}

/// Perft with the classic per-property tallies of the final ply.
#[instrument(skip(board, tables))]
pub fn perft_with_stats(board: &mut Board, tables: &MagicTables, depth: u32) -> PerftCounters {
    let mut out = PerftCounters::default();
    if depth == 0 {
        out.nodes = 1;
        return out;
    }
    perft_stats_inner(board, tables, depth, &mut out);
    debug!(depth, nodes = out.nodes, captures = out.captures, "perft stats");
    out
}

/// Per-root-move leaf counts, plus the total.
#[instrument(skip(board, tables))]
pub fn perft_divide(
    board: &mut Board,
    tables: &MagicTables,
    depth: u32,
) -> (Vec<(Move, u64)>, u64) {
    let mut roots = MoveList::new();
    legal_moves(board, tables, &mut roots);
    debug!(depth, roots = roots.len(), "divide: root moves");

    let mut rows = Vec::with_capacity(roots.len());
    let mut total = 0;
    for &mv in roots.iter() {
        let undo = make_move(board, mv);
        let count = if depth <= 1 {
            1
        } else {
            perft_inner(board, tables, depth - 1)
        };
        unmake_move(board, undo);

        debug!(%mv, nodes = count, "divide: root child");
        rows.push((mv, count));
        total += count;
    }
    (rows, total)
}
