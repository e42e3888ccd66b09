use crate::board::Board;
use crate::moves::execute::{make_move, unmake_move};
use crate::moves::magic::MagicTables;
use crate::moves::movegen::legal_moves;
use crate::moves::types::{FLAG_PROMO_QUEEN, Move, MoveList};
use crate::search::eval::evaluate;
use crate::search::ordering::{gives_check, order_moves};
use crate::search::see::see;
use crate::search::tt::{Bound, TranspositionTable};
use crate::status::{GameStatus, position_status};
use std::time::{Duration, Instant};
use tracing::debug;

pub const INF: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 99_999;
/// Draws score +100 for the mover: the engine walks into a draw only when
/// the alternative is worse than a pawn down.
pub const DRAW_SCORE: i32 = 100;
pub const MAX_SEARCH_DEPTH: i32 = 64;
/// Brake against runaway mutual-check sequences in quiescence.
const MAX_QSEARCH_PLY: u32 = 32;

/// Wall-clock budget. `should_stop` is polled at every negamax and
/// qsearch entry; once it trips, every stacked frame returns 0 upward and
/// the root discards the interrupted iteration.
pub struct TimeManager {
    start: Instant,
    limit: Option<Duration>,
    stopped: bool,
}

impl TimeManager {
    pub fn new(limit: Option<Duration>) -> Self {
        TimeManager {
            start: Instant::now(),
            limit,
            stopped: false,
        }
    }

    #[inline(always)]
    pub fn should_stop(&mut self) -> bool {
        if !self.stopped
            && let Some(limit) = self.limit
            && self.start.elapsed() >= limit
        {
            self.stopped = true;
        }
        self.stopped
    }

    #[inline(always)]
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Quiescence: stand pat, then chase only the tactical tail — checks,
/// queen promotions and captures that win material by SEE.
#[allow(clippy::too_many_arguments)]
fn qsearch(
    board: &mut Board,
    tables: &MagicTables,
    time: &mut TimeManager,
    nodes: &mut u64,
    qply: u32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    if time.should_stop() {
        return 0;
    }
    *nodes += 1;

    let stand_pat = evaluate(board);
    if qply >= MAX_QSEARCH_PLY {
        return stand_pat;
    }
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut moves = MoveList::new();
    legal_moves(board, tables, &mut moves);

    let mut tactical = MoveList::new();
    for &mv in moves.iter() {
        let is_queen_promo = mv.flag() == FLAG_PROMO_QUEEN;
        let winning_capture = match board.piece_at(mv.to()) {
            Some((color, victim)) if color != board.side_to_move => {
                let attacker = board
                    .piece_type_at(mv.from())
                    .expect("move origin is occupied");
                see(board, mv.to(), victim, mv.from(), attacker, tables) > 0
            }
            _ => false,
        };
        if is_queen_promo || winning_capture || gives_check(board, mv, tables) {
            tactical.push(mv);
        }
    }
    order_moves(&mut tactical, board, tables);

    for &mv in tactical.iter() {
        let undo = make_move(board, mv);
        let score = -qsearch(board, tables, time, nodes, qply + 1, -beta, -alpha);
        unmake_move(board, undo);

        if time.stopped() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[allow(clippy::too_many_arguments)]
fn negamax(
    board: &mut Board,
    tables: &MagicTables,
    tt: &mut TranspositionTable,
    time: &mut TimeManager,
    nodes: &mut u64,
    depth: i32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    if time.should_stop() {
        return 0;
    }
    *nodes += 1;

    let key = board.zobrist;
    tt.increment_visits(key);

    // Third arrival on the search path (or in the replayed game): draw.
    if tt.visit_count(key) >= 3 {
        tt.store(key, Move::NULL, DRAW_SCORE, depth, Bound::Exact);
        tt.decrement_visits(key);
        return DRAW_SCORE;
    }

    if let Some(entry) = tt.probe(key)
        && entry.depth >= depth
    {
        let cutoff = match entry.bound {
            Bound::Exact => true,
            Bound::Upper => entry.eval <= alpha,
            Bound::Lower => entry.eval >= beta,
        };
        if cutoff {
            tt.decrement_visits(key);
            return entry.eval;
        }
    }

    let mut moves = MoveList::new();
    legal_moves(board, tables, &mut moves);

    match position_status(board, &moves, tt, tables) {
        GameStatus::Checkmate => {
            // Deeper remaining depth means an earlier mate; punish it more.
            let eval = -(MATE_SCORE + depth);
            tt.store(key, Move::NULL, eval, depth, Bound::Exact);
            tt.decrement_visits(key);
            return eval;
        }
        status if status.is_draw() => {
            tt.store(key, Move::NULL, DRAW_SCORE, depth, Bound::Exact);
            tt.decrement_visits(key);
            return DRAW_SCORE;
        }
        _ => {}
    }

    if depth <= 0 {
        let eval = qsearch(board, tables, time, nodes, 0, alpha, beta);
        if time.stopped() {
            tt.decrement_visits(key);
            return 0;
        }
        tt.store(key, Move::NULL, eval, 0, Bound::Exact);
        tt.decrement_visits(key);
        return eval;
    }

    order_moves(&mut moves, board, tables);

    let alpha_start = alpha;
    let mut best = -INF;
    let mut best_move = Move::NULL;

    for &mv in moves.iter() {
        let undo = make_move(board, mv);
        let score = -negamax(board, tables, tt, time, nodes, depth - 1, -beta, -alpha);
        unmake_move(board, undo);

        // Interrupted frames must not store partial results as EXACT.
        if time.stopped() {
            tt.decrement_visits(key);
            return 0;
        }

        if score > best {
            best = score;
            best_move = mv;
            if score > alpha {
                alpha = score;
            }
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best <= alpha_start {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    tt.store(key, best_move, best, depth, bound);
    tt.decrement_visits(key);
    best
}

/// Iterative deepening driver. Root moves are re-sorted by their scores
/// after every completed depth; an interrupted depth never touches the
/// running best move.
fn iterative_deepening(
    board: &mut Board,
    tables: &MagicTables,
    tt: &mut TranspositionTable,
    max_depth: i32,
    limit: Option<Duration>,
) -> (i32, Option<Move>) {
    let mut time = TimeManager::new(limit);
    let mut nodes: u64 = 0;

    let mut roots = MoveList::new();
    legal_moves(board, tables, &mut roots);
    if roots.is_empty() {
        return (evaluate(board), None);
    }
    order_moves(&mut roots, board, tables);

    let mut scored: Vec<(Move, i32)> = roots.iter().map(|&mv| (mv, 0)).collect();
    // Always answer with a legal move, even if the clock never lets a
    // full depth finish.
    let mut best_move = Some(scored[0].0);
    let mut best_eval = 0;

    for depth in 1..=max_depth {
        if time.should_stop() {
            break;
        }

        let mut alpha = -INF;
        let beta = INF;
        let mut depth_best = Move::NULL;
        let mut depth_best_score = -INF;
        let mut interrupted = false;

        for (mv, slot) in scored.iter_mut() {
            let undo = make_move(board, *mv);
            let score = -negamax(board, tables, tt, &mut time, &mut nodes, depth - 1, -beta, -alpha);
            unmake_move(board, undo);

            if time.stopped() {
                interrupted = true;
                break;
            }

            *slot = score;
            if score > depth_best_score {
                depth_best_score = score;
                depth_best = *mv;
            }
            if score > alpha {
                alpha = score;
            }
        }

        if interrupted {
            break;
        }

        best_move = Some(depth_best);
        best_eval = depth_best_score;
        scored.sort_by_key(|&(_, score)| -score);

        debug!(
            depth,
            eval = best_eval,
            nodes,
            elapsed_ms = time.elapsed().as_millis() as u64,
            best = %depth_best,
            "depth completed"
        );
        println!(
            "info depth {} score {} nodes {} time {} pv {}",
            depth,
            format_score(best_eval),
            nodes,
            time.elapsed().as_millis(),
            depth_best
        );

        // A proven mate does not get better with more depth.
        if best_eval.abs() >= MATE_SCORE {
            break;
        }
    }

    (best_eval, best_move)
}

fn format_score(eval: i32) -> String {
    if eval.abs() >= MATE_SCORE {
        // eval = MATE_SCORE + remaining depth at the mating node.
        let plies = (eval.abs() - MATE_SCORE).max(1);
        let moves = (plies + 1) / 2;
        if eval > 0 {
            format!("mate {}", moves)
        } else {
            format!("mate -{}", moves)
        }
    } else {
        format!("cp {}", eval)
    }
}

/// Entry point for the UCI layer: best move within the wall-clock budget.
pub fn search(
    board: &mut Board,
    tables: &MagicTables,
    tt: &mut TranspositionTable,
    time_limit_ms: u64,
) -> Option<Move> {
    iterative_deepening(
        board,
        tables,
        tt,
        MAX_SEARCH_DEPTH,
        Some(Duration::from_millis(time_limit_ms)),
    )
    .1
}

/// Fixed-depth search with no clock: a pure function of the position,
/// used for analysis and determinism tests.
pub fn search_to_depth(
    board: &mut Board,
    tables: &MagicTables,
    tt: &mut TranspositionTable,
    depth: i32,
) -> (i32, Option<Move>) {
    iterative_deepening(board, tables, tt, depth, None)
}
