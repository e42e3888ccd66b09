use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Fixed seed: hashes must be reproducible across runs so that stored
/// analysis and tests agree on key values.
const ZOBRIST_SEED: u64 = 0x5AB1_E000_C0DE_D00D;

pub struct ZobristKeys {
    /// [color][piece][square] with {White=0, Black=1} and {P,N,B,R,Q,K}={0..5}.
    pub piece: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when Black is to move.
    pub side_to_move: u64,
    /// One key per 4-bit castling-rights mask value.
    pub castling: [u64; 16],
    /// a..h => 0..7, applied when an en-passant square is recorded.
    pub ep_file: [u64; 8],
}

/// Global keys, generated once on first use (before the first position is
/// parsed, since parsing recomputes the hash).
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(StdRng::seed_from_u64(ZOBRIST_SEED)))
}

/// XOR the delta between two castling-rights masks into `hash`.
#[inline]
pub fn xor_castling_delta(hash: &mut u64, keys: &ZobristKeys, old: u8, new: u8) {
    if old != new {
        *hash ^= keys.castling[old as usize] ^ keys.castling[new as usize];
    }
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // zero keys would make distinct states collide trivially
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 16],
        ep_file: [0u64; 8],
    };

    for c in 0..2 {
        for p in 0..6 {
            for sq in 0..64 {
                keys.piece[c][p][sq] = non_zero(&mut rng);
            }
        }
    }
    for m in 0..16 {
        keys.castling[m] = non_zero(&mut rng);
    }
    for f in 0..8 {
        keys.ep_file[f] = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}
