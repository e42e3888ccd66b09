use super::attacks::{blocker_subsets, scan_for};
use super::structs::MagicEntry;
use rand::{RngCore, rngs::StdRng};

/// Find a collision-free magic multiplier for one square by trial: sparse
/// random candidates, verified against every blocker subset.
pub fn find_magic(square: usize, mask: u64, rook: bool, rng: &mut StdRng) -> MagicEntry {
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let size = 1usize << bits;

    let blockers = blocker_subsets(mask);
    let reference: Vec<u64> = blockers.iter().map(|&b| scan_for(rook, square, b)).collect();

    let mut table = vec![0u64; size];
    let mut used = vec![false; size];

    'candidate: loop {
        // Sparse numbers (few set bits) make far better magics.
        let magic = rng.next_u64() & rng.next_u64() & rng.next_u64();
        if (mask.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }

        table.fill(0);
        used.fill(false);

        for (i, &b) in blockers.iter().enumerate() {
            let index = (b.wrapping_mul(magic) >> shift) as usize;
            if !used[index] {
                used[index] = true;
                table[index] = reference[i];
            } else if table[index] != reference[i] {
                continue 'candidate; // destructive collision, next candidate
            }
        }

        return MagicEntry {
            magic,
            shift,
            mask,
            table: table.clone().into_boxed_slice(),
        };
    }
}
