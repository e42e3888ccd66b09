use super::attacks::{bishop_relevant_mask, rook_relevant_mask};
use super::search::find_magic;
use super::structs::{BishopMagicTables, MagicTables, RookMagicTables};
use rand::{SeedableRng, rngs::StdRng};

/// Fixed seed so every process builds identical tables.
pub const MAGIC_SEED: u64 = 0xB00C_5EED_0F1E_1D05;

/// Build both magic tables from scratch. Deterministic for a given seed.
pub fn generate_magic_tables(seed: u64) -> MagicTables {
    let mut rng = StdRng::seed_from_u64(seed);

    let rook_entries = (0..64)
        .map(|sq| find_magic(sq, rook_relevant_mask(sq), true, &mut rng))
        .collect();
    let bishop_entries = (0..64)
        .map(|sq| find_magic(sq, bishop_relevant_mask(sq), false, &mut rng))
        .collect();

    MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::magic::attacks::{
        bishop_attacks_per_square, blocker_subsets, rook_attacks_per_square,
    };

    #[test]
    fn magic_lookup_matches_scan_on_samples() {
        let tables = generate_magic_tables(MAGIC_SEED);
        let d4 = 27;
        let blockers = (1u64 << 19) | (1 << 35) | (1 << 41) | (1 << 21);

        assert_eq!(
            tables.rook.get_attacks(d4, blockers),
            rook_attacks_per_square(d4, blockers)
        );
        assert_eq!(
            tables.bishop.get_attacks(d4, blockers),
            bishop_attacks_per_square(d4, blockers)
        );
        assert_eq!(
            tables.queen_attacks(d4, blockers),
            rook_attacks_per_square(d4, blockers) | bishop_attacks_per_square(d4, blockers)
        );
    }

    #[test]
    fn magic_lookup_matches_scan_exhaustively_on_corner() {
        // Every blocker subset for the a1 rook and bishop.
        let tables = generate_magic_tables(MAGIC_SEED);
        for b in blocker_subsets(crate::moves::magic::attacks::rook_relevant_mask(0)) {
            assert_eq!(tables.rook.get_attacks(0, b), rook_attacks_per_square(0, b));
        }
        for b in blocker_subsets(crate::moves::magic::attacks::bishop_relevant_mask(0)) {
            assert_eq!(
                tables.bishop.get_attacks(0, b),
                bishop_attacks_per_square(0, b)
            );
        }
    }
}
