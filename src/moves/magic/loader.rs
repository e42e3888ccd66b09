use super::precompute::{MAGIC_SEED, generate_magic_tables};
use super::structs::MagicTables;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[cfg(feature = "load_magic")]
const CACHE_PATH: &str = "magic_tables.bin";

/// Produce the sliding-attack tables. With the `load_magic` feature the
/// on-disk cache is tried first; generation from the fixed seed is always
/// the fallback, so startup never fails.
pub fn load_magic_tables() -> MagicTables {
    #[cfg(feature = "load_magic")]
    if let Ok(tables) = load_from_file(CACHE_PATH) {
        return tables;
    }
    generate_magic_tables(MAGIC_SEED)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<MagicTables, String> {
    let file = File::open(path.as_ref())
        .map_err(|e| format!("open {}: {}", path.as_ref().display(), e))?;
    bincode::deserialize_from(BufReader::new(file))
        .map_err(|e| format!("decode {}: {}", path.as_ref().display(), e))
}

pub fn save_to_file<P: AsRef<Path>>(tables: &MagicTables, path: P) -> Result<(), String> {
    let file = File::create(path.as_ref())
        .map_err(|e| format!("create {}: {}", path.as_ref().display(), e))?;
    bincode::serialize_into(BufWriter::new(file), tables)
        .map_err(|e| format!("encode {}: {}", path.as_ref().display(), e))
}
