pub mod eval;
pub mod ordering;
pub mod search;
pub mod see;
pub mod tt;
