//! Key handling: the named-key table, the generic keymap, and the four
//! per-mode action tables.

pub mod codes;
pub mod keymap;
pub mod modes;

pub use codes::{code_for, match_prefix};
