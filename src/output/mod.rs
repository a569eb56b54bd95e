mod layout;

pub use layout::{ensure_dir, file_stem, OutputLayout};
