mod discover;
mod taxonomy;

pub use discover::{find_backgrounds, find_cutouts, Cutout};
pub use taxonomy::FlagClass;
