mod builder;
pub mod types;

pub use builder::{build_mask, create_mask, load_cutout};
pub use types::{Label, Mask, NO_OBJECT};
