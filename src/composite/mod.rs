mod compositor;
mod placement;

pub use compositor::{compose, splice_image, Composite, Layer, SplicedPaths};
pub use placement::{max_scale, sample_placement, Placement};
