//! Synthesize labeled training images by splicing transparent "flag"
//! cutouts onto background photographs.
//!
//! For every background, a few cutouts are sampled, each gets a label mask
//! (class id in channel 0, per-class instance number in channel 1), and
//! cutouts and masks are pasted with the same random rotation, scale and
//! offset. The result is a composite image plus a pixel-aligned mask.
//!
//! ```rust,no_run
//! use flag_splice::batch::{run_batch, BatchConfig};
//!
//! let config = BatchConfig::default();
//! let outputs = run_batch(&config, &mut rand::thread_rng())?;
//! println!("spliced {} images", outputs.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod batch;
pub mod composite;
pub mod error;
pub mod mask;
pub mod output;
pub mod source;

pub use error::{Result, SpliceError};
