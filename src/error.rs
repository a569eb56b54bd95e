use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Failed to load or save image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cutout {} has no alpha channel", path.display())]
    MissingAlpha { path: PathBuf },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Cutout is {cutout:?} but its mask is {mask:?}")]
    MaskSizeMismatch { cutout: (u32, u32), mask: (u32, u32) },

    #[error("Got {cutouts} cutouts but {masks} masks")]
    MaskLengthMismatch { cutouts: usize, masks: usize },

    #[error("Requested {requested} cutouts but only {available} are available")]
    NotEnoughCutouts { requested: usize, available: usize },

    #[error("Label ({class_id}, {instance_id}) uses the reserved id 0")]
    InvalidLabel { class_id: u8, instance_id: u8 },

    #[error("More than 255 instances of class {class_id} on one background")]
    InstanceOverflow { class_id: u8 },

    #[error("Path {} has no file name", path.display())]
    NoFileName { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, SpliceError>;
