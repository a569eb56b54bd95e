use crate::error::{Result, SpliceError};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `dir` and any missing parents. An existing directory is success.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    tracing::debug!("Ensured directory {}", dir.display());
    Ok(())
}

/// File name without its extension, e.g. `beach` for `real_imgs/beach.jpg`
pub fn file_stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| SpliceError::NoFileName {
            path: path.to_path_buf(),
        })
}

/// Where every output file of a run goes, relative to the data directory
#[derive(Debug, Clone)]
pub struct OutputLayout {
    masks_dir: PathBuf,
    spliced_imgs_dir: PathBuf,
    spliced_masks_dir: PathBuf,
}

impl OutputLayout {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            masks_dir: data_dir.join("masks"),
            spliced_imgs_dir: data_dir.join("spliced_imgs"),
            spliced_masks_dir: data_dir.join("spliced_masks"),
        }
    }

    pub fn masks_dir(&self) -> &Path {
        &self.masks_dir
    }

    pub fn spliced_imgs_dir(&self) -> &Path {
        &self.spliced_imgs_dir
    }

    pub fn spliced_masks_dir(&self) -> &Path {
        &self.spliced_masks_dir
    }

    /// `masks/<cutout-stem>.png`
    pub fn mask_path(&self, cutout: &Path) -> Result<PathBuf> {
        Ok(self.masks_dir.join(format!("{}.png", file_stem(cutout)?)))
    }

    /// `spliced_imgs/<background-stem>.png`
    pub fn spliced_image_path(&self, background: &Path) -> Result<PathBuf> {
        Ok(self
            .spliced_imgs_dir
            .join(format!("{}.png", file_stem(background)?)))
    }

    /// `spliced_masks/<background-stem>.png`
    pub fn spliced_mask_path(&self, background: &Path) -> Result<PathBuf> {
        Ok(self
            .spliced_masks_dir
            .join(format!("{}.png", file_stem(background)?)))
    }
}
