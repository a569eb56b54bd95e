use super::types::{Label, Mask, NO_OBJECT};
use crate::error::{Result, SpliceError};
use crate::output::ensure_dir;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Decode a cutout, rejecting images without an alpha channel
pub fn load_cutout<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)?;

    if !image.color().has_alpha() {
        return Err(SpliceError::MissingAlpha {
            path: path.to_path_buf(),
        });
    }

    Ok(image.to_rgba8())
}

/// Stamp `label` onto every pixel of `cutout` whose alpha is non-zero.
///
/// Partially transparent pixels count as opaque.
pub fn build_mask(cutout: &RgbaImage, label: Label) -> Mask {
    let stamp = label.pixel();
    Mask::from_fn(cutout.width(), cutout.height(), |x, y| {
        if cutout.get_pixel(x, y)[3] != 0 {
            stamp
        } else {
            NO_OBJECT
        }
    })
}

/// Build the mask of the cutout at `cutout_path` and write it losslessly to
/// `mask_path`, creating the parent directory if needed.
pub fn create_mask<P, Q>(cutout_path: P, mask_path: Q, label: Label) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let cutout_path = cutout_path.as_ref();
    let mask_path = mask_path.as_ref();

    let cutout = load_cutout(cutout_path)?;
    let mask = build_mask(&cutout, label);

    if let Some(parent) = mask_path.parent() {
        ensure_dir(parent)?;
    }
    mask.save(mask_path)?;

    tracing::debug!(
        "Wrote mask {} (class={}, instance={}) for {}",
        mask_path.display(),
        label.class_id,
        label.instance_id,
        cutout_path.display()
    );

    Ok(mask_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    /// 6x4 cutout: left half opaque red, right half transparent, one
    /// half-transparent pixel in the right half
    fn create_test_cutout() -> RgbaImage {
        let mut img = RgbaImage::from_fn(6, 4, |x, _| {
            if x < 3 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 0])
            }
        });
        img.put_pixel(5, 3, Rgba([10, 10, 10, 1]));
        img
    }

    #[test]
    fn test_build_mask_classifies_alpha() {
        let cutout = create_test_cutout();
        let label = Label::new(4, 2).unwrap();
        let mask = build_mask(&cutout, label);

        assert_eq!(mask.dimensions(), cutout.dimensions());
        for (x, y, pixel) in mask.enumerate_pixels() {
            let expected = if cutout.get_pixel(x, y)[3] != 0 {
                Rgba([4, 2, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            };
            assert_eq!(*pixel, expected, "pixel ({x}, {y})");
        }
        assert_eq!(*mask.get_pixel(5, 3), Rgba([4, 2, 0, 255]));
    }

    #[test]
    fn test_build_mask_is_reproducible() {
        let cutout = create_test_cutout();
        let label = Label::new(1, 1).unwrap();
        assert_eq!(build_mask(&cutout, label), build_mask(&cutout, label));
    }

    #[test]
    fn test_create_mask_writes_png_and_creates_dir() {
        let temp = tempfile::tempdir().unwrap();
        let cutout_path = temp.path().join("cutout.png");
        create_test_cutout().save(&cutout_path).unwrap();

        let mask_path = temp.path().join("masks/nested/cutout.png");
        let written = create_mask(&cutout_path, &mask_path, Label::new(2, 1).unwrap()).unwrap();
        assert_eq!(written, mask_path);

        let reloaded = image::open(&mask_path).unwrap().to_rgba8();
        assert_eq!(reloaded, build_mask(&create_test_cutout(), Label::new(2, 1).unwrap()));
    }

    #[test]
    fn test_cutout_without_alpha_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let cutout_path = temp.path().join("opaque.png");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&cutout_path).unwrap();

        let result = create_mask(&cutout_path, temp.path().join("m.png"), Label::new(1, 1).unwrap());
        assert!(matches!(result, Err(SpliceError::MissingAlpha { .. })));
    }

    #[test]
    fn test_undecodable_cutout_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let cutout_path = temp.path().join("broken.png");
        std::fs::write(&cutout_path, b"not a png").unwrap();

        assert!(load_cutout(&cutout_path).is_err());
    }
}
