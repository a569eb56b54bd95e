use super::placement::{sample_placement, Placement};
use crate::error::{Result, SpliceError};
use crate::mask::{load_cutout, Mask, NO_OBJECT};
use crate::output::{ensure_dir, OutputLayout};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::Rng;
use std::path::{Path, PathBuf};

/// A cutout and its mask, pixel-aligned
#[derive(Debug, Clone)]
pub struct Layer {
    pub cutout: RgbaImage,
    pub mask: Mask,
}

impl Layer {
    pub fn new(cutout: RgbaImage, mask: Mask) -> Result<Self> {
        if cutout.dimensions() != mask.dimensions() {
            return Err(SpliceError::MaskSizeMismatch {
                cutout: cutout.dimensions(),
                mask: mask.dimensions(),
            });
        }
        Ok(Self { cutout, mask })
    }
}

/// Result of splicing layers onto one background
#[derive(Debug, Clone)]
pub struct Composite {
    pub image: RgbImage,
    pub mask: Mask,
    /// One entry per layer, in paste order
    pub placements: Vec<Placement>,
}

/// Files written for one background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedPaths {
    pub image: PathBuf,
    pub mask: PathBuf,
}

/// Rotate then resize, keeping the original canvas while rotating.
///
/// Nearest sampling throughout, so a cutout and its mask put through the same
/// placement land on exactly the same pixels. Uncovered corners become fully
/// transparent.
fn transform(image: &RgbaImage, placement: &Placement) -> RgbaImage {
    // imageproc rotates clockwise
    let theta = -(placement.rotation_degrees as f32).to_radians();
    let rotated = rotate_about_center(image, theta, Interpolation::Nearest, NO_OBJECT);
    imageops::resize(&rotated, placement.width, placement.height, FilterType::Nearest)
}

/// Copy labelled mask pixels wherever the transformed cutout is not transparent
fn paste_mask(canvas: &mut Mask, mask: &Mask, gate: &RgbaImage, x: u32, y: u32) {
    for (mx, my, pixel) in mask.enumerate_pixels() {
        if gate.get_pixel(mx, my)[3] != 0 && *pixel != NO_OBJECT {
            canvas.put_pixel(x + mx, y + my, *pixel);
        }
    }
}

/// Paste one layer onto the image and mask canvases with a shared geometry
fn paste_layer(canvas: &mut RgbaImage, mask_canvas: &mut Mask, layer: &Layer, placement: &Placement) {
    let cutout = transform(&layer.cutout, placement);
    let mask = transform(&layer.mask, placement);

    imageops::overlay(canvas, &cutout, placement.x as i64, placement.y as i64);
    paste_mask(mask_canvas, &mask, &cutout, placement.x, placement.y);
}

/// Splice every layer onto `background` at an independent random placement.
///
/// Layers are pasted in order, so later ones occlude earlier ones. The image
/// and mask get identical transforms and stay pixel-aligned.
pub fn compose<R: Rng + ?Sized>(
    background: &RgbImage,
    layers: &[Layer],
    rng: &mut R,
) -> Result<Composite> {
    let (width, height) = background.dimensions();

    let mut canvas = DynamicImage::ImageRgb8(background.clone()).to_rgba8();
    let mut mask_canvas = Mask::from_pixel(width, height, NO_OBJECT);
    let mut placements = Vec::with_capacity(layers.len());

    for (index, layer) in layers.iter().enumerate() {
        let _span = tracing::debug_span!("layer", index).entered();

        let placement = sample_placement(rng, (width, height), layer.cutout.dimensions())?;
        tracing::debug!(
            "Placing {}x{} cutout: rotation={} scale={:.3} at ({}, {}) size {}x{}",
            layer.cutout.width(),
            layer.cutout.height(),
            placement.rotation_degrees,
            placement.scale,
            placement.x,
            placement.y,
            placement.width,
            placement.height
        );

        paste_layer(&mut canvas, &mut mask_canvas, layer, &placement);
        placements.push(placement);
    }

    Ok(Composite {
        image: DynamicImage::ImageRgba8(canvas).to_rgb8(),
        mask: mask_canvas,
        placements,
    })
}

/// Load a background, its cutouts and their masks from disk, compose them,
/// and write the composite image and mask under `layout`.
///
/// Nothing is written unless composition succeeds.
pub fn splice_image<R: Rng + ?Sized>(
    background_path: &Path,
    cutout_paths: &[PathBuf],
    mask_paths: &[PathBuf],
    layout: &OutputLayout,
    rng: &mut R,
) -> Result<SplicedPaths> {
    let _span = tracing::debug_span!("splice", background = %background_path.display()).entered();

    if cutout_paths.len() != mask_paths.len() {
        return Err(SpliceError::MaskLengthMismatch {
            cutouts: cutout_paths.len(),
            masks: mask_paths.len(),
        });
    }

    let background = image::open(background_path)?.to_rgb8();

    let layers = cutout_paths
        .iter()
        .zip(mask_paths)
        .map(|(cutout_path, mask_path)| {
            let cutout = load_cutout(cutout_path)?;
            let mask = image::open(mask_path)?.to_rgba8();
            Layer::new(cutout, mask)
        })
        .collect::<Result<Vec<_>>>()?;

    let composite = compose(&background, &layers, rng)?;
    tracing::debug!("Composed {} layers", composite.placements.len());

    let paths = SplicedPaths {
        image: layout.spliced_image_path(background_path)?,
        mask: layout.spliced_mask_path(background_path)?,
    };

    ensure_dir(layout.spliced_imgs_dir())?;
    composite.image.save(&paths.image)?;

    ensure_dir(layout.spliced_masks_dir())?;
    composite.mask.save(&paths.mask)?;

    Ok(paths)
}
