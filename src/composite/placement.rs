use crate::error::{Result, SpliceError};
use rand::Rng;

/// Random geometry applied to one cutout (and its mask) on one background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Counter-clockwise rotation in whole degrees, 0-359
    pub rotation_degrees: u32,
    pub scale: f64,
    /// Top-left corner of the transformed cutout on the background
    pub x: u32,
    pub y: u32,
    /// Size of the transformed cutout
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// Whether the transformed cutout lies inside a `width` x `height` canvas
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Largest scale a cutout may be drawn at: half of whichever background
/// dimension is tighter.
pub fn max_scale(background: (u32, u32), cutout: (u32, u32)) -> Result<f64> {
    let (bw, bh) = background;
    let (cw, ch) = cutout;

    if cw == 0 || ch == 0 {
        return Err(SpliceError::DegenerateGeometry(format!(
            "cutout has zero size {cw}x{ch}"
        )));
    }

    let scale = f64::min(
        (bh as f64 / ch as f64) / 2.0,
        (bw as f64 / cw as f64) / 2.0,
    );
    if scale <= 0.0 || !scale.is_finite() {
        return Err(SpliceError::DegenerateGeometry(format!(
            "max scale {scale} for {cw}x{ch} cutout on {bw}x{bh} background"
        )));
    }

    Ok(scale)
}

/// Draw rotation, scale, then offset for a `cutout`-sized image on a
/// `background`-sized canvas.
///
/// Scale is uniform in `[max_scale / 4, max_scale]`; the offset keeps the
/// scaled bounding box fully inside the background.
pub fn sample_placement<R: Rng + ?Sized>(
    rng: &mut R,
    background: (u32, u32),
    cutout: (u32, u32),
) -> Result<Placement> {
    let (bw, bh) = background;
    let (cw, ch) = cutout;

    let rotation_degrees = rng.gen_range(0..=359);

    let max = max_scale(background, cutout)?;
    let scale = rng.gen_range(max / 4.0..=max);

    let width = (cw as f64 * scale) as u32;
    let height = (ch as f64 * scale) as u32;
    if width == 0 || height == 0 {
        return Err(SpliceError::DegenerateGeometry(format!(
            "scale {scale:.4} shrinks {cw}x{ch} cutout to {width}x{height}"
        )));
    }

    let (Some(max_x), Some(max_y)) = (bw.checked_sub(width), bh.checked_sub(height)) else {
        return Err(SpliceError::DegenerateGeometry(format!(
            "{width}x{height} cutout does not fit on {bw}x{bh} background"
        )));
    };

    let x = rng.gen_range(0..=max_x);
    let y = rng.gen_range(0..=max_y);

    Ok(Placement {
        rotation_degrees,
        scale,
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_max_scale_uses_tighter_dimension() {
        // Height allows 600/100/2 = 3.0, width allows 800/400/2 = 1.0
        let scale = max_scale((800, 600), (400, 100)).unwrap();
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_placements_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let cases = [
            ((800, 600), (100, 100)),
            ((800, 600), (50, 80)),
            ((640, 480), (1000, 30)),
            ((37, 501), (13, 7)),
        ];

        for (background, cutout) in cases {
            let max = max_scale(background, cutout).unwrap();
            for _ in 0..500 {
                let p = sample_placement(&mut rng, background, cutout).unwrap();
                assert!(p.rotation_degrees <= 359);
                assert!(p.scale >= max / 4.0 && p.scale <= max);
                assert!(p.fits_within(background.0, background.1), "{p:?} on {background:?}");
            }
        }
    }

    #[test]
    fn test_cutout_same_size_as_background() {
        let mut rng = StdRng::seed_from_u64(11);
        let size = (320, 240);

        assert!((max_scale(size, size).unwrap() - 0.5).abs() < 1e-12);
        for _ in 0..200 {
            let p = sample_placement(&mut rng, size, size).unwrap();
            assert!(p.width <= 160 && p.height <= 120);
            assert!(p.width >= 40 && p.height >= 30);
            assert!(p.fits_within(size.0, size.1));
        }
    }

    #[test]
    fn test_zero_sized_inputs_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample_placement(&mut rng, (100, 100), (0, 10)),
            Err(SpliceError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            sample_placement(&mut rng, (0, 100), (10, 10)),
            Err(SpliceError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_scale_rounding_to_nothing_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        // Max scale is 1/2000, so a 1000px-tall cutout shrinks below one pixel wide
        let result = sample_placement(&mut rng, (1, 1000), (1000, 1000));
        assert!(matches!(result, Err(SpliceError::DegenerateGeometry(_))));
    }
}
