use crate::error::{Result, SpliceError};
use image::{Rgba, RgbaImage};

/// Label image aligned pixel-for-pixel with its source.
///
/// Channel layout per pixel:
/// * 0: class id (0 = no object)
/// * 1: instance id (0 = no object)
/// * 2: unused, always 0
/// * 3: 255 where an object is present, 0 elsewhere
pub type Mask = RgbaImage;

/// Pixel value for "no object"
pub const NO_OBJECT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Class and instance stamped onto every opaque pixel of a cutout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub class_id: u8,
    pub instance_id: u8,
}

impl Label {
    /// Both ids must be non-zero; 0 is the no-object sentinel
    pub fn new(class_id: u8, instance_id: u8) -> Result<Self> {
        if class_id == 0 || instance_id == 0 {
            return Err(SpliceError::InvalidLabel {
                class_id,
                instance_id,
            });
        }
        Ok(Self {
            class_id,
            instance_id,
        })
    }

    pub fn pixel(self) -> Rgba<u8> {
        Rgba([self.class_id, self.instance_id, 0, 255])
    }

    /// Decode a mask pixel; `None` for the no-object sentinel
    pub fn from_pixel(pixel: &Rgba<u8>) -> Option<Self> {
        let [class_id, instance_id, _, alpha] = pixel.0;
        if alpha == 0 || class_id == 0 {
            return None;
        }
        Some(Self {
            class_id,
            instance_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_layout() {
        let label = Label::new(3, 2).unwrap();
        assert_eq!(label.pixel(), Rgba([3, 2, 0, 255]));
        assert_eq!(Label::from_pixel(&label.pixel()), Some(label));
    }

    #[test]
    fn test_zero_ids_are_rejected() {
        assert!(matches!(
            Label::new(0, 1),
            Err(SpliceError::InvalidLabel { class_id: 0, .. })
        ));
        assert!(matches!(
            Label::new(2, 0),
            Err(SpliceError::InvalidLabel { instance_id: 0, .. })
        ));
    }

    #[test]
    fn test_sentinel_decodes_to_none() {
        assert_eq!(Label::from_pixel(&NO_OBJECT), None);
    }
}
