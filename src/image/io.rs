//! Image decoding and encoding via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedImage;
use crate::util::{StarMatchError, StarMatchResult};
use std::path::Path;

/// Supplies decoded grayscale images for a path.
pub trait ImageSource {
    /// Decodes the file at `path` into a grayscale image.
    fn load_gray(&self, path: &Path) -> StarMatchResult<OwnedImage>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn load_gray(&self, path: &Path) -> StarMatchResult<OwnedImage> {
        (**self).load_gray(path)
    }
}

/// [`ImageSource`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn load_gray(&self, path: &Path) -> StarMatchResult<OwnedImage> {
        load_gray_image(path)
    }
}

/// Rec.601 luma weights in 14-bit fixed point; they sum to `1 << 14`.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Rounded `0.299 R + 0.587 G + 0.114 B`.
#[inline]
fn rec601_luma([r, g, b]: [u8; 3]) -> u8 {
    let acc = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((acc + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Creates an owned image from a dynamic image.
///
/// Color input is reduced with Rec.601 weights; gray input keeps its samples.
/// Alpha is ignored.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> StarMatchResult<OwnedImage> {
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let data = rgb.pixels().map(|px| rec601_luma(px.0)).collect();
    OwnedImage::new(data, width, height)
}

/// Converts an owned image back into an `image` buffer for drawing and encoding.
pub fn gray_image_from_owned(img: &OwnedImage) -> StarMatchResult<image::GrayImage> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    image::GrayImage::from_raw(width, height, img.data().to_vec()).ok_or(
        StarMatchError::BufferTooSmall {
            needed: img.width() * img.height(),
            got: img.data().len(),
        },
    )
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> StarMatchResult<OwnedImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| StarMatchError::ImageDecode {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Encodes a grayscale image to `path`; the format follows the extension.
pub fn save_gray_image<P: AsRef<Path>>(img: &image::GrayImage, path: P) -> StarMatchResult<()> {
    let path = path.as_ref();
    img.save(path).map_err(|err| StarMatchError::Output {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{gray_image_from_owned, load_gray_image, rec601_luma, save_gray_image};
    use crate::image::OwnedImage;
    use crate::util::ErrorKind;

    #[test]
    fn png_round_trip_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let img = OwnedImage::new((0u8..24).map(|v| v * 10).collect(), 6, 4).unwrap();

        save_gray_image(&gray_image_from_owned(&img).unwrap(), &path).unwrap();
        let loaded = load_gray_image(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn undecodable_file_is_a_match_computation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = load_gray_image(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MatchComputation);
    }

    #[test]
    fn color_files_use_rec601_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]))
            .save(&path)
            .unwrap();

        let loaded = load_gray_image(&path).unwrap();
        assert_eq!(loaded.data(), &[76, 76, 76, 76]);
    }

    #[test]
    fn luma_weights_keep_gray_and_round() {
        assert_eq!(rec601_luma([0, 255, 0]), 150);
        assert_eq!(rec601_luma([0, 0, 255]), 29);
        for v in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(rec601_luma([v, v, v]), v);
        }
    }
}
