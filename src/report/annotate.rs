//! Drawing best-match rectangles onto copies of the target.

use crate::image::io::{gray_image_from_owned, save_gray_image};
use crate::image::OwnedImage;
use crate::search::MatchResult;
use crate::util::StarMatchResult;
use image::{GrayImage, Luma};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

/// Intensity of the match outline.
pub const OUTLINE: Luma<u8> = Luma([255]);

/// Returns a copy of `target` with a two-pixel outline from the result's
/// top-left to its bottom-right corner. `target` itself is never modified.
pub fn annotate(target: &OwnedImage, result: &MatchResult) -> StarMatchResult<GrayImage> {
    let mut canvas = gray_image_from_owned(target)?;
    let (x0, y0) = result.top_left();
    let (x1, y1) = result.bottom_right();
    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;

    // Corners are inclusive, so the outer ring spans one extra pixel.
    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(x0 as i32, y0 as i32).of_size(width + 1, height + 1),
        OUTLINE,
    );
    if width >= 2 && height >= 2 {
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(x0 as i32 + 1, y0 as i32 + 1).of_size(width - 1, height - 1),
            OUTLINE,
        );
    }
    Ok(canvas)
}

/// Annotates `target` and writes it as `<dir>/<pattern>_<method>.png`.
pub fn write_annotated(
    dir: &Path,
    target: &OwnedImage,
    result: &MatchResult,
) -> StarMatchResult<std::path::PathBuf> {
    let canvas = annotate(target, result)?;
    let path = dir.join(format!("{}.png", result.output_stem()));
    save_gray_image(&canvas, &path)?;
    Ok(path)
}
