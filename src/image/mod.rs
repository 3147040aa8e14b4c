//! Grayscale image buffers.
//!
//! `ImageView` borrows a row-major buffer with an explicit stride, so a crop of
//! a larger image is a zero-copy view that keeps the parent's stride.
//! `OwnedImage` is the contiguous buffer every loaded target and pattern ends
//! up in.

use crate::util::{StarMatchError, StarMatchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> StarMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> StarMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(StarMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of pixels covered by the view.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` when the view covers no pixels. Never true for a
    /// successfully constructed view.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns row `y` trimmed to `width` elements.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Iterates over all rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Returns a zero-copy view of the `width` x `height` region at `(x, y)`.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> StarMatchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(StarMatchError::InvalidDimensions { width, height });
        }
        let out_of_bounds = || StarMatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(out_of_bounds)?;
        let end_y = y.checked_add(height).ok_or_else(out_of_bounds)?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds());
        }

        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or_else(out_of_bounds)?;
        ImageView::new(data, width, height, self.stride)
    }
}

impl ImageView<'_, u8> {
    /// Copies the view into a contiguous owned image.
    pub fn to_owned_image(&self) -> OwnedImage {
        let mut data = Vec::with_capacity(self.len());
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        OwnedImage {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> StarMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(StarMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(StarMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(StarMatchError::InvalidDimensions { width, height })
}

/// Owned contiguous grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> StarMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(StarMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(StarMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(StarMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(StarMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> StarMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(StarMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns a borrowed view of the whole image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Copies the `width` x `height` region at `(x, y)` into a new image.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> StarMatchResult<Self> {
        Ok(self.view().roi(x, y, width, height)?.to_owned_image())
    }
}
