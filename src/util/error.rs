//! Error types for starmatch.

use crate::category::TargetVariant;
use thiserror::Error;

/// Result alias for starmatch operations.
pub type StarMatchResult<T> = std::result::Result<T, StarMatchError>;

/// Coarse classification of [`StarMatchError`] used at the user-facing boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset root is missing.
    DatasetNotFound,
    /// The target image file is missing.
    TargetImageNotFound,
    /// The target image is undecodable or incompatible with the category.
    TargetImageInvalid,
    /// A pattern could not be scored against the target.
    MatchComputation,
    /// Writing results to disk failed.
    Output,
    /// Interactive input ended or could not be read.
    Input,
}

/// Errors that can occur when running starmatch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StarMatchError {
    /// Width or height is zero or overflows the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not lie inside the image.
    #[error("region {width}x{height} at ({x}, {y}) exceeds image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The pattern does not fit inside the target image.
    #[error(
        "pattern {pattern_width}x{pattern_height} does not fit inside target {target_width}x{target_height}"
    )]
    IncompatibleDimensions {
        pattern_width: usize,
        pattern_height: usize,
        target_width: usize,
        target_height: usize,
    },
    /// An image file could not be decoded.
    #[error("failed to decode {path}: {reason}")]
    ImageDecode { path: String, reason: String },
    /// The dataset root does not exist.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: String },
    /// The target image does not exist.
    #[error("target image not found at {path}")]
    TargetImageNotFound { path: String },
    /// The target image exists but cannot be used.
    #[error("target image {path} is invalid: {reason}")]
    TargetImageInvalid { path: String, reason: String },
    /// The target image variant does not match the one the category requires.
    #[error("target image {found} cannot be used for {category}; use targetImage{required} or targetImage{required}-NoLine")]
    IncompatibleTarget {
        category: String,
        required: TargetVariant,
        found: String,
    },
    /// Writing an output file or directory failed.
    #[error("failed to write {path}: {reason}")]
    Output { path: String, reason: String },
    /// Interactive input closed before a valid answer was given.
    #[error("input closed: {reason}")]
    Input { reason: String },
}

impl StarMatchError {
    /// Returns the user-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DatasetNotFound { .. } => ErrorKind::DatasetNotFound,
            Self::TargetImageNotFound { .. } => ErrorKind::TargetImageNotFound,
            Self::TargetImageInvalid { .. } | Self::IncompatibleTarget { .. } => {
                ErrorKind::TargetImageInvalid
            }
            Self::Output { .. } => ErrorKind::Output,
            Self::Input { .. } => ErrorKind::Input,
            Self::InvalidDimensions { .. }
            | Self::InvalidStride { .. }
            | Self::BufferTooSmall { .. }
            | Self::RoiOutOfBounds { .. }
            | Self::IncompatibleDimensions { .. }
            | Self::ImageDecode { .. } => ErrorKind::MatchComputation,
        }
    }
}
