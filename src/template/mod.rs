//! Patterns searched for inside the target image.

use crate::image::{ImageView, OwnedImage};
use std::path::Path;

mod plan;

pub use plan::PatternPlan;

/// Grayscale reference image with the name it is reported under.
#[derive(Clone, Debug)]
pub struct Pattern {
    name: String,
    category: String,
    img: OwnedImage,
}

impl Pattern {
    /// Creates a pattern with an explicit display name and no category.
    pub fn new(name: impl Into<String>, img: OwnedImage) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            img,
        }
    }

    /// Creates a pattern named after the file stem of `path`.
    pub fn from_path(path: &Path, img: OwnedImage) -> Self {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, img)
    }

    /// Sets the owning category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Display name, the source file name without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning category, empty when the pattern was built in memory.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the pattern image.
    pub fn image(&self) -> &OwnedImage {
        &self.img
    }

    /// Returns a borrowed view of the pattern data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Pattern width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Pattern height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }
}

#[cfg(test)]
mod tests {
    use super::Pattern;
    use crate::image::OwnedImage;
    use std::path::Path;

    #[test]
    fn name_is_file_stem() {
        let img = OwnedImage::filled(2, 2, 7).unwrap();
        let pattern = Pattern::from_path(Path::new("Dataset/Orion/orion_3.jpeg"), img)
            .with_category("Orion");
        assert_eq!(pattern.name(), "orion_3");
        assert_eq!(pattern.category(), "Orion");
    }
}
