//! Collection of candidate patterns for a category.

use crate::category::{has_image_extension, DEFAULT_SKIP_MARKER};
use crate::image::io::ImageSource;
use crate::template::Pattern;
use crate::trace::{trace_event, trace_warn};
use crate::util::StarMatchError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Patterns decoded from a category, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    /// Decoded patterns in traversal order.
    pub patterns: Vec<Pattern>,
    /// Image files that failed to decode.
    pub skipped: Vec<(PathBuf, StarMatchError)>,
}

/// Walks a category directory and decodes every image file in it.
pub struct CandidateCatalog<S> {
    source: S,
    skip_markers: Vec<String>,
}

impl<S: ImageSource> CandidateCatalog<S> {
    /// Creates a catalog that skips paths containing [`DEFAULT_SKIP_MARKER`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            skip_markers: vec![DEFAULT_SKIP_MARKER.to_string()],
        }
    }

    /// Replaces the skip markers.
    pub fn with_skip_markers(mut self, markers: Vec<String>) -> Self {
        self.skip_markers = markers;
        self
    }

    /// Returns the configured skip markers.
    pub fn skip_markers(&self) -> &[String] {
        &self.skip_markers
    }

    /// Collects the patterns under `root/category`.
    ///
    /// Files are visited depth-first in file-name order. Undecodable files are
    /// recorded in [`CatalogLoad::skipped`] and do not stop the walk.
    pub fn collect(&self, root: &Path, category: &str) -> CatalogLoad {
        let mut load = CatalogLoad::default();
        for path in self.candidate_paths(&root.join(category)) {
            match self.source.load_gray(&path) {
                Ok(img) => load
                    .patterns
                    .push(Pattern::from_path(&path, img).with_category(category)),
                Err(err) => {
                    trace_warn!(
                        "pattern_decode_failed",
                        path = path.display().to_string().as_str(),
                        reason = err.to_string().as_str()
                    );
                    load.skipped.push((path, err));
                }
            }
        }
        trace_event!(
            "catalog_loaded",
            category = category,
            patterns = load.patterns.len(),
            skipped = load.skipped.len()
        );
        load
    }

    /// Image paths under `dir` that are not excluded by a skip marker.
    pub fn candidate_paths(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.file_name()
                    .map(|name| has_image_extension(&name.to_string_lossy()))
                    .unwrap_or(false)
            })
            .filter(|path| !self.is_skipped(path))
            .collect()
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let parent = path.parent().unwrap_or(path).to_string_lossy();
        self.skip_markers
            .iter()
            .any(|marker| parent.contains(marker.as_str()))
    }
}
