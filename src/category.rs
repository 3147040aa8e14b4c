//! Category discovery, interactive selection and the target compatibility table.

use crate::util::{StarMatchError, StarMatchResult};
use std::fmt;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// File extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Directory marker for target images, excluded from pattern sources.
pub const DEFAULT_SKIP_MARKER: &str = "TargetImages";

/// Which of the two target images a category has to be searched in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetVariant {
    /// `targetImage1` or `targetImage1-NoLine`.
    One,
    /// `targetImage2` or `targetImage2-NoLine`.
    Two,
}

impl TargetVariant {
    /// Recognizes the variant from a target file name, ignoring the extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        match stem.strip_suffix("-NoLine").unwrap_or(stem) {
            "targetImage1" => Some(TargetVariant::One),
            "targetImage2" => Some(TargetVariant::Two),
            _ => None,
        }
    }
}

impl fmt::Display for TargetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetVariant::One => f.write_str("1"),
            TargetVariant::Two => f.write_str("2"),
        }
    }
}

/// Categories bound to a specific target image. Unlisted categories accept any.
pub const TARGET_COMPATIBILITY: &[(&str, TargetVariant)] = &[
    ("Gemini", TargetVariant::One),
    ("Orion", TargetVariant::One),
    ("Canis Major", TargetVariant::One),
    ("Taurus", TargetVariant::One),
    ("Cassiopeia", TargetVariant::One),
    ("Cygnus", TargetVariant::One),
    ("Scorpius", TargetVariant::One),
    ("Libra", TargetVariant::One),
    ("Leo", TargetVariant::One),
    ("Cancer", TargetVariant::One),
];

/// Looks up the target variant `category` must be searched in.
pub fn required_variant(category: &str) -> Option<TargetVariant> {
    TARGET_COMPATIBILITY
        .iter()
        .find(|(name, _)| *name == category)
        .map(|&(_, variant)| variant)
}

/// Fails with [`StarMatchError::IncompatibleTarget`] when `target_path` is not
/// the variant `category` requires.
pub fn check_target(category: &str, target_path: &Path) -> StarMatchResult<()> {
    let Some(required) = required_variant(category) else {
        return Ok(());
    };
    if TargetVariant::from_path(target_path) == Some(required) {
        return Ok(());
    }
    let found = target_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| target_path.display().to_string());
    Err(StarMatchError::IncompatibleTarget {
        category: category.to_string(),
        required,
        found,
    })
}

/// Returns `true` when `name` ends in one of [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Uppercases the first character and lowercases the rest.
pub fn normalize_category_name(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Lists the category directories directly under `root`, sorted by name.
///
/// Entries that look like image files or contain a skip marker are excluded.
pub fn list_categories(root: &Path, skip_markers: &[String]) -> StarMatchResult<Vec<String>> {
    let entries = fs::read_dir(root).map_err(|_| StarMatchError::DatasetNotFound {
        path: root.display().to_string(),
    })?;

    let mut categories = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_image_extension(&name) || !entry.path().is_dir() {
            continue;
        }
        if skip_markers.iter().any(|marker| name.contains(marker.as_str())) {
            continue;
        }
        categories.push(name);
    }
    categories.sort();
    Ok(categories)
}

/// Prompts for a category until a known name is entered.
pub struct CategorySelector {
    categories: Vec<String>,
}

impl CategorySelector {
    /// Creates a selector over an explicit list of categories.
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    /// Discovers the categories under the dataset root.
    pub fn discover(root: &Path, skip_markers: &[String]) -> StarMatchResult<Self> {
        Ok(Self::new(list_categories(root, skip_markers)?))
    }

    /// Known category names.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the category matching `raw` after case normalization.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let normalized = normalize_category_name(raw);
        self.categories
            .iter()
            .find(|name| **name == normalized)
            .map(String::as_str)
    }

    /// Prints the menu and reads lines from `input` until one names a category.
    ///
    /// Invalid answers re-prompt indefinitely; end of input is an error.
    pub fn select<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> StarMatchResult<String> {
        writeln!(out, "----- <Menu> -----").map_err(input_error)?;
        for name in &self.categories {
            writeln!(out, "{name}").map_err(input_error)?;
        }

        let mut line = String::new();
        loop {
            write!(
                out,
                "\nEnter the name of the constellation you want to search for: "
            )
            .map_err(input_error)?;
            out.flush().map_err(input_error)?;

            line.clear();
            let read = input.read_line(&mut line).map_err(input_error)?;
            if read == 0 {
                return Err(StarMatchError::Input {
                    reason: "no category selected".to_string(),
                });
            }
            if let Some(name) = self.resolve(&line) {
                return Ok(name.to_string());
            }
            writeln!(out, "!!! <Invalid class name. Please try again.> !!!").map_err(input_error)?;
        }
    }
}

fn input_error(err: std::io::Error) -> StarMatchError {
    StarMatchError::Input {
        reason: err.to_string(),
    }
}
