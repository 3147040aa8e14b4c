//! One interactive search run, from dataset check to final ranking.

use crate::catalog::CandidateCatalog;
use crate::category::{check_target, CategorySelector, DEFAULT_SKIP_MARKER};
use crate::image::io::ImageSource;
use crate::image::OwnedImage;
use crate::report::rank::DEFAULT_TOP_K;
use crate::report::MatchReporter;
use crate::search::{MatchConfig, MatchResult, SimilarityEngine};
use crate::trace::trace_span;
use crate::util::{StarMatchError, StarMatchResult};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Paths and limits for a search run.
#[derive(Clone, Debug)]
pub struct SearchSettings {
    /// Root directory holding one subdirectory per category.
    pub dataset_root: PathBuf,
    /// Target image every pattern is searched in.
    pub target_image: PathBuf,
    /// Directory receiving the annotated images.
    pub output_dir: PathBuf,
    /// Path fragments excluded from pattern collection and the category list.
    pub skip_markers: Vec<String>,
    /// Number of results in the final ranking.
    pub top_k: usize,
    /// Similarity search configuration.
    pub match_cfg: MatchConfig,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let dataset_root = PathBuf::from("ConstellationDataset");
        let target_image = dataset_root.join(DEFAULT_SKIP_MARKER).join("targetImage1.png");
        Self {
            dataset_root,
            target_image,
            output_dir: PathBuf::from("Results_TemplateMatching"),
            skip_markers: vec![DEFAULT_SKIP_MARKER.to_string()],
            top_k: DEFAULT_TOP_K,
            match_cfg: MatchConfig::default(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Category that was searched.
    pub category: String,
    /// Number of patterns decoded from the category.
    pub patterns_loaded: usize,
    /// Files that could not be decoded.
    pub files_skipped: usize,
    /// Every result in pattern order, then method order.
    pub results: Vec<MatchResult>,
    /// Patterns that could not be scored.
    pub failures: Vec<(String, StarMatchError)>,
    /// The final ranking.
    pub top: Vec<MatchResult>,
}

/// Drives a search run over an [`ImageSource`].
pub struct Session<S> {
    settings: SearchSettings,
    source: S,
}

impl<S: ImageSource> Session<S> {
    /// Creates a session.
    pub fn new(settings: SearchSettings, source: S) -> Self {
        Self { settings, source }
    }

    /// Returns the run settings.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Loads the target image, distinguishing a missing file from a bad one.
    pub fn load_target(&self) -> StarMatchResult<OwnedImage> {
        let path = &self.settings.target_image;
        if !path.is_file() {
            return Err(StarMatchError::TargetImageNotFound {
                path: path.display().to_string(),
            });
        }
        self.source
            .load_gray(path)
            .map_err(|err| StarMatchError::TargetImageInvalid {
                path: path.display().to_string(),
                reason: err.to_string(),
            })
    }

    /// Runs the whole search, reading answers from `input` and writing the
    /// transcript to `out`.
    ///
    /// Dataset, target and category problems end the run with an error and no
    /// results. Patterns that fail to decode or to fit are reported and skipped.
    ///
    /// The target is loaded before the menu, but the blocking display gate
    /// waits until a category is chosen and accepted, so an incompatible
    /// target aborts without asking for acknowledgment.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> StarMatchResult<SearchOutcome> {
        let _span = trace_span!("search_session").entered();
        let settings = &self.settings;

        if !settings.dataset_root.is_dir() {
            return Err(StarMatchError::DatasetNotFound {
                path: settings.dataset_root.display().to_string(),
            });
        }
        say(out, "----- <Dataset Found and Loaded Successfully> -----")?;

        let target = self.load_target()?;
        say(out, "----- <Target Image Found and Loaded Successfully> -----\n")?;

        let selector = CategorySelector::discover(&settings.dataset_root, &settings.skip_markers)?;
        let category = selector.select(input, out)?;
        check_target(&category, &settings.target_image)?;

        confirm_target(&target, input, out)?;

        let catalog =
            CandidateCatalog::new(&self.source).with_skip_markers(settings.skip_markers.clone());
        let load = catalog.collect(&settings.dataset_root, &category);
        for (path, err) in &load.skipped {
            say(out, &format!("!!! <Could not read {}: {err}> !!!", path.display()))?;
        }
        say(
            out,
            &format!(
                "----- <Loaded {} images from the dataset> -----\n",
                load.patterns.len()
            ),
        )?;

        let engine = SimilarityEngine::new(target).with_config(settings.match_cfg);
        let mut reporter =
            MatchReporter::new(&settings.output_dir, &mut *out).with_top_k(settings.top_k);
        reporter.prepare()?;

        let mut failures = Vec::new();
        for pattern in &load.patterns {
            match engine.evaluate(pattern) {
                Ok(results) => {
                    for result in results {
                        reporter.record(result, engine.target())?;
                    }
                }
                Err(err) => {
                    reporter.skipped(pattern.name(), &err)?;
                    failures.push((pattern.name().to_string(), err));
                }
            }
        }
        let top = reporter.finish()?;

        Ok(SearchOutcome {
            category,
            patterns_loaded: load.patterns.len(),
            files_skipped: load.skipped.len(),
            results: reporter.results().to_vec(),
            failures,
            top,
        })
    }
}

/// Presents the target and blocks until a line of input acknowledges it.
fn confirm_target<R: BufRead, W: Write>(
    target: &OwnedImage,
    input: &mut R,
    out: &mut W,
) -> StarMatchResult<()> {
    say(out, "----- <Displaying Target Image> -----")?;
    write!(
        out,
        "Target image is {}x{}. Press Enter to continue...",
        target.width(),
        target.height()
    )
    .map_err(transcript_error)?;
    out.flush().map_err(transcript_error)?;

    // End of input counts as acknowledgment.
    let mut line = String::new();
    input.read_line(&mut line).map_err(|err| StarMatchError::Input {
        reason: err.to_string(),
    })?;
    say(out, "\n----- <Target Image Displayed Successfully> -----\n")
}

fn say<W: Write>(out: &mut W, line: &str) -> StarMatchResult<()> {
    writeln!(out, "{line}").map_err(transcript_error)
}

fn transcript_error(err: std::io::Error) -> StarMatchError {
    StarMatchError::Output {
        path: "<console>".to_string(),
        reason: err.to_string(),
    }
}
