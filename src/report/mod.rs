//! Progress output, annotated images and the final ranking.

#[cfg(feature = "image-io")]
pub mod annotate;
pub mod rank;

use crate::search::MatchResult;

#[cfg(feature = "image-io")]
use crate::image::OwnedImage;
#[cfg(feature = "image-io")]
use crate::util::{StarMatchError, StarMatchResult};
#[cfg(feature = "image-io")]
use std::io::Write;
#[cfg(feature = "image-io")]
use std::path::{Path, PathBuf};

/// Progress line for one written result.
pub fn progress_line(result: &MatchResult) -> String {
    format!(
        "----- <Processed {}.png - Score: {:.2} - TimeTaken: {:.4}s> -----",
        result.output_stem(),
        result.score(),
        result.elapsed().as_secs_f64()
    )
}

/// Line for one entry of the final ranking.
pub fn ranking_line(result: &MatchResult) -> String {
    format!(
        "Template: {} - Method: {} - Score: {:.2} - TimeTaken: {:.4}s",
        result.pattern(),
        result.method(),
        result.score(),
        result.elapsed().as_secs_f64()
    )
}

#[cfg(feature = "image-io")]
fn console_error(err: std::io::Error) -> StarMatchError {
    StarMatchError::Output {
        path: "<console>".to_string(),
        reason: err.to_string(),
    }
}

/// Collects results, writes one annotated image per result and prints the
/// top-ranked ones at the end.
#[cfg(feature = "image-io")]
pub struct MatchReporter<W> {
    output_dir: PathBuf,
    out: W,
    top_k: usize,
    results: Vec<MatchResult>,
}

#[cfg(feature = "image-io")]
impl<W: Write> MatchReporter<W> {
    /// Creates a reporter writing images to `output_dir` and text to `out`.
    pub fn new(output_dir: impl Into<PathBuf>, out: W) -> Self {
        Self {
            output_dir: output_dir.into(),
            out,
            top_k: rank::DEFAULT_TOP_K,
            results: Vec::new(),
        }
    }

    /// Sets how many results the final ranking prints.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Directory annotated images are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Results recorded so far, in submission order.
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Creates the output directory if it does not exist yet.
    pub fn prepare(&self) -> StarMatchResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|err| StarMatchError::Output {
            path: self.output_dir.display().to_string(),
            reason: err.to_string(),
        })
    }

    /// Writes the annotated image for `result`, prints its progress line and
    /// keeps it for ranking. Existing files with the same name are replaced.
    pub fn record(&mut self, result: MatchResult, target: &OwnedImage) -> StarMatchResult<PathBuf> {
        let path = annotate::write_annotated(&self.output_dir, target, &result)?;
        writeln!(self.out, "{}", progress_line(&result)).map_err(console_error)?;
        self.results.push(result);
        Ok(path)
    }

    /// Prints a diagnostic for a pattern that produced no results.
    pub fn skipped(&mut self, name: &str, err: &StarMatchError) -> StarMatchResult<()> {
        writeln!(self.out, "!!! <Skipped {name}: {err}> !!!").map_err(console_error)
    }

    /// Prints the top-ranked results and returns them.
    pub fn finish(&mut self) -> StarMatchResult<Vec<MatchResult>> {
        let top = rank::top_k(&self.results, self.top_k);
        writeln!(self.out, "\n----- <Done> -----\n").map_err(console_error)?;
        writeln!(self.out, "----- <Top Matches> -----").map_err(console_error)?;
        for result in &top {
            writeln!(self.out, "{}\n", ranking_line(result)).map_err(console_error)?;
        }
        Ok(top)
    }

    /// Consumes the reporter and returns its text sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
