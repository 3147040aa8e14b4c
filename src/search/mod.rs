//! Exhaustive similarity search of patterns inside the target image.
//!
//! [`SimilarityEngine`] owns the target and evaluates each pattern with all
//! six [`MatchMethod`]s. Methods share nothing but the two images; each one
//! builds its own surface and picks its own best placement.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::Backend;
use crate::method::MatchMethod;
use crate::template::{Pattern, PatternPlan};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{StarMatchError, StarMatchResult};
use std::time::{Duration, Instant};

mod surface;

pub use surface::{Peak, ScoreSurface};

/// Configuration for the similarity search.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchConfig {
    /// Kernel used to compute score surfaces.
    pub backend: Backend,
}

/// Outcome of one (pattern, method) evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    pattern: String,
    method: MatchMethod,
    score: f64,
    elapsed: Duration,
    top_left: (usize, usize),
    bottom_right: (usize, usize),
}

impl MatchResult {
    /// Builds a result; the bottom-right corner is derived from the pattern size.
    pub fn new(
        pattern: impl Into<String>,
        method: MatchMethod,
        peak: Peak,
        pattern_size: (usize, usize),
        elapsed: Duration,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            method,
            score: peak.score,
            elapsed,
            top_left: (peak.x, peak.y),
            bottom_right: (peak.x + pattern_size.0, peak.y + pattern_size.1),
        }
    }

    /// Display name of the pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Method that produced the score.
    pub fn method(&self) -> MatchMethod {
        self.method
    }

    /// Best score on the method's own scale.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Wall-clock time spent computing the score surface.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Top-left corner `(x, y)` of the best placement.
    pub fn top_left(&self) -> (usize, usize) {
        self.top_left
    }

    /// Bottom-right corner, `top_left + (width, height)` of the pattern.
    pub fn bottom_right(&self) -> (usize, usize) {
        self.bottom_right
    }

    /// Output identifier `{pattern}_{method}`.
    pub fn output_stem(&self) -> String {
        format!("{}_{}", self.pattern, self.method.name())
    }
}

/// Results of a batch, with the patterns that could not be evaluated.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Results in pattern order, then method order.
    pub results: Vec<MatchResult>,
    /// Patterns skipped with the reason.
    pub failures: Vec<(String, StarMatchError)>,
}

/// Scores patterns against a fixed grayscale target.
pub struct SimilarityEngine {
    target: OwnedImage,
    cfg: MatchConfig,
}

impl SimilarityEngine {
    /// Creates an engine for `target` with the default configuration.
    pub fn new(target: OwnedImage) -> Self {
        Self {
            target,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the target image.
    pub fn target(&self) -> &OwnedImage {
        &self.target
    }

    /// Computes the full score surface of `pattern` under `method`.
    pub fn score_surface(
        &self,
        pattern: ImageView<'_, u8>,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface> {
        let plan = PatternPlan::from_view(pattern);
        self.cfg.backend.scan(self.target.view(), &plan, method)
    }

    /// Evaluates `pattern` with a single method.
    pub fn evaluate_method(
        &self,
        pattern: &Pattern,
        method: MatchMethod,
    ) -> StarMatchResult<MatchResult> {
        let plan = PatternPlan::from_view(pattern.view());
        self.evaluate_plan(pattern, &plan, method)
    }

    /// Evaluates `pattern` with all six methods in [`MatchMethod::ALL`] order.
    pub fn evaluate(&self, pattern: &Pattern) -> StarMatchResult<Vec<MatchResult>> {
        let _span = trace_span!(
            "evaluate_pattern",
            pattern = pattern.name(),
            width = pattern.width(),
            height = pattern.height()
        )
        .entered();

        let plan = PatternPlan::from_view(pattern.view());
        MatchMethod::ALL
            .into_iter()
            .map(|method| self.evaluate_plan(pattern, &plan, method))
            .collect()
    }

    /// Evaluates every pattern, skipping the ones that fail.
    pub fn evaluate_all(&self, patterns: &[Pattern]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for pattern in patterns {
            match self.evaluate(pattern) {
                Ok(results) => outcome.results.extend(results),
                Err(err) => {
                    trace_warn!(
                        "pattern_skipped",
                        pattern = pattern.name(),
                        reason = err.to_string().as_str()
                    );
                    outcome.failures.push((pattern.name().to_string(), err));
                }
            }
        }
        outcome
    }

    fn evaluate_plan(
        &self,
        pattern: &Pattern,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<MatchResult> {
        let start = Instant::now();
        let surface = self.cfg.backend.scan(self.target.view(), plan, method)?;
        let elapsed = start.elapsed();

        let peak = surface.best(method.direction());
        trace_event!(
            "method_scored",
            method = method.name(),
            score = peak.score,
            x = peak.x,
            y = peak.y,
            elapsed_us = elapsed.as_micros() as u64
        );

        Ok(MatchResult::new(
            pattern.name(),
            method,
            peak,
            (plan.width(), plan.height()),
            elapsed,
        ))
    }
}
