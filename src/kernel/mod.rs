//! Score-surface kernels.
//!
//! Every backend reduces a placement to the same three window sums and hands
//! them to [`finish_score`], so the six formulas live in one place.

use crate::image::ImageView;
use crate::method::MatchMethod;
use crate::search::ScoreSurface;
use crate::template::PatternPlan;
use crate::util::{StarMatchError, StarMatchResult};

#[cfg(any(feature = "fft", test))]
pub(crate) mod integral;
pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(feature = "fft")]
pub mod fft;

/// Denominators at or below this are treated as zero.
pub(crate) const DENOM_EPS: f64 = 1e-9;

/// Kernel trait for computing a full score surface.
pub trait Kernel {
    /// Scores every placement of `plan` inside `image` with `method`.
    fn scan(
        image: ImageView<'_, u8>,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface>;
}

/// Which kernel computes score surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Direct evaluation of every placement.
    #[default]
    Scalar,
    /// Direct evaluation split across rows with rayon.
    #[cfg(feature = "rayon")]
    Parallel,
    /// FFT cross-correlation with integral-image window sums.
    #[cfg(feature = "fft")]
    Fft,
}

impl Backend {
    pub(crate) fn scan(
        self,
        image: ImageView<'_, u8>,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface> {
        match self {
            Backend::Scalar => scalar::ScalarKernel::scan(image, plan, method),
            #[cfg(feature = "rayon")]
            Backend::Parallel => self::rayon::ParallelKernel::scan(image, plan, method),
            #[cfg(feature = "fft")]
            Backend::Fft => fft::FftKernel::scan(image, plan, method),
        }
    }
}

/// Raw sums over one window of the target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowSums {
    /// `Σ weight · window`, with the weights chosen by [`PatternPlan::weights`].
    pub dot: f64,
    /// `Σ window`.
    pub sum: f64,
    /// `Σ window²`.
    pub sum_sq: f64,
}

/// Checks that the pattern fits and returns the last valid `(x, y)` offsets.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    plan: &PatternPlan,
) -> StarMatchResult<(usize, usize)> {
    if image.width() < plan.width() || image.height() < plan.height() {
        return Err(StarMatchError::IncompatibleDimensions {
            pattern_width: plan.width(),
            pattern_height: plan.height(),
            target_width: image.width(),
            target_height: image.height(),
        });
    }
    Ok((image.width() - plan.width(), image.height() - plan.height()))
}

/// Turns window sums into the score of `method`.
///
/// Zero denominators never produce NaN: the normalized correlations score
/// `0.0`, and `SqdiffNormed` scores `0.0` for identical all-zero data and
/// `1.0` otherwise.
pub fn finish_score(method: MatchMethod, plan: &PatternPlan, sums: WindowSums) -> f64 {
    let n = plan.count() as f64;
    match method {
        MatchMethod::Ccoeff | MatchMethod::Ccorr => sums.dot,
        MatchMethod::CcoeffNormed => {
            // n·Σw² − (Σw)² is exact for integer samples.
            let var_w = ((n * sums.sum_sq - sums.sum * sums.sum) / n).max(0.0);
            guarded_ratio(sums.dot, (plan.var() * var_w).sqrt())
        }
        MatchMethod::CcorrNormed => guarded_ratio(sums.dot, (plan.sum_sq() * sums.sum_sq).sqrt()),
        MatchMethod::Sqdiff => squared_difference(plan, sums),
        MatchMethod::SqdiffNormed => {
            let sqdiff = squared_difference(plan, sums);
            let denom = (plan.sum_sq() * sums.sum_sq).sqrt();
            if denom > DENOM_EPS {
                sqdiff / denom
            } else if sqdiff <= DENOM_EPS {
                0.0
            } else {
                1.0
            }
        }
    }
}

fn squared_difference(plan: &PatternPlan, sums: WindowSums) -> f64 {
    (sums.sum_sq - 2.0 * sums.dot + plan.sum_sq()).max(0.0)
}

fn guarded_ratio(num: f64, denom: f64) -> f64 {
    if denom > DENOM_EPS {
        num / denom
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{finish_score, WindowSums};
    use crate::image::ImageView;
    use crate::method::MatchMethod;
    use crate::template::PatternPlan;

    fn plan(data: &[u8], width: usize, height: usize) -> PatternPlan {
        PatternPlan::from_view(ImageView::from_slice(data, width, height).unwrap())
    }

    #[test]
    fn zero_window_scores_are_finite() {
        let plan = plan(&[0u8; 9], 3, 3);
        let sums = WindowSums::default();
        for method in MatchMethod::ALL {
            let score = finish_score(method, &plan, sums);
            assert_eq!(score, 0.0, "{method}");
        }
    }

    #[test]
    fn sqdiff_normed_of_blank_window_against_bright_pattern_is_one() {
        let plan = plan(&[10u8; 4], 2, 2);
        let score = finish_score(MatchMethod::SqdiffNormed, &plan, WindowSums::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn identical_window_matches_exactly() {
        let data = [3u8, 9, 4, 1];
        let plan = plan(&data, 2, 2);
        let sum: f64 = data.iter().map(|&v| v as f64).sum();
        let sum_sq: f64 = data.iter().map(|&v| (v as f64) * (v as f64)).sum();

        let raw = WindowSums {
            dot: sum_sq,
            sum,
            sum_sq,
        };
        assert_eq!(finish_score(MatchMethod::Sqdiff, &plan, raw), 0.0);
        assert_eq!(finish_score(MatchMethod::SqdiffNormed, &plan, raw), 0.0);
        assert!((finish_score(MatchMethod::CcorrNormed, &plan, raw) - 1.0).abs() < 1e-12);

        let centered = WindowSums {
            dot: plan.var(),
            sum,
            sum_sq,
        };
        assert!((finish_score(MatchMethod::CcoeffNormed, &plan, centered) - 1.0).abs() < 1e-12);
    }
}
