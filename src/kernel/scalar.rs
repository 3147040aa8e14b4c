//! Scalar reference kernel.

use crate::image::ImageView;
use crate::kernel::{finish_score, placement_range, Kernel, WindowSums};
use crate::method::MatchMethod;
use crate::search::ScoreSurface;
use crate::template::PatternPlan;
use crate::util::StarMatchResult;

/// Direct evaluation of every placement, one window at a time.
pub struct ScalarKernel;

/// Accumulates the window sums for the placement at `(x, y)`.
///
/// The caller guarantees the pattern fits at `(x, y)`.
pub(crate) fn window_sums(
    image: ImageView<'_, u8>,
    plan: &PatternPlan,
    weights: &[f64],
    x: usize,
    y: usize,
) -> WindowSums {
    let width = plan.width();
    let mut sums = WindowSums::default();
    for (ty, img_row) in image.rows().skip(y).take(plan.height()).enumerate() {
        let base = ty * width;
        let window = &img_row[x..x + width];
        for (&value, &weight) in window.iter().zip(&weights[base..base + width]) {
            let v = value as f64;
            sums.dot += weight * v;
            sums.sum += v;
            sums.sum_sq += v * v;
        }
    }
    sums
}

/// Scores a single placement; `None` if the pattern does not fit there.
pub fn score_at(
    image: ImageView<'_, u8>,
    plan: &PatternPlan,
    method: MatchMethod,
    x: usize,
    y: usize,
) -> Option<f64> {
    let (max_x, max_y) = placement_range(image, plan).ok()?;
    if x > max_x || y > max_y {
        return None;
    }
    let sums = window_sums(image, plan, plan.weights(method), x, y);
    Some(finish_score(method, plan, sums))
}

impl Kernel for ScalarKernel {
    fn scan(
        image: ImageView<'_, u8>,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let weights = plan.weights(method);

        let mut data = Vec::with_capacity((max_x + 1) * (max_y + 1));
        for y in 0..=max_y {
            for x in 0..=max_x {
                let sums = window_sums(image, plan, weights, x, y);
                data.push(finish_score(method, plan, sums));
            }
        }

        Ok(ScoreSurface::new(max_x + 1, max_y + 1, data))
    }
}
