//! Rayon-parallel kernel (feature-gated).
//!
//! Splits the placement grid by rows; each row runs the scalar window loop.

use crate::image::ImageView;
use crate::kernel::scalar::window_sums;
use crate::kernel::{finish_score, placement_range, Kernel};
use crate::method::MatchMethod;
use crate::search::ScoreSurface;
use crate::template::PatternPlan;
use crate::util::StarMatchResult;
use rayon::prelude::*;

/// Row-parallel direct evaluation.
pub struct ParallelKernel;

impl Kernel for ParallelKernel {
    fn scan(
        image: ImageView<'_, u8>,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let weights = plan.weights(method);
        let surface_width = max_x + 1;

        let mut data = vec![0.0f64; surface_width * (max_y + 1)];
        data.par_chunks_mut(surface_width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    let sums = window_sums(image, plan, weights, x, y);
                    *slot = finish_score(method, plan, sums);
                }
            });

        Ok(ScoreSurface::new(surface_width, max_y + 1, data))
    }
}
