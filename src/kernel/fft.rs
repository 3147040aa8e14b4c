//! FFT cross-correlation kernel (feature-gated).
//!
//! The target is flattened row-major with its own width as the stride and the
//! pattern is laid out on the same stride. For every valid placement the 1D
//! circular correlation of the two buffers then equals the 2D window dot
//! product, because no pattern row crosses a target row boundary and the
//! buffer length is at least `W * H`. Window sums come from integral images.

use crate::image::ImageView;
use crate::kernel::integral::IntegralImage;
use crate::kernel::{finish_score, placement_range, Kernel, WindowSums};
use crate::method::MatchMethod;
use crate::search::ScoreSurface;
use crate::template::PatternPlan;
use crate::util::StarMatchResult;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Frequency-domain correlation with integral-image normalization.
pub struct FftKernel;

/// Computes `Σ weight · window` for every placement via one forward FFT of
/// each buffer and one inverse FFT of their product.
fn correlate(image: ImageView<'_, u8>, plan: &PatternPlan, weights: &[f64]) -> Vec<Complex<f64>> {
    let stride = image.width();
    let len = (stride * image.height()).next_power_of_two();

    let mut image_buf = vec![Complex::new(0.0, 0.0); len];
    for (y, row) in image.rows().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            image_buf[y * stride + x] = Complex::new(value as f64, 0.0);
        }
    }

    let mut pattern_buf = vec![Complex::new(0.0, 0.0); len];
    for ty in 0..plan.height() {
        let src = &weights[ty * plan.width()..(ty + 1) * plan.width()];
        for (tx, &weight) in src.iter().enumerate() {
            pattern_buf[ty * stride + tx] = Complex::new(weight, 0.0);
        }
    }

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(len);
    forward.process(&mut image_buf);
    forward.process(&mut pattern_buf);

    for (img, pat) in image_buf.iter_mut().zip(&pattern_buf) {
        *img *= pat.conj();
    }

    let inverse = planner.plan_fft_inverse(len);
    inverse.process(&mut image_buf);

    let scale = 1.0 / len as f64;
    for value in image_buf.iter_mut() {
        *value *= scale;
    }
    image_buf
}

impl Kernel for FftKernel {
    fn scan(
        image: ImageView<'_, u8>,
        plan: &PatternPlan,
        method: MatchMethod,
    ) -> StarMatchResult<ScoreSurface> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let stride = image.width();
        let correlation = correlate(image, plan, plan.weights(method));
        let integral = IntegralImage::new(image);

        let mut data = Vec::with_capacity((max_x + 1) * (max_y + 1));
        for y in 0..=max_y {
            for x in 0..=max_x {
                let (sum, sum_sq) = integral.window(x, y, plan.width(), plan.height());
                let sums = WindowSums {
                    dot: correlation[y * stride + x].re,
                    sum,
                    sum_sq,
                };
                data.push(finish_score(method, plan, sums));
            }
        }

        Ok(ScoreSurface::new(max_x + 1, max_y + 1, data))
    }
}
