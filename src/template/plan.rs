//! Per-pattern statistics shared by every placement of a scan.

use crate::image::ImageView;
use crate::method::MatchMethod;

/// Pattern samples in `f64` together with the sums the six methods need.
#[derive(Clone, Debug)]
pub struct PatternPlan {
    width: usize,
    height: usize,
    mean: f64,
    sum_sq: f64,
    var: f64,
    raw: Vec<f64>,
    zero_mean: Vec<f64>,
}

impl PatternPlan {
    /// Builds a plan from a pattern view.
    pub fn from_view(pattern: ImageView<'_, u8>) -> Self {
        let width = pattern.width();
        let height = pattern.height();

        let mut raw = Vec::with_capacity(pattern.len());
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for row in pattern.rows() {
            for &value in row {
                let v = value as f64;
                raw.push(v);
                sum += v;
                sum_sq += v * v;
            }
        }

        let mean = sum / raw.len() as f64;
        let zero_mean: Vec<f64> = raw.iter().map(|v| v - mean).collect();
        let var = zero_mean.iter().map(|v| v * v).sum();

        Self {
            width,
            height,
            mean,
            sum_sq,
            var,
            raw,
            zero_mean,
        }
    }

    /// Pattern width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pattern height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples, `width * height`.
    pub fn count(&self) -> usize {
        self.raw.len()
    }

    /// Mean intensity.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared raw samples, the squared L2 norm.
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Sum of squared mean-subtracted samples.
    pub fn var(&self) -> f64 {
        self.var
    }

    /// Raw samples in row-major order.
    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    /// Mean-subtracted samples in row-major order.
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }

    /// The samples `method` correlates against each window.
    pub fn weights(&self, method: MatchMethod) -> &[f64] {
        if method.is_zero_mean() {
            &self.zero_mean
        } else {
            &self.raw
        }
    }
}
