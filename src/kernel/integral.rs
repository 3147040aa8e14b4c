//! Summed-area tables for window sums and sums of squares.

use crate::image::ImageView;

/// Integral images of the samples and their squares, padded by one row and
/// one column of zeros.
pub(crate) struct IntegralImage {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    pub(crate) fn new(image: ImageView<'_, u8>) -> Self {
        let stride = image.width() + 1;
        let len = stride * (image.height() + 1);
        let mut sum = vec![0u64; len];
        let mut sum_sq = vec![0u64; len];

        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = value as u64;
                row_sum += v;
                row_sum_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sum_sq;
            }
        }

        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Returns `(Σ v, Σ v²)` over the `width` x `height` window at `(x, y)`.
    pub(crate) fn window(&self, x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
        let s = self.stride;
        let a = y * s + x;
        let b = y * s + x + width;
        let c = (y + height) * s + x;
        let d = (y + height) * s + x + width;
        let sum = self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c];
        let sum_sq = self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c];
        (sum as f64, sum_sq as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::IntegralImage;
    use crate::image::ImageView;

    #[test]
    fn window_sums_match_direct_sums() {
        let data: Vec<u8> = (0u8..30).map(|v| v.wrapping_mul(37)).collect();
        let view = ImageView::from_slice(&data, 6, 5).unwrap();
        let integral = IntegralImage::new(view);

        let (x, y, w, h) = (2, 1, 3, 3);
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for ty in y..y + h {
            for tx in x..x + w {
                let v = data[ty * 6 + tx] as f64;
                sum += v;
                sum_sq += v * v;
            }
        }
        assert_eq!(integral.window(x, y, w, h), (sum, sum_sq));
        assert_eq!(integral.window(0, 0, 6, 5).0, data.iter().map(|&v| v as f64).sum::<f64>());
    }
}
