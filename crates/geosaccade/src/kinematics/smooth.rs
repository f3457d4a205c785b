use std::f64::consts::PI;

/// Symmetric FIR smoothing settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Hanning window length in samples (odd).
    pub window_len: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { window_len: 5 }
    }
}

/// Hanning window `w[k] = 0.5 - 0.5 cos(2πk / (M - 1))`, unnormalized.
pub fn hanning(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let m = (len - 1) as f64;
            (0..len)
                .map(|k| 0.5 - 0.5 * (2.0 * PI * k as f64 / m).cos())
                .collect()
        }
    }
}

/// Mirror an out-of-range index back into `0..n` without repeating the edge
/// sample (`-1 -> 1`, `n -> n - 2`).
#[inline]
fn reflect(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m < n as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}

/// Smooth `x` with a normalized Hanning window of `window_len` samples,
/// padding both ends by reflection so the borders are not attenuated.
///
/// `window_len` must be odd; the output has the same length as `x`.
pub fn smooth1d(x: &[f64], window_len: usize) -> Vec<f64> {
    if x.is_empty() || window_len <= 1 {
        return x.to_vec();
    }
    let window = hanning(window_len);
    let total: f64 = window.iter().sum();
    let half = (window_len / 2) as isize;

    (0..x.len())
        .map(|i| {
            window
                .iter()
                .enumerate()
                .map(|(k, w)| w * x[reflect(i as isize + k as isize - half, x.len())])
                .sum::<f64>()
                / total
        })
        .collect()
}
