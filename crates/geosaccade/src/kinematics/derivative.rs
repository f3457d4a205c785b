/// Centered finite-difference derivative of `values` over `timestamps`.
///
/// Interior samples use `(v[i+1] - v[i-1]) / (t[i+1] - t[i-1])`; the first and
/// last sample copy their neighbor. Two samples share one forward difference,
/// a single sample has zero derivative. A non-increasing time step yields NaN.
pub fn compute_derivative(values: &[f64], timestamps: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), timestamps.len());
    let n = values.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![0.0],
        2 => return vec![difference(values, timestamps, 0, 1); 2],
        _ => {}
    }

    let mut d = vec![0.0; n];
    for i in 1..n - 1 {
        d[i] = difference(values, timestamps, i - 1, i + 1);
    }
    d[0] = d[1];
    d[n - 1] = d[n - 2];
    d
}

#[inline]
fn difference(values: &[f64], timestamps: &[f64], a: usize, b: usize) -> f64 {
    let dt = timestamps[b] - timestamps[a];
    if dt > 0.0 {
        (values[b] - values[a]) / dt
    } else {
        f64::NAN
    }
}
