//! Angle wrapping and circular statistics.
//!
//! Bearings wrap at ±π, so their mean and spread are computed on the unit
//! circle: the mean is `atan2(mean sin, mean cos)` and the dispersion is the
//! standard deviation of each bearing's deviation from that mean, the
//! deviation itself wrapped into (−π, π].

use crate::trajectory::Sample;

/// Wrap an angle in radians into [−π, π].
#[inline]
pub fn normalize_pi(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Wrap an angle in degrees into [−180, 180].
#[inline]
pub fn normalize_180(angle_deg: f64) -> f64 {
    normalize_pi(angle_deg.to_radians()).to_degrees()
}

/// Circular mean and dispersion of a set of bearings, radians.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrientationEstimate {
    /// Circular mean in [−π, π].
    pub mean: f64,
    /// Standard deviation of the wrapped deviations from `mean`.
    pub dispersion: f64,
}

/// Circular mean and dispersion of `angles`.
///
/// Returns `None` for fewer than two angles.
pub fn circular_mean_and_std(angles: &[f64]) -> Option<OrientationEstimate> {
    if angles.len() < 2 {
        return None;
    }
    let n = angles.len() as f64;
    let (sum_sin, sum_cos) = angles
        .iter()
        .fold((0.0f64, 0.0f64), |(s, c), a| (s + a.sin(), c + a.cos()));
    let mean = (sum_sin / n).atan2(sum_cos / n);

    let deviations: Vec<f64> = angles.iter().map(|a| normalize_pi(a - mean)).collect();
    let dev_mean = deviations.iter().sum::<f64>() / n;
    let var = deviations
        .iter()
        .map(|d| (d - dev_mean) * (d - dev_mean))
        .sum::<f64>()
        / n;

    Some(OrientationEstimate {
        mean,
        dispersion: var.sqrt(),
    })
}

/// Orientation and dispersion of the bearings from `samples[center]` to each
/// neighbor in `indices`.
pub fn orientation_and_dispersion<I>(
    samples: &[Sample],
    center: usize,
    indices: I,
) -> Option<OrientationEstimate>
where
    I: IntoIterator<Item = usize>,
{
    let origin = &samples[center];
    let bearings: Vec<f64> = indices
        .into_iter()
        .map(|j| origin.bearing_to(&samples[j]))
        .collect();
    circular_mean_and_std(&bearings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn normalize_wraps_into_half_open_circle() {
        assert_abs_diff_eq!(normalize_pi(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_pi(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_pi(0.25), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_180(190.0), -170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(normalize_180(-350.0), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_angles_have_no_estimate() {
        assert!(circular_mean_and_std(&[]).is_none());
        assert!(circular_mean_and_std(&[1.0]).is_none());
    }

    #[test]
    fn tight_cluster_across_the_wrap() {
        // Centered on ~178 deg: half the draws land on the negative side of ±π.
        let theta0 = 3.1;
        let mut rng = StdRng::seed_from_u64(7);
        let angles: Vec<f64> = (0..200)
            .map(|_| normalize_pi(theta0 + rng.gen_range(-0.1..0.1)))
            .collect();
        assert!(angles.iter().any(|a| *a < 0.0));

        let est = circular_mean_and_std(&angles).unwrap();
        assert_abs_diff_eq!(normalize_pi(est.mean - theta0), 0.0, epsilon = 0.02);
        assert!(est.dispersion < 0.07, "dispersion {}", est.dispersion);
    }

    #[test]
    fn identical_angles_have_zero_dispersion() {
        let est = circular_mean_and_std(&[-1.2; 5]).unwrap();
        assert_abs_diff_eq!(est.mean, -1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(est.dispersion, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn uniform_spread_matches_circular_uniform_std() {
        let n = 720;
        let angles: Vec<f64> = (0..n)
            .map(|k| normalize_pi(2.0 * PI * k as f64 / n as f64))
            .collect();
        let est = circular_mean_and_std(&angles).unwrap();
        assert_abs_diff_eq!(est.dispersion, PI / 3f64.sqrt(), epsilon = 0.02);
    }

    #[test]
    fn bearings_from_center_sample() {
        let samples = crate::test_utils::straight_track(10, 0.1, 1.0, PI / 4.0);
        let ahead = orientation_and_dispersion(&samples, 2, 5..9).unwrap();
        assert_abs_diff_eq!(ahead.mean, PI / 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ahead.dispersion, 0.0, epsilon = 1e-9);

        let behind = orientation_and_dispersion(&samples, 8, [0usize, 1, 2]).unwrap();
        assert_abs_diff_eq!(normalize_pi(behind.mean + PI), PI / 4.0, epsilon = 1e-9);
    }
}
