//! Kinematic features: speed, acceleration, their smoothed versions, and the
//! angular velocity estimate derived from them.
//!
//! All series are computed per track span so that derivatives and smoothing
//! never mix samples of different objects.

mod derivative;
mod smooth;

use std::ops::Range;

use nalgebra::Vector2;

use crate::trajectory::{span_timestamps, Sample};

pub use derivative::compute_derivative;
pub use smooth::{smooth1d, SmoothingConfig};

/// Per-sample kinematic series, index-aligned with the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    /// `|v|` in the plane.
    pub linear_velocity_modulus: Vec<f64>,
    /// `|dv/dt|` in the plane.
    pub linear_acceleration_modulus: Vec<f64>,
    /// Smoothed `|v|`.
    pub linear_velocity_modulus_smooth: Vec<f64>,
    /// Smoothed `|dv/dt|`.
    pub linear_acceleration_modulus_smooth: Vec<f64>,
    /// Smoothed acceleration over smoothed speed (rad/s); `None` where the
    /// speed is zero or not finite.
    pub angular_velocity_modulus: Vec<Option<f64>>,
}

impl Kinematics {
    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.linear_velocity_modulus.len()
    }

    /// `true` when no samples are covered.
    pub fn is_empty(&self) -> bool {
        self.linear_velocity_modulus.is_empty()
    }
}

/// Angular velocity modulus from smoothed acceleration and speed.
#[inline]
pub fn angular_velocity(acceleration_smooth: f64, velocity_smooth: f64) -> Option<f64> {
    if !velocity_smooth.is_finite() || velocity_smooth == 0.0 {
        return None;
    }
    let w = acceleration_smooth / velocity_smooth;
    w.is_finite().then_some(w)
}

/// Compute kinematic series for every span of the trajectory.
pub fn extract_kinematics(
    samples: &[Sample],
    spans: &[Range<usize>],
    smoothing: &SmoothingConfig,
) -> Kinematics {
    let n = samples.len();
    let mut out = Kinematics {
        linear_velocity_modulus: vec![0.0; n],
        linear_acceleration_modulus: vec![0.0; n],
        linear_velocity_modulus_smooth: vec![0.0; n],
        linear_acceleration_modulus_smooth: vec![0.0; n],
        angular_velocity_modulus: vec![None; n],
    };

    for span in spans {
        let track = &samples[span.clone()];
        let t = span_timestamps(samples, span);
        let vx: Vec<f64> = track.iter().map(|s| s.xvel).collect();
        let vy: Vec<f64> = track.iter().map(|s| s.yvel).collect();
        let ax = compute_derivative(&vx, &t);
        let ay = compute_derivative(&vy, &t);

        let speed: Vec<f64> = track.iter().map(|s| s.planar_velocity().norm()).collect();
        let accel: Vec<f64> = ax
            .iter()
            .zip(&ay)
            .map(|(x, y)| Vector2::new(*x, *y).norm())
            .collect();
        let speed_smooth = smooth1d(&speed, smoothing.window_len);
        let accel_smooth = smooth1d(&accel, smoothing.window_len);

        for (k, i) in span.clone().enumerate() {
            out.linear_velocity_modulus[i] = speed[k];
            out.linear_acceleration_modulus[i] = accel[k];
            out.linear_velocity_modulus_smooth[i] = speed_smooth[k];
            out.linear_acceleration_modulus_smooth[i] = accel_smooth[k];
            out.angular_velocity_modulus[i] = angular_velocity(accel_smooth[k], speed_smooth[k]);
        }
    }

    tracing::debug!(
        "Kinematics: {} samples, {} without angular velocity",
        n,
        out.angular_velocity_modulus.iter().filter(|w| w.is_none()).count()
    );
    out
}
