//! Synthetic trajectories shared by unit tests.

use crate::trajectory::Sample;
use crate::SaccadeParams;

/// Piecewise-straight track at constant speed.
///
/// The heading starts at `heading0` (radians) and changes by `turn` at each
/// `(index, turn)` entry: sample `index` already moves along the new heading,
/// so the corner sits exactly at its position.
pub(crate) fn polyline_track(
    n: usize,
    dt: f64,
    speed: f64,
    heading0: f64,
    turns: &[(usize, f64)],
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(n);
    let mut heading = heading0;
    let (mut x, mut y) = (0.0f64, 0.0f64);
    for k in 0..n {
        if let Some(&(_, turn)) = turns.iter().find(|(idx, _)| *idx == k) {
            heading += turn;
        }
        let (vx, vy) = (speed * heading.cos(), speed * heading.sin());
        samples.push(Sample {
            obj_id: 1,
            frame: k as u64,
            timestamp: k as f64 * dt,
            x,
            y,
            z: 0.0,
            xvel: vx,
            yvel: vy,
            zvel: 0.0,
        });
        x += vx * dt;
        y += vy * dt;
    }
    samples
}

/// Straight track without turns.
pub(crate) fn straight_track(n: usize, dt: f64, speed: f64, heading: f64) -> Vec<Sample> {
    polyline_track(n, dt, speed, heading, &[])
}

/// Thresholds matching a 60 Hz fly recording.
pub(crate) fn params_60hz() -> SaccadeParams {
    let dt = 1.0 / 60.0;
    SaccadeParams {
        delta_t_inner_sec: 4.0 * dt,
        delta_t_outer_sec: 10.0 * dt,
        min_amplitude_deg: 15.0,
        max_orientation_dispersion_deg: 15.0,
        min_linear_velocity: 0.05,
        max_linear_acceleration: 20.0,
        max_angular_velocity: 8000.0,
        minimum_interval_sec: 10.0 * dt,
    }
}
