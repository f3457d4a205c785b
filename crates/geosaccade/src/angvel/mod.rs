//! Angular-velocity threshold detector.
//!
//! A simpler sibling of the geometric detector: the heading is taken from the
//! velocity vector, differentiated over frame-derived time, and every run of
//! samples turning faster than a threshold becomes one event. Useful as a
//! baseline to compare against the geometric detector on the same data.
//!
//! Timestamps of some recordings are irregular, so time is derived from the
//! frame counter assuming a constant frame rate.

mod sequences;

use std::ops::Range;

use crate::detector::assemble_tracks;
use crate::error::{ConfigError, DetectError, InvalidInputError};
use crate::kinematics::compute_derivative;
use crate::orientation::{normalize_180, normalize_pi};
use crate::saccade::{Saccade, SaccadeEvent};
use crate::trajectory::{check_finite, track_index, track_spans, Sample};

pub use sequences::{find_sequences, Sequences};

/// Thresholds of the angular-velocity detector.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AngvelConfig {
    /// Minimum |angular velocity| (deg/s) of a saccade sample.
    pub angular_velocity_threshold_deg: f64,
    /// Shortest accepted run (seconds, first to last sample).
    pub min_duration_sec: f64,
    /// Longest accepted run (seconds).
    pub max_duration_sec: f64,
    /// Frame rate used to turn frame numbers into time.
    pub frame_rate_hz: f64,
}

impl Default for AngvelConfig {
    fn default() -> Self {
        Self {
            angular_velocity_threshold_deg: 300.0,
            min_duration_sec: 1.0 / 60.0,
            max_duration_sec: 1.0,
            frame_rate_hz: 60.0,
        }
    }
}

impl AngvelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            (
                "angular_velocity_threshold_deg",
                self.angular_velocity_threshold_deg,
            ),
            ("min_duration_sec", self.min_duration_sec),
            ("max_duration_sec", self.max_duration_sec),
            ("frame_rate_hz", self.frame_rate_hz),
        ];
        if let Some(&(name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { name });
        }
        if let Some(&(name, value)) = named.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NonPositive { name, value });
        }
        if self.min_duration_sec > self.max_duration_sec {
            return Err(ConfigError::DurationOrder {
                min: self.min_duration_sec,
                max: self.max_duration_sec,
            });
        }
        Ok(())
    }
}

/// Result of the angular-velocity detector.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AngvelDetection {
    /// Assembled saccades, grouped by object.
    pub saccades: Vec<Saccade>,
    /// Signed angular velocity (deg/s) per sample; `None` for irregular
    /// samples.
    pub angular_velocity_deg: Vec<Option<f64>>,
    /// Samples at or above the threshold.
    pub fast_enough: Vec<bool>,
    /// Samples excluded because their frame time did not increase.
    pub n_irregular: usize,
    /// Events found before sequence assembly.
    pub n_events: usize,
}

/// Per-sample series derived from the velocity heading.
struct HeadingSeries {
    time: Vec<f64>,
    regular: Vec<bool>,
    /// Unwrapped heading (radians).
    heading: Vec<f64>,
    angular_velocity: Vec<Option<f64>>,
    acceleration: Vec<f64>,
}

/// Accumulate successive headings so that consecutive differences lie in
/// (−π, π].
fn unwrap_angles(angles: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(angles.len());
    for (k, &a) in angles.iter().enumerate() {
        match k {
            0 => out.push(a),
            _ => {
                let prev = out[k - 1];
                out.push(prev + normalize_pi(a - angles[k - 1]));
            }
        }
    }
    out
}

/// Mark samples whose frame time exceeds every earlier one in the span.
fn regular_mask(time: &[f64], spans: &[Range<usize>]) -> Vec<bool> {
    let mut regular = vec![false; time.len()];
    for span in spans {
        let mut max_so_far = f64::NEG_INFINITY;
        for i in span.clone() {
            regular[i] = time[i] > max_so_far;
            max_so_far = max_so_far.max(time[i]);
        }
    }
    regular
}

fn heading_series(samples: &[Sample], spans: &[Range<usize>], frame_rate_hz: f64) -> HeadingSeries {
    let n = samples.len();
    let time: Vec<f64> = samples
        .iter()
        .map(|s| s.frame as f64 / frame_rate_hz)
        .collect();
    let regular = regular_mask(&time, spans);
    let mut heading = vec![0.0; n];
    let mut angular_velocity = vec![None; n];
    let mut acceleration = vec![0.0; n];

    for span in spans {
        let idx: Vec<usize> = span.clone().filter(|&i| regular[i]).collect();
        let t: Vec<f64> = idx.iter().map(|&i| time[i]).collect();
        let raw: Vec<f64> = idx
            .iter()
            .map(|&i| samples[i].yvel.atan2(samples[i].xvel))
            .collect();
        let unwrapped = unwrap_angles(&raw);
        let w = compute_derivative(&unwrapped, &t);
        let vx: Vec<f64> = idx.iter().map(|&i| samples[i].xvel).collect();
        let vy: Vec<f64> = idx.iter().map(|&i| samples[i].yvel).collect();
        let ax = compute_derivative(&vx, &t);
        let ay = compute_derivative(&vy, &t);

        for (k, &i) in idx.iter().enumerate() {
            heading[i] = unwrapped[k];
            angular_velocity[i] = w[k].is_finite().then_some(w[k]);
            acceleration[i] = ax[k].hypot(ay[k]);
        }
    }

    HeadingSeries {
        time,
        regular,
        heading,
        angular_velocity,
        acceleration,
    }
}

fn build_event(
    samples: &[Sample],
    series: &HeadingSeries,
    run: &Range<usize>,
    middle: usize,
) -> Option<SaccadeEvent> {
    let (start, last) = (run.start, run.end - 1);
    let change = series.heading[last] - series.heading[start];
    let sign = if change > 0.0 {
        1
    } else if change < 0.0 {
        -1
    } else {
        return None;
    };
    let top = series.angular_velocity[middle]?;
    let s = &samples[start];
    Some(SaccadeEvent {
        obj_id: s.obj_id,
        frame: s.frame,
        time_start: series.time[start],
        time_middle: series.time[middle],
        time_stop: series.time[last],
        orientation_start: normalize_180(series.heading[start].to_degrees()),
        orientation_stop: normalize_180(series.heading[last].to_degrees()),
        sign,
        amplitude: change.abs().to_degrees(),
        duration: series.time[last] - series.time[start],
        top_velocity: top.abs().to_degrees(),
        linear_velocity_modulus: s.planar_velocity().norm(),
        linear_acceleration_modulus: series.acceleration[start],
        position: s.position().into(),
        linear_velocity_world: s.velocity().into(),
        num_samples_used_before: 0,
        num_samples_used_after: run.len(),
    })
}

/// Detect saccades as runs of fast heading change.
pub fn detect_angvel(
    samples: &[Sample],
    config: &AngvelConfig,
) -> Result<AngvelDetection, DetectError> {
    config.validate()?;
    if samples.len() < 2 {
        return Err(InvalidInputError::TooShort {
            len: samples.len(),
            min: 2,
        }
        .into());
    }
    check_finite(samples)?;

    tracing::info!(
        "Deriving time from frame numbers at a fixed {} Hz",
        config.frame_rate_hz
    );
    let spans = track_spans(samples);
    let series = heading_series(samples, &spans, config.frame_rate_hz);

    let n_irregular = series.regular.iter().filter(|r| !**r).count();
    if n_irregular > 0 {
        tracing::warn!(
            "{} samples with non-increasing frame time excluded",
            n_irregular
        );
    }

    let threshold = config.angular_velocity_threshold_deg.to_radians();
    let fast_enough: Vec<bool> = series
        .angular_velocity
        .iter()
        .map(|w| w.is_some_and(|w| w.abs() >= threshold))
        .collect();

    let mut events = Vec::new();
    for run in find_sequences(&fast_enough) {
        let Some(track) = track_index(&spans, run.start) else {
            continue;
        };
        if run.end > spans[track].end {
            continue;
        }
        let duration = series.time[run.end - 1] - series.time[run.start];
        if duration < config.min_duration_sec || duration > config.max_duration_sec {
            continue;
        }
        let middle = run
            .clone()
            .max_by(|&a, &b| {
                let wa = series.angular_velocity[a].map_or(0.0, f64::abs);
                let wb = series.angular_velocity[b].map_or(0.0, f64::abs);
                wa.total_cmp(&wb)
            })
            .unwrap_or(run.start);
        match build_event(samples, &series, &run, middle) {
            Some(e) => events.push((track, e)),
            None => tracing::debug!("Run {:?} has no net heading change", run),
        }
    }

    let n_events = events.len();
    let saccades = assemble_tracks(events)?;
    tracing::info!(
        "Angular velocity detector: {} saccades from {} runs",
        saccades.len(),
        n_events
    );

    Ok(AngvelDetection {
        saccades,
        angular_velocity_deg: series
            .angular_velocity
            .iter()
            .map(|w| w.map(f64::to_degrees))
            .collect(),
        fast_enough,
        n_irregular,
        n_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Constant speed, heading ramps by `rate` rad/frame during each
    /// `(start, len)` turn.
    fn turning_track(n: usize, turns: &[(usize, usize, f64)]) -> Vec<Sample> {
        let mut heading = 0.0f64;
        let mut samples = Vec::with_capacity(n);
        for k in 0..n {
            for &(start, len, rate) in turns {
                if k >= start && k < start + len {
                    heading += rate;
                }
            }
            samples.push(Sample {
                obj_id: 1,
                frame: k as u64,
                timestamp: k as f64 / 60.0,
                x: 0.0,
                y: 0.0,
                z: 0.0,
                xvel: 0.3 * heading.cos(),
                yvel: 0.3 * heading.sin(),
                zvel: 0.0,
            });
        }
        samples
    }

    #[test]
    fn unwrap_removes_jumps() {
        let raw = [3.0, -3.0, -2.5, 3.1];
        let u = unwrap_angles(&raw);
        assert_abs_diff_eq!(u[1], 2.0 * PI - 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u[2], 2.0 * PI - 2.5, epsilon = 1e-12);
        assert!(u.windows(2).all(|w| (w[1] - w[0]).abs() <= PI));
    }

    #[test]
    fn regular_mask_is_per_track() {
        let time = [0.0, 1.0, 1.0, 2.0, 0.0, 0.5];
        let mask = regular_mask(&time, &[0..4, 4..6]);
        assert_eq!(mask, vec![true, true, false, true, true, true]);
    }

    #[test]
    fn two_turns_yield_one_saccade() {
        // 0.2 rad/frame = 12 rad/s, well above 300 deg/s.
        let samples = turning_track(200, &[(40, 8, 0.2), (120, 8, -0.2)]);
        let out = detect_angvel(&samples, &AngvelConfig::default()).unwrap();
        assert_eq!(out.n_events, 2);
        assert_eq!(out.saccades.len(), 1);
        let s = &out.saccades[0];
        assert_eq!(s.event.sign, -1);
        assert!(s.event.amplitude > 60.0);
        assert!(s.time_passed > 1.0);
        assert_eq!(out.n_irregular, 0);
    }

    #[test]
    fn straight_track_is_quiet() {
        let samples = turning_track(100, &[]);
        let out = detect_angvel(&samples, &AngvelConfig::default()).unwrap();
        assert!(out.fast_enough.iter().all(|f| !f));
        assert!(out.saccades.is_empty());
    }

    #[test]
    fn repeated_frames_are_irregular() {
        let mut samples = turning_track(100, &[]);
        samples[50].frame = 49;
        let out = detect_angvel(&samples, &AngvelConfig::default()).unwrap();
        assert_eq!(out.n_irregular, 1);
        assert!(out.angular_velocity_deg[50].is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = AngvelConfig {
            min_duration_sec: 2.0,
            ..Default::default()
        };
        let err = detect_angvel(&turning_track(10, &[]), &cfg).unwrap_err();
        assert!(matches!(
            err,
            DetectError::Config(ConfigError::DurationOrder { .. })
        ));
    }
}
