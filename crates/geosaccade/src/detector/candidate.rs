//! Per-sample turn estimation and candidate gating.

use std::ops::Range;

use crate::annotation::{CandidateGate, SampleAnnotation, SkipReason, TurnEstimate};
use crate::kinematics::Kinematics;
use crate::orientation::{normalize_pi, orientation_and_dispersion};
use crate::trajectory::{find_indices_in_bounds, span_timestamps, Sample};

use super::config::{CandidateThresholds, DetectConfig};

/// Index windows strictly before and after a center sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Windows {
    pub before: Range<usize>,
    pub after: Range<usize>,
}

/// Before/after windows of sample `k` of a span, as span-local indices.
pub(crate) fn windows_around(timestamps: &[f64], k: usize, inner: f64, outer: f64) -> Windows {
    let t = timestamps[k];
    Windows {
        before: find_indices_in_bounds(timestamps, t - outer, t - inner),
        after: find_indices_in_bounds(timestamps, t + inner, t + outer),
    }
}

fn offset(range: Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

fn sign_of(angle: f64) -> i8 {
    if angle > 0.0 {
        1
    } else if angle < 0.0 {
        -1
    } else {
        0
    }
}

fn estimate_turn(
    samples: &[Sample],
    center: usize,
    windows: &Windows,
    config: &DetectConfig,
) -> Option<TurnEstimate> {
    let before = orientation_and_dispersion(samples, center, windows.before.clone())?;
    let after = orientation_and_dispersion(samples, center, windows.after.clone())?;

    // Bearings into the before window point backwards along the path.
    let orientation_start = normalize_pi(before.mean + std::f64::consts::PI);
    let orientation_stop = after.mean;
    let turning_angle = config
        .turn_sign
        .turning_angle(orientation_start, orientation_stop);
    let amplitude = turning_angle.abs();

    Some(TurnEstimate {
        orientation_start,
        orientation_stop,
        before_dispersion: before.dispersion,
        after_dispersion: after.dispersion,
        turning_angle,
        amplitude,
        preference: amplitude - 0.5 * before.dispersion - 0.5 * after.dispersion,
        sign: sign_of(turning_angle),
        num_samples_used_before: windows.before.len(),
        num_samples_used_after: windows.after.len(),
    })
}

fn failed_gates(
    turn: &TurnEstimate,
    annotation: &SampleAnnotation,
    angular_velocity: f64,
    th: &CandidateThresholds,
) -> Vec<CandidateGate> {
    let checks = [
        (
            turn.before_dispersion <= th.max_dispersion,
            CandidateGate::BeforeDispersion,
        ),
        (
            turn.after_dispersion <= th.max_dispersion,
            CandidateGate::AfterDispersion,
        ),
        (turn.amplitude >= th.min_amplitude, CandidateGate::Amplitude),
        (
            annotation.linear_velocity_modulus >= th.min_linear_velocity,
            CandidateGate::LinearVelocity,
        ),
        (
            annotation.linear_acceleration_modulus <= th.max_linear_acceleration,
            CandidateGate::LinearAcceleration,
        ),
        (
            angular_velocity >= th.min_angular_velocity,
            CandidateGate::AngularVelocityLow,
        ),
        (
            angular_velocity <= th.max_angular_velocity,
            CandidateGate::AngularVelocityHigh,
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(pass, gate)| (!pass).then_some(gate))
        .collect()
}

/// Annotate every sample with its kinematics and, where the windows allow,
/// its turn estimate and candidate status.
pub fn evaluate_samples(
    samples: &[Sample],
    spans: &[Range<usize>],
    kinematics: &Kinematics,
    config: &DetectConfig,
) -> Vec<SampleAnnotation> {
    let inner = config.params.delta_t_inner_sec;
    let outer = config.params.delta_t_outer_sec;
    let th = CandidateThresholds::from(&config.params);

    let mut annotations: Vec<SampleAnnotation> = (0..samples.len())
        .map(|i| SampleAnnotation {
            linear_velocity_modulus: kinematics.linear_velocity_modulus[i],
            linear_acceleration_modulus: kinematics.linear_acceleration_modulus[i],
            linear_velocity_modulus_smooth: kinematics.linear_velocity_modulus_smooth[i],
            linear_acceleration_modulus_smooth: kinematics.linear_acceleration_modulus_smooth[i],
            angular_velocity_modulus: kinematics.angular_velocity_modulus[i],
            ..Default::default()
        })
        .collect();

    for span in spans {
        let ts = span_timestamps(samples, span);
        let (first, last) = match (ts.first(), ts.last()) {
            (Some(&a), Some(&b)) => (a, b),
            _ => continue,
        };

        for (k, i) in span.clone().enumerate() {
            let ann = &mut annotations[i];
            let Some(w) = ann.angular_velocity_modulus else {
                ann.skip = Some(SkipReason::UndefinedAngularVelocity);
                continue;
            };
            if ts[k] - first < outer || last - ts[k] < inner {
                ann.skip = Some(SkipReason::InsufficientMargin);
                continue;
            }

            let local = windows_around(&ts, k, inner, outer);
            let windows = Windows {
                before: offset(local.before, span.start),
                after: offset(local.after, span.start),
            };
            let Some(turn) = estimate_turn(samples, i, &windows, config) else {
                ann.skip = Some(SkipReason::SparseWindow {
                    before: windows.before.len(),
                    after: windows.after.len(),
                });
                continue;
            };

            ann.rejected_by = failed_gates(&turn, ann, w, &th);
            ann.candidate = ann.rejected_by.is_empty();
            ann.turn = Some(turn);
        }
    }

    tracing::debug!(
        "Candidate evaluation: {} considered, {} candidates of {} samples",
        annotations.iter().filter(|a| a.considered()).count(),
        annotations.iter().filter(|a| a.candidate).count(),
        samples.len()
    );
    annotations
}
