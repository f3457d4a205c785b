//! Greedy non-overlapping selection of saccade centers.

use std::cmp::Ordering;
use std::ops::Range;

use crate::annotation::SampleAnnotation;
use crate::saccade::SaccadeEvent;
use crate::trajectory::{find_indices_in_bounds, track_index, Sample};

use super::config::DetectConfig;

/// Outcome of the greedy selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Accepted events in acceptance order.
    pub events: Vec<SaccadeEvent>,
    /// Sample index of each accepted event.
    pub centers: Vec<usize>,
    /// Track (position in the span list) of each accepted event.
    pub tracks: Vec<usize>,
    /// Candidates skipped because an earlier acceptance covered them.
    pub n_suppressed: usize,
}

/// Candidate indices by preference descending, ties by index ascending.
fn ordered_candidates(annotations: &[SampleAnnotation]) -> Vec<(usize, f64)> {
    let mut order: Vec<(usize, f64)> = annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.candidate)
        .filter_map(|(i, a)| a.turn.map(|t| (i, t.preference)))
        .collect();
    order.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    order
}

fn build_event(
    sample: &Sample,
    annotation: &SampleAnnotation,
    config: &DetectConfig,
) -> Option<SaccadeEvent> {
    let turn = annotation.turn?;
    let w = annotation.angular_velocity_modulus?;
    let outer = config.params.delta_t_outer_sec;
    Some(SaccadeEvent {
        obj_id: sample.obj_id,
        frame: sample.frame,
        time_start: sample.timestamp - outer,
        time_middle: sample.timestamp,
        time_stop: sample.timestamp + outer,
        orientation_start: turn.orientation_start.to_degrees(),
        orientation_stop: turn.orientation_stop.to_degrees(),
        sign: turn.sign,
        amplitude: turn.amplitude.to_degrees(),
        duration: turn.amplitude / w,
        top_velocity: w.to_degrees(),
        linear_velocity_modulus: annotation.linear_velocity_modulus,
        linear_acceleration_modulus: annotation.linear_acceleration_modulus,
        position: sample.position().into(),
        linear_velocity_world: sample.velocity().into(),
        num_samples_used_before: turn.num_samples_used_before,
        num_samples_used_after: turn.num_samples_used_after,
    })
}

/// Visit candidates in preference order and accept each one not yet covered
/// by the suppression interval of an earlier acceptance.
///
/// Increments `marked_as_used` on every sample of the same track within
/// `± minimum_interval_sec` of an accepted center.
pub fn select_saccades(
    samples: &[Sample],
    spans: &[Range<usize>],
    annotations: &mut [SampleAnnotation],
    config: &DetectConfig,
) -> Selection {
    let interval = config.params.minimum_interval_sec;
    let timestamps: Vec<f64> = samples.iter().map(|s| s.timestamp).collect();
    let mut selection = Selection::default();

    for (i, _) in ordered_candidates(annotations) {
        if annotations[i].marked_as_used > 0 {
            selection.n_suppressed += 1;
            continue;
        }
        let Some(event) = build_event(&samples[i], &annotations[i], config) else {
            continue;
        };
        let Some(track) = track_index(spans, i) else {
            continue;
        };
        let span = &spans[track];

        let t = samples[i].timestamp;
        let nearby = find_indices_in_bounds(&timestamps[span.clone()], t - interval, t + interval);
        for j in nearby {
            annotations[span.start + j].marked_as_used += 1;
        }

        selection.events.push(event);
        selection.centers.push(i);
        selection.tracks.push(track);
    }

    tracing::debug!(
        "Selection: {} accepted, {} suppressed",
        selection.events.len(),
        selection.n_suppressed
    );
    selection
}
