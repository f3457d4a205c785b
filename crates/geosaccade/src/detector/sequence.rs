//! Chronological assembly of accepted events into saccade sequences.

use std::collections::BTreeMap;

use crate::error::{DetectError, OrderingError};
use crate::orientation::normalize_180;
use crate::saccade::{Saccade, SaccadeEvent};

/// Sort events by start time and link each to its predecessor.
///
/// The first event only anchors `time_passed` and `smooth_displacement` of
/// the second and is dropped. All events are expected to belong to one
/// object.
pub fn assemble_sequence(mut events: Vec<SaccadeEvent>) -> Result<Vec<Saccade>, DetectError> {
    events.sort_by(|a, b| a.time_start.total_cmp(&b.time_start));

    let mut out = Vec::with_capacity(events.len().saturating_sub(1));
    for pair in events.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let time_passed = cur.time_start - prev.time_start;
        if !(time_passed > 0.0) {
            return Err(OrderingError {
                obj_id: cur.obj_id,
                previous_time_start: prev.time_start,
                time_start: cur.time_start,
            }
            .into());
        }
        let saccade = Saccade {
            event: cur.clone(),
            time_passed,
            smooth_displacement: normalize_180(cur.orientation_start - prev.orientation_stop),
        };
        saccade.check_well_formed()?;
        out.push(saccade);
    }
    Ok(out)
}

/// Assemble one sequence per track, ordered by `obj_id` then track.
///
/// Each event is paired with the track (position in the span list) it was
/// found in. An object that re-enters the trajectory after another object
/// starts a new track, so its clock may restart without breaking ordering.
pub fn assemble_tracks(events: Vec<(usize, SaccadeEvent)>) -> Result<Vec<Saccade>, DetectError> {
    let mut by_track: BTreeMap<(u64, usize), Vec<SaccadeEvent>> = BTreeMap::new();
    for (track, e) in events {
        by_track.entry((e.obj_id, track)).or_default().push(e);
    }

    let mut out = Vec::new();
    for ((obj_id, track), events) in by_track {
        let n = events.len();
        let seq = assemble_sequence(events)?;
        tracing::debug!(
            "Object {} track {}: {} events, {} saccades after dropping the first",
            obj_id,
            track,
            n,
            seq.len()
        );
        out.extend(seq);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedSaccadeError;
    use crate::saccade::event_at;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_and_single_yield_nothing() {
        assert!(assemble_sequence(Vec::new()).unwrap().is_empty());
        assert!(assemble_sequence(vec![event_at(1, 0.0)]).unwrap().is_empty());
    }

    #[test]
    fn drops_first_and_links_predecessor() {
        let mut a = event_at(1, 1.0);
        a.orientation_stop = 170.0;
        let mut b = event_at(1, 3.5);
        b.orientation_start = -170.0;
        let mut c = event_at(1, 2.0);
        c.orientation_start = 160.0;
        c.orientation_stop = 175.0;

        let seq = assemble_sequence(vec![b, a, c]).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].event.time_start, 2.0);
        assert_abs_diff_eq!(seq[0].time_passed, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[0].smooth_displacement, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seq[1].time_passed, 1.5, epsilon = 1e-12);
        // -170 - 175 wraps to +15.
        assert_abs_diff_eq!(seq[1].smooth_displacement, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn equal_start_times_are_an_ordering_error() {
        let err = assemble_sequence(vec![event_at(4, 1.0), event_at(4, 1.0)]).unwrap_err();
        assert!(matches!(err, DetectError::Ordering(OrderingError { obj_id: 4, .. })));
    }

    #[test]
    fn malformed_event_is_reported() {
        let mut b = event_at(1, 2.0);
        b.sign = 0;
        let err = assemble_sequence(vec![event_at(1, 1.0), b]).unwrap_err();
        assert_eq!(
            err,
            DetectError::Malformed(MalformedSaccadeError::InvalidSign { sign: 0 })
        );
    }

    #[test]
    fn tracks_never_bridge_objects() {
        let events = vec![
            (1, event_at(2, 0.5)),
            (0, event_at(1, 1.0)),
            (1, event_at(2, 1.5)),
            (0, event_at(1, 2.0)),
            (0, event_at(1, 4.0)),
        ];
        let seq = assemble_tracks(events).unwrap();
        let ids: Vec<u64> = seq.iter().map(|s| s.event.obj_id).collect();
        assert_eq!(ids, vec![1, 1, 2]);
        assert_abs_diff_eq!(seq[0].time_passed, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[2].time_passed, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn re_entrant_object_restarts_its_sequence() {
        // Object 1 leaves, object 2 passes, object 1 returns with a reset
        // clock: same start times, different tracks.
        let events = vec![
            (0, event_at(1, 0.5)),
            (0, event_at(1, 1.5)),
            (1, event_at(2, 0.7)),
            (2, event_at(1, 0.5)),
            (2, event_at(1, 1.5)),
        ];
        let seq = assemble_tracks(events).unwrap();
        let ids: Vec<u64> = seq.iter().map(|s| s.event.obj_id).collect();
        assert_eq!(ids, vec![1, 1]);
        for s in &seq {
            assert_abs_diff_eq!(s.time_passed, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn assembled_sequence_is_strictly_increasing() {
        let events: Vec<SaccadeEvent> = [3.0, 0.5, 2.25, 1.0, 7.5]
            .into_iter()
            .map(|t| event_at(1, t))
            .collect();
        let seq = assemble_sequence(events).unwrap();
        assert_eq!(seq.len(), 4);
        for pair in seq.windows(2) {
            assert!(pair[1].event.time_start > pair[0].event.time_start);
        }
        assert!(seq.iter().all(|s| s.time_passed > 0.0));
    }
}
