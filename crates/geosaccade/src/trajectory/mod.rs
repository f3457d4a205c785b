//! Trajectory samples and track segmentation.
//!
//! A trajectory is an ordered slice of [`Sample`]s that may interleave
//! several tracked objects one after the other. Every stage of the detector
//! works inside a single [`track span`](track_spans) and never looks across
//! an object-id boundary.

mod search;
mod validate;

use std::ops::Range;

use nalgebra::{Vector2, Vector3};

pub use search::find_indices_in_bounds;
pub(crate) use validate::check_finite;
pub use validate::{validate_trajectory, ValidationConfig};

/// One row of a tracked trajectory.
///
/// Planar tracks may omit `z` and `zvel`; they default to zero.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Tracked object identifier.
    pub obj_id: u64,
    /// Camera frame number (informational).
    #[serde(default)]
    pub frame: u64,
    /// Sample time in seconds.
    pub timestamp: f64,
    /// Position x.
    pub x: f64,
    /// Position y.
    pub y: f64,
    /// Position z.
    #[serde(default)]
    pub z: f64,
    /// Velocity x.
    pub xvel: f64,
    /// Velocity y.
    pub yvel: f64,
    /// Velocity z.
    #[serde(default)]
    pub zvel: f64,
}

impl Sample {
    /// Planar position `(x, y)`.
    pub fn planar_position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Planar velocity `(xvel, yvel)`.
    pub fn planar_velocity(&self) -> Vector2<f64> {
        Vector2::new(self.xvel, self.yvel)
    }

    /// Full position `(x, y, z)`.
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Full velocity `(xvel, yvel, zvel)`.
    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.xvel, self.yvel, self.zvel)
    }

    /// Bearing (radians, `atan2`) from this sample to `other` in the plane.
    pub fn bearing_to(&self, other: &Sample) -> f64 {
        let d = other.planar_position() - self.planar_position();
        d.y.atan2(d.x)
    }
}

/// Split a trajectory into maximal runs of consecutive samples that share an
/// `obj_id`.
pub fn track_spans(samples: &[Sample]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    for i in 1..=samples.len() {
        if i == samples.len() || samples[i].obj_id != samples[start].obj_id {
            if start < i {
                spans.push(start..i);
            }
            start = i;
        }
    }
    spans
}

/// Position in `spans` of the span containing sample `index`.
pub(crate) fn track_index(spans: &[Range<usize>], index: usize) -> Option<usize> {
    let k = spans.partition_point(|s| s.end <= index);
    spans.get(k).filter(|s| s.contains(&index)).map(|_| k)
}

/// Span containing sample `index`.
pub(crate) fn span_of(spans: &[Range<usize>], index: usize) -> Option<&Range<usize>> {
    track_index(spans, index).map(|k| &spans[k])
}

/// Timestamps of the samples in `span`.
pub(crate) fn span_timestamps(samples: &[Sample], span: &Range<usize>) -> Vec<f64> {
    samples[span.clone()].iter().map(|s| s.timestamp).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(obj_id: u64, timestamp: f64) -> Sample {
        Sample {
            obj_id,
            frame: 0,
            timestamp,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            xvel: 0.0,
            yvel: 0.0,
            zvel: 0.0,
        }
    }

    #[test]
    fn spans_follow_object_boundaries() {
        let samples = vec![at(1, 0.0), at(1, 0.1), at(2, 0.0), at(2, 0.1), at(2, 0.2), at(1, 5.0)];
        let spans = track_spans(&samples);
        assert_eq!(spans, vec![0..2, 2..5, 5..6]);
        assert_eq!(span_of(&spans, 3), Some(&(2..5)));
        assert_eq!(span_of(&spans, 5), Some(&(5..6)));
        assert_eq!(span_of(&spans, 6), None);
        assert_eq!(track_index(&spans, 0), Some(0));
        assert_eq!(track_index(&spans, 5), Some(2));
    }

    #[test]
    fn empty_trajectory_has_no_spans() {
        assert!(track_spans(&[]).is_empty());
    }

    #[test]
    fn planar_sample_deserializes_without_z() {
        let s: Sample = serde_json::from_str(
            r#"{"obj_id": 3, "timestamp": 1.5, "x": 1.0, "y": 2.0, "xvel": 0.5, "yvel": -0.5}"#,
        )
        .unwrap();
        assert_eq!(s.obj_id, 3);
        assert_eq!(s.z, 0.0);
        assert_eq!(s.frame, 0);
        assert!((s.planar_velocity().norm() - 0.5f64.hypot(0.5)).abs() < 1e-12);
    }

    #[test]
    fn bearing_points_from_self_to_other() {
        let mut a = at(1, 0.0);
        let mut b = at(1, 0.1);
        a.x = 1.0;
        b.x = 1.0;
        b.y = 2.0;
        assert!((a.bearing_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
