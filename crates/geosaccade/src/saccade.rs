//! Saccade records.

use crate::error::MalformedSaccadeError;

/// A selected turn, as materialized from its center sample.
///
/// Angles are in degrees, times in seconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SaccadeEvent {
    pub obj_id: u64,
    pub frame: u64,
    pub time_start: f64,
    pub time_middle: f64,
    pub time_stop: f64,
    pub orientation_start: f64,
    pub orientation_stop: f64,
    /// +1 or -1.
    pub sign: i8,
    pub amplitude: f64,
    /// Amplitude over angular velocity.
    pub duration: f64,
    /// Angular velocity at the center sample (deg/s).
    pub top_velocity: f64,
    pub linear_velocity_modulus: f64,
    pub linear_acceleration_modulus: f64,
    pub position: [f64; 3],
    pub linear_velocity_world: [f64; 3],
    pub num_samples_used_before: usize,
    pub num_samples_used_after: usize,
}

/// A saccade placed in its sequence.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Saccade {
    #[serde(flatten)]
    pub event: SaccadeEvent,
    /// Seconds since the previous saccade's start.
    pub time_passed: f64,
    /// Heading drift (degrees) between the previous saccade's stop and this
    /// one's start, wrapped into [−180, 180].
    pub smooth_displacement: f64,
}

impl Saccade {
    fn numeric_fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        let e = &self.event;
        [
            ("time_start", e.time_start),
            ("time_middle", e.time_middle),
            ("time_stop", e.time_stop),
            ("orientation_start", e.orientation_start),
            ("orientation_stop", e.orientation_stop),
            ("amplitude", e.amplitude),
            ("duration", e.duration),
            ("top_velocity", e.top_velocity),
            ("linear_velocity_modulus", e.linear_velocity_modulus),
            ("linear_acceleration_modulus", e.linear_acceleration_modulus),
            ("time_passed", self.time_passed),
            ("smooth_displacement", self.smooth_displacement),
        ]
        .into_iter()
        .chain(e.position.iter().map(|v| ("position", *v)))
        .chain(e.linear_velocity_world.iter().map(|v| ("linear_velocity_world", *v)))
    }

    /// Check structural invariants: finite fields, a non-empty interval and a
    /// unit sign.
    pub fn check_well_formed(&self) -> Result<(), MalformedSaccadeError> {
        if let Some((field, _)) = self.numeric_fields().find(|(_, v)| !v.is_finite()) {
            return Err(MalformedSaccadeError::NonFinite { field });
        }
        if self.event.time_stop <= self.event.time_start {
            return Err(MalformedSaccadeError::EmptyInterval {
                time_start: self.event.time_start,
                time_stop: self.event.time_stop,
            });
        }
        if self.event.sign != 1 && self.event.sign != -1 {
            return Err(MalformedSaccadeError::InvalidSign {
                sign: self.event.sign,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn event_at(obj_id: u64, time_start: f64) -> SaccadeEvent {
    SaccadeEvent {
        obj_id,
        frame: 0,
        time_start,
        time_middle: time_start + 0.1,
        time_stop: time_start + 0.2,
        orientation_start: 0.0,
        orientation_stop: 90.0,
        sign: 1,
        amplitude: 90.0,
        duration: 0.1,
        top_velocity: 900.0,
        linear_velocity_modulus: 0.3,
        linear_acceleration_modulus: 1.0,
        position: [0.0; 3],
        linear_velocity_world: [0.3, 0.0, 0.0],
        num_samples_used_before: 7,
        num_samples_used_after: 7,
    }
}
