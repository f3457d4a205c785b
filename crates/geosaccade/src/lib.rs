//! Geometric saccade detection for recorded animal trajectories.
//!
//! A saccade is an abrupt, isolated change of heading. The detector looks at
//! the geometry of the path around each sample rather than at a noisy
//! instantaneous turn rate. The pipeline stages are:
//!
//! 1. **Validate**: length, finiteness and per-object time ordering.
//! 2. **Kinematics**: speed, acceleration, Hanning smoothing and the derived
//!    angular velocity.
//! 3. **Orientation**: circular mean and dispersion of the bearings into a
//!    window before and after each sample.
//! 4. **Candidates**: per-sample turn estimate scored against simultaneous
//!    amplitude, dispersion and kinematic gates.
//! 5. **Selection**: greedy, preference-ordered, with a suppression interval
//!    so one turn yields one event.
//! 6. **Assembly**: chronological sequences per object with inter-saccade
//!    interval and drift.
//!
//! # Public API
//! - [`SaccadeDetector`] and [`detect`] as primary entry points
//! - [`SaccadeParams`] and [`DetectConfig`] for tuning
//! - [`detect_angvel`] for the simpler angular-velocity threshold detector
//! - result, annotation and error types

mod annotation;
mod api;
pub mod angvel;
pub mod debug_dump;
mod detector;
mod error;
mod kinematics;
mod orientation;
mod pipeline;
mod saccade;
mod trajectory;

pub use annotation::{AnnotatedSample, CandidateGate, SampleAnnotation, SkipReason, TurnEstimate};
pub use angvel::{detect_angvel, find_sequences, AngvelConfig, AngvelDetection};
pub use api::{detect, SaccadeDetector};
pub use debug_dump::{DebugCollectConfig, DebugDump};
pub use detector::{
    assemble_sequence, assemble_tracks, DetectConfig, SaccadeParams, TurnSignConvention,
    MIN_ANGULAR_VELOCITY_DEG,
};
pub use error::{ConfigError, DetectError, InvalidInputError, MalformedSaccadeError, OrderingError};
pub use kinematics::{compute_derivative, extract_kinematics, smooth1d, Kinematics, SmoothingConfig};
pub use orientation::{circular_mean_and_std, normalize_180, normalize_pi, OrientationEstimate};
pub use pipeline::{DetectionStats, SaccadeDetection};
pub use saccade::{Saccade, SaccadeEvent};
pub use trajectory::{find_indices_in_bounds, track_spans, validate_trajectory, Sample, ValidationConfig};

#[cfg(test)]
pub(crate) mod test_utils;
