//! Per-sample annotations produced by kinematic extraction and candidate
//! evaluation.

use crate::trajectory::Sample;

/// Why a sample was not evaluated as a saccade center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Smoothed speed is zero or not finite.
    UndefinedAngularVelocity,
    /// Too close to the start or end of its track for the windows to fit.
    InsufficientMargin,
    /// One of the windows holds fewer than two samples.
    SparseWindow {
        /// Samples in the before window.
        before: usize,
        /// Samples in the after window.
        after: usize,
    },
}

/// A candidate gate that an evaluated sample failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateGate {
    /// Before-window dispersion above the limit.
    BeforeDispersion,
    /// After-window dispersion above the limit.
    AfterDispersion,
    /// Turn amplitude below the minimum.
    Amplitude,
    /// Speed below the minimum.
    LinearVelocity,
    /// Acceleration above the maximum.
    LinearAcceleration,
    /// Angular velocity below the fixed floor.
    AngularVelocityLow,
    /// Angular velocity above the maximum.
    AngularVelocityHigh,
}

/// Orientation change measured around a considered sample.
///
/// Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TurnEstimate {
    /// Heading before the sample.
    pub orientation_start: f64,
    /// Heading after the sample.
    pub orientation_stop: f64,
    /// Circular dispersion of the before-window bearings.
    pub before_dispersion: f64,
    /// Circular dispersion of the after-window bearings.
    pub after_dispersion: f64,
    /// Signed heading change.
    pub turning_angle: f64,
    /// `|turning_angle|`.
    pub amplitude: f64,
    /// Amplitude penalized by half of each dispersion.
    pub preference: f64,
    /// Sign of `turning_angle`: +1, -1, or 0 for no turn.
    pub sign: i8,
    /// Samples in the before window.
    pub num_samples_used_before: usize,
    /// Samples in the after window.
    pub num_samples_used_after: usize,
}

/// Everything the detector computed for one sample.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct SampleAnnotation {
    pub linear_velocity_modulus: f64,
    pub linear_acceleration_modulus: f64,
    pub linear_velocity_modulus_smooth: f64,
    pub linear_acceleration_modulus_smooth: f64,
    /// Angular velocity modulus (rad/s), `None` when undefined.
    pub angular_velocity_modulus: Option<f64>,
    /// Present when the sample was considered.
    pub turn: Option<TurnEstimate>,
    /// Present when the sample was not considered.
    pub skip: Option<SkipReason>,
    /// Gates failed by a considered sample.
    pub rejected_by: Vec<CandidateGate>,
    /// Considered and passed every gate.
    pub candidate: bool,
    /// Number of accepted saccades whose suppression interval covers this
    /// sample.
    pub marked_as_used: u32,
}

impl SampleAnnotation {
    /// The sample had its orientation windows evaluated.
    pub fn considered(&self) -> bool {
        self.turn.is_some()
    }
}

/// A trajectory sample with its annotation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotatedSample {
    #[serde(flatten)]
    pub sample: Sample,
    #[serde(flatten)]
    pub annotation: SampleAnnotation,
}
