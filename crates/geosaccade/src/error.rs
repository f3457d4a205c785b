//! Error types returned by the detection pipeline.
//!
//! Every error is fatal for the trajectory it was raised on. Recovery across
//! many trajectories (skip and continue) is left to the caller.

// ── Input errors ───────────────────────────────────────────────────────────

/// The trajectory cannot be processed as given.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// Fewer samples than the configured minimum.
    TooShort {
        /// Provided number of samples.
        len: usize,
        /// Required minimum number of samples.
        min: usize,
    },
    /// A required field holds NaN or an infinity.
    NonFinite {
        /// Field name as it appears in the trajectory schema.
        field: &'static str,
        /// Sample index.
        index: usize,
    },
    /// Two consecutive samples of the same object are not in strictly
    /// increasing time order.
    NonIncreasingTimestamp {
        /// Index of the first sample of the offending pair.
        index: usize,
        /// Timestamp at `index`.
        previous: f64,
        /// Timestamp at `index + 1`.
        next: f64,
    },
    /// Two consecutive samples of the same object are too far apart in time.
    GapTooLarge {
        /// Index of the first sample of the offending pair.
        index: usize,
        /// Observed spacing in seconds.
        dt: f64,
        /// Maximum allowed spacing in seconds.
        max: f64,
    },
    /// Annotations and samples do not line up.
    LengthMismatch {
        /// Number of samples.
        samples: usize,
        /// Number of annotations.
        annotations: usize,
    },
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { len, min } => {
                write!(f, "trajectory too short: {} samples, need at least {}", len, min)
            }
            Self::NonFinite { field, index } => {
                write!(f, "non-finite value in field '{}' at index {}", field, index)
            }
            Self::NonIncreasingTimestamp {
                index,
                previous,
                next,
            } => write!(
                f,
                "timestamps not increasing at index {}: {:.3} then {:.3}",
                index, previous, next
            ),
            Self::GapTooLarge { index, dt, max } => write!(
                f,
                "sample spacing {:.3}s exceeds {:.3}s at index {}",
                dt, max, index
            ),
            Self::LengthMismatch {
                samples,
                annotations,
            } => write!(
                f,
                "{} annotations do not match {} samples",
                annotations, samples
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}

// ── Configuration errors ───────────────────────────────────────────────────

/// Thresholds or windows that cannot produce a meaningful detection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter is NaN or infinite.
    NonFinite {
        /// Parameter name.
        name: &'static str,
    },
    /// A parameter that must be non-negative is negative.
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The inner window bound is not strictly below the outer one.
    WindowOrder {
        /// `delta_t_inner_sec`.
        inner: f64,
        /// `delta_t_outer_sec`.
        outer: f64,
    },
    /// A parameter that must be strictly positive is not.
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `max_angular_velocity` lies below the fixed lower band edge.
    EmptyAngularVelocityBand {
        /// Configured maximum (deg/s).
        max_deg: f64,
        /// Fixed minimum (deg/s).
        min_deg: f64,
    },
    /// Smoothing window length must be odd and non-zero.
    SmoothingWindow {
        /// Configured window length.
        len: usize,
    },
    /// Duration bounds are inverted.
    DurationOrder {
        /// Minimum duration (s).
        min: f64,
        /// Maximum duration (s).
        max: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { name } => write!(f, "parameter '{}' is not finite", name),
            Self::Negative { name, value } => {
                write!(f, "parameter '{}' must be non-negative, got {}", name, value)
            }
            Self::WindowOrder { inner, outer } => write!(
                f,
                "inner window ({}s) must be shorter than outer window ({}s)",
                inner, outer
            ),
            Self::NonPositive { name, value } => {
                write!(f, "parameter '{}' must be positive, got {}", name, value)
            }
            Self::EmptyAngularVelocityBand { max_deg, min_deg } => write!(
                f,
                "max angular velocity {} deg/s is below the {} deg/s floor",
                max_deg, min_deg
            ),
            Self::SmoothingWindow { len } => {
                write!(f, "smoothing window length must be odd and non-zero, got {}", len)
            }
            Self::DurationOrder { min, max } => write!(
                f,
                "minimum duration {}s exceeds maximum duration {}s",
                min, max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ── Sequence errors ────────────────────────────────────────────────────────

/// Two accepted saccades share or invert their start time.
///
/// Cannot happen with a positive suppression interval; seeing it means the
/// selection stage is broken.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingError {
    /// Object the saccades belong to.
    pub obj_id: u64,
    /// Start time of the earlier saccade in sorted order.
    pub previous_time_start: f64,
    /// Start time of the later saccade in sorted order.
    pub time_start: f64,
}

impl std::fmt::Display for OrderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "saccades of object {} not strictly ordered: time_start {:.4} follows {:.4}",
            self.obj_id, self.time_start, self.previous_time_start
        )
    }
}

impl std::error::Error for OrderingError {}

/// An assembled saccade violates its structural invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedSaccadeError {
    /// A numeric field is NaN or infinite.
    NonFinite {
        /// Field name.
        field: &'static str,
    },
    /// `time_stop` does not come after `time_start`.
    EmptyInterval {
        /// Start time.
        time_start: f64,
        /// Stop time.
        time_stop: f64,
    },
    /// Sign is neither -1 nor +1.
    InvalidSign {
        /// Offending sign.
        sign: i8,
    },
}

impl std::fmt::Display for MalformedSaccadeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "saccade field '{}' is not finite", field),
            Self::EmptyInterval {
                time_start,
                time_stop,
            } => write!(
                f,
                "saccade stops at {:.4} before starting at {:.4}",
                time_stop, time_start
            ),
            Self::InvalidSign { sign } => write!(f, "saccade sign must be -1 or +1, got {}", sign),
        }
    }
}

impl std::error::Error for MalformedSaccadeError {}

// ── Umbrella ───────────────────────────────────────────────────────────────

/// Any failure of a detection run.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    /// Malformed, incomplete or non-finite trajectory.
    InvalidInput(InvalidInputError),
    /// Inconsistent thresholds.
    Config(ConfigError),
    /// Internal ordering invariant violated during sequence assembly.
    Ordering(OrderingError),
    /// Internal well-formedness invariant violated during sequence assembly.
    Malformed(MalformedSaccadeError),
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {}", e),
            Self::Config(e) => write!(f, "invalid configuration: {}", e),
            Self::Ordering(e) => write!(f, "ordering violation: {}", e),
            Self::Malformed(e) => write!(f, "malformed saccade: {}", e),
        }
    }
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Ordering(e) => Some(e),
            Self::Malformed(e) => Some(e),
        }
    }
}

impl From<InvalidInputError> for DetectError {
    fn from(e: InvalidInputError) -> Self {
        Self::InvalidInput(e)
    }
}

impl From<ConfigError> for DetectError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<OrderingError> for DetectError {
    fn from(e: OrderingError) -> Self {
        Self::Ordering(e)
    }
}

impl From<MalformedSaccadeError> for DetectError {
    fn from(e: MalformedSaccadeError) -> Self {
        Self::Malformed(e)
    }
}
