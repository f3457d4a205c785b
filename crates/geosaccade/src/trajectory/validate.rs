use super::Sample;
use crate::error::InvalidInputError;

/// Shape and spacing limits checked before any computation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum number of samples in a trajectory.
    pub min_length: usize,
    /// Maximum spacing (seconds) between consecutive samples of one object.
    pub max_gap_sec: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_gap_sec: 60.0,
        }
    }
}

fn fields(s: &Sample) -> [(&'static str, f64); 7] {
    [
        ("timestamp", s.timestamp),
        ("x", s.x),
        ("y", s.y),
        ("z", s.z),
        ("xvel", s.xvel),
        ("yvel", s.yvel),
        ("zvel", s.zvel),
    ]
}

/// Reject samples holding NaN or infinite values.
pub(crate) fn check_finite(samples: &[Sample]) -> Result<(), InvalidInputError> {
    for (index, s) in samples.iter().enumerate() {
        if let Some((field, _)) = fields(s).into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidInputError::NonFinite { field, index });
        }
    }
    Ok(())
}

/// Check length, field finiteness, and per-object time monotonicity/spacing.
pub fn validate_trajectory(
    samples: &[Sample],
    config: &ValidationConfig,
) -> Result<(), InvalidInputError> {
    if samples.len() < config.min_length {
        return Err(InvalidInputError::TooShort {
            len: samples.len(),
            min: config.min_length,
        });
    }

    check_finite(samples)?;

    for (index, pair) in samples.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        if a.obj_id != b.obj_id {
            continue;
        }
        if !(a.timestamp < b.timestamp) {
            return Err(InvalidInputError::NonIncreasingTimestamp {
                index,
                previous: a.timestamp,
                next: b.timestamp,
            });
        }
        let dt = b.timestamp - a.timestamp;
        if dt > config.max_gap_sec {
            return Err(InvalidInputError::GapTooLarge {
                index,
                dt,
                max: config.max_gap_sec,
            });
        }
    }

    Ok(())
}
