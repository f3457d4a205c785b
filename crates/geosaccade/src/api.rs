//! High-level detection API.
//!
//! [`SaccadeDetector`] is the primary entry point for detecting saccades.
//! It wraps a [`DetectConfig`] and provides convenience methods for the
//! common scenarios (plain detection, debug collection).

use std::path::Path;

use crate::debug_dump::{DebugCollectConfig, DebugDump};
use crate::detector::{DetectConfig, SaccadeParams};
use crate::error::DetectError;
use crate::pipeline::{self, SaccadeDetection};
use crate::trajectory::Sample;

/// Primary detection interface.
///
/// Create once, detect on many trajectories. Each call is independent and
/// the detector holds no per-run state.
///
/// # Examples
///
/// ```no_run
/// use geosaccade::{Sample, SaccadeDetector, SaccadeParams};
///
/// let params = SaccadeParams {
///     delta_t_inner_sec: 4.0 / 60.0,
///     delta_t_outer_sec: 10.0 / 60.0,
///     min_amplitude_deg: 25.0,
///     max_orientation_dispersion_deg: 15.0,
///     min_linear_velocity: 0.1,
///     max_linear_acceleration: 20.0,
///     max_angular_velocity: 8000.0,
///     minimum_interval_sec: 10.0 / 60.0,
/// };
/// let detector = SaccadeDetector::new(params);
/// let samples: Vec<Sample> = Vec::new();
/// match detector.detect(&samples) {
///     Ok(result) => println!("Found {} saccades", result.saccades.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SaccadeDetector {
    config: DetectConfig,
}

impl SaccadeDetector {
    /// Create a detector with the given thresholds and default auxiliary
    /// settings.
    pub fn new(params: SaccadeParams) -> Self {
        Self {
            config: DetectConfig::new(params),
        }
    }

    /// Create with full config control.
    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    /// Load a JSON parameter file and create a detector in one step.
    pub fn from_config_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_config(DetectConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectConfig {
        &mut self.config
    }

    /// Detect saccades in one trajectory.
    pub fn detect(&self, samples: &[Sample]) -> Result<SaccadeDetection, DetectError> {
        pipeline::detect_trajectory(samples, &self.config)
    }

    /// Detect with debug dump collection.
    pub fn detect_with_debug(
        &self,
        samples: &[Sample],
        debug_cfg: &DebugCollectConfig,
    ) -> Result<(SaccadeDetection, DebugDump), DetectError> {
        pipeline::detect_trajectory_with_debug(samples, &self.config, debug_cfg)
    }
}

/// Detect saccades with the given thresholds and default auxiliary settings.
pub fn detect(samples: &[Sample], params: &SaccadeParams) -> Result<SaccadeDetection, DetectError> {
    SaccadeDetector::new(params.clone()).detect(samples)
}
