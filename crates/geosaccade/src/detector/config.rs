use std::path::Path;

use crate::error::ConfigError;
use crate::kinematics::SmoothingConfig;
use crate::orientation::normalize_pi;
use crate::trajectory::ValidationConfig;

/// Lower edge of the accepted angular velocity band (deg/s).
pub const MIN_ANGULAR_VELOCITY_DEG: f64 = 100.0;

/// Detection thresholds.
///
/// Every field is required: the thresholds depend on species, frame rate and
/// arena scale, so there is no meaningful library default. The legacy
/// camelCase keys `deltaT_inner_sec` / `deltaT_outer_sec` are accepted when
/// deserializing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SaccadeParams {
    /// Inner edge of the before/after windows (seconds from the center).
    #[serde(alias = "deltaT_inner_sec")]
    pub delta_t_inner_sec: f64,
    /// Outer edge of the before/after windows (seconds from the center).
    #[serde(alias = "deltaT_outer_sec")]
    pub delta_t_outer_sec: f64,
    /// Minimum turn amplitude (degrees).
    pub min_amplitude_deg: f64,
    /// Maximum circular dispersion of either window (degrees).
    pub max_orientation_dispersion_deg: f64,
    /// Minimum linear speed at the center sample.
    pub min_linear_velocity: f64,
    /// Maximum linear acceleration at the center sample.
    pub max_linear_acceleration: f64,
    /// Maximum angular velocity (deg/s).
    pub max_angular_velocity: f64,
    /// Half-width (seconds) of the suppression interval around an accepted
    /// saccade.
    pub minimum_interval_sec: f64,
}

impl SaccadeParams {
    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("delta_t_inner_sec", self.delta_t_inner_sec),
            ("delta_t_outer_sec", self.delta_t_outer_sec),
            ("min_amplitude_deg", self.min_amplitude_deg),
            (
                "max_orientation_dispersion_deg",
                self.max_orientation_dispersion_deg,
            ),
            ("min_linear_velocity", self.min_linear_velocity),
            ("max_linear_acceleration", self.max_linear_acceleration),
            ("max_angular_velocity", self.max_angular_velocity),
            ("minimum_interval_sec", self.minimum_interval_sec),
        ]
    }

    /// Check that the thresholds describe a non-empty acceptance region.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = self.named();
        if let Some(&(name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { name });
        }
        if let Some(&(name, value)) = named.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::Negative { name, value });
        }
        if self.delta_t_inner_sec >= self.delta_t_outer_sec {
            return Err(ConfigError::WindowOrder {
                inner: self.delta_t_inner_sec,
                outer: self.delta_t_outer_sec,
            });
        }
        if self.min_amplitude_deg <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "min_amplitude_deg",
                value: self.min_amplitude_deg,
            });
        }
        if self.minimum_interval_sec <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "minimum_interval_sec",
                value: self.minimum_interval_sec,
            });
        }
        if self.max_angular_velocity < MIN_ANGULAR_VELOCITY_DEG {
            return Err(ConfigError::EmptyAngularVelocityBand {
                max_deg: self.max_angular_velocity,
                min_deg: MIN_ANGULAR_VELOCITY_DEG,
            });
        }
        Ok(())
    }
}

/// How the signed turning angle is formed from the start and stop
/// orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnSignConvention {
    /// `stop - start`: counter-clockwise turns are positive.
    #[default]
    StopMinusStart,
    /// `start - stop`: clockwise turns are positive.
    StartMinusStop,
}

impl TurnSignConvention {
    /// Signed turning angle in (−π, π] between two orientations (radians).
    #[inline]
    pub fn turning_angle(self, start: f64, stop: f64) -> f64 {
        match self {
            Self::StopMinusStart => normalize_pi(stop - start),
            Self::StartMinusStop => normalize_pi(start - stop),
        }
    }
}

/// Top-level detection configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetectConfig {
    /// Detection thresholds.
    pub params: SaccadeParams,
    /// Input checks applied before detection.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Smoothing of the speed and acceleration series.
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    /// Sign convention of the turning angle.
    #[serde(default)]
    pub turn_sign: TurnSignConvention,
}

/// Parameter files hold either a full [`DetectConfig`] or bare thresholds.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Full(DetectConfig),
    Params(SaccadeParams),
}

impl DetectConfig {
    /// Configuration with the given thresholds and default input checks,
    /// smoothing and sign convention.
    pub fn new(params: SaccadeParams) -> Self {
        Self {
            params,
            validation: ValidationConfig::default(),
            smoothing: SmoothingConfig::default(),
            turn_sign: TurnSignConvention::default(),
        }
    }

    /// Load a configuration from a JSON file holding either a full config or
    /// just the thresholds.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let cfg = match serde_json::from_str::<ConfigFile>(&data)? {
            ConfigFile::Full(cfg) => cfg,
            ConfigFile::Params(params) => Self::new(params),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check thresholds and auxiliary settings for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        let len = self.smoothing.window_len;
        if len == 0 || len % 2 == 0 {
            return Err(ConfigError::SmoothingWindow { len });
        }
        if !self.validation.max_gap_sec.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "max_gap_sec",
            });
        }
        if self.validation.max_gap_sec <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "max_gap_sec",
                value: self.validation.max_gap_sec,
            });
        }
        Ok(())
    }
}

/// Thresholds converted to the units the evaluator works in (radians).
#[derive(Debug, Clone, Copy)]
pub(crate) struct CandidateThresholds {
    pub max_dispersion: f64,
    pub min_amplitude: f64,
    pub min_linear_velocity: f64,
    pub max_linear_acceleration: f64,
    pub min_angular_velocity: f64,
    pub max_angular_velocity: f64,
}

impl From<&SaccadeParams> for CandidateThresholds {
    fn from(p: &SaccadeParams) -> Self {
        Self {
            max_dispersion: p.max_orientation_dispersion_deg.to_radians(),
            min_amplitude: p.min_amplitude_deg.to_radians(),
            min_linear_velocity: p.min_linear_velocity,
            max_linear_acceleration: p.max_linear_acceleration,
            min_angular_velocity: MIN_ANGULAR_VELOCITY_DEG.to_radians(),
            max_angular_velocity: p.max_angular_velocity.to_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::params_60hz;
    use std::f64::consts::PI;

    #[test]
    fn reference_params_are_valid() {
        assert!(DetectConfig::new(params_60hz()).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_windows() {
        let mut p = params_60hz();
        p.delta_t_inner_sec = p.delta_t_outer_sec;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::WindowOrder { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_and_negative_values() {
        let mut p = params_60hz();
        p.min_linear_velocity = f64::NAN;
        assert_eq!(
            p.validate(),
            Err(ConfigError::NonFinite {
                name: "min_linear_velocity"
            })
        );

        let mut p = params_60hz();
        p.max_linear_acceleration = -1.0;
        assert_eq!(
            p.validate(),
            Err(ConfigError::Negative {
                name: "max_linear_acceleration",
                value: -1.0
            })
        );
    }

    #[test]
    fn rejects_degenerate_amplitude_and_interval() {
        let mut p = params_60hz();
        p.min_amplitude_deg = 0.0;
        assert!(matches!(p.validate(), Err(ConfigError::NonPositive { .. })));

        let mut p = params_60hz();
        p.minimum_interval_sec = 0.0;
        assert!(matches!(p.validate(), Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn rejects_empty_angular_velocity_band() {
        let mut p = params_60hz();
        p.max_angular_velocity = 50.0;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::EmptyAngularVelocityBand { .. })
        ));
    }

    #[test]
    fn rejects_even_smoothing_window() {
        let mut cfg = DetectConfig::new(params_60hz());
        cfg.smoothing.window_len = 4;
        assert_eq!(cfg.validate(), Err(ConfigError::SmoothingWindow { len: 4 }));
    }

    #[test]
    fn accepts_camel_case_window_keys() {
        let json = r#"{
            "deltaT_inner_sec": 0.066,
            "deltaT_outer_sec": 0.166,
            "min_amplitude_deg": 25,
            "max_orientation_dispersion_deg": 15,
            "min_linear_velocity": 0.1,
            "max_linear_acceleration": 20,
            "max_angular_velocity": 8000,
            "minimum_interval_sec": 0.166
        }"#;
        let p: SaccadeParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.delta_t_inner_sec, 0.066);
        assert_eq!(p.delta_t_outer_sec, 0.166);
    }

    #[test]
    fn missing_threshold_is_a_parse_error() {
        let json = r#"{"delta_t_inner_sec": 0.066, "delta_t_outer_sec": 0.166}"#;
        assert!(serde_json::from_str::<SaccadeParams>(json).is_err());
    }

    #[test]
    fn full_config_fills_defaults() {
        let json = serde_json::json!({ "params": params_60hz() }).to_string();
        let cfg: DetectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.smoothing.window_len, 5);
        assert_eq!(cfg.validation.min_length, 30);
        assert_eq!(cfg.turn_sign, TurnSignConvention::StopMinusStart);
    }

    #[test]
    fn sign_conventions_are_opposite() {
        let a = TurnSignConvention::StopMinusStart.turning_angle(0.1, 0.4);
        let b = TurnSignConvention::StartMinusStop.turning_angle(0.1, 0.4);
        assert!((a - 0.3).abs() < 1e-12);
        assert!((a + b).abs() < 1e-12);
        // Wraps across ±π.
        let w = TurnSignConvention::StopMinusStart.turning_angle(PI - 0.1, -PI + 0.1);
        assert!((w - 0.2).abs() < 1e-12);
    }

    #[test]
    fn thresholds_are_converted_to_radians() {
        let t = CandidateThresholds::from(&params_60hz());
        assert!((t.min_amplitude - 15f64.to_radians()).abs() < 1e-12);
        assert!((t.min_angular_velocity - 100f64.to_radians()).abs() < 1e-12);
    }
}
