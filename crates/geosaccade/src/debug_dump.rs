//! Versioned debug dump schema for saccade detection.
//!
//! The dump reuses production structures ([`TurnEstimate`], [`SaccadeEvent`],
//! [`Saccade`], [`DetectConfig`]) wherever possible. Debug-only structs carry
//! per-stage counts and candidate decisions.

use serde::{Deserialize, Serialize};

use crate::annotation::{CandidateGate, TurnEstimate};
use crate::detector::DetectConfig;
use crate::saccade::{Saccade, SaccadeEvent};

pub const DEBUG_SCHEMA_V1: &str = "geosaccade.debug.v1";

/// What a debug run records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugCollectConfig {
    /// Optional source trajectory path copied into the dump metadata.
    pub trajectory_path: Option<String>,
    /// Maximum number of considered samples stored in the candidate stage.
    pub max_candidates: usize,
}

impl Default for DebugCollectConfig {
    fn default() -> Self {
        Self {
            trajectory_path: None,
            max_candidates: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugDump {
    pub schema_version: String,
    pub trajectory: TrajectoryDebug,
    pub detect_config: DetectConfigSnapshot,
    pub stages: StagesDebug,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryDebug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub n_samples: usize,
    pub tracks: Vec<TrackDebug>,
}

/// One object-id span of the trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDebug {
    pub obj_id: u64,
    /// First sample index (inclusive).
    pub start: usize,
    /// Last sample index (exclusive).
    pub end: usize,
    pub time_start: f64,
    pub time_stop: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfigSnapshot {
    pub config: DetectConfig,
    pub debug_collect: DebugCollectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagesDebug {
    pub stage0_kinematics: KinematicsDebug,
    pub stage1_candidates: CandidateStageDebug,
    pub stage2_selection: SelectionDebug,
    #[serde(rename = "final")]
    pub final_: FinalDebug,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsDebug {
    pub n_samples: usize,
    pub n_undefined_angular_velocity: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkipCounts {
    pub undefined_angular_velocity: usize,
    pub insufficient_margin: usize,
    pub sparse_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCount {
    pub gate: CandidateGate,
    pub n_rejected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateStageDebug {
    pub n_total: usize,
    pub n_considered: usize,
    pub n_candidates: usize,
    pub n_recorded: usize,
    pub skipped: SkipCounts,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gate_rejections: Vec<GateCount>,
    /// Considered samples, highest preference first.
    pub candidates: Vec<CandidateDebug>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDebug {
    pub sample_idx: usize,
    pub obj_id: u64,
    pub timestamp: f64,
    pub turn: TurnEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angular_velocity_modulus: Option<f64>,
    pub decision: DecisionDebug,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionDebug {
    pub status: DecisionStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected_by: Vec<CandidateGate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Candidate,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionDebug {
    /// Raw events in acceptance order, before sequence assembly.
    pub accepted: Vec<AcceptedDebug>,
    pub n_suppressed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedDebug {
    pub sample_idx: usize,
    pub event: SaccadeEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalDebug {
    pub saccades: Vec<Saccade>,
    /// Leading events that only anchored their successor.
    pub n_dropped_first: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::params_60hz;

    #[test]
    fn debug_dump_json_roundtrip_minimal() {
        let dd = DebugDump {
            schema_version: DEBUG_SCHEMA_V1.to_string(),
            trajectory: TrajectoryDebug {
                path: None,
                n_samples: 0,
                tracks: vec![],
            },
            detect_config: DetectConfigSnapshot {
                config: DetectConfig::new(params_60hz()),
                debug_collect: DebugCollectConfig::default(),
            },
            stages: StagesDebug {
                stage0_kinematics: KinematicsDebug {
                    n_samples: 0,
                    n_undefined_angular_velocity: 0,
                    notes: vec![],
                },
                stage1_candidates: CandidateStageDebug {
                    n_total: 0,
                    n_considered: 0,
                    n_candidates: 0,
                    n_recorded: 0,
                    skipped: SkipCounts::default(),
                    gate_rejections: vec![],
                    candidates: vec![],
                },
                stage2_selection: SelectionDebug {
                    accepted: vec![],
                    n_suppressed: 0,
                },
                final_: FinalDebug {
                    saccades: vec![],
                    n_dropped_first: 0,
                    notes: vec![],
                },
            },
        };

        let s = serde_json::to_string_pretty(&dd).unwrap();
        assert!(s.contains("\"final\""));
        let dd2: DebugDump = serde_json::from_str(&s).unwrap();
        assert_eq!(dd2.schema_version, DEBUG_SCHEMA_V1);
        assert_eq!(dd2.detect_config.debug_collect.max_candidates, 300);
    }
}
