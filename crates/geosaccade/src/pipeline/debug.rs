//! Debug dump assembly from run artifacts.

use super::run::RunArtifacts;
use super::*;
use crate::annotation::{CandidateGate, SkipReason};
use crate::debug_dump::{
    AcceptedDebug, CandidateDebug, CandidateStageDebug, DebugCollectConfig, DebugDump,
    DecisionDebug, DecisionStatus, DetectConfigSnapshot, FinalDebug, GateCount, KinematicsDebug,
    SelectionDebug, SkipCounts, StagesDebug, TrackDebug, TrajectoryDebug, DEBUG_SCHEMA_V1,
};

const ALL_GATES: [CandidateGate; 7] = [
    CandidateGate::BeforeDispersion,
    CandidateGate::AfterDispersion,
    CandidateGate::Amplitude,
    CandidateGate::LinearVelocity,
    CandidateGate::LinearAcceleration,
    CandidateGate::AngularVelocityLow,
    CandidateGate::AngularVelocityHigh,
];

fn trajectory_debug(
    samples: &[Sample],
    artifacts: &RunArtifacts,
    debug_cfg: &DebugCollectConfig,
) -> TrajectoryDebug {
    let tracks = artifacts
        .spans
        .iter()
        .filter(|span| !span.is_empty())
        .map(|span| TrackDebug {
            obj_id: samples[span.start].obj_id,
            start: span.start,
            end: span.end,
            time_start: samples[span.start].timestamp,
            time_stop: samples[span.end - 1].timestamp,
        })
        .collect();
    TrajectoryDebug {
        path: debug_cfg.trajectory_path.clone(),
        n_samples: samples.len(),
        tracks,
    }
}

fn candidate_stage(
    samples: &[Sample],
    artifacts: &RunArtifacts,
    debug_cfg: &DebugCollectConfig,
) -> CandidateStageDebug {
    let annotations = &artifacts.detection.annotations;

    let mut skipped = SkipCounts::default();
    for a in annotations {
        match a.skip {
            Some(SkipReason::UndefinedAngularVelocity) => skipped.undefined_angular_velocity += 1,
            Some(SkipReason::InsufficientMargin) => skipped.insufficient_margin += 1,
            Some(SkipReason::SparseWindow { .. }) => skipped.sparse_window += 1,
            None => {}
        }
    }

    let gate_rejections = ALL_GATES
        .into_iter()
        .map(|gate| GateCount {
            gate,
            n_rejected: annotations
                .iter()
                .filter(|a| a.rejected_by.contains(&gate))
                .count(),
        })
        .filter(|g| g.n_rejected > 0)
        .collect();

    let mut considered: Vec<CandidateDebug> = annotations
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let turn = a.turn?;
            Some(CandidateDebug {
                sample_idx: i,
                obj_id: samples[i].obj_id,
                timestamp: samples[i].timestamp,
                turn,
                angular_velocity_modulus: a.angular_velocity_modulus,
                decision: DecisionDebug {
                    status: if a.candidate {
                        DecisionStatus::Candidate
                    } else {
                        DecisionStatus::Rejected
                    },
                    rejected_by: a.rejected_by.clone(),
                },
            })
        })
        .collect();
    considered.sort_by(|a, b| b.turn.preference.total_cmp(&a.turn.preference));
    considered.truncate(debug_cfg.max_candidates);

    let stats = &artifacts.detection.stats;
    CandidateStageDebug {
        n_total: stats.n_samples,
        n_considered: stats.n_considered,
        n_candidates: stats.n_candidates,
        n_recorded: considered.len(),
        skipped,
        gate_rejections,
        candidates: considered,
    }
}

pub(super) fn build_dump(
    samples: &[Sample],
    config: &DetectConfig,
    debug_cfg: &DebugCollectConfig,
    artifacts: &RunArtifacts,
) -> DebugDump {
    let detection = &artifacts.detection;
    let n_undefined = detection
        .annotations
        .iter()
        .filter(|a| a.angular_velocity_modulus.is_none())
        .count();

    let accepted: Vec<AcceptedDebug> = artifacts
        .selection
        .centers
        .iter()
        .zip(&artifacts.selection.events)
        .map(|(&sample_idx, event)| AcceptedDebug {
            sample_idx,
            event: event.clone(),
        })
        .collect();

    let mut final_notes = Vec::new();
    if !accepted.is_empty() && detection.saccades.is_empty() {
        final_notes.push(
            "every track produced at most one event; the first event of a track only anchors its successor"
                .to_string(),
        );
    }

    DebugDump {
        schema_version: DEBUG_SCHEMA_V1.to_string(),
        trajectory: trajectory_debug(samples, artifacts, debug_cfg),
        detect_config: DetectConfigSnapshot {
            config: config.clone(),
            debug_collect: debug_cfg.clone(),
        },
        stages: StagesDebug {
            stage0_kinematics: KinematicsDebug {
                n_samples: samples.len(),
                n_undefined_angular_velocity: n_undefined,
                notes: Vec::new(),
            },
            stage1_candidates: candidate_stage(samples, artifacts, debug_cfg),
            stage2_selection: SelectionDebug {
                accepted,
                n_suppressed: artifacts.selection.n_suppressed,
            },
            final_: FinalDebug {
                saccades: detection.saccades.clone(),
                n_dropped_first: artifacts.selection.events.len() - detection.saccades.len(),
                notes: final_notes,
            },
        },
    }
}
