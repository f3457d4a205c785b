//! Top-level pipeline orchestrator: validate → kinematics → candidates →
//! selection → sequence assembly.

use std::ops::Range;

use super::*;
use crate::debug_dump::{DebugCollectConfig, DebugDump};

/// Everything a run produces, including intermediates needed for debugging.
pub(super) struct RunArtifacts {
    pub detection: SaccadeDetection,
    pub spans: Vec<Range<usize>>,
    pub selection: Selection,
}

pub(super) fn run(samples: &[Sample], config: &DetectConfig) -> Result<RunArtifacts, DetectError> {
    config.validate()?;
    validate_trajectory(samples, &config.validation)?;

    let spans = track_spans(samples);
    let kinematics = extract_kinematics(samples, &spans, &config.smoothing);
    let mut annotations = evaluate_samples(samples, &spans, &kinematics, config);
    let selection = select_saccades(samples, &spans, &mut annotations, config);
    let saccades = assemble_tracks(
        selection
            .tracks
            .iter()
            .copied()
            .zip(selection.events.iter().cloned())
            .collect(),
    )?;

    let stats = DetectionStats {
        n_samples: samples.len(),
        n_tracks: spans.len(),
        n_considered: annotations.iter().filter(|a| a.considered()).count(),
        n_candidates: annotations.iter().filter(|a| a.candidate).count(),
        n_accepted: selection.events.len(),
    };
    tracing::info!(
        "Detected {} saccades from {} accepted events ({} candidates, {} tracks, {} samples)",
        saccades.len(),
        stats.n_accepted,
        stats.n_candidates,
        stats.n_tracks,
        stats.n_samples
    );

    Ok(RunArtifacts {
        detection: SaccadeDetection {
            saccades,
            annotations,
            stats,
        },
        spans,
        selection,
    })
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Run the geometric detector on one trajectory.
pub fn detect_trajectory(
    samples: &[Sample],
    config: &DetectConfig,
) -> Result<SaccadeDetection, DetectError> {
    run(samples, config).map(|a| a.detection)
}

/// Run the geometric detector and collect a stage-by-stage debug dump.
pub fn detect_trajectory_with_debug(
    samples: &[Sample],
    config: &DetectConfig,
    debug_cfg: &DebugCollectConfig,
) -> Result<(SaccadeDetection, DebugDump), DetectError> {
    let artifacts = run(samples, config)?;
    let dump = super::debug::build_dump(samples, config, debug_cfg, &artifacts);
    Ok((artifacts.detection, dump))
}
