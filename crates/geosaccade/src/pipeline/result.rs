use crate::annotation::{AnnotatedSample, SampleAnnotation};
use crate::error::InvalidInputError;
use crate::saccade::Saccade;
use crate::trajectory::Sample;

/// Per-run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct DetectionStats {
    /// Samples in the trajectory.
    pub n_samples: usize,
    /// Object-id spans.
    pub n_tracks: usize,
    /// Samples whose orientation windows were evaluated.
    pub n_considered: usize,
    /// Considered samples that passed every gate.
    pub n_candidates: usize,
    /// Events accepted by the greedy selection, before sequence assembly.
    pub n_accepted: usize,
}

/// Full detection result for a single trajectory.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SaccadeDetection {
    /// Assembled saccades, grouped by object and chronological within each.
    pub saccades: Vec<Saccade>,
    /// One annotation per input sample, index-aligned.
    pub annotations: Vec<SampleAnnotation>,
    pub stats: DetectionStats,
}

impl SaccadeDetection {
    /// Pair each sample with its annotation.
    pub fn annotated(&self, samples: &[Sample]) -> Result<Vec<AnnotatedSample>, InvalidInputError> {
        if samples.len() != self.annotations.len() {
            return Err(InvalidInputError::LengthMismatch {
                samples: samples.len(),
                annotations: self.annotations.len(),
            });
        }
        Ok(samples
            .iter()
            .zip(&self.annotations)
            .map(|(s, a)| AnnotatedSample {
                sample: *s,
                annotation: a.clone(),
            })
            .collect())
    }
}
