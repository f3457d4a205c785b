pub(crate) use crate::detector::{
    assemble_tracks, evaluate_samples, select_saccades, DetectConfig, Selection,
};
pub(crate) use crate::error::DetectError;
pub(crate) use crate::kinematics::extract_kinematics;
pub(crate) use crate::trajectory::{track_spans, validate_trajectory, Sample};
