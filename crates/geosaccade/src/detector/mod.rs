//! Detection primitives (candidate scoring, greedy selection, sequence
//! assembly) independent of orchestration.
//!
//! The `pipeline` module owns the high-level call order. This module provides
//! the algorithmic building blocks and shared configuration types.

pub(crate) mod candidate;
pub(crate) mod config;
pub(crate) mod select;
pub(crate) mod sequence;

pub use candidate::evaluate_samples;
pub use config::{DetectConfig, SaccadeParams, TurnSignConvention, MIN_ANGULAR_VELOCITY_DEG};
pub use select::{select_saccades, Selection};
pub use sequence::{assemble_sequence, assemble_tracks};
