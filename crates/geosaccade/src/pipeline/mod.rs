//! High-level detection pipeline.
//!
//! This module is the internal "glue" layer that wires together detector stages:
//! validation -> kinematics -> candidate evaluation -> greedy selection -> assembly.
//!
//! Algorithmic primitives live in `crate::detector`, `crate::kinematics`, and
//! `crate::orientation`. The pipeline layer focuses on stage boundaries, call
//! order, and data flow.
//!
//! Entry points:
//! - `detect_trajectory`: baseline detection
//! - `detect_trajectory_with_debug`: detection plus a versioned debug dump

mod debug;
mod prelude;
mod result;
mod run;

pub use result::{DetectionStats, SaccadeDetection};

pub(crate) use prelude::*;

pub use run::{detect_trajectory, detect_trajectory_with_debug};
