//! AutoAssess core: a deterministic, rubric-based scorer for student
//! programming-logic submissions, plus the submission workflow and report
//! surfaces composed around it.

pub mod config;
pub mod error;
pub mod grading;
pub mod reports;
pub mod submissions;
pub mod telemetry;
