//! Rubric-based heuristic scoring.
//!
//! The engine is pure and stateless: the same text and the same rubric always
//! produce the same [`Assessment`]. Each category applies a minimum-content
//! gate, accumulates points from a declarative signal list, and normalizes the
//! raw total onto the category weight.

pub mod assessment;
mod categories;
mod engine;
mod feedback;
pub mod rubric;
mod signals;

#[cfg(test)]
mod tests;

pub use assessment::{letter_grade, Assessment, Breakdown, CategoryResult, FeedbackSummary};
pub use engine::EvaluationEngine;
pub use rubric::{Category, Rubric, RubricError};
