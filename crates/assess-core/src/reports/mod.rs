//! Read-side views over stored submissions: per-student reports, class
//! statistics, and the CSV results export.

pub mod export;
pub mod summary;
pub mod views;

pub use export::{class_results_csv, ExportError};
pub use summary::{class_overview, student_report, submission_view};
pub use views::{CategoryRow, ClassOverview, GradeDistributionEntry, StudentReportView, SubmissionView};
