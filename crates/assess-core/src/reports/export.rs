use crate::grading::Category;
use crate::submissions::SubmissionRecord;

/// Error raised while building an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("export buffer error: {0}")]
    Buffer(String),
}

const HEADERS: [&str; 12] = [
    "Student ID",
    "Student Name",
    "File Name",
    "Submission Date",
    "Total Score",
    "Grade",
    "Logic Design",
    "Flowchart",
    "Pseudocode",
    "Formatting",
    "Documentation",
    "Status",
];

/// Render every record as one CSV row, graded or not. Ungraded rows carry
/// zero scores and an `F`, matching how the overview treats them.
pub fn class_results_csv(records: &[SubmissionRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for record in records {
        let category_score = |category: Category| -> f64 {
            record
                .assessment
                .as_ref()
                .and_then(|assessment| assessment.breakdown.get(&category))
                .map(|result| result.score)
                .unwrap_or(0.0)
        };

        writer.write_record([
            record
                .submission
                .identity
                .student_id
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            record
                .submission
                .identity
                .student_name
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            record.submission.filename.clone(),
            record
                .submission
                .submitted_at
                .format("%Y-%m-%d")
                .to_string(),
            record
                .assessment
                .as_ref()
                .map(|assessment| assessment.total_score)
                .unwrap_or(0.0)
                .to_string(),
            record
                .assessment
                .as_ref()
                .map(|assessment| assessment.grade)
                .unwrap_or("F")
                .to_string(),
            category_score(Category::LogicDesign).to_string(),
            category_score(Category::Flowchart).to_string(),
            category_score(Category::Pseudocode).to_string(),
            category_score(Category::Formatting).to_string(),
            category_score(Category::Documentation).to_string(),
            record.status.label().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Buffer(err.to_string()))
}
