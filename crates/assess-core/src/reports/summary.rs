use crate::grading::assessment::round2;
use crate::grading::Rubric;
use crate::submissions::{SubmissionRecord, SubmissionStatus};

use super::views::{
    CategoryRow, ClassOverview, GradeDistributionEntry, StudentReportView, SubmissionView,
};

const GRADE_ORDER: [&str; 11] = [
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D", "F",
];

pub fn submission_view(record: &SubmissionRecord) -> SubmissionView {
    SubmissionView {
        id: record.id.0.clone(),
        filename: record.submission.filename.clone(),
        student_id: record.submission.identity.student_id.clone(),
        student_name: record.submission.identity.student_name.clone(),
        status: record.status.label(),
        submitted_at: record.submission.submitted_at,
        evaluated_at: record.evaluated_at,
        total_score: record.assessment.as_ref().map(|a| a.total_score),
        grade: record.assessment.as_ref().map(|a| a.grade),
    }
}

pub fn student_report(
    record: &SubmissionRecord,
    rubric: &Rubric,
    pass_threshold: f64,
) -> StudentReportView {
    let breakdown = record
        .assessment
        .as_ref()
        .map(|assessment| {
            assessment
                .breakdown
                .iter()
                .map(|(category, result)| CategoryRow {
                    category: *category,
                    category_label: category.label(),
                    score: result.score,
                    max_score: result.max_score,
                    percentage: result.percentage,
                    criteria: rubric.criteria(*category),
                    feedback: result.feedback.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    StudentReportView {
        submission: submission_view(record),
        breakdown,
        feedback: record.assessment.as_ref().map(|a| a.feedback.clone()),
        passed: record
            .assessment
            .as_ref()
            .map(|a| a.passed(pass_threshold)),
    }
}

pub fn class_overview(records: &[SubmissionRecord], pass_threshold: f64) -> ClassOverview {
    let total_submissions = records.len();
    let pending = records
        .iter()
        .filter(|record| record.status == SubmissionStatus::Pending)
        .count();

    let graded: Vec<&SubmissionRecord> = records
        .iter()
        .filter(|record| record.status == SubmissionStatus::Evaluated)
        .collect();
    let evaluated = graded.len();

    let average_score = if evaluated > 0 {
        let sum: f64 = graded
            .iter()
            .filter_map(|record| record.assessment.as_ref())
            .map(|assessment| assessment.total_score)
            .sum();
        round2(sum / evaluated as f64)
    } else {
        0.0
    };

    let passed = graded
        .iter()
        .filter_map(|record| record.assessment.as_ref())
        .filter(|assessment| assessment.passed(pass_threshold))
        .count();
    let failed = evaluated - passed;

    let pass_rate = if evaluated > 0 {
        round2(passed as f64 / evaluated as f64 * 100.0)
    } else {
        0.0
    };

    let grade_distribution = GRADE_ORDER
        .into_iter()
        .filter_map(|grade| {
            let count = graded
                .iter()
                .filter_map(|record| record.assessment.as_ref())
                .filter(|assessment| assessment.grade == grade)
                .count();
            (count > 0).then_some(GradeDistributionEntry { grade, count })
        })
        .collect();

    ClassOverview {
        total_submissions,
        evaluated,
        pending,
        average_score,
        passed,
        failed,
        pass_rate,
        grade_distribution,
    }
}
