use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use assess_core::error::AppError;
use assess_core::grading::{EvaluationEngine, Rubric};
use assess_core::reports;
use assess_core::submissions::{MemorySubmissionRepository, Submission, SubmissionService};

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Path to the submission text file
    pub(crate) file: PathBuf,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Pass threshold on the 0-100 scale
    #[arg(long, default_value_t = 50.0)]
    pub(crate) pass_threshold: f64,
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let GradeArgs {
        file,
        json,
        pass_threshold,
    } = args;

    let content = fs::read_to_string(&file)?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let engine = Arc::new(EvaluationEngine::new(Rubric::standard()?));
    let service = SubmissionService::new(
        Arc::new(MemorySubmissionRepository::new()),
        engine,
        pass_threshold,
    );

    let record = service
        .submit(Submission::new(filename, content))
        .and_then(|stored| service.evaluate(&stored.id))
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    let report = reports::student_report(&record, service.engine().rubric(), pass_threshold);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!("AutoAssess report");
    println!("File: {}", report.submission.filename);
    if let Some(student_id) = &report.submission.student_id {
        println!("Student ID: {student_id}");
    }
    if let Some(student_name) = &report.submission.student_name {
        println!("Student name: {student_name}");
    }
    println!(
        "Total: {:.2} / 100.00 ({})",
        report.submission.total_score.unwrap_or(0.0),
        report.submission.grade.unwrap_or("F")
    );
    if let Some(passed) = report.passed {
        println!(
            "Outcome: {} (threshold {:.0})",
            if passed { "pass" } else { "fail" },
            pass_threshold
        );
    }

    println!("\nBreakdown");
    for row in &report.breakdown {
        println!(
            "  {:<14} {:>6.2} / {:>5.2}  ({:.2}%)",
            row.category_label, row.score, row.max_score, row.percentage
        );
        for note in &row.feedback {
            println!("    - {note}");
        }
    }

    if let Some(feedback) = &report.feedback {
        println!("\nStrengths");
        for line in &feedback.strengths {
            println!("  - {line}");
        }
        println!("\nImprovements");
        for line in &feedback.improvements {
            println!("  - {line}");
        }
        println!("\nRecommendations");
        for line in &feedback.recommendations {
            println!("  - {line}");
        }
    }

    Ok(())
}
