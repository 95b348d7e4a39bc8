//! Turns a numeric breakdown into narrative feedback.

use super::assessment::{Breakdown, FeedbackSummary};
use super::rubric::Category;

const STRENGTH_FLOOR: f64 = 80.0;
const IMPROVEMENT_CEILING: f64 = 60.0;
const TARGETED_CEILING: f64 = 70.0;

pub(crate) fn synthesize(breakdown: &Breakdown, total_score: f64) -> FeedbackSummary {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();
    let mut recommendations = Vec::new();

    for (category, result) in breakdown {
        if result.percentage >= STRENGTH_FLOOR {
            strengths.push(format!(
                "Strong {} ({}%)",
                category.label(),
                result.percentage
            ));
        } else if result.percentage < IMPROVEMENT_CEILING {
            improvements.push(format!(
                "{} needs improvement ({}%)",
                category.label(),
                result.percentage
            ));
        }
    }

    recommendations.push(overall_recommendation(total_score).to_string());

    for category in Category::ALL {
        let below_target = breakdown
            .get(&category)
            .map(|result| result.percentage < TARGETED_CEILING)
            .unwrap_or(false);
        if below_target {
            recommendations.push(targeted_recommendation(category).to_string());
        }
    }

    if strengths.is_empty() {
        strengths.push("Continue practicing programming logic".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Maintain current performance level".to_string());
    }

    FeedbackSummary {
        strengths,
        improvements,
        recommendations,
    }
}

fn overall_recommendation(total_score: f64) -> &'static str {
    if total_score >= 85.0 {
        "Excellent work! Keep maintaining this high standard."
    } else if total_score >= 70.0 {
        "Good job overall. Focus on the weaker areas for improvement."
    } else if total_score >= 50.0 {
        "Satisfactory work. Review the rubric and strengthen weak areas."
    } else {
        "Needs significant improvement. Seek help and review course materials."
    }
}

fn targeted_recommendation(category: Category) -> &'static str {
    match category {
        Category::LogicDesign => "Improve problem-solving approach and algorithm design.",
        Category::Flowchart => "Include detailed flowcharts with proper symbols.",
        Category::Pseudocode => "Write clearer pseudocode with proper structure.",
        Category::Formatting => {
            "Organize your work with clear sections and consistent layout."
        }
        Category::Documentation => "Add more comments and explanations to your work.",
    }
}
