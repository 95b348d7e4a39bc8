//! The five category definitions: gates, signal lists, weights, criteria,
//! and raw-score ceilings.
//!
//! Point values, keyword sets, and the ceilings (62/41/44/17/16) are fixed
//! calibration constants. The ceilings are normalization denominators chosen
//! empirically against graded cohorts; do not re-derive them.

use regex::Regex;

use super::rubric::{Category, RubricError};
use super::signals::{ContentGate, LineBasis, Signal, Tier};

pub(crate) struct CategoryDefinition {
    pub(crate) category: Category,
    pub(crate) weight: f64,
    pub(crate) criteria: &'static [&'static str],
    pub(crate) ceiling: f64,
    pub(crate) gate: ContentGate,
    pub(crate) signals: Vec<Signal>,
    /// Shown when the gate passes but no signal fires; a category result
    /// never carries an empty feedback list.
    pub(crate) fallback_note: &'static str,
}

pub(crate) fn standard_set() -> Result<Vec<CategoryDefinition>, RubricError> {
    Ok(vec![
        logic_design()?,
        flowchart()?,
        pseudocode()?,
        formatting()?,
        documentation()?,
    ])
}

fn compile(raw: &[&str]) -> Result<Vec<Regex>, RubricError> {
    raw.iter()
        .map(|pattern| Regex::new(pattern).map_err(RubricError::from))
        .collect()
}

fn logic_design() -> Result<CategoryDefinition, RubricError> {
    Ok(CategoryDefinition {
        category: Category::LogicDesign,
        weight: 30.0,
        criteria: &[
            "Problem understanding",
            "Solution correctness",
            "Algorithm efficiency",
            "Edge case handling",
        ],
        ceiling: 62.0,
        gate: ContentGate {
            min_trimmed_chars: 200,
            min_words: 40,
            min_unique_words: 25,
            min_lines: 5,
            note: "Insufficient meaningful content - needs at least 40+ words, 25+ unique words, 5+ lines",
        },
        signals: vec![
            Signal::Counted {
                keywords: &[
                    "problem", "objective", "goal", "requirement", "input", "output", "task",
                    "assignment", "question", "need", "ask",
                ],
                per_match: 3,
                cap: 12,
                note: "Problem understanding demonstrated",
            },
            Signal::Counted {
                keywords: &[
                    "algorithm", "solution", "approach", "method", "process", "steps",
                    "procedure", "way", "how",
                ],
                per_match: 3,
                cap: 10,
                note: "Solution approach identified",
            },
            Signal::Presence {
                keywords: &["if", "else", "when", "case"],
                points: 8,
                note: "Conditional logic present",
            },
            Signal::Presence {
                keywords: &[
                    "while", "for", "repeat", "loop", "iterate", "do while", "until", "each",
                ],
                points: 8,
                note: "Loop structures identified",
            },
            Signal::Counted {
                keywords: &[
                    "edge", "validation", "error", "check", "validate", "boundary",
                    "condition", "test",
                ],
                per_match: 3,
                cap: 8,
                note: "Edge case consideration present",
            },
            Signal::PatternPresence {
                patterns: compile(&[
                    r"(?i)\b[a-z_][a-z0-9_]*\s*=",
                    r"(?i)variable",
                    r"(?i)var\s",
                    r"(?i)data",
                    r"(?i)value",
                    r"(?i)store",
                ])?,
                points: 5,
                note: "Variable usage identified",
            },
            Signal::CharBonus {
                tiers: &[
                    Tier { min: 500, points: 8, note: Some("Comprehensive content") },
                    Tier { min: 300, points: 5, note: Some("Good content depth") },
                    Tier { min: 150, points: 3, note: Some("Adequate content") },
                ],
            },
            Signal::LineBonus {
                basis: LineBasis::Total,
                over: 10,
                points: 4,
                note: Some("Well-structured content"),
            },
        ],
        fallback_note: "Logic design could be more explicit",
    })
}

fn flowchart() -> Result<CategoryDefinition, RubricError> {
    Ok(CategoryDefinition {
        category: Category::Flowchart,
        weight: 25.0,
        criteria: &[
            "Proper symbol usage",
            "Clear flow direction",
            "Completeness",
            "Readability",
        ],
        ceiling: 41.0,
        gate: ContentGate {
            min_trimmed_chars: 0,
            min_words: 30,
            min_unique_words: 0,
            min_lines: 0,
            note: "Insufficient content - needs at least 30+ meaningful words",
        },
        signals: vec![
            Signal::Counted {
                keywords: &[
                    "flowchart", "flow chart", "diagram", "flow", "chart", "visual", "graph",
                    "figure",
                ],
                per_match: 3,
                cap: 8,
                note: "Flowchart/diagram present",
            },
            Signal::CountTiers {
                keywords: &[
                    "start", "end", "process", "decision", "input", "output", "step", "box",
                    "action",
                ],
                tiers: &[
                    Tier { min: 3, points: 12, note: Some("Good variety of flowchart symbols") },
                    Tier { min: 2, points: 8, note: Some("Basic flowchart symbols present") },
                    Tier { min: 1, points: 5, note: Some("Some flowchart elements present") },
                ],
            },
            Signal::Presence {
                keywords: &["arrow", "->", "=>", "direction", "next"],
                points: 5,
                note: "Flow direction indicated",
            },
            Signal::Presence {
                keywords: &["start", "begin"],
                points: 4,
                note: "Has starting point",
            },
            Signal::Presence {
                keywords: &["end", "stop"],
                points: 3,
                note: "Has ending point",
            },
            Signal::Presence {
                keywords: &["show", "display", "illustrate", "represent", "draw"],
                points: 5,
                note: "Visual representation described",
            },
            Signal::CharBonus {
                tiers: &[Tier { min: 200, points: 4, note: None }],
            },
        ],
        fallback_note: "Include clear flowchart with proper symbols",
    })
}

fn pseudocode() -> Result<CategoryDefinition, RubricError> {
    Ok(CategoryDefinition {
        category: Category::Pseudocode,
        weight: 25.0,
        criteria: &[
            "Syntax accuracy",
            "Logical structure",
            "Variable naming",
            "Clarity",
        ],
        ceiling: 44.0,
        gate: ContentGate {
            min_trimmed_chars: 0,
            min_words: 30,
            min_unique_words: 0,
            min_lines: 0,
            note: "Insufficient content - needs at least 30+ meaningful words",
        },
        signals: vec![
            Signal::Presence {
                keywords: &[
                    "pseudocode", "pseudo code", "pseudo", "code", "algorithm", "logic",
                    "program",
                ],
                points: 6,
                note: "Pseudocode section identified",
            },
            Signal::PairedKeywords {
                openers: &["begin", "start"],
                closers: &["end"],
                both_points: 8,
                both_note: "Proper pseudocode structure",
                either_points: 4,
                either_note: "Has structure keywords",
            },
            Signal::PatternCounted {
                patterns: compile(&[
                    r"(?i)\b[a-z_][a-z0-9_]*\s*=",
                    r"(?i)variable",
                    r"(?i)set\s",
                    r"(?i)let\s",
                    r"(?i)get\s",
                ])?,
                per_match: 3,
                cap: 8,
                note: "Variable usage present",
            },
            Signal::Indentation {
                full_points: 6,
                partial_points: 3,
                note: "Good code structure",
            },
            Signal::Counted {
                keywords: &[
                    "if", "then", "else", "while", "for", "repeat", "loop", "do", "when",
                ],
                per_match: 3,
                cap: 8,
                note: "Control structures included",
            },
            Signal::LineBonus {
                basis: LineBasis::NonBlank,
                over: 5,
                points: 4,
                note: Some("Adequate code length"),
            },
            Signal::Presence {
                keywords: &[
                    "calculate", "compute", "determine", "find", "get", "set", "update",
                ],
                points: 5,
                note: "Logical operations present",
            },
        ],
        fallback_note: "Improve pseudocode clarity and structure",
    })
}

fn formatting() -> Result<CategoryDefinition, RubricError> {
    Ok(CategoryDefinition {
        category: Category::Formatting,
        weight: 10.0,
        criteria: &[
            "Organization",
            "Neatness",
            "Consistency",
            "Professional appearance",
        ],
        ceiling: 17.0,
        gate: ContentGate {
            min_trimmed_chars: 200,
            min_words: 40,
            min_unique_words: 0,
            min_lines: 0,
            note: "Insufficient content length - needs at least 40+ meaningful words",
        },
        signals: vec![
            Signal::HeaderLines {
                patterns: compile(&[
                    r"^[A-Z][A-Za-z\s]+:",
                    r"^#+\s+",
                    r"^\d+\.",
                    r"^[A-Z][A-Za-z\s]{3,}$",
                ])?,
                tiers: &[
                    Tier { min: 2, points: 4, note: Some("Well-organized with sections") },
                    Tier { min: 1, points: 3, note: Some("Some organization present") },
                ],
            },
            Signal::LineBonus {
                basis: LineBasis::NonBlank,
                over: 3,
                points: 3,
                note: Some("Good content structure"),
            },
            Signal::CharBonus {
                tiers: &[
                    Tier { min: 300, points: 4, note: Some("Good content length") },
                    Tier { min: 150, points: 3, note: Some("Adequate content length") },
                ],
            },
            Signal::CleanText {
                pattern: Regex::new(r"[a-z]{80,}")?,
                points: 3,
                note: "Professional appearance",
            },
            Signal::LineBonus {
                basis: LineBasis::NonBlank,
                over: 4,
                points: 3,
                note: Some("Shows adequate effort"),
            },
        ],
        fallback_note: "Improve document organization",
    })
}

fn documentation() -> Result<CategoryDefinition, RubricError> {
    Ok(CategoryDefinition {
        category: Category::Documentation,
        weight: 10.0,
        criteria: &["Comments quality", "Explanations", "Clarity", "Completeness"],
        ceiling: 16.0,
        gate: ContentGate {
            min_trimmed_chars: 0,
            min_words: 30,
            min_unique_words: 0,
            min_lines: 0,
            note: "Insufficient content for documentation - needs at least 30+ meaningful words",
        },
        signals: vec![
            Signal::Counted {
                keywords: &[
                    "//", "/*", "#", "comment", "note", "remarks", "explanation", "describe",
                ],
                per_match: 3,
                cap: 6,
                note: "Comments/documentation present",
            },
            Signal::Counted {
                keywords: &[
                    "explain", "description", "purpose", "because", "this will",
                    "in order to", "to", "function", "used for", "how", "why", "what",
                ],
                per_match: 2,
                cap: 6,
                note: "Explanations provided",
            },
            Signal::CharBonus {
                tiers: &[Tier { min: 200, points: 4, note: Some("Good documentation length") }],
            },
        ],
        fallback_note: "Add more comments and explanations",
    })
}
