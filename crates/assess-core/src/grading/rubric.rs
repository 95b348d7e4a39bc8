use serde::{Deserialize, Serialize};

use super::categories::{self, CategoryDefinition};

/// Fixed category identity so a typo cannot silently create an unscored
/// bucket the way free-form string keys can.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LogicDesign,
    Flowchart,
    Pseudocode,
    Formatting,
    Documentation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::LogicDesign,
        Category::Flowchart,
        Category::Pseudocode,
        Category::Formatting,
        Category::Documentation,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Category::LogicDesign => "logic_design",
            Category::Flowchart => "flowchart",
            Category::Pseudocode => "pseudocode",
            Category::Formatting => "formatting",
            Category::Documentation => "documentation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::LogicDesign => "Logic Design",
            Category::Flowchart => "Flowchart",
            Category::Pseudocode => "Pseudocode",
            Category::Formatting => "Formatting",
            Category::Documentation => "Documentation",
        }
    }
}

/// Error raised while constructing a rubric.
#[derive(Debug, thiserror::Error)]
pub enum RubricError {
    #[error("rubric weights must sum to 100, got {0}")]
    InvalidWeights(f64),
    #[error("invalid signal pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Immutable scoring configuration: five categories, each with a weight,
/// criteria labels, a content gate, a signal list, and a raw-score ceiling.
/// Loaded once at startup and shared read-only across evaluations.
pub struct Rubric {
    categories: Vec<CategoryDefinition>,
}

impl Rubric {
    /// The standard programming-logic rubric (30/25/25/10/10).
    pub fn standard() -> Result<Self, RubricError> {
        Self::new(categories::standard_set()?)
    }

    pub(crate) fn new(categories: Vec<CategoryDefinition>) -> Result<Self, RubricError> {
        let total: f64 = categories.iter().map(|c| c.weight).sum();
        if (total - 100.0).abs() > f64::EPSILON {
            return Err(RubricError::InvalidWeights(total));
        }
        Ok(Self { categories })
    }

    pub(crate) fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Criteria labels for one category, used only when rendering reports.
    pub fn criteria(&self, category: Category) -> &'static [&'static str] {
        self.categories
            .iter()
            .find(|definition| definition.category == category)
            .map(|definition| definition.criteria)
            .unwrap_or(&[])
    }
}
