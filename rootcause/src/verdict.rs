//! Verdict types produced by the classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level reason an automated browsing task failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "DOM Parsing Failure")]
    DomParsing,
    #[serde(rename = "Element Interaction Failure")]
    ElementInteraction,
    #[serde(rename = "Dynamic Content Failure")]
    DynamicContent,
    #[serde(rename = "Agent Reasoning Failure")]
    AgentReasoning,
    #[serde(rename = "Website State Failure")]
    WebsiteState,
    #[serde(rename = "Success")]
    Success,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::DomParsing => "DOM Parsing Failure",
            Category::ElementInteraction => "Element Interaction Failure",
            Category::DynamicContent => "Dynamic Content Failure",
            Category::AgentReasoning => "Agent Reasoning Failure",
            Category::WebsiteState => "Website State Failure",
            Category::Success => "Success",
        }
    }

    pub fn is_failure(self) -> bool {
        self != Category::Success
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one classification call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub category: Category,
    /// Specific cause within the category
    pub subcategory: String,
    /// General fix, independent of framework
    pub recommendation: String,
    pub framework_specific: Option<String>,
}

impl Verdict {
    pub const SUCCESS_SUBCATEGORY: &'static str = "All Steps Completed Successfully";
    pub const SUCCESS_RECOMMENDATION: &'static str = "No action needed";

    /// The terminal "nothing went wrong" verdict. Never carries advice.
    pub fn success() -> Self {
        Self {
            category: Category::Success,
            subcategory: Self::SUCCESS_SUBCATEGORY.to_string(),
            recommendation: Self::SUCCESS_RECOMMENDATION.to_string(),
            framework_specific: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.category == Category::Success
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.subcategory)
    }
}
