//! Root-cause classification for the dropdown shopping flow.
//!
//! The classifier walks an ordered table of guards and stops at the first
//! one whose condition holds. Guards are listed in the order the agent meets
//! the corresponding steps, so an upstream failure always preempts anything
//! it might have caused further down the flow. When no guard matches the run
//! is reported as a success.

use crate::advice::{self, FailureFamily};
use crate::context::Context;
use crate::observation::{ActionTiming, CheckId, ObservationSet};
use crate::verdict::{Category, Verdict};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// One ordered predicate of the cascade and the verdict it produces.
pub struct Guard {
    /// Stable snake_case identifier, used in logs and diagnoses
    pub name: &'static str,
    pub category: Category,
    pub subcategory: &'static str,
    pub recommendation: &'static str,
    /// Advice family, if this guard carries framework-specific advice
    pub family: Option<FailureFamily>,
    condition: fn(&ObservationSet) -> bool,
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl Guard {
    pub fn matches(&self, observations: &ObservationSet) -> bool {
        (self.condition)(observations)
    }

    pub fn verdict(&self, context: &Context) -> Verdict {
        Verdict {
            category: self.category,
            subcategory: self.subcategory.to_string(),
            recommendation: self.recommendation.to_string(),
            framework_specific: self
                .family
                .and_then(|family| advice::lookup(context, family))
                .map(str::to_string),
        }
    }
}

/// The cascade, highest precedence first.
pub static GUARDS: [Guard; 14] = [
    Guard {
        name: "dropdown_not_detected",
        category: Category::DomParsing,
        subcategory: "Dropdown Menu Not Detected",
        recommendation:
            "Improve DOM parsing to recognize custom dropdown components and ARIA menu roles",
        family: Some(FailureFamily::DomParsing),
        condition: |o| o.is(CheckId::DropdownDetected, false),
    },
    Guard {
        name: "dropdown_interaction_failed",
        category: Category::ElementInteraction,
        subcategory: "Dropdown Interaction Failed",
        recommendation:
            "Use explicit hover and click sequences and verify the menu expands before selecting",
        family: Some(FailureFamily::Interaction),
        condition: |o| {
            o.is(CheckId::DropdownDetected, true)
                && o.is(CheckId::DropdownInteractionSuccess, false)
        },
    },
    Guard {
        name: "searched_instead_of_navigating",
        category: Category::DynamicContent,
        subcategory: "Agent Used Search Instead of Navigation",
        recommendation:
            "Ensure dropdown content is rendered before the agent falls back to search",
        family: Some(FailureFamily::DynamicRendering),
        condition: |o| {
            o.is(CheckId::MenOptionClicked, false) && o.is(CheckId::AgentSearchedInstead, true)
        },
    },
    Guard {
        name: "clicked_before_render",
        category: Category::DynamicContent,
        subcategory: "Action Performed Before Menu Rendered",
        recommendation: "Wait for dropdown options to become visible before clicking",
        family: Some(FailureFamily::DynamicRendering),
        condition: |o| {
            o.is(CheckId::MenOptionClicked, true)
                && o.action_timing() == Some(ActionTiming::TooFast)
        },
    },
    Guard {
        name: "wrong_subcategory",
        category: Category::AgentReasoning,
        subcategory: "Wrong Subcategory Selected",
        recommendation: "Improve the agent's task understanding and category matching",
        family: None,
        condition: |o| o.is(CheckId::CorrectSubcategorySelected, false),
    },
    Guard {
        name: "subcategory_options_missing",
        category: Category::DynamicContent,
        subcategory: "Subcategory Options Not Loaded",
        recommendation: "Wait for asynchronously loaded subcategory options before continuing",
        family: Some(FailureFamily::DynamicRendering),
        condition: |o| o.is(CheckId::SubcategoryOptionsLoaded, false),
    },
    Guard {
        name: "filter_server_error",
        category: Category::WebsiteState,
        subcategory: "Server Error on Filter Request",
        recommendation: "Retry the filter request and report the server-side error",
        family: None,
        condition: |o| {
            o.is(CheckId::NikeFilterApplied, true)
                && o.is(CheckId::ProductGridUpdated, false)
                && o.is(CheckId::ServerResponseError, true)
        },
    },
    Guard {
        name: "product_grid_stale",
        category: Category::DynamicContent,
        subcategory: "Product Grid Did Not Refresh",
        recommendation: "Wait for the product grid to re-render after applying filters",
        family: Some(FailureFamily::DynamicRendering),
        // Unset or ill-typed `server_response_error` counts as "not true".
        condition: |o| {
            o.is(CheckId::NikeFilterApplied, true)
                && o.is(CheckId::ProductGridUpdated, false)
                && !o.is(CheckId::ServerResponseError, true)
        },
    },
    Guard {
        name: "price_parsing_failed",
        category: Category::DomParsing,
        subcategory: "Price Parsing Failed",
        recommendation:
            "Normalize price formats, currency symbols and sale prices before comparing",
        family: Some(FailureFamily::DomParsing),
        condition: |o| {
            o.is(CheckId::PriceElementsDetected, true) && o.is(CheckId::PriceParsingSuccess, false)
        },
    },
    Guard {
        name: "price_elements_missing",
        category: Category::DomParsing,
        subcategory: "Price Elements Not Detected",
        recommendation: "Improve extraction of price elements from product cards",
        family: Some(FailureFamily::DomParsing),
        condition: |o| o.is(CheckId::PriceElementsDetected, false),
    },
    Guard {
        name: "wrong_cheapest_item",
        category: Category::AgentReasoning,
        subcategory: "Incorrect Cheapest Item Identified",
        recommendation: "Verify numeric comparison logic and consider every listed product",
        family: None,
        condition: |o| o.is(CheckId::CorrectCheapestIdentified, false),
    },
    Guard {
        name: "wrong_item_added",
        category: Category::AgentReasoning,
        subcategory: "Wrong Item Added to Cart",
        recommendation:
            "Confirm the selected product matches the identified item before adding it to the cart",
        family: None,
        condition: |o| o.is(CheckId::CorrectItemAdded, false),
    },
    Guard {
        name: "checkout_elements_missing",
        category: Category::DomParsing,
        subcategory: "Checkout Elements Not Detected",
        recommendation:
            "Improve detection of cart and checkout controls, including modals and overlays",
        family: Some(FailureFamily::DomParsing),
        condition: |o| o.is(CheckId::CheckoutElementsDetected, false),
    },
    Guard {
        name: "checkout_interaction_failed",
        category: Category::ElementInteraction,
        subcategory: "Checkout Interaction Failed",
        recommendation:
            "Dismiss blocking overlays and confirm the checkout button is enabled before clicking",
        family: Some(FailureFamily::Interaction),
        condition: |o| {
            o.is(CheckId::CheckoutElementsDetected, true)
                && o.is(CheckId::CheckoutInteractionSuccess, false)
        },
    },
];

/// Returns the first item satisfying `predicate` together with its index.
///
/// Items after the match are never passed to `predicate`.
pub fn first_match<T, F>(items: &[T], mut predicate: F) -> Option<(usize, &T)>
where
    F: FnMut(&T) -> bool,
{
    items.iter().enumerate().find(|(_, item)| predicate(item))
}

/// The guard that decided a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchedGuard {
    /// 1-based position in the cascade
    pub number: usize,
    pub name: &'static str,
}

/// A verdict plus the guard that produced it (`None` for success)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub verdict: Verdict,
    pub guard: Option<MatchedGuard>,
}

/// Classifies a run. Total and pure: every input yields exactly one verdict.
pub fn classify(observations: &ObservationSet, context: &Context) -> Verdict {
    diagnose(observations, context).verdict
}

#[instrument(level = "debug", skip(observations), fields(answered = observations.len()))]
pub fn diagnose(observations: &ObservationSet, context: &Context) -> Diagnosis {
    match first_match(&GUARDS, |guard| guard.matches(observations)) {
        Some((index, guard)) => {
            debug!(
                guard = guard.name,
                number = index + 1,
                category = %guard.category,
                "guard matched"
            );
            Diagnosis {
                verdict: guard.verdict(context),
                guard: Some(MatchedGuard {
                    number: index + 1,
                    name: guard.name,
                }),
            }
        }
        None => {
            debug!("no guard matched, reporting success");
            Diagnosis {
                verdict: Verdict::success(),
                guard: None,
            }
        }
    }
}
