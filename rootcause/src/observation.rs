//! Observations collected while reviewing a failed agent run.
//!
//! Each check in the dropdown shopping flow is answered at most once per
//! session (re-answering overwrites). A check that has not been answered is
//! simply absent, which is a third state next to `true` and `false`.

use crate::errors::RootCauseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifies one check of the shopping-flow review.
///
/// Variants are declared in workflow order, so `Ord` follows the order in
/// which the agent encounters each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    DropdownDetected,
    DropdownInteractionSuccess,
    MenOptionClicked,
    ActionTiming,
    AgentSearchedInstead,
    SubcategoryOptionsLoaded,
    CorrectSubcategorySelected,
    NikeFilterApplied,
    ProductGridUpdated,
    ServerResponseError,
    PriceElementsDetected,
    PriceParsingSuccess,
    CorrectCheapestIdentified,
    CorrectItemAdded,
    CheckoutElementsDetected,
    CheckoutInteractionSuccess,
}

impl CheckId {
    pub const ALL: [CheckId; 16] = [
        CheckId::DropdownDetected,
        CheckId::DropdownInteractionSuccess,
        CheckId::MenOptionClicked,
        CheckId::ActionTiming,
        CheckId::AgentSearchedInstead,
        CheckId::SubcategoryOptionsLoaded,
        CheckId::CorrectSubcategorySelected,
        CheckId::NikeFilterApplied,
        CheckId::ProductGridUpdated,
        CheckId::ServerResponseError,
        CheckId::PriceElementsDetected,
        CheckId::PriceParsingSuccess,
        CheckId::CorrectCheapestIdentified,
        CheckId::CorrectItemAdded,
        CheckId::CheckoutElementsDetected,
        CheckId::CheckoutInteractionSuccess,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::DropdownDetected => "dropdown_detected",
            CheckId::DropdownInteractionSuccess => "dropdown_interaction_success",
            CheckId::MenOptionClicked => "men_option_clicked",
            CheckId::ActionTiming => "action_timing",
            CheckId::AgentSearchedInstead => "agent_searched_instead",
            CheckId::SubcategoryOptionsLoaded => "subcategory_options_loaded",
            CheckId::CorrectSubcategorySelected => "correct_subcategory_selected",
            CheckId::NikeFilterApplied => "nike_filter_applied",
            CheckId::ProductGridUpdated => "product_grid_updated",
            CheckId::ServerResponseError => "server_response_error",
            CheckId::PriceElementsDetected => "price_elements_detected",
            CheckId::PriceParsingSuccess => "price_parsing_success",
            CheckId::CorrectCheapestIdentified => "correct_cheapest_identified",
            CheckId::CorrectItemAdded => "correct_item_added",
            CheckId::CheckoutElementsDetected => "checkout_elements_detected",
            CheckId::CheckoutInteractionSuccess => "checkout_interaction_success",
        }
    }

    /// The value kind a well-formed answer to this check has.
    pub fn kind(self) -> ValueKind {
        match self {
            CheckId::ActionTiming => ValueKind::Choice(ActionTiming::LABELS),
            _ => ValueKind::Flag,
        }
    }

    /// Checks that `value` has this check's declared kind and, for
    /// enumerated checks, that it is one of the allowed labels.
    pub fn validate(self, value: &Observed) -> Result<(), RootCauseError> {
        match (self.kind(), value) {
            (ValueKind::Flag, Observed::Flag(_)) => Ok(()),
            (ValueKind::Choice(labels), Observed::Choice(label)) => {
                if labels.contains(&label.as_str()) {
                    Ok(())
                } else {
                    Err(RootCauseError::InvalidValue {
                        check: self.to_string(),
                        reason: format!(
                            "'{label}' is not one of: {}",
                            labels
                                .iter()
                                .map(|l| format!("'{l}'"))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    })
                }
            }
            (ValueKind::Flag, Observed::Choice(label)) => Err(RootCauseError::InvalidValue {
                check: self.to_string(),
                reason: format!("expected a boolean, got '{label}'"),
            }),
            (ValueKind::Choice(_), Observed::Flag(flag)) => Err(RootCauseError::InvalidValue {
                check: self.to_string(),
                reason: format!("expected one of the timing labels, got {flag}"),
            }),
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckId {
    type Err = RootCauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        CheckId::ALL
            .into_iter()
            .find(|check| check.as_str() == key)
            .ok_or_else(|| RootCauseError::UnknownCheck(key.to_string()))
    }
}

/// Declared kind of a check's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Flag,
    Choice(&'static [&'static str]),
}

/// How long the agent waited between opening the menu and clicking an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTiming {
    #[serde(rename = "< 500ms (too fast)")]
    TooFast,
    #[serde(rename = "500ms - 2s (normal)")]
    Normal,
    #[serde(rename = "> 2s (slow)")]
    Slow,
}

impl ActionTiming {
    pub const LABELS: &'static [&'static str] =
        &["< 500ms (too fast)", "500ms - 2s (normal)", "> 2s (slow)"];

    pub fn label(self) -> &'static str {
        match self {
            ActionTiming::TooFast => Self::LABELS[0],
            ActionTiming::Normal => Self::LABELS[1],
            ActionTiming::Slow => Self::LABELS[2],
        }
    }
}

impl fmt::Display for ActionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionTiming {
    type Err = RootCauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "< 500ms (too fast)" => Ok(ActionTiming::TooFast),
            "500ms - 2s (normal)" => Ok(ActionTiming::Normal),
            "> 2s (slow)" => Ok(ActionTiming::Slow),
            other => Err(RootCauseError::InvalidValue {
                check: CheckId::ActionTiming.to_string(),
                reason: format!("unknown timing label '{other}'"),
            }),
        }
    }
}

/// A recorded answer. Booleans and enumerated labels share one key space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observed {
    Flag(bool),
    Choice(String),
}

impl From<bool> for Observed {
    fn from(flag: bool) -> Self {
        Observed::Flag(flag)
    }
}

impl From<&str> for Observed {
    fn from(label: &str) -> Self {
        Observed::Choice(label.to_string())
    }
}

impl From<String> for Observed {
    fn from(label: String) -> Self {
        Observed::Choice(label)
    }
}

impl From<ActionTiming> for Observed {
    fn from(timing: ActionTiming) -> Self {
        Observed::Choice(timing.label().to_string())
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Flag(flag) => write!(f, "{flag}"),
            Observed::Choice(label) => write!(f, "\"{label}\""),
        }
    }
}

/// The answers recorded so far for one review session.
///
/// Serializes as a flat object of check identifier to `bool` or label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationSet {
    entries: BTreeMap<CheckId, Observed>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`ObservationSet::record`].
    pub fn with(mut self, check: CheckId, value: impl Into<Observed>) -> Self {
        self.record(check, value);
        self
    }

    /// Binds `check` to `value`, replacing any earlier answer.
    ///
    /// The value's kind is not checked; an ill-typed answer is stored as is
    /// and later compares unequal to everything the classifier asks for.
    pub fn record(&mut self, check: CheckId, value: impl Into<Observed>) -> &mut Self {
        self.entries.insert(check, value.into());
        self
    }

    /// Like [`ObservationSet::record`], but rejects values that do not match
    /// the check's declared kind. The set is left untouched on error.
    pub fn try_record(
        &mut self,
        check: CheckId,
        value: impl Into<Observed>,
    ) -> Result<&mut Self, RootCauseError> {
        let value = value.into();
        check.validate(&value)?;
        self.entries.insert(check, value);
        Ok(self)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, check: CheckId) -> Option<&Observed> {
        self.entries.get(&check)
    }

    pub fn is_set(&self, check: CheckId) -> bool {
        self.entries.contains_key(&check)
    }

    /// The boolean answer for `check`, or `None` when unset or not a boolean.
    pub fn flag(&self, check: CheckId) -> Option<bool> {
        match self.entries.get(&check) {
            Some(Observed::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// True only when `check` holds exactly the boolean `expected`.
    pub fn is(&self, check: CheckId, expected: bool) -> bool {
        self.flag(check) == Some(expected)
    }

    pub fn action_timing(&self) -> Option<ActionTiming> {
        match self.entries.get(&CheckId::ActionTiming) {
            Some(Observed::Choice(label)) => label.parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded answers in workflow order.
    pub fn iter(&self) -> impl Iterator<Item = (CheckId, &Observed)> {
        self.entries.iter().map(|(check, value)| (*check, value))
    }
}

impl FromIterator<(CheckId, Observed)> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = (CheckId, Observed)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
