//! The question walk used to collect observations.
//!
//! Steps and questions are static data. Whether a question is shown depends
//! only on earlier answers, expressed as a [`Visibility`] predicate over the
//! observation set.

use crate::observation::{ActionTiming, CheckId, ObservationSet};

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    YesNo,
    /// Pick one of the listed labels
    Choice(&'static [&'static str]),
}

/// When a question is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    /// Shown only once `check` has been answered with exactly this boolean
    When(CheckId, bool),
}

impl Visibility {
    pub fn is_visible(self, observations: &ObservationSet) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::When(check, expected) => observations.is(check, expected),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub check: CheckId,
    pub prompt: &'static str,
    pub answer: AnswerKind,
    pub visible_when: Visibility,
}

impl Question {
    pub fn is_visible(&self, observations: &ObservationSet) -> bool {
        self.visible_when.is_visible(observations)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub questions: &'static [Question],
}

const fn yes_no(check: CheckId, prompt: &'static str, visible_when: Visibility) -> Question {
    Question {
        check,
        prompt,
        answer: AnswerKind::YesNo,
        visible_when,
    }
}

static STEPS: [Step; 5] = [
    Step {
        id: "category_navigation",
        title: "Category Navigation",
        questions: &[
            yes_no(
                CheckId::DropdownDetected,
                "Did the agent detect the category dropdown menu?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::DropdownInteractionSuccess,
                "Did the agent open the dropdown successfully?",
                Visibility::When(CheckId::DropdownDetected, true),
            ),
            yes_no(
                CheckId::MenOptionClicked,
                "Did the agent click the \"Men\" option?",
                Visibility::When(CheckId::DropdownInteractionSuccess, true),
            ),
            Question {
                check: CheckId::ActionTiming,
                prompt: "How long did the agent wait before clicking the option?",
                answer: AnswerKind::Choice(ActionTiming::LABELS),
                visible_when: Visibility::When(CheckId::MenOptionClicked, true),
            },
            yes_no(
                CheckId::AgentSearchedInstead,
                "Did the agent use the search box instead of the menu?",
                Visibility::When(CheckId::MenOptionClicked, false),
            ),
        ],
    },
    Step {
        id: "subcategory_selection",
        title: "Subcategory Selection",
        questions: &[
            yes_no(
                CheckId::SubcategoryOptionsLoaded,
                "Did the subcategory options load?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::CorrectSubcategorySelected,
                "Did the agent select the correct subcategory (Shoes)?",
                Visibility::When(CheckId::SubcategoryOptionsLoaded, true),
            ),
        ],
    },
    Step {
        id: "brand_filter",
        title: "Brand Filter",
        questions: &[
            yes_no(
                CheckId::NikeFilterApplied,
                "Did the agent apply the Nike brand filter?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::ProductGridUpdated,
                "Did the product grid update after filtering?",
                Visibility::When(CheckId::NikeFilterApplied, true),
            ),
            yes_no(
                CheckId::ServerResponseError,
                "Did the server return an error for the filter request?",
                Visibility::When(CheckId::ProductGridUpdated, false),
            ),
        ],
    },
    Step {
        id: "price_comparison",
        title: "Price Comparison",
        questions: &[
            yes_no(
                CheckId::PriceElementsDetected,
                "Did the agent detect the price elements?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::PriceParsingSuccess,
                "Were the prices parsed correctly?",
                Visibility::When(CheckId::PriceElementsDetected, true),
            ),
            yes_no(
                CheckId::CorrectCheapestIdentified,
                "Did the agent identify the cheapest item correctly?",
                Visibility::When(CheckId::PriceParsingSuccess, true),
            ),
        ],
    },
    Step {
        id: "cart_and_checkout",
        title: "Cart & Checkout",
        questions: &[
            yes_no(
                CheckId::CorrectItemAdded,
                "Did the agent add the correct item to the cart?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::CheckoutElementsDetected,
                "Did the agent detect the checkout elements?",
                Visibility::Always,
            ),
            yes_no(
                CheckId::CheckoutInteractionSuccess,
                "Did the agent complete the checkout interaction?",
                Visibility::When(CheckId::CheckoutElementsDetected, true),
            ),
        ],
    },
];

pub fn steps() -> &'static [Step] {
    &STEPS
}

pub fn questions() -> impl Iterator<Item = &'static Question> {
    STEPS.iter().flat_map(|step| step.questions.iter())
}

pub fn question(check: CheckId) -> Option<&'static Question> {
    questions().find(|question| question.check == check)
}

/// Questions currently shown, in schema order
pub fn visible_questions(
    observations: &ObservationSet,
) -> impl Iterator<Item = &'static Question> + '_ {
    questions().filter(move |question| question.is_visible(observations))
}

/// The first visible question that has no answer yet
pub fn next_unanswered(observations: &ObservationSet) -> Option<&'static Question> {
    visible_questions(observations).find(|question| !observations.is_set(question.check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::ValueKind;

    #[test]
    fn test_every_check_asked_exactly_once() {
        for check in CheckId::ALL {
            let count = questions().filter(|q| q.check == check).count();
            assert_eq!(count, 1, "{check} appears {count} times");
        }
    }

    #[test]
    fn test_answer_kind_matches_declared_kind() {
        for question in questions() {
            match (question.answer, question.check.kind()) {
                (AnswerKind::YesNo, ValueKind::Flag) => {}
                (AnswerKind::Choice(a), ValueKind::Choice(b)) => assert_eq!(a, b),
                other => panic!("{} has mismatched kinds: {other:?}", question.check),
            }
        }
    }

    #[test]
    fn test_visibility_follows_prior_answers() {
        let obs = ObservationSet::new();
        assert!(!question(CheckId::DropdownInteractionSuccess)
            .unwrap()
            .is_visible(&obs));

        let obs = obs.with(CheckId::DropdownDetected, true);
        assert!(question(CheckId::DropdownInteractionSuccess)
            .unwrap()
            .is_visible(&obs));

        let obs = ObservationSet::new()
            .with(CheckId::DropdownDetected, true)
            .with(CheckId::DropdownInteractionSuccess, true)
            .with(CheckId::MenOptionClicked, false);
        let visible: Vec<CheckId> = visible_questions(&obs).map(|q| q.check).collect();
        assert!(visible.contains(&CheckId::AgentSearchedInstead));
        assert!(!visible.contains(&CheckId::ActionTiming));
    }

    #[test]
    fn test_next_unanswered_walks_in_order() {
        let obs = ObservationSet::new();
        assert_eq!(
            next_unanswered(&obs).map(|q| q.check),
            Some(CheckId::DropdownDetected)
        );

        // A "no" hides the follow-up, so the walk jumps to the next step.
        let obs = obs.with(CheckId::DropdownDetected, false);
        assert_eq!(
            next_unanswered(&obs).map(|q| q.check),
            Some(CheckId::SubcategoryOptionsLoaded)
        );
    }
}
