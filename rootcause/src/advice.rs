//! Framework-specific remediation advice.

use crate::context::{Context, Framework};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Groups failure categories for the purpose of picking advice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureFamily {
    DomParsing,
    DynamicRendering,
    Interaction,
}

impl FailureFamily {
    pub const ALL: [FailureFamily; 3] = [
        FailureFamily::DomParsing,
        FailureFamily::DynamicRendering,
        FailureFamily::Interaction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FailureFamily::DomParsing => "dom_parsing",
            FailureFamily::DynamicRendering => "dynamic_rendering",
            FailureFamily::Interaction => "interaction",
        }
    }
}

impl fmt::Display for FailureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static ADVICE_TABLE: LazyLock<BTreeMap<(Framework, FailureFamily), &'static str>> =
    LazyLock::new(|| {
        use FailureFamily::*;
        use Framework::*;

        [
            // React
            (
                (React, DomParsing),
                "Use React Testing Library queries or React-specific selectors",
            ),
            (
                (React, DynamicRendering),
                "Wait for React state updates and re-renders to settle before reading the DOM",
            ),
            (
                (React, Interaction),
                "Fire React synthetic events or interact through rendered controls rather than raw DOM mutation",
            ),
            // Vue
            (
                (Vue, DomParsing),
                "Target Vue component refs or data attributes instead of generated class names",
            ),
            (
                (Vue, DynamicRendering),
                "Use Vue reactivity system and $nextTick for DOM updates",
            ),
            (
                (Vue, Interaction),
                "Dispatch the input and change events that Vue v-model and v-on listeners observe",
            ),
            // Angular
            (
                (Angular, DomParsing),
                "Query Angular component selectors and avoid generated _ngcontent attributes",
            ),
            (
                (Angular, DynamicRendering),
                "Wait for Angular zone stability and change detection before inspecting the DOM",
            ),
            (
                (Angular, Interaction),
                "Interact after Angular change detection has bound the element's event handlers",
            ),
            // jQuery
            (
                (JQuery, DomParsing),
                "Use selectors that match the page's jQuery markup conventions",
            ),
            (
                (JQuery, DynamicRendering),
                "Wait for pending jQuery AJAX requests ($.active === 0) before inspecting results",
            ),
            (
                (JQuery, Interaction),
                "Trigger delegated handlers with jQuery .trigger() instead of synthetic DOM clicks",
            ),
            // Bootstrap
            (
                (Bootstrap, DomParsing),
                "Locate Bootstrap components by data-bs-* attributes and ARIA roles",
            ),
            (
                (Bootstrap, DynamicRendering),
                "Wait for Bootstrap transition events such as shown.bs.dropdown to complete",
            ),
            (
                (Bootstrap, Interaction),
                "Open Bootstrap dropdowns through their toggle button before selecting an item",
            ),
            // Tailwind
            (
                (Tailwind, DomParsing),
                "Avoid utility-class selectors and rely on semantic roles, text or data attributes",
            ),
            (
                (Tailwind, DynamicRendering),
                "Wait for CSS transitions and visibility utility changes to settle",
            ),
            (
                (Tailwind, Interaction),
                "Check that hidden, group and peer utility states expose the element before clicking",
            ),
            // Vanilla
            (
                (Vanilla, DomParsing),
                "Use stable IDs, semantic HTML and ARIA attributes for selection",
            ),
            (
                (Vanilla, DynamicRendering),
                "Wait for DOM mutations to settle before reading updated content",
            ),
            (
                (Vanilla, Interaction),
                "Dispatch native click, input and change events in the order a user would",
            ),
        ]
        .into_iter()
        .collect()
    });

/// Advice for `family` under `context`, or `None` for an unrecognized context.
pub fn lookup(context: &Context, family: FailureFamily) -> Option<&'static str> {
    let framework = context.framework()?;
    ADVICE_TABLE.get(&(framework, family)).copied()
}
