use serde::{Deserialize, Serialize};
use std::fmt;

/// Front-end frameworks with dedicated remediation advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Framework {
    React,
    Vue,
    Angular,
    JQuery,
    Bootstrap,
    Tailwind,
    Vanilla,
}

impl Framework {
    pub const ALL: [Framework; 7] = [
        Framework::React,
        Framework::Vue,
        Framework::Angular,
        Framework::JQuery,
        Framework::Bootstrap,
        Framework::Tailwind,
        Framework::Vanilla,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Vue => "Vue",
            Framework::Angular => "Angular",
            Framework::JQuery => "jQuery",
            Framework::Bootstrap => "Bootstrap",
            Framework::Tailwind => "Tailwind",
            Framework::Vanilla => "Vanilla",
        }
    }

    /// Exact lookup by display name
    pub fn from_name(name: &str) -> Option<Framework> {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.name() == name)
    }

    /// A framework whose name differs from `name` only in case or
    /// surrounding whitespace. Never used for advice lookup.
    pub fn near_miss(name: &str) -> Option<Framework> {
        let trimmed = name.trim();
        Framework::ALL.into_iter().find(|framework| {
            framework.name() != name && framework.name().eq_ignore_ascii_case(trimmed)
        })
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The framework the diagnosed page was built with.
///
/// Only affects which advice accompanies a verdict, never the category.
/// Names outside the modelled set are kept as-is so they can be echoed back.
/// A review started without naming a framework is `Unset`, which gets no
/// advice, same as an unrecognized name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Context {
    #[default]
    Unset,
    Framework(Framework),
    Unrecognized(String),
}

impl Context {
    pub fn framework(&self) -> Option<Framework> {
        match self {
            Context::Framework(framework) => Some(*framework),
            Context::Unset | Context::Unrecognized(_) => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Context::Unset)
    }

    /// The name as given; empty when unset
    pub fn name(&self) -> &str {
        match self {
            Context::Unset => "",
            Context::Framework(framework) => framework.name(),
            Context::Unrecognized(name) => name,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Unset => f.write_str("unset"),
            other => f.write_str(other.name()),
        }
    }
}

impl From<Framework> for Context {
    fn from(framework: Framework) -> Self {
        Context::Framework(framework)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Context::Unset;
        }
        match Framework::from_name(s) {
            Some(framework) => Context::Framework(framework),
            None => Context::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Context::from(s.as_str())
    }
}

impl From<Context> for String {
    fn from(context: Context) -> Self {
        context.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_parse_exactly() {
        assert_eq!(Context::from("React"), Context::Framework(Framework::React));
        assert_eq!(Context::from("jQuery"), Context::Framework(Framework::JQuery));
        assert_eq!(
            Context::from("react"),
            Context::Unrecognized("react".to_string())
        );
        assert_eq!(
            Context::from(" TAILWIND "),
            Context::Unrecognized(" TAILWIND ".to_string())
        );
    }

    #[test]
    fn test_near_miss_suggests_canonical_spelling() {
        assert_eq!(Framework::near_miss("react"), Some(Framework::React));
        assert_eq!(Framework::near_miss(" jquery "), Some(Framework::JQuery));
        assert_eq!(Framework::near_miss("React"), None);
        assert_eq!(Framework::near_miss("Svelte"), None);
    }

    #[test]
    fn test_default_is_unset() {
        let context = Context::default();
        assert!(context.is_unset());
        assert_eq!(context.framework(), None);
        assert_eq!(context.to_string(), "unset");
        assert_eq!(Context::from(""), Context::Unset);
    }

    #[test]
    fn test_unknown_names_are_kept() {
        let context = Context::from("Svelte");
        assert_eq!(context, Context::Unrecognized("Svelte".to_string()));
        assert_eq!(context.framework(), None);
        assert_eq!(context.to_string(), "Svelte");
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Context::from(Framework::JQuery)).unwrap();
        assert_eq!(json, "\"jQuery\"");
        let back: Context = serde_json::from_str("\"Angular\"").unwrap();
        assert_eq!(back, Context::Framework(Framework::Angular));
    }
}
