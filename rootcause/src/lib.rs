//! Root-cause triage for failed browser-agent runs
//!
//! A reviewer answers a fixed set of yes/no and timing questions about what
//! an automated agent did on a shopping site. The answers form an
//! [`ObservationSet`], and [`classify`] turns that set plus the page's
//! front-end framework into exactly one [`Verdict`]: which part of the run
//! broke, why, and what to change.
//!
//! ```
//! use rootcause::{classify, CheckId, Context, ObservationSet};
//!
//! let observations = ObservationSet::new().with(CheckId::DropdownDetected, false);
//! let verdict = classify(&observations, &Context::from("React"));
//! assert_eq!(verdict.category.label(), "DOM Parsing Failure");
//! ```

pub mod advice;
pub mod classifier;
pub mod context;
pub mod errors;
pub mod observation;
pub mod review;
pub mod schema;
pub mod session;
#[cfg(test)]
mod tests;
pub mod verdict;

pub use advice::FailureFamily;
pub use classifier::{classify, diagnose, Diagnosis, MatchedGuard};
pub use context::{Context, Framework};
pub use errors::RootCauseError;
pub use observation::{ActionTiming, CheckId, ObservationSet, Observed, ValueKind};
pub use review::{ReviewSummary, SearchTaskRecord};
pub use schema::{AnswerKind, Question, Step, Visibility};
pub use session::Session;
pub use verdict::{Category, Verdict};
