use crate::classifier::{self, Diagnosis};
use crate::context::Context;
use crate::errors::RootCauseError;
use crate::observation::{CheckId, ObservationSet, Observed};
use crate::schema::{self, Question};
use crate::verdict::Verdict;
use tracing::{debug, info};

/// One review of one agent run: a fixed context plus the answers so far.
///
/// Every recorded answer re-runs the classifier, so callers always have an
/// up-to-date verdict to show. Note that an incomplete walk with no failing
/// answer still classifies as success; use [`Session::is_complete`] to tell
/// the two apart.
#[derive(Debug, Clone, Default)]
pub struct Session {
    context: Context,
    observations: ObservationSet,
}

impl Session {
    pub fn new(context: impl Into<Context>) -> Self {
        Self {
            context: context.into(),
            observations: ObservationSet::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn observations(&self) -> &ObservationSet {
        &self.observations
    }

    /// Records an answer without validating its kind and re-classifies.
    pub fn record(&mut self, check: CheckId, value: impl Into<Observed>) -> Verdict {
        let value = value.into();
        debug!(%check, %value, "recording answer");
        self.observations.record(check, value);
        self.verdict()
    }

    /// Strict variant of [`Session::record`].
    pub fn try_record(
        &mut self,
        check: CheckId,
        value: impl Into<Observed>,
    ) -> Result<Verdict, RootCauseError> {
        let value = value.into();
        debug!(%check, %value, "recording answer (strict)");
        self.observations.try_record(check, value)?;
        Ok(self.verdict())
    }

    pub fn verdict(&self) -> Verdict {
        classifier::classify(&self.observations, &self.context)
    }

    pub fn diagnosis(&self) -> Diagnosis {
        classifier::diagnose(&self.observations, &self.context)
    }

    /// Final classification, reported when the reviewer is done.
    pub fn finish(&self) -> Verdict {
        let verdict = self.verdict();
        info!(
            context = %self.context,
            answered = self.observations.len(),
            complete = self.is_complete(),
            category = %verdict.category,
            "review finished"
        );
        verdict
    }

    pub fn next_question(&self) -> Option<&'static Question> {
        schema::next_unanswered(&self.observations)
    }

    /// True once every currently visible question has an answer.
    pub fn is_complete(&self) -> bool {
        self.next_question().is_none()
    }

    /// Drops all answers. The context is kept.
    pub fn restart(&mut self) {
        debug!(context = %self.context, "restarting review");
        self.observations.reset();
    }
}
