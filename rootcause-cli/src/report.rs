use colored::*;
use rootcause::review::{ReviewSummary, SearchTaskRecord};
use rootcause::schema::{self, AnswerKind};
use rootcause::{Category, Context, Diagnosis, MatchedGuard, ObservationSet, Verdict};
use serde::Serialize;

/// Machine-readable classification output
#[derive(Debug, Serialize)]
pub struct VerdictReport<'a> {
    /// `null` when no framework was named
    #[serde(serialize_with = "serialize_context")]
    pub context: &'a Context,
    pub answered: usize,
    /// Whether every visible question had an answer
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<MatchedGuard>,
    pub verdict: &'a Verdict,
}

impl<'a> VerdictReport<'a> {
    pub fn new(diagnosis: &'a Diagnosis, context: &'a Context, observations: &ObservationSet) -> Self {
        Self {
            context,
            answered: observations.len(),
            complete: schema::next_unanswered(observations).is_none(),
            guard: diagnosis.guard,
            verdict: &diagnosis.verdict,
        }
    }
}

fn serialize_context<S: serde::Serializer>(
    context: &&Context,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if context.is_unset() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(*context)
    }
}

fn category_badge(category: Category) -> ColoredString {
    match category {
        Category::Success => "✅ SUCCESS:".green().bold(),
        Category::WebsiteState => "🌐 WEBSITE:".yellow().bold(),
        Category::AgentReasoning => "🧠 REASONING:".magenta().bold(),
        _ => "❌ FAILURE:".red().bold(),
    }
}

/// Renders a verdict in a user-friendly format
pub fn render_verdict(report: &VerdictReport<'_>) -> String {
    let verdict = report.verdict;
    let mut lines = vec![String::new(), "═".repeat(60)];

    lines.push(format!(
        "{} {}",
        category_badge(verdict.category),
        verdict.category.label().bold()
    ));
    lines.push("─".repeat(60));
    lines.push(format!("   • Cause: {}", verdict.subcategory));
    lines.push(format!("   • Recommendation: {}", verdict.recommendation));
    if let Some(advice) = &verdict.framework_specific {
        lines.push(format!("   • {} advice: {}", report.context, advice.cyan()));
    }

    lines.push("─".repeat(60));
    lines.push(format!("📊 Context: {}", report.context));
    lines.push(format!("   • Answers recorded: {}", report.answered));
    if let Some(guard) = report.guard {
        lines.push(format!("   • Matched check #{} ({})", guard.number, guard.name));
    }
    if verdict.is_success() && !report.complete {
        lines.push(format!(
            "{} {}",
            "⚠️  Note:".yellow(),
            "some visible questions are unanswered; success is provisional"
        ));
    }

    lines.push("═".repeat(60));
    lines.push(String::new());
    lines.join("\n")
}

/// Renders the question schema, optionally against recorded answers
pub fn render_questions(observations: Option<&ObservationSet>) -> String {
    let mut lines = Vec::new();
    let next = observations.and_then(schema::next_unanswered);

    for (index, step) in schema::steps().iter().enumerate() {
        lines.push(format!("{}", format!("Step {}: {}", index + 1, step.title).bold()));
        for question in step.questions {
            let marker = match observations {
                None => "•".normal(),
                Some(obs) if !question.is_visible(obs) => "·".dimmed(),
                Some(obs) if obs.is_set(question.check) => "✓".green(),
                Some(_) if next.is_some_and(|n| n.check == question.check) => "→".cyan().bold(),
                Some(_) => "○".normal(),
            };
            let answer = observations
                .and_then(|obs| obs.get(question.check))
                .map(|value| format!(" = {value}"))
                .unwrap_or_default();
            lines.push(format!(
                "  {marker} {} [{}]{answer}",
                question.prompt,
                question.check.as_str().dimmed()
            ));
            if let AnswerKind::Choice(labels) = question.answer {
                for (n, label) in labels.iter().enumerate() {
                    lines.push(format!("      {}. {label}", n + 1));
                }
            }
        }
        lines.push(String::new());
    }

    if let Some(obs) = observations {
        match next {
            Some(question) => lines.push(format!("Next: {}", question.check.as_str().cyan())),
            None => lines.push(format!(
                "{} ({} answers)",
                "All visible questions answered".green(),
                obs.len()
            )),
        }
    }

    lines.join("\n")
}

/// Renders a summary of pre-classified search-task runs
pub fn render_review(summary: &ReviewSummary, shown: &[&SearchTaskRecord]) -> String {
    let mut lines = vec![String::new(), "═".repeat(60)];
    lines.push(format!("{}", "SEARCH TASK REVIEW".bold()));
    lines.push("═".repeat(60));
    lines.push(format!("   • Runs: {}", summary.total));
    lines.push(format!("   • Succeeded: {}", summary.succeeded.to_string().green()));
    lines.push(format!("   • Failed: {}", summary.failed.to_string().red()));

    if !summary.by_root_cause.is_empty() {
        lines.push("─".repeat(60));
        lines.push("📦 Root causes:".to_string());
        for (cause, count) in &summary.by_root_cause {
            lines.push(format!("   • {cause}: {count}"));
        }
    }

    if !shown.is_empty() {
        lines.push("─".repeat(60));
        for record in shown {
            let status = if record.succeeded {
                "✓".green()
            } else {
                "✗".red()
            };
            lines.push(format!("{status} [{}] {} ({})", record.id, record.task, record.agent));
            if let Some(cause) = &record.root_cause {
                lines.push(format!("     Root cause: {cause}"));
            }
            if let Some(details) = &record.details {
                lines.push(format!("     {}", details.dimmed()));
            }
        }
    }

    lines.push("═".repeat(60));
    lines.push(String::new());
    lines.join("\n")
}
