use anyhow::{Context as _, Result};
use colored::*;
use rootcause::{CheckId, ObservationSet, Observed};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Reads an observation document from disk
pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow::anyhow!("Not a file: {}", path.display()));
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parses document content as JSON, falling back to YAML
pub fn parse_document(content: &str) -> Result<Value> {
    if let Ok(val) = serde_json::from_str::<Value>(content) {
        debug!("parsed observation document as JSON");
        return Ok(val);
    }

    if let Ok(val) = serde_yaml::from_str::<Value>(content) {
        debug!("parsed observation document as YAML");
        return Ok(val);
    }

    Err(anyhow::anyhow!(
        "Unable to parse content as JSON or YAML. The document must be either:\n\
        1. An object mapping check names to answers\n\
        2. A wrapper object with an 'observations' field and an optional 'context' field"
    ))
}

/// Validates an observation document and collects the usable answers.
pub struct ObservationValidator;

impl ObservationValidator {
    pub fn validate(document: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        let Some(root) = document.as_object() else {
            result
                .errors
                .push("Document must be an object of check names to answers".to_string());
            return result;
        };

        // Wrapper form: { "context": "...", "observations": { ... } }
        let answers = match root.get("observations") {
            Some(Value::Object(inner)) => {
                result.is_wrapped = true;
                match root.get("context") {
                    Some(Value::String(name)) => result.context = Some(name.clone()),
                    Some(_) => result
                        .errors
                        .push("'context' must be a string".to_string()),
                    None => {}
                }
                inner
            }
            Some(_) => {
                result
                    .errors
                    .push("'observations' must be an object".to_string());
                return result;
            }
            None => root,
        };

        for (key, value) in answers {
            let check = match key.parse::<CheckId>() {
                Ok(check) => check,
                Err(_) => {
                    result
                        .warnings
                        .push(format!("Unknown check '{key}' ignored"));
                    continue;
                }
            };

            let observed = match value {
                Value::Bool(flag) => Observed::Flag(*flag),
                Value::String(label) => Observed::Choice(label.clone()),
                Value::Null => {
                    result
                        .warnings
                        .push(format!("'{check}' is null and is treated as unanswered"));
                    continue;
                }
                other => {
                    result.errors.push(format!(
                        "'{check}' must be a boolean or a string, got {other}"
                    ));
                    continue;
                }
            };

            // Ill-typed answers are kept so the classifier can fail open on them.
            if let Err(e) = check.validate(&observed) {
                result.errors.push(e.to_string());
            }
            result.observations.record(check, observed);
        }

        result
    }

    /// Display validation results in a user-friendly format
    pub fn display_results(result: &ValidationResult) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "OBSERVATION DOCUMENT VALIDATION REPORT".bold());
        println!("{}", "═".repeat(60));

        let status = if result.errors.is_empty() {
            if result.warnings.is_empty() {
                "✅ VALID".green().bold()
            } else {
                "⚠️  VALID WITH WARNINGS".yellow().bold()
            }
        } else {
            "❌ INVALID".red().bold()
        };

        println!("\nStatus: {status}");
        println!("{}", "─".repeat(60));

        println!("\n{}", "Answers:".bold());
        println!(
            "  • Recorded: {} of {} checks",
            result.observations.len(),
            CheckId::ALL.len()
        );
        if let Some(context) = &result.context {
            println!("  • Context: {context}");
        }
        for (check, value) in result.observations.iter() {
            let icon = if check.validate(value).is_ok() {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("  {icon} {check}: {value}");
        }

        if !result.errors.is_empty() {
            println!("\n{}", "Errors:".red().bold());
            for error in &result.errors {
                println!("  {} {}", "✗".red(), error);
            }
        }

        if !result.warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for warning in &result.warnings {
                println!("  {} {}", "⚠".yellow(), warning);
            }
        }

        println!("\n{}", "═".repeat(60));
        println!();
    }
}

/// Result of observation document validation
#[derive(Default, Debug)]
pub struct ValidationResult {
    pub observations: ObservationSet,
    /// Context named inside a wrapper document
    pub context: Option<String>,
    pub is_wrapped: bool,

    // Issues found
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Hands back the observations. In strict mode any issue is fatal;
    /// otherwise issues are logged and ill-typed answers are kept.
    pub fn into_observations(self, strict: bool) -> Result<(ObservationSet, Option<String>)> {
        if strict && (!self.errors.is_empty() || !self.warnings.is_empty()) {
            let issues: Vec<String> = self
                .errors
                .iter()
                .chain(self.warnings.iter())
                .map(|issue| format!("  - {issue}"))
                .collect();
            return Err(anyhow::anyhow!(
                "Observation document failed strict validation:\n{}",
                issues.join("\n")
            ));
        }

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            warn!("{issue}");
        }
        Ok((self.observations, self.context))
    }
}

/// Reads, parses and validates the document at `path`.
pub fn load_observations(path: &Path, strict: bool) -> Result<(ObservationSet, Option<String>)> {
    let content = read_document(path)?;
    let document = parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    ObservationValidator::validate(&document).into_observations(strict)
}
