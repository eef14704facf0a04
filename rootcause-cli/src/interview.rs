use anyhow::Result;
use rootcause::schema::{self, AnswerKind, Question};
use rootcause::{Observed, Session, Verdict};
use std::io::{BufRead, Write};
use tracing::debug;

/// Parses one typed answer for `question`. `None` means "ask again".
fn parse_answer(question: &Question, input: &str) -> Option<Observed> {
    let input = input.trim();
    match question.answer {
        AnswerKind::YesNo => match input.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Some(Observed::Flag(true)),
            "n" | "no" | "false" => Some(Observed::Flag(false)),
            _ => None,
        },
        AnswerKind::Choice(labels) => {
            if let Ok(n) = input.parse::<usize>() {
                return labels
                    .get(n.checked_sub(1)?)
                    .map(|label| Observed::from(*label));
            }
            labels
                .iter()
                .find(|label| label.eq_ignore_ascii_case(input))
                .map(|label| Observed::from(*label))
        }
    }
}

fn step_title(question: &Question) -> Option<&'static str> {
    schema::steps()
        .iter()
        .find(|step| step.questions.iter().any(|q| q.check == question.check))
        .map(|step| step.title)
}

/// Walks the reviewer through every visible question, then returns the
/// final verdict. Typing `quit` (or closing input) ends the walk early.
pub fn run_interview<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> Result<Verdict> {
    writeln!(output, "🔎 Root-cause review ({})", session.context())?;
    writeln!(output, "Answer y/n, pick a number, or type 'quit' to stop.")?;
    writeln!(output, "=====================================")?;

    let mut current_step = None;

    while let Some(question) = session.next_question() {
        let title = step_title(question);
        if title != current_step {
            if let Some(title) = title {
                writeln!(output, "\n📋 {title}")?;
            }
            current_step = title;
        }

        loop {
            writeln!(output, "❓ {}", question.prompt)?;
            match question.answer {
                AnswerKind::YesNo => write!(output, "   (y/n): ")?,
                AnswerKind::Choice(labels) => {
                    for (n, label) in labels.iter().enumerate() {
                        writeln!(output, "   {}. {label}", n + 1)?;
                    }
                    write!(output, "   choice: ")?;
                }
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("input closed before the review was complete");
                return Ok(session.finish());
            }
            let line = line.trim();

            if line == "quit" || line == "exit" {
                return Ok(session.finish());
            }

            match parse_answer(question, line) {
                Some(value) => {
                    session.record(question.check, value);
                    break;
                }
                None => writeln!(output, "   ⚠️  Could not understand '{line}', try again.")?,
            }
        }
    }

    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootcause::{ActionTiming, Category, CheckId};
    use std::io::Cursor;

    #[test]
    fn test_parse_yes_no() {
        let question = schema::question(CheckId::DropdownDetected).unwrap();
        assert_eq!(parse_answer(question, "Y"), Some(Observed::Flag(true)));
        assert_eq!(parse_answer(question, " no "), Some(Observed::Flag(false)));
        assert_eq!(parse_answer(question, "maybe"), None);
    }

    #[test]
    fn test_parse_choice() {
        let question = schema::question(CheckId::ActionTiming).unwrap();
        assert_eq!(
            parse_answer(question, "1"),
            Some(Observed::from(ActionTiming::TooFast))
        );
        assert_eq!(
            parse_answer(question, "> 2s (SLOW)"),
            Some(Observed::from(ActionTiming::Slow))
        );
        assert_eq!(parse_answer(question, "0"), None);
        assert_eq!(parse_answer(question, "4"), None);
    }

    #[test]
    fn test_full_interview_reaches_success() {
        // dropdown, open, men, timing, subcategory x2, filter, grid,
        // prices x3, item, checkout x2
        let answers = "y\ny\ny\n2\ny\ny\ny\ny\ny\ny\ny\ny\ny\ny\n";
        let mut session = Session::new("React");
        let mut out = Vec::new();

        let verdict = run_interview(&mut session, Cursor::new(answers), &mut out).unwrap();
        assert!(verdict.is_success());
        assert!(session.is_complete());
        assert_eq!(session.observations().len(), 14);
    }

    #[test]
    fn test_interview_retries_and_skips_hidden_questions() {
        // Dropdown missing: the follow-ups in step 1 are hidden.
        let answers = "n\nwhat\ny\ny\nn\n";
        let mut session = Session::new("Vue");
        let mut out = Vec::new();

        let verdict = run_interview(&mut session, Cursor::new(answers), &mut out).unwrap();
        let transcript = String::from_utf8(out).unwrap();

        assert!(transcript.contains("Could not understand 'what'"));
        assert_eq!(verdict.category, Category::DomParsing);
        assert!(!session.observations().is_set(CheckId::DropdownInteractionSuccess));
        assert!(session.observations().is(CheckId::NikeFilterApplied, false));
    }

    #[test]
    fn test_quit_stops_early() {
        let mut session = Session::new("Angular");
        let mut out = Vec::new();
        let verdict =
            run_interview(&mut session, Cursor::new("y\nn\nquit\n"), &mut out).unwrap();
        assert_eq!(verdict.category, Category::ElementInteraction);
        assert!(!session.is_complete());
    }
}
