//! Root-cause CLI
//!
//! Classifies failed browser-agent runs from recorded observations, walks a
//! reviewer through the question schema, and summarises pre-classified
//! search-task results.
//!
//! Usage from workspace root:
//!   cargo run --bin rootcause -- classify run.json --context React
//!   cargo run --bin rootcause -- validate run.yaml
//!   cargo run --bin rootcause -- questions run.json
//!   cargo run --bin rootcause -- interview --context Vue
//!   cargo run --bin rootcause -- review arxiv_runs.json --root-cause "DOM Parsing Failure"

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rootcause::{diagnose, Context, Framework, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

mod interview;
mod observation_input;
mod report;

use observation_input::{load_observations, ObservationValidator};
use report::VerdictReport;

#[derive(Parser)]
#[command(name = "rootcause")]
#[command(about = "🔎 Root-cause triage for failed browser-agent runs")]
#[command(
    long_about = "Classifies why an automated web agent failed a browsing task, from a set of recorded step observations and the page's front-end framework."
)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG says otherwise)
    #[clap(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lower")]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Observation document (JSON or YAML)
    input: PathBuf,

    /// Front-end framework of the page (React, Vue, Angular, jQuery, Bootstrap, Tailwind, Vanilla).
    /// Overrides a context named inside the document.
    #[clap(long, short, env = "ROOTCAUSE_CONTEXT")]
    context: Option<String>,

    #[clap(long, value_enum, env = "ROOTCAUSE_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Treat unknown checks and ill-typed answers as errors
    #[clap(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Observation document (JSON or YAML)
    input: PathBuf,
}

#[derive(Parser, Debug)]
struct QuestionsArgs {
    /// Optional observation document to mark progress against
    input: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InterviewArgs {
    /// Front-end framework of the page. Without one, no framework advice is given.
    #[clap(long, short, env = "ROOTCAUSE_CONTEXT")]
    context: Option<String>,

    #[clap(long, value_enum, env = "ROOTCAUSE_FORMAT", default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReviewArgs {
    /// JSON array of pre-classified search-task records
    input: PathBuf,

    /// Only list runs with this root cause (case-insensitive)
    #[clap(long)]
    root_cause: Option<String>,

    #[clap(long, value_enum, env = "ROOTCAUSE_FORMAT", default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an observation document
    Classify(ClassifyArgs),
    /// Check an observation document without classifying it
    Validate(ValidateArgs),
    /// Show the question schema
    Questions(QuestionsArgs),
    /// Answer the questions interactively
    Interview(InterviewArgs),
    /// Summarise pre-classified search-task runs
    Review(ReviewArgs),
}

/// Outcome of a command that ran to completion
enum Outcome {
    Ok,
    /// Classification found a failure
    FailureFound,
    /// Validation found errors
    Invalid,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify(args) => run_classify(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Questions(args) => run_questions(args),
        Commands::Interview(args) => run_interview(args),
        Commands::Review(args) => run_review(args),
    };

    match result {
        Ok(Outcome::Ok) => ExitCode::SUCCESS,
        Ok(Outcome::FailureFound) => ExitCode::from(2),
        Ok(Outcome::Invalid) => ExitCode::from(1),
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = if verbose { "debug" } else { "warn" };

    // Optional daily log file alongside the console output
    let file_layer = std::env::var("ROOTCAUSE_LOG_DIR").ok().map(|dir| {
        let _ = std::fs::create_dir_all(&dir);
        let file_appender = tracing_appender::rolling::daily(dir, "rootcause.log");
        tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    let _ = tracing_subscriber::registry()
        .with(
            // Respect RUST_LOG if provided
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}

/// Names are matched exactly; a near miss is kept as unrecognized but flagged.
fn resolve_context(name: Option<String>) -> Context {
    let context = name.map(Context::from).unwrap_or_default();
    if let Context::Unrecognized(name) = &context {
        match Framework::near_miss(name) {
            Some(framework) => warn!(
                context = %name,
                "unrecognized context, did you mean '{framework}'? no framework advice will be given"
            ),
            None => warn!(context = %name, "unrecognized context, no framework advice will be given"),
        }
    }
    context
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_classify(args: ClassifyArgs) -> Result<Outcome> {
    info!(input = %args.input.display(), strict = args.strict, "classifying observations");

    let (observations, document_context) = load_observations(&args.input, args.strict)?;
    let context = resolve_context(args.context.or(document_context));
    debug!(%context, answered = observations.len(), "resolved classification input");

    let diagnosis = diagnose(&observations, &context);
    let report = VerdictReport::new(&diagnosis, &context, &observations);

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", report::render_verdict(&report)),
    }

    Ok(if diagnosis.verdict.is_success() {
        Outcome::Ok
    } else {
        Outcome::FailureFound
    })
}

fn run_validate(args: ValidateArgs) -> Result<Outcome> {
    let content = observation_input::read_document(&args.input)?;
    let document = observation_input::parse_document(&content)?;
    let result = ObservationValidator::validate(&document);
    ObservationValidator::display_results(&result);

    Ok(if result.is_valid() {
        Outcome::Ok
    } else {
        Outcome::Invalid
    })
}

fn run_questions(args: QuestionsArgs) -> Result<Outcome> {
    let observations = match &args.input {
        Some(path) => Some(load_observations(path, false)?.0),
        None => None,
    };
    println!("{}", report::render_questions(observations.as_ref()));
    Ok(Outcome::Ok)
}

fn run_interview(args: InterviewArgs) -> Result<Outcome> {
    let mut session = Session::new(resolve_context(args.context));
    let stdin = std::io::stdin();
    let verdict = interview::run_interview(&mut session, stdin.lock(), std::io::stdout())?;

    let diagnosis = session.diagnosis();
    let report = VerdictReport::new(&diagnosis, session.context(), session.observations());
    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", report::render_verdict(&report)),
    }

    Ok(if verdict.is_success() {
        Outcome::Ok
    } else {
        Outcome::FailureFound
    })
}

fn run_review(args: ReviewArgs) -> Result<Outcome> {
    let content = observation_input::read_document(&args.input)?;
    let records = rootcause::review::parse_records(&content)?;
    let summary = rootcause::review::summarize(&records);

    let shown: Vec<&rootcause::SearchTaskRecord> = match &args.root_cause {
        Some(cause) => rootcause::review::with_root_cause(&records, cause).collect(),
        None => Vec::new(),
    };

    match args.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "summary": summary,
            "records": shown,
        }))?,
        OutputFormat::Text => println!("{}", report::render_review(&summary, &shown)),
    }
    Ok(Outcome::Ok)
}
