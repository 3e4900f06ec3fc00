use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use services::{QuizLauncher, QuizSettingsDraft};
use storage::record::QuizSetRecord;
use storage::repository::{QuizRepository, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod reporter;
mod terminal;

use reporter::LogReporter;
use terminal::{RunEnd, run_interactive};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingQuiz,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingQuiz => write!(f, "no quiz file given (use --quiz or QUIZ_FILE)"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- run   --quiz <file.json> [--seed <n>] [--passing-grade <pct>]");
    eprintln!("  cargo run -p app -- check --quiz <file.json>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_SEED, QUIZ_PASSING_GRADE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "run" => Some(Self::Run),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

struct Args {
    quiz: PathBuf,
    settings: QuizSettingsDraft,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut quiz = std::env::var("QUIZ_FILE").ok().map(PathBuf::from);
        let mut flags = QuizSettingsDraft::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiz" => quiz = Some(PathBuf::from(require_value(args, "--quiz")?)),
                "--seed" => flags.seed = Some(require_value(args, "--seed")?),
                "--passing-grade" => {
                    flags.passing_grade = Some(require_value(args, "--passing-grade")?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            quiz: quiz.ok_or(ArgsError::MissingQuiz)?,
            settings: flags,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    // CLI flags win over QUIZ_* variables and .env
    let settings = parsed.settings.or(QuizSettingsDraft::from_env()).validate()?;

    let record = QuizSetRecord::from_path(&parsed.quiz)?;
    let (quiz_id, quiz) = record.into_quiz_set()?;
    info!(path = %parsed.quiz.display(), quiz_id = %quiz_id, "quiz file loaded");

    match cmd {
        Command::Check => {
            println!("{} ({quiz_id})", quiz.title());
            for (index, variant) in quiz.variants().iter().enumerate() {
                println!("  variant {}: {} questions", index + 1, variant.question_count());
            }
            Ok(())
        }
        Command::Run => {
            let storage = Storage::in_memory();
            storage.quizzes.upsert_quiz(quiz_id, &quiz).await?;

            let launcher = QuizLauncher::new(Arc::clone(&storage.quizzes), settings)
                .with_reporter(Arc::new(LogReporter));
            let mut flow = launcher.start(quiz_id).await?;

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let end = run_interactive(&quiz, &mut flow, &mut stdin.lock(), &mut stdout.lock())?;
            info!(?end, "quiz attempt ended");
            if end == RunEnd::Left && !flow.session().has_submitted() {
                println!("Quiz left before submitting.");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
