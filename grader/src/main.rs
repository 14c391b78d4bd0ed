use anyhow::{Context, Result, bail};
use clap::Parser;
use marker::report::MarkReportResponse;
use marker::utilities::file_loader::load_files;
use services::grading_service::GradingService;
use services::submission_store::{InMemorySubmissionStore, SubmissionStore};
use std::path::PathBuf;
use tracing::info;
use tracing_appender::rolling;
use util::config;
use util::scoring_config::ScoringConfig;

/// Auto-score a worksheet submission exported from storage and print the mark report as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Worksheet export: { id, title?, tasks: [...] }
    #[arg(long)]
    worksheet: PathBuf,
    /// Submission export
    #[arg(long)]
    submission: PathBuf,
    /// Scoring config JSON. Falls back to SCORING_CONFIG_PATH, then to the defaults.
    #[arg(long)]
    config: Option<String>,
    /// Overwrite scores a teacher entered by hand
    #[arg(long)]
    force: bool,
    /// Mark the submission graded with a summary of the score
    #[arg(long)]
    send: bool,
    /// Write the updated submission to this file
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(&config::log_dir(), &config::log_file(), &config::log_level());

    let config_path = args.config.clone().or_else(config::scoring_config_path);
    let scoring = ScoringConfig::load_or_default(config_path.as_deref()).map_err(anyhow::Error::msg)?;

    let files = load_files(&args.worksheet, &args.submission).with_context(|| {
        format!(
            "Failed to load {} / {}",
            args.worksheet.display(),
            args.submission.display()
        )
    })?;
    if files.submission.worksheet_id != files.worksheet.id {
        bail!(
            "Submission '{}' belongs to worksheet '{}', not '{}'",
            files.submission.id,
            files.submission.worksheet_id,
            files.worksheet.id
        );
    }

    let submission_id = files.submission.id.clone();
    info!(
        project = %config::project_name(),
        worksheet = %files.worksheet.id,
        submission = %submission_id,
        "Grading submission"
    );

    let store = InMemorySubmissionStore::new();
    store.insert_worksheet(files.worksheet).await;
    store.insert_submission(files.submission).await;
    let service = GradingService::new(store, scoring);

    let report = service.auto_score(&submission_id, args.force).await?;
    if args.send {
        let graded = service.send_feedback(&submission_id).await?;
        info!(summary = ?graded.feedback, "Submission graded");
    }

    if let Some(out) = &args.out {
        let updated = service
            .store()
            .fetch_submission(&submission_id)
            .await?
            .with_context(|| format!("Submission '{submission_id}' vanished from the store"))?;
        let json = serde_json::to_string_pretty(&updated)?;
        std::fs::write(out, json).with_context(|| format!("Failed to write {}", out.display()))?;
    }

    let response: MarkReportResponse = report.into();
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn init_logging(
    log_dir: &str,
    log_file: &str,
    log_level: &str,
) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all(log_dir).ok();

    let file_appender = rolling::daily(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let log_to_stdout = config::log_to_stdout();

    // stdout carries the report, so console logs go to stderr
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("grader=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    guard
}
