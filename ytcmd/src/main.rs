mod cli;
mod console;
mod error;
mod extractor;
mod models;
mod orchestrator;
mod probe;
mod progress;
mod prompt;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use console::{OutputSink, TerminalInput, TerminalOutput};
use orchestrator::DownloadOrchestrator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into())
        )
        .init();

    let mut input = TerminalInput;
    let mut output = TerminalOutput::default();

    let job = match cli.job(&mut input) {
        Ok(job) => job,
        Err(e) => {
            output.line(&format!("An error occurred: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let client = cli.client();
    match client.check_binary().await {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }

    let transcoder = cli.transcoder();
    tracing::debug!("probing transcoder at {}", transcoder.program().display());

    let mut orchestrator = DownloadOrchestrator::new(client, transcoder, input, output);
    let result = orchestrator.run(&job).await;
    tracing::debug!(
        stage = ?orchestrator.stage(),
        history = ?orchestrator.history(),
        "download finished"
    );

    match result {
        Ok(completed) => {
            tracing::info!(
                title = %completed.title,
                quality = %completed.quality,
                path = %completed.path.display(),
                "download completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("download of {} failed: {}", job.url, e);
            ExitCode::FAILURE
        }
    }
}
