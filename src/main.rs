mod cancel;
mod cli;
mod config;
mod directive;
mod error;
mod headless;
mod tracking;
mod ui;
mod verbs;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cancel::{CancelSignal, CancelSource};
use cli::{Cli, Command};
use config::WorldctlConfig;
use error::Outcome;
use headless::HeadlessClient;
use tracking::JobId;
use ui::JobProgress;
use verbs::{Services, ShowJob, StartWorld, WaitJob};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match WorldctlConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: configuration failed: {e:#}");
            return ExitCode::from(2);
        }
    };
    cli.apply_to(&mut config);

    let (source, cancel) = CancelSource::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            source.cancel();
        }
    });

    match run(cli.command, &config, cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(stage = %err.stage(), error = ?err, "command failed");
            eprintln!("error: {} failed: {err}", err.stage());
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Command, config: &WorldctlConfig, cancel: CancelSignal) -> Outcome<()> {
    let client = HeadlessClient::new(&config.server, config.port)?;
    debug!(base_url = %client.base_url(), "using headless host");

    let progress = match &command {
        Command::ShowJob { .. } => JobProgress::hidden(),
        Command::StartWorld { .. } => JobProgress::start("Starting world"),
        Command::WaitJob { id } => JobProgress::start(&format!("Waiting for job {id}")),
    };
    let services = Services {
        worlds: &client,
        jobs: &client,
        poll: config.poll_policy(),
        cancel,
        observer: Some(&progress),
    };
    let mut out = std::io::stdout();

    let result = match command {
        Command::StartWorld { source } => {
            let verb = StartWorld {
                template: source.template,
                url: source.url,
            };
            verb.execute(&services, &mut out).await
        }
        Command::ShowJob { id } => {
            let verb = ShowJob {
                id: JobId::from(id),
            };
            verb.execute(&services, &mut out).await
        }
        Command::WaitJob { id } => {
            let verb = WaitJob {
                id: JobId::from(id),
            };
            verb.execute(&services, &mut out).await
        }
    };

    progress.finish(&result);
    result
}
