// slack-launcher: Alfred script filter for Slack channels and users.
// Prints the launcher list by default; `token <value>` registers a workspace.

mod alfred;
mod app;
mod cache;
mod error;
mod pipeline;
mod registry;
mod slack;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::app::{App, Config};
use crate::registry::Registration;

#[derive(Debug, Parser)]
#[command(name = "slack-launcher", version, about)]
struct Cli {
    /// Directory holding workplaces.json and the per-workspace caches.
    #[arg(long, env = "SLACK_LAUNCHER_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 10, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register the workspace a Slack token belongs to.
    Token { value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for the Alfred JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::new(Config {
        data_dir: cli.data_dir,
        api_base: slack::SLACK_API_BASE.to_string(),
        request_timeout: Duration::from_secs(cli.timeout_secs),
    });

    match cli.command {
        Some(Command::Token { value }) => match app.register(&value).await {
            Ok(Registration::Registered(_) | Registration::AlreadyRegistered) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "registration failed");
                eprintln!("Failed to register workspace: {}", e);
                ExitCode::FAILURE
            }
        },
        None => {
            let response = app.list().await;
            match alfred::render(&response) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!(error = %e, "failed to render response");
                    println!(r#"{{"items":[]}}"#);
                }
            }
            ExitCode::SUCCESS
        }
    }
}
