//! psbridge CLI
//!
//! Sends one request to the configured child and prints the decoded reply.
//! Exits 1 on any failure.

use clap::Parser;
use psbridge::cli::Args;
use psbridge::{BridgeConfig, EchoClient, Reporter};
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    psbridge::init_tracing();
    let args = Args::parse();

    let config = match BridgeConfig::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reporter = Reporter::for_program(&config.interpreter);
    let client = EchoClient::from_config(&config);

    match client.exchange(&args.request()).await {
        Ok(exchange) => {
            if let Err(e) = reporter.report_success(&mut io::stdout().lock(), &exchange) {
                tracing::error!(error = %e, "Failed to write report");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(e) = reporter.report_error(&mut io::stderr().lock(), &err) {
                tracing::error!(error = %e, "Failed to write report");
            }
            ExitCode::FAILURE
        }
    }
}
