//! Binary entry point: parse the inputs once, run the publish flow, and
//! report the outcome to the invoking environment.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use dbo_upload::{publish, RawInputs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let inputs = RawInputs::parse();

    // The debug input lowers the default filter; RUST_LOG still wins when set.
    let default_filter = if inputs.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match publish(&inputs).await {
        Ok(result) => {
            println!("{}", result.file_id);
            if let Err(e) = report_output("file_id", &result.file_id.to_string()) {
                eprintln!("warning: could not write step output: {e}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Workflow error annotation, mirrored on stderr for plain shells.
            println!("::error::{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Appends a `key=value` line to the file named by `$GITHUB_OUTPUT`, the
/// channel GitHub Actions reads step outputs from. A no-op outside CI.
fn report_output(key: &str, value: &str) -> std::io::Result<()> {
    let Ok(path) = std::env::var("GITHUB_OUTPUT") else {
        return Ok(());
    };
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    writeln!(file, "{key}={value}")
}
