#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use clap::Parser;
use std::process::ExitCode;
use tasksaathi_client::cli::{self, Cli};
use tasksaathi_client::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init_telemetry(&cli.config.telemetry)?;

    let envelope = cli::run(cli).await?;
    let rendered = serde_json::to_string_pretty(&envelope)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }

    Ok(if envelope.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
