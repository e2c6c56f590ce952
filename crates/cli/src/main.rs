//! Coupons CLI
//!
//! Checks coupon eligibility and discounts against YAML fixture sets.

use std::process::ExitCode;

use tracing::error;

use crate::config::Cli;

mod commands;
mod config;
mod errors;
mod observability;
mod render;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            // Help and version requests also arrive here, on stdout.
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.command.run(&cli.fixtures) {
        Ok(output) => {
            #[expect(clippy::print_stdout, reason = "command output is the CLI's result")]
            {
                println!("{output}");
            }

            ExitCode::SUCCESS
        }
        Err(source) => {
            error!(error = %source, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "errors are reported to the user regardless of log level"
            )]
            {
                eprintln!("error: {source}");
            }

            ExitCode::FAILURE
        }
    }
}
