//! Till administration CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(clippy::print_stderr, reason = "CLI reports failures on stderr")]
            {
                eprintln!("error: {error}");
            }

            ExitCode::FAILURE
        }
    }
}
