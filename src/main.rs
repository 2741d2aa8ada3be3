use clap::Parser;
use spotify_to_music::cli::Arguments;
use spotify_to_music::{initialize_logger, run};
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let arguments = Arguments::parse();

    if let Err(error) = initialize_logger(arguments.verbose) {
        eprintln!("on the logger initialization: {}", error);
    }

    match run(arguments).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
