use clap::Parser;
use moviecull::cli::{Cli, EXIT_FATAL, RunOptions, completion_exit_code, run_cli};
use moviecull::logging::setup_logging;
use moviecull::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too and must still succeed.
            return if e.use_stderr() {
                ExitCode::from(EXIT_FATAL)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    setup_logging(cli.verbose);

    match run_cli(&RunOptions::from(&cli)) {
        Ok(summary) => ExitCode::from(completion_exit_code(&summary, cli.strict)),
        Err(e) => {
            OutputFormatter::fatal(&format!("Error: {}", e), e.shows_usage());
            ExitCode::from(EXIT_FATAL)
        }
    }
}
