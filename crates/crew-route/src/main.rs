use crew_route::{Settings, logging, log_version_info, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging must be up before anything logs
    logging::setup_logging();
    log_version_info();

    let settings = Settings::from_cli();
    match run(&settings) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
