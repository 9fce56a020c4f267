use std::process::ExitCode;

use aiart_runner::{fatal_line, logger, LogSettings, RequestRunner, RunnerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    if let Err(e) = logger::init_with_config(LogSettings::from_env().logger_config()) {
        eprintln!("{}", e);
    }

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let config = RunnerConfig::new();
    logger::log_run_info(&config);

    match RequestRunner::new(config).run().await {
        Ok(outcome) => {
            if outcome.is_success() {
                log::info!("✅ Generation succeeded");
            } else {
                log::debug!("Generation rejected by the API, printing raw body");
            }
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", fatal_line(&e));
            ExitCode::FAILURE
        }
    }
}
