use std::process::ExitCode;

use clap::Parser;

use stockroom_cli::{run_and_flush, Cli};
use stockroom_infra::StockroomConfig;

fn main() -> ExitCode {
    stockroom_observability::init();

    let config = StockroomConfig::from_env();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_and_flush(cli, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
