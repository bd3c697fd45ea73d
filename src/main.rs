use anyhow::Result;
use clap::Parser;
use pbrates::core::config::AppConfig;
use pbrates::core::log::init_logging;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of days to fetch, counting back from today (at most 10)
    #[arg(value_parser = parse_days, allow_negative_numbers = true)]
    days_to_fetch: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_days(s: &str) -> Result<i64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("days_to_fetch must be an integer, got '{s}'"))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit with 1.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            e.print()?;
            return Ok(code);
        }
    };

    init_logging(cli.verbose);

    let result = pbrates::run_command(cli.days_to_fetch, &AppConfig::default()).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result.map(|()| ExitCode::SUCCESS)
}
