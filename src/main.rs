mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Prompter};
use crate::config::Config;
use crate::core::{City, DayFilter, Filter, MonthFilter};
use crate::error::AppError;
use crate::output::ReportOptions;

/// Log to stderr so prompts and reports on stdout stay clean
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("bikeshare=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let opts = ReportOptions {
        use_color: cli.use_color(),
    };
    let files = config.city_files(cli.data_dir.clone());

    if let Some(city) = cli.city.as_deref() {
        let city = City::parse(city)?;
        let filter = Filter::new(MonthFilter::parse(&cli.month)?, DayFilter::parse(&cli.day)?);
        let mut out = io::stdout().lock();
        return app::run_once(&mut out, &files, city, filter, opts);
    }

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    app::run_interactive(&mut prompter, &files, opts)
}

fn main() -> ExitCode {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    init_tracing(cli.debug);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "exiting with error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
