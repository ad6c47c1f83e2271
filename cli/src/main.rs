//! reprgen CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::{Diagnostic as _, GraphicalReportHandler, Severity};

use reprgen_cli::{
    Args,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportables},
};

fn render(reporter: &GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    match reporter.render_report(&mut writer, reportable) {
        Ok(()) => writer,
        Err(_) => reportable.to_string(),
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting reprgen");
    debug!(args:?; "Parsed arguments");

    let reporter = GraphicalReportHandler::new();
    let outcome = match reprgen_cli::run(&args) {
        Ok(outcome) => outcome,
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reporter, &reportable));
            }
            process::exit(1);
        }
    };

    for reportable in diagnostics_to_reportables(&outcome) {
        let rendered = render(&reporter, &reportable);
        match reportable.severity() {
            Some(Severity::Error) => error!("{rendered}"),
            Some(Severity::Warning) => warn!("{rendered}"),
            _ => info!("{rendered}"),
        }
    }

    if outcome.is_failure() {
        process::exit(1);
    }

    info!(written = outcome.written.len(); "Completed successfully");
}
