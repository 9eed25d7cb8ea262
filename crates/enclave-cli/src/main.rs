//! Enclave CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::{Diagnostic as _, GraphicalReportHandler, Severity};

use enclave_cli::{
    Args,
    error_adapter::{Reportable, diagnostic_reportables, to_reportables},
};

fn render(reporter: &GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
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

    info!(log_level:?; "Starting Enclave");
    debug!(args:?; "Parsed arguments");

    let reporter = GraphicalReportHandler::new();

    let diagnostics = match enclave_cli::run(&args) {
        Ok(diagnostics) => diagnostics,
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reporter, &reportable));
            }
            process::exit(1);
        }
    };

    for reportable in diagnostic_reportables(&diagnostics) {
        let rendered = render(&reporter, &reportable);
        match reportable.severity() {
            Some(Severity::Error) => error!("{rendered}"),
            _ => warn!("{rendered}"),
        }
    }

    if enclave_cli::should_fail(&args, &diagnostics) {
        error!(diagnostics = diagnostics.len(); "Scene has error diagnostics");
        process::exit(1);
    }

    info!("Completed successfully");
}
