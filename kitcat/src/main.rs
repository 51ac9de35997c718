// ABOUTME: Main entry point for the kitcat image viewer
// ABOUTME: Wires arguments and config into the render pipeline and owns the exit policy

use anyhow::{Context, Result};
use clap::Parser;
use kitcat::cli::Cli;
use kitcat::config::Config;
use kitcat_core::{KitcatError, metrics};
use std::io::{self, BufWriter, Write};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage problems go to stdout with a plain failure status
        Err(e) if e.use_stderr() => {
            report(&e.render().to_string());
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        report(&format!("Error: {:#}\n", e));
        if let Some(core) = e.downcast_ref::<KitcatError>() {
            log::debug!("Aborted in {} stage", core.stage());
            if let Some(help) = core.help_text() {
                let _ = writeln!(io::stderr(), "{}", help);
            }
        }
        process::exit(1);
    }
}

/// Print to stdout, or stderr once stdout is gone
fn report(message: &str) {
    let mut stdout = io::stdout().lock();
    let written = stdout.write_all(message.as_bytes()).and_then(|_| stdout.flush());
    if written.is_err() {
        let _ = io::stderr().write_all(message.as_bytes());
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };
    let options = cli.render_options(&config);

    let metrics = metrics::detect();

    let stdout = io::stdout();
    let sink = BufWriter::new(stdout.lock());
    kitcat_core::render_file(&cli.file, metrics.as_ref(), &options, sink)?;

    Ok(())
}
