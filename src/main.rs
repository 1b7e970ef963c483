use std::fs::OpenOptions;

use clap::Parser;
use stask::cli::commands::Cli;
use stask::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Subcommands log to stderr. The TUI owns the terminal, so it only logs
/// when `--log-file` is given.
fn init_logging(cli: &Cli) -> std::io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(ref path) = cli.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if cli.command.is_none() {
        builder.filter_level(log::LevelFilter::Off);
    }

    builder.init();
    Ok(())
}
