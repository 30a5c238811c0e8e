//! Intent harness CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use intent_harness::cli::args::*;
use intent_harness::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = HarnessArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        if let Some(message) = exit_message(&e) {
            eprintln!("{message}");
        }
        process::exit(1);
    }
}
