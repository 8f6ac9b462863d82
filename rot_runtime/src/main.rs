/// ROT Engine — command-line entry point.
///
/// Prints the derivation report for the compiled-in tables, or for the
/// tables in a JSON configuration file. The report goes to stdout,
/// logs and diagnostics to stderr.

use std::io;

use clap::Parser;

use rot_runtime::cli::{execute, Cli};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli, &mut io::stdout().lock()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
