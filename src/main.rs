use clap::Parser;
use colored::Colorize;
use taller::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    // Interpreter logs go to stderr; keep the default quiet so the REPL
    // stays readable. RUST_LOG=info for the full dispatch trace.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("{} {}", "error:".red(), e);
        std::process::exit(1);
    }
}
