use clap::Parser;
use crossnet::cmd::Cli;
use tracing::{error, Level};

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    if let Err(e) = cli.command.run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
