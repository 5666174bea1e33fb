use clap::Parser;
use lsi::cli::Cli;
use lsi::tui::{self, SessionOptions};

fn main() {
    let cli = Cli::parse();

    let options = SessionOptions {
        file: cli.file,
        filter: cli.filter,
        simple: cli.simple,
        mouse: cli.mouse,
        watch: cli.watch,
    };

    if let Err(e) = tui::run(options) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
