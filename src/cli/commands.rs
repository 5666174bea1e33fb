use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "lsi", about = concat!("lsi v", env!("CARGO_PKG_VERSION"), " - an interactive viewer for todo.txt"), version)]
pub struct Cli {
    /// Initial filter, e.g. "@home" or "+project report"
    pub filter: Option<String>,

    /// Path to the todo.txt file
    #[arg(short, long, default_value = "todo.txt")]
    pub file: PathBuf,

    /// Plain display without the colored palette
    #[arg(long)]
    pub simple: bool,

    /// Enable mouse selection
    #[arg(long)]
    pub mouse: bool,

    /// Watch the file and reload on external changes
    #[arg(long)]
    pub watch: bool,
}
