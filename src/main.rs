use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tally::config::Config;
use tally::report::console;
use tally::{generate_report, logging, viewer};

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Run the storefront manual test suite and generate an execution report")]
struct Args {
    /// Config file to use instead of ./tally.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the report with the configured viewer once written
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init()?;

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match &args.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load(&workspace),
    }
    .with_env_overrides();

    let output = generate_report(&config, chrono::Local::now().naive_local())?;

    let mut stdout = io::stdout();
    let color = stdout.is_terminal();
    console::print_summary(&mut stdout, &output.results, &output.summary, color)?;
    println!("Test report generated at: {}", output.report_path.display());

    if args.open {
        viewer::open(config.viewer.command.as_deref(), &output.report_path)?;
    }

    Ok(())
}
