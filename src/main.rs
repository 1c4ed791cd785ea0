use std::io;

use anyhow::Context;
use clap::Parser;

use epochctl::display::{self, Format};
use epochctl::logger;
use epochctl::menu::Session;
use epochctl::{LocalOffset, SystemClock};

/// Convert Unix timestamps to dates and generate timestamps relative to now
#[derive(Parser)]
#[command(name = "epochctl", version, about, long_about = None)]
struct Cli {
    /// Output format for results
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display::print_error(&mut io::stderr(), &format!("{:#}", e)).ok();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logger::init(cli.verbose).context("Failed to initialize logging")?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Read once; later DST changes are not tracked.
    let offset = LocalOffset::detect();
    let session = Session::new(offset, SystemClock, cli.format);

    let stdin = io::stdin();
    session
        .run(stdin.lock(), io::stdout().lock())
        .context("Console I/O failed")
}
