//! tmv — file markdown notes into folders named by their frontmatter.
//!
//! Commands: init, config, watch, sort, preview, completions

mod config;
mod run;

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing::Level;

#[derive(Parser)]
#[command(name = "tmv")]
#[command(version)]
#[command(about = "Move notes into folders based on a frontmatter property")]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    vault: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write default settings into the vault
    Init,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<config::ConfigAction>,
    },
    /// Watch the vault and move notes as they change
    Watch,
    /// Move every note in the vault once
    Sort {
        /// Print planned moves without touching files
        #[arg(long)]
        dry_run: bool,
    },
    /// Show where a note would be moved
    Preview {
        /// Note path, relative to the vault root
        note: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Init) => run::init(&cli.vault),
        Some(Commands::Config { action }) => config::run(&cli.vault, action),
        Some(Commands::Watch) => run::watch(&cli.vault),
        Some(Commands::Sort { dry_run }) => run::sort(&cli.vault, dry_run),
        Some(Commands::Preview { note }) => run::preview(&cli.vault, &note),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "tmv", &mut io::stdout());
            Ok(())
        }
        None => {
            println!("tmv v{}", env!("CARGO_PKG_VERSION"));
            println!("Run `tmv --help` for usage.");
            Ok(())
        }
    }
}
