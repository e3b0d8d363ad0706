//! aktool
//!
//! Inspection and self-test tool for the akrypt primitives.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use akrypt_primitives::oid::{self, Engine, Mode, OidInfo};
use akrypt_primitives::{selftest, ResourceConfig};

#[derive(Parser)]
#[command(name = "aktool")]
#[command(about = "Inspect and test the akrypt cryptographic primitives")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about the available algorithms and parameters
    Show(ShowArgs),

    /// Run the built-in self test
    Test,
}

#[derive(Args)]
struct ShowArgs {
    /// Show the list of all available OIDs
    #[arg(long)]
    oids: bool,

    /// Show OIDs whose engine, name, identifier or mode contains PATTERN
    #[arg(long, value_name = "PATTERN")]
    oid: Option<String>,

    /// Show all types of available crypto engines
    #[arg(long)]
    engines: bool,

    /// Show all types of cryptographic modes
    #[arg(long)]
    modes: bool,

    /// Show the resource options and their values
    #[arg(long)]
    options: bool,

    /// Don't show a caption for displayed values
    #[arg(long)]
    without_caption: bool,

    /// JSON file with resource options
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Show(args) => cmd_show(&args),
        Commands::Test => cmd_test(),
    }
}

fn cmd_show(args: &ShowArgs) -> Result<()> {
    let caption = !args.without_caption;

    if let Some(pattern) = &args.oid {
        if caption {
            print_oid_caption();
        }
        for (idx, info, name) in oid::find(pattern) {
            print_oid_row(idx, info, name, info.name() == name);
        }
    } else if args.engines {
        if caption {
            println!(" engine\n------------------------------------------------------");
        }
        for engine in Engine::ALL {
            println!(" {}", engine);
        }
    } else if args.modes {
        if caption {
            println!(" mode\n------------------------------------------------------");
        }
        for mode in Mode::ALL {
            println!(" {}", mode);
        }
    } else if args.options {
        let config = match &args.config {
            Some(path) => ResourceConfig::load(path)
                .with_context(|| format!("failed to load options from {}", path))?,
            None => ResourceConfig::default(),
        };
        if caption {
            println!(" {:<40} {:<16}", "option", "value");
            println!("------------------------------------------------------");
        }
        for (name, value) in config.options() {
            println!(" {:<40} {:<16}", name, value);
        }
    } else {
        // --oids and the bare command print the full table
        if caption {
            print_oid_caption();
        }
        for (idx, info) in oid::all().iter().enumerate() {
            print_oid_row(idx, info, info.name(), true);
        }
    }
    Ok(())
}

fn print_oid_caption() {
    println!("  N  {:<22} {:<40} {:<20} {:<20}", "oid", "name(s)", "engine", "mode");
    println!(" -----------------------------------------------------------------------------------------------------------");
}

fn print_oid_row(idx: usize, info: &OidInfo, name: &str, with_aliases: bool) {
    println!(
        "{:3}  {:<22} {:<40} {:<20} {:<20}",
        idx, info.id, name, info.engine, info.mode
    );
    if with_aliases {
        for alias in &info.names[1..] {
            println!("{:28}{}", "", alias);
        }
    }
}

fn cmd_test() -> Result<()> {
    let checks = selftest::run();
    for check in &checks {
        let status = if check.passed { "Ok" } else { "Wrong" };
        match &check.detail {
            Some(detail) => println!(" {:<40} {} ({})", check.name, status, detail),
            None => println!(" {:<40} {}", check.name, status),
        }
    }

    let failed = checks.iter().filter(|c| !c.passed).count();
    if failed > 0 {
        anyhow::bail!("{} of {} self-test checks failed", failed, checks.len());
    }
    println!("all {} checks passed", checks.len());
    Ok(())
}
