use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ft_cli::commands::{chart, export, panel, reset, status, watch};
use ft_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays clean on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Watch { status } => {
            drop(out);
            watch::run(&config, *status)?;
        }
        Commands::Panel { ascending } => panel::run(&mut out, &config, *ascending)?,
        Commands::Reset { path } => reset::run(&mut out, &config, path)?,
        Commands::Export { file, output } => {
            export::run(&mut out, &config, file.as_deref(), output.clone(), |default_name| {
                export::prompt_destination(&mut io::stdin().lock(), &mut io::stderr(), default_name)
            })?;
        }
        Commands::Chart { top } => chart::run(&mut out, &config, *top)?,
        Commands::Status => status::run(&mut out, &config)?,
    }

    Ok(())
}
