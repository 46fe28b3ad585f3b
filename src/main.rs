mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use farecard::{Config, Localizer, OutputFormat, StringCatalog, StringKey, inspect_paths};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = StringCatalog::builtin()
        .context("Failed to load built-in strings")?
        .with_locale(config.locale)
        .context("Failed to select locale")?;

    match cli.command {
        Commands::Inspect { dumps, .. } => run_inspect(&dumps, &config, &catalog),
        Commands::Keys => {
            run_keys(&catalog);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::resolve(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")
}

fn run_inspect(dumps: &[PathBuf], config: &Config, catalog: &StringCatalog) -> Result<()> {
    let outcomes = inspect_paths(dumps, catalog);
    let mut failed = 0usize;

    match config.format {
        OutputFormat::Json => {
            let mut reports = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                match outcome.report {
                    Ok(report) => reports.push(report),
                    Err(e) => {
                        eprintln!("[!] {:?}: {}", outcome.path, e);
                        failed += 1;
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for outcome in outcomes {
                match outcome.report {
                    Ok(report) => {
                        println!("{}", style(outcome.path.display()).cyan().bold());
                        print!("{}", report.render_text(config.show_data));
                        println!();
                    }
                    Err(e) => {
                        eprintln!(
                            "[!] {}: {}",
                            style(outcome.path.display()).yellow(),
                            style(e).yellow()
                        );
                        failed += 1;
                    }
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} dumps could not be inspected", failed, dumps.len());
    }
    Ok(())
}

fn run_keys(catalog: &StringCatalog) {
    println!(
        "{}",
        style(format!("Strings for locale {}", catalog.locale())).green().bold()
    );
    for key in StringKey::ALL {
        println!("{:<32} {}", style(key.as_str()).bold(), catalog.localize(key));
    }
}
