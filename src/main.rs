//! compose-bridge (cbr) - a scriptable front end over docker-compose
//!
//! Maps the five wrapped operations onto subcommands, resolves the
//! docker-compose executable, and relays the subprocess output and exit
//! code unchanged.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use compose_bridge::{Compose, ComposeOptions, Operation, Outcome, config};

mod cli;

use cli::{Cli, Commands, CommonArgs};

fn main() -> Result<()> {
    // Ensure configuration directory exists on startup
    config::ensure_config_dir().context("Failed to prepare config directory")?;

    let cli = Cli::parse();

    let (operation, mut options, warnings) = build_invocation(cli.command);

    for warning in &warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }

    let global_config = config::load().context("Failed to load configuration")?;
    if global_config.defaults.always_yes {
        options.always_yes = true;
    }

    let compose = match cli.compose_bin {
        Some(path) => Compose::with_executable(path),
        None => Compose::new().context("Failed to resolve docker-compose executable")?,
    };

    println!(
        "{} Running docker-compose {}...",
        "ℹ".blue(),
        operation.to_string().bright_white()
    );

    let outcome = compose
        .run(operation, &options)
        .context("Failed to run docker-compose")?;

    print!("{}", outcome.output());

    match outcome {
        Outcome::Success { .. } => {
            println!(
                "{} docker-compose {} finished",
                "✓".green(),
                operation.to_string().bright_white()
            );
            Ok(())
        }
        Outcome::Failure { code, .. } => {
            println!(
                "{} docker-compose {} failed with exit code {}",
                "✗".red(),
                operation.to_string().bright_white(),
                code.to_string().red()
            );
            process::exit(code);
        }
    }
}

/// Translate a parsed subcommand into an operation plus options, collecting
/// warnings from the dynamic key=value form.
fn build_invocation(command: Commands) -> (Operation, ComposeOptions, Vec<String>) {
    match command {
        Commands::Up {
            common,
            force_recreate,
            remove_orphans,
            services,
        } => {
            let (mut options, warnings) = options_from_common(common);
            options.force_recreate = force_recreate;
            options.remove_orphans = remove_orphans;
            options.services.extend(services);
            (Operation::Up, options, warnings)
        }
        Commands::Down {
            common,
            remove_orphans,
        } => {
            let (mut options, warnings) = options_from_common(common);
            options.remove_orphans = remove_orphans;
            (Operation::Down, options, warnings)
        }
        Commands::Restart { common, services } => {
            let (mut options, warnings) = options_from_common(common);
            options.services.extend(services);
            (Operation::Restart, options, warnings)
        }
        Commands::Stop { common, services } => {
            let (mut options, warnings) = options_from_common(common);
            options.services.extend(services);
            (Operation::Stop, options, warnings)
        }
        Commands::Start { common, services } => {
            let (mut options, warnings) = options_from_common(common);
            options.services.extend(services);
            (Operation::Start, options, warnings)
        }
    }
}

/// Build options from the shared flags, then layer the `-o key=value`
/// pairs on top.
fn options_from_common(common: CommonArgs) -> (ComposeOptions, Vec<String>) {
    let mut options = ComposeOptions {
        always_yes: common.yes,
        compose_path: common.file,
        project_name: common.project,
        ..ComposeOptions::default()
    };

    let mut warnings = Vec::new();
    let mut pairs = Vec::new();

    for raw in &common.options {
        match raw.split_once('=') {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => warnings.push(format!(
                "ignoring malformed option `{}` (expected KEY=VALUE)",
                raw
            )),
        }
    }

    warnings.extend(options.apply_key_values(pairs));

    (options, warnings)
}
