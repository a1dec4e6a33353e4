//! CLI command definitions for compose-bridge
//!
//! This module contains all the clap-based command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cbr")]
#[command(about = "Run docker-compose operations with a fixed argument contract", long_about = None)]
pub struct Cli {
    /// Use this docker-compose executable instead of resolving one
    #[arg(long, global = true, value_name = "PATH")]
    pub compose_bin: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and start containers in the background
    Up {
        #[command(flatten)]
        common: CommonArgs,
        /// Recreate containers even if their configuration is unchanged
        #[arg(long)]
        force_recreate: bool,
        /// Remove containers for services not defined in the compose file
        #[arg(long)]
        remove_orphans: bool,
        /// Services to start (whole project when omitted)
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },
    /// Stop and remove the project's containers and networks
    Down {
        #[command(flatten)]
        common: CommonArgs,
        /// Remove containers for services not defined in the compose file
        #[arg(long)]
        remove_orphans: bool,
    },
    /// Restart service containers
    Restart {
        #[command(flatten)]
        common: CommonArgs,
        /// Services to restart (whole project when omitted)
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },
    /// Stop service containers without removing them
    Stop {
        #[command(flatten)]
        common: CommonArgs,
        /// Services to stop (whole project when omitted)
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },
    /// Start existing service containers
    Start {
        #[command(flatten)]
        common: CommonArgs,
        /// Services to start (whole project when omitted)
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },
}

/// Flags shared by every operation.
#[derive(Args)]
pub struct CommonArgs {
    /// Compose file (its directory becomes the working directory)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Project name
    #[arg(short = 'p', long = "project", value_name = "NAME")]
    pub project: Option<String>,

    /// Answer yes to every prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Extra options in the dynamic key=value form, e.g. -o service=web
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}
