//! CLI module for Epistola.
//!
//! Subcommands:
//! - `triples`: Extract subject/object/count triples from a letter table
//! - `network`: Render the network of a triple table
//! - `degree-network`: Render the in- or out-degree pruned network
//! - `degrees`: Export in/out degrees of a triple table

mod degrees;
mod network;
mod triples;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::context::Context;

pub use degrees::DegreesCommand;
pub use network::{DegreeNetworkCommand, NetworkCommand, RenderArgs};
pub use triples::TriplesCommand;

/// Epistola - correspondence network analysis
#[derive(Parser)]
#[command(name = "epistola")]
#[command(about = "Correspondence network analysis - triples, degrees and network diagrams")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract triples from a letter table
    Triples(TriplesCommand),

    /// Render the network of a triple table, colored by in-degree
    Network(NetworkCommand),

    /// Render the network pruned to nodes with in- or out-degree
    DegreeNetwork(DegreeNetworkCommand),

    /// Export the in/out degree table of a triple table
    Degrees(DegreesCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        tracing::debug!(
            "Output root {}, corpus '{}'",
            config.output.root.display(),
            config.corpus.label
        );
        let ctx = Context::new(config);

        match self.command {
            Command::Triples(cmd) => cmd.run(&ctx),
            Command::Network(cmd) => cmd.run(&ctx),
            Command::DegreeNetwork(cmd) => cmd.run(&ctx),
            Command::Degrees(cmd) => cmd.run(&ctx),
        }
    }
}
