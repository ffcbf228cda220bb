//! Degrees subcommand - export the in/out degree table.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::context::Context;
use crate::repositories::TripleRepository;
use crate::services::DegreeService;

/// Compute in/out degrees of a triple table.
#[derive(Parser)]
pub struct DegreesCommand {
    /// Triple table written by `triples`.
    #[arg(long)]
    pub triples: PathBuf,

    /// Illocution label used in the file name.
    #[arg(long)]
    pub illocution: String,
}

impl DegreesCommand {
    /// Run the degrees command.
    pub fn run(self, ctx: &Context) -> Result<()> {
        let triples = TripleRepository::new(ctx).load(&self.triples)?;
        let report = DegreeService::new(ctx).calculate(&triples, &self.illocution)?;
        println!("{}", report);
        Ok(())
    }
}
