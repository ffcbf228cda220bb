//! Network subcommands - render network diagrams.

use std::path::PathBuf;

use clap::{Args, Parser};
use color_eyre::Result;

use crate::context::Context;
use crate::models::{DegreeDirection, TimeSpan};
use crate::repositories::TripleRepository;
use crate::services::NetworkService;
use crate::visualization::{EdgeStyle, EdgeWidth, FigureSize, RenderOptions};

use super::triples::parse_time_span;

/// Title and style options shared by the network subcommands.
#[derive(Args)]
pub struct RenderArgs {
    /// Triple table written by `triples`.
    #[arg(long)]
    pub triples: PathBuf,

    /// Illocution label for the title.
    #[arg(long)]
    pub illocution: String,

    /// Time span shown in the title, "start,end".
    #[arg(long, value_parser = parse_time_span)]
    pub time_span: Option<TimeSpan>,

    /// Place shown in the title.
    #[arg(long)]
    pub place: Option<String>,

    /// Layout spacing; nodes sit about k/sqrt(n) apart.
    #[arg(long, default_value = "1.0")]
    pub k: f64,

    /// Figure width in inches.
    #[arg(long, default_value = "12")]
    pub width: f64,

    /// Figure height in inches.
    #[arg(long, default_value = "8")]
    pub height: f64,

    /// Draw edges as arcs.
    #[arg(long)]
    pub curved: bool,

    /// Use weight instead of count for edge width.
    #[arg(long)]
    pub by_weight: bool,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new(self.illocution.clone());
        options.time_span = self.time_span.clone();
        options.place = self.place.clone();
        options.k = self.k;
        options.figsize = FigureSize {
            width: self.width,
            height: self.height,
        };
        options.edge_style = if self.curved {
            EdgeStyle::Curved
        } else {
            EdgeStyle::Straight
        };
        options.edge_width = if self.by_weight {
            EdgeWidth::Weight
        } else {
            EdgeWidth::Count
        };
        options
    }
}

/// Render the network of a triple table.
#[derive(Parser)]
pub struct NetworkCommand {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Drop triples whose count is not above this.
    #[arg(long)]
    pub filter: Option<u32>,
}

impl NetworkCommand {
    /// Run the network command.
    pub fn run(self, ctx: &Context) -> Result<()> {
        let triples = TripleRepository::new(ctx).load(&self.render.triples)?;
        let mut options = self.render.options();
        options.filter = self.filter;

        let rendered = NetworkService::new(ctx).render(&triples, &options)?;
        println!(
            "Saved '{}' ({} nodes, {} edges) to {}",
            rendered.title,
            rendered.network.node_count(),
            rendered.network.edge_count(),
            rendered.path.display()
        );
        Ok(())
    }
}

/// Render the network pruned by in- or out-degree.
#[derive(Parser)]
pub struct DegreeNetworkCommand {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Drop triples whose count is not above this before pruning.
    #[arg(long)]
    pub filter: Option<u32>,

    /// Prune by out-degree instead of in-degree.
    #[arg(long)]
    pub out_degree: bool,
}

impl DegreeNetworkCommand {
    /// Run the degree-network command.
    pub fn run(self, ctx: &Context) -> Result<()> {
        let triples = TripleRepository::new(ctx).load(&self.render.triples)?;
        let direction = if self.out_degree {
            DegreeDirection::Out
        } else {
            DegreeDirection::In
        };

        let mut options = self.render.options();
        options.filter = self.filter;

        let service = NetworkService::new(ctx);
        let network = service.build(&triples, &options);
        let rendered = service.render_degree_filtered(network, direction, &options)?;
        println!(
            "Saved '{}' ({} nodes, {} edges) to {}",
            rendered.title,
            rendered.network.node_count(),
            rendered.network.edge_count(),
            rendered.path.display()
        );
        Ok(())
    }
}
