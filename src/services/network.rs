//! Network diagrams from triple tables.

use std::path::PathBuf;

use crate::context::Context;
use crate::error::AppError;
use crate::graph::Network;
use crate::models::{DegreeDirection, TripleTable};
use crate::visualization::{DiagramRenderer, RenderOptions, Viewer};

/// A rendered network together with where its diagram was saved.
#[derive(Debug, Clone)]
pub struct RenderedNetwork {
    pub network: Network,
    pub title: String,
    pub path: PathBuf,
}

/// Service building, pruning and drawing correspondence networks.
#[derive(Clone)]
pub struct NetworkService {
    ctx: Context,
    renderer: DiagramRenderer,
}

impl NetworkService {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            renderer: DiagramRenderer::new(ctx),
        }
    }

    /// Use `viewer` instead of the configured one.
    pub fn with_viewer(mut self, viewer: impl Viewer + 'static) -> Self {
        self.renderer = self.renderer.with_viewer(viewer);
        self
    }

    /// Build the network of `triples`, dropping triples whose count is not
    /// above the active filter. Kept edges carry their original count and
    /// weight.
    pub fn build(&self, triples: &TripleTable, options: &RenderOptions) -> Network {
        match options.active_filter() {
            Some(threshold) => {
                let kept = triples.above_count(threshold);
                tracing::debug!(
                    "Count filter {} kept {} of {} triples",
                    threshold,
                    kept.len(),
                    triples.len()
                );
                Network::from_triples(&kept)
            }
            None => Network::from_triples(triples),
        }
    }

    /// Draw the network of `triples`, nodes colored by in-degree.
    ///
    /// Triples with a count not above the filter are dropped first; the
    /// returned network reflects that.
    pub fn render(
        &self,
        triples: &TripleTable,
        options: &RenderOptions,
    ) -> Result<RenderedNetwork, AppError> {
        let network = self.build(triples, options);

        let title = options
            .title_parts(self.ctx.corpus_label())
            .network_title();
        let path = self
            .renderer
            .render(&network, DegreeDirection::In, &title, options)?;
        Ok(RenderedNetwork {
            network,
            title,
            path,
        })
    }

    /// Prune `network` until every node has at least one edge in
    /// `direction`, then draw it colored by that degree.
    ///
    /// The count filter in `options` is not applied here.
    pub fn render_degree_filtered(
        &self,
        network: Network,
        direction: DegreeDirection,
        options: &RenderOptions,
    ) -> Result<RenderedNetwork, AppError> {
        let before = network.node_count();
        let network = network.prune(direction);
        tracing::info!(
            "Pruned {} network from {} to {} nodes",
            direction,
            before,
            network.node_count()
        );

        let title = options
            .title_parts(self.ctx.corpus_label())
            .degree_title(direction);
        let path = self.renderer.render(&network, direction, &title, options)?;
        Ok(RenderedNetwork {
            network,
            title,
            path,
        })
    }
}
