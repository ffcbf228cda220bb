//! Network diagram rendering.
//!
//! Lays out a [`Network`] with a spring layout and writes it as a PNG with
//! plotters.
//!
//! ## Module Structure
//!
//! - `layout` - Fruchterman–Reingold layout
//! - `canvas` - PNG drawing (nodes, arrows, labels, color bar)
//! - `colormap` - viridis scale and degree normalization
//! - `title` - diagram titles and file names
//! - `font` - label font registration
//! - `viewer` - opening saved diagrams
//! - `constants` - sizes, opacity, figure bands

mod canvas;
mod colormap;
mod constants;
mod font;
mod layout;
mod title;
mod viewer;

pub use canvas::FigureSize;
pub use colormap::{node_colors, viridis, Normalize};
pub use layout::{LayoutEdge, LayoutNode, SpringLayout};
pub use title::{png_file_name, TitleParts};
pub use viewer::{NoViewer, SystemViewer, Viewer};

use std::path::PathBuf;
use std::sync::Arc;

use crate::context::Context;
use crate::error::AppError;
use crate::graph::{Network, Relation};
use crate::models::{DegreeDirection, TimeSpan};

use canvas::{draw_png, Scene};

/// How edges are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeStyle {
    #[default]
    Straight,
    /// Arcs bent by a tenth of their length.
    Curved,
}

/// Edge attribute mapped to line width (pt).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeWidth {
    #[default]
    Count,
    Weight,
}

impl EdgeWidth {
    /// Line width (pt) of one relation.
    pub fn of(&self, relation: &Relation) -> f64 {
        match self {
            EdgeWidth::Count => f64::from(relation.count),
            EdgeWidth::Weight => relation.weight,
        }
    }
}

/// Line widths in network edge order, which is also the layout edge order.
pub fn edge_widths(network: &Network, width: EdgeWidth) -> Vec<f64> {
    network.relations().map(|r| width.of(r.relation)).collect()
}

/// Degree in `direction` of every layout node, in layout order.
pub fn node_degrees(
    layout: &SpringLayout,
    network: &Network,
    direction: DegreeDirection,
) -> Vec<usize> {
    layout
        .nodes
        .iter()
        .map(|n| network.degree(&n.name, direction).unwrap_or(0))
        .collect()
}

/// Cosmetic, layout and style parameters shared by both renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub illocution: String,
    /// Shown in the title only.
    pub time_span: Option<TimeSpan>,
    /// Shown in the title only.
    pub place: Option<String>,
    /// Layout spacing; the optimal distance is `k / sqrt(n)`.
    pub k: f64,
    pub figsize: FigureSize,
    pub edge_style: EdgeStyle,
    pub edge_width: EdgeWidth,
    /// Keep only triples with a count above this. Zero means no filter.
    pub filter: Option<u32>,
}

impl RenderOptions {
    pub fn new(illocution: impl Into<String>) -> Self {
        Self {
            illocution: illocution.into(),
            time_span: None,
            place: None,
            k: 1.0,
            figsize: FigureSize::default(),
            edge_style: EdgeStyle::default(),
            edge_width: EdgeWidth::default(),
            filter: None,
        }
    }

    /// Filter threshold, if it actually filters anything.
    pub fn active_filter(&self) -> Option<u32> {
        self.filter.filter(|f| *f > 0)
    }

    /// Title parts for these options.
    pub fn title_parts<'a>(&'a self, corpus_label: &'a str) -> TitleParts<'a> {
        TitleParts {
            illocution: &self.illocution,
            time_span: self.time_span.as_ref(),
            place: self.place.as_deref(),
            filter: self.active_filter(),
            corpus_label,
        }
    }
}

/// Draws networks into the diagram directory.
#[derive(Clone)]
pub struct DiagramRenderer {
    ctx: Context,
    viewer: Arc<dyn Viewer>,
}

impl DiagramRenderer {
    /// Renderer whose viewer follows the `render.viewer` setting.
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            viewer: viewer::from_config(ctx.config.render.viewer),
        }
    }

    /// Replace the viewer.
    pub fn with_viewer(mut self, viewer: impl Viewer + 'static) -> Self {
        self.viewer = Arc::new(viewer);
        self
    }

    /// Lay out `network`, color nodes by `direction` degree and save the
    /// PNG named after `title`. Returns the written path.
    pub fn render(
        &self,
        network: &Network,
        direction: DegreeDirection,
        title: &str,
        options: &RenderOptions,
    ) -> Result<PathBuf, AppError> {
        if network.is_empty() {
            return Err(AppError::EmptyGraph(title.to_string()));
        }

        let render = &self.ctx.config.render;
        let mut layout = SpringLayout::new(network, options.k);
        layout.stabilize(render.iterations);

        let degrees = node_degrees(&layout, network, direction);
        let edge_widths = edge_widths(network, options.edge_width);

        let with_text = font::ensure_font(render.font.as_deref())?;
        let path = self.ctx.ensure_diagram_dir()?.join(png_file_name(title));

        let scene = Scene {
            title,
            layout: &layout,
            degrees: &degrees,
            edge_widths: &edge_widths,
            legend: direction.label(),
            curved: options.edge_style == EdgeStyle::Curved,
        };
        draw_png(&path, &scene, options.figsize, render.dpi, with_text)?;
        tracing::info!(
            "Saved diagram with {} nodes and {} edges to {}",
            network.node_count(),
            network.edge_count(),
            path.display()
        );

        self.viewer.show(&path)?;
        Ok(path)
    }
}
