//! PNG drawing of a laid-out network.

use std::path::Path;

use glam::DVec2;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::error::AppError;
use crate::visualization::colormap::{node_colors, viridis, Normalize};
use crate::visualization::constants::*;
use crate::visualization::layout::SpringLayout;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 8.0,
        }
    }
}

impl FigureSize {
    /// Pixel dimensions at `dpi`, never smaller than 64×64.
    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f64| (inches * f64::from(dpi)).round().max(64.0) as u32;
        (px(self.width), px(self.height))
    }
}

/// Everything needed to draw one diagram.
pub struct Scene<'a> {
    pub title: &'a str,
    /// Positions in `[-1, 1]`.
    pub layout: &'a SpringLayout,
    /// Degree per layout node, same order as `layout.nodes`.
    pub degrees: &'a [usize],
    /// Line width (pt) per layout edge, same order as `layout.edges`.
    pub edge_widths: &'a [f64],
    /// Color-bar label.
    pub legend: &'a str,
    pub curved: bool,
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Frame {
    fn width(&self) -> f64 {
        (self.right - self.left).max(1.0)
    }

    fn height(&self) -> f64 {
        (self.bottom - self.top).max(1.0)
    }

    fn shrink(&self, by: f64) -> Frame {
        let by = by.min(self.width() / 4.0).min(self.height() / 4.0);
        Frame {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        }
    }

    /// Map a layout position onto this frame (y grows upward in layout space).
    fn project(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            self.left + (p.x + 1.0) / 2.0 * self.width(),
            self.top + (1.0 - (p.y + 1.0) / 2.0) * self.height(),
        )
    }
}

fn coord(p: DVec2) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Marker radius (px) for a degree: the marker area is degree × 100 pt².
pub fn node_radius(degree: usize, dpi: u32) -> f64 {
    pt_to_px((degree as f64 * NODE_AREA_PER_DEGREE).sqrt() / 2.0, dpi)
}

/// Draw `scene` and write it to `path` as PNG.
///
/// Text is only drawn when `with_text` is set; the font must already be
/// registered.
pub fn draw_png(
    path: &Path,
    scene: &Scene<'_>,
    size: FigureSize,
    dpi: u32,
    with_text: bool,
) -> Result<(), AppError> {
    let (width, height) = size.pixels(dpi);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(AppError::render)?;

    let (w, h) = (f64::from(width), f64::from(height));
    let pad = PADDING * w.min(h);
    let plot = Frame {
        left: pad,
        top: h * TITLE_BAND + pad,
        right: w * (1.0 - COLORBAR_BAND) - pad,
        bottom: h - pad,
    };

    let norm = Normalize::for_degrees(scene.degrees);
    let colors = node_colors(scene.degrees);
    let max_radius = node_radius(norm.max as usize, dpi);
    let inner = plot.shrink(max_radius + pad / 2.0);

    let centers: Vec<DVec2> = scene
        .layout
        .nodes
        .iter()
        .map(|n| inner.project(n.position))
        .collect();
    let radii: Vec<f64> = scene
        .degrees
        .iter()
        .map(|d| node_radius(*d, dpi))
        .collect();

    // Edges below nodes
    for (edge, width_pt) in scene.layout.edges.iter().zip(scene.edge_widths) {
        if edge.from_idx == edge.to_idx {
            continue;
        }
        let stroke = pt_to_px(*width_pt, dpi).max(1.0);
        draw_edge(
            &root,
            centers[edge.from_idx],
            centers[edge.to_idx],
            radii[edge.from_idx],
            radii[edge.to_idx],
            stroke,
            scene.curved,
            dpi,
        )?;
    }

    for ((center, radius), color) in centers.iter().zip(&radii).zip(&colors) {
        if *radius < 0.5 {
            continue;
        }
        let color = color.mix(ALPHA);
        root.draw(&Circle::new(coord(*center), radius.round() as i32, color.filled()))
            .map_err(AppError::render)?;
    }

    if with_text {
        let label_style = TextStyle::from((FONT_FAMILY, pt_to_px(LABEL_FONT_PT, dpi)).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (node, center) in scene.layout.nodes.iter().zip(&centers) {
            root.draw(&Text::new(node.name.clone(), coord(*center), label_style.clone()))
                .map_err(AppError::render)?;
        }

        let title_style = TextStyle::from((FONT_FAMILY, pt_to_px(TITLE_FONT_PT, dpi)).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            scene.title.to_string(),
            coord(DVec2::new(w / 2.0, h * TITLE_BAND / 2.0 + pad / 2.0)),
            title_style,
        ))
        .map_err(AppError::render)?;
    }

    let bar = Frame {
        left: w * (1.0 - COLORBAR_BAND) + pad / 2.0,
        top: plot.top,
        right: w * (1.0 - COLORBAR_BAND) + pad / 2.0 + w * COLORBAR_WIDTH,
        bottom: plot.bottom,
    };
    draw_colorbar(&root, bar, norm, scene.legend, dpi, with_text)?;

    root.present().map_err(AppError::render)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_edge<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    from: DVec2,
    to: DVec2,
    from_radius: f64,
    to_radius: f64,
    stroke: f64,
    curved: bool,
    dpi: u32,
) -> Result<(), AppError> {
    let chord = to - from;
    if chord.length() <= from_radius + to_radius {
        return Ok(());
    }
    let control = if curved {
        (from + to) * 0.5 + chord.perp() * CURVE_RAD
    } else {
        (from + to) * 0.5
    };

    let start = from + (control - from).normalize_or_zero() * from_radius;
    let tip = to + (control - to).normalize_or_zero() * to_radius;

    let head_length = pt_to_px(ARROW_SIZE_PT * ARROW_HEAD_LENGTH, dpi) + stroke;
    let head_width = pt_to_px(ARROW_SIZE_PT * ARROW_HEAD_WIDTH, dpi) + stroke / 2.0;
    let dir = (tip - control).normalize_or_zero();
    let base = tip - dir * head_length;

    let mut points: Vec<DVec2> = if curved {
        (0..=CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / CURVE_SEGMENTS as f64;
                let u = 1.0 - t;
                start * (u * u) + control * (2.0 * u * t) + tip * (t * t)
            })
            .collect()
    } else {
        vec![start, tip]
    };
    // The line stops at the arrow base so the head keeps its point.
    if let Some(last) = points.last_mut() {
        *last = base;
    }

    let style = EDGE_COLOR.mix(ALPHA);
    root.draw(&PathElement::new(
        points.into_iter().map(coord).collect::<Vec<_>>(),
        style.stroke_width(stroke.round() as u32),
    ))
    .map_err(AppError::render)?;

    let side = dir.perp() * head_width;
    root.draw(&Polygon::new(
        vec![coord(tip), coord(base + side), coord(base - side)],
        style.filled(),
    ))
    .map_err(AppError::render)?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    bar: Frame,
    norm: Normalize,
    legend: &str,
    dpi: u32,
    with_text: bool,
) -> Result<(), AppError> {
    let step_height = bar.height() / COLORBAR_STEPS as f64;
    for s in 0..COLORBAR_STEPS {
        let bottom = bar.bottom - s as f64 * step_height;
        let top = bottom - step_height;
        let t = (s as f64 + 0.5) / COLORBAR_STEPS as f64;
        root.draw(&Rectangle::new(
            [
                coord(DVec2::new(bar.left, top)),
                coord(DVec2::new(bar.right, bottom)),
            ],
            viridis(t).filled(),
        ))
        .map_err(AppError::render)?;
    }
    root.draw(&Rectangle::new(
        [
            coord(DVec2::new(bar.left, bar.top)),
            coord(DVec2::new(bar.right, bar.bottom)),
        ],
        BLACK.stroke_width(1),
    ))
    .map_err(AppError::render)?;

    let tick_len = pt_to_px(3.5, dpi);
    let tick_style = TextStyle::from((FONT_FAMILY, pt_to_px(LEGEND_FONT_PT, dpi)).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for value in ticks(norm) {
        let y = bar.bottom - norm.apply(value as f64) * bar.height();
        root.draw(&PathElement::new(
            vec![
                coord(DVec2::new(bar.right, y)),
                coord(DVec2::new(bar.right + tick_len, y)),
            ],
            BLACK.stroke_width(1),
        ))
        .map_err(AppError::render)?;
        if with_text {
            root.draw(&Text::new(
                value.to_string(),
                coord(DVec2::new(bar.right + tick_len * 1.5, y)),
                tick_style.clone(),
            ))
            .map_err(AppError::render)?;
        }
    }

    if with_text {
        let legend_style = TextStyle::from((FONT_FAMILY, pt_to_px(LEGEND_FONT_PT, dpi)).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
            .transform(FontTransform::Rotate90);
        let x = bar.right + tick_len * 1.5 + pt_to_px(LEGEND_FONT_PT * 3.0, dpi);
        root.draw(&Text::new(
            legend.to_string(),
            coord(DVec2::new(x, (bar.top + bar.bottom) / 2.0)),
            legend_style,
        ))
        .map_err(AppError::render)?;
    }
    Ok(())
}

/// Integer tick values from `min` to `max`, at most [`MAX_TICKS`].
pub fn ticks(norm: Normalize) -> Vec<i64> {
    let min = norm.min.ceil() as i64;
    let max = norm.max.floor() as i64;
    if max <= min {
        return vec![min];
    }
    let span = max - min;
    let step = ((span as f64) / (MAX_TICKS - 1) as f64).ceil().max(1.0) as i64;
    (0..)
        .map(|i| min + i * step)
        .take_while(|v| *v <= max)
        .collect()
}
