//! Visual constants for the network diagrams.
//!
//! Sizes are given in typographic points and converted to pixels with the
//! configured dpi, so diagrams keep their proportions at any resolution.

use plotters::style::RGBColor;

// =============================================================================
// Typography
// =============================================================================

/// Font family every label is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";
/// Node label size (pt).
pub const LABEL_FONT_PT: f64 = 7.0;
/// Title size (pt).
pub const TITLE_FONT_PT: f64 = 12.0;
/// Color-bar tick and legend size (pt).
pub const LEGEND_FONT_PT: f64 = 8.0;

/// Fonts tried in order when no font is configured.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// =============================================================================
// Nodes and Edges
// =============================================================================

/// Marker area per degree unit (pt²). Degree 0 draws nothing.
pub const NODE_AREA_PER_DEGREE: f64 = 100.0;
/// Opacity of nodes and edges.
pub const ALPHA: f64 = 0.7;
/// Edge color.
pub const EDGE_COLOR: RGBColor = RGBColor(0, 0, 0);
/// Arrow mutation scale (pt).
pub const ARROW_SIZE_PT: f64 = 7.0;
/// Arrow head length as a fraction of the arrow size.
pub const ARROW_HEAD_LENGTH: f64 = 0.4;
/// Arrow head half-width as a fraction of the arrow size.
pub const ARROW_HEAD_WIDTH: f64 = 0.2;
/// Bend of curved edges relative to the edge length.
pub const CURVE_RAD: f64 = 0.1;
/// Points sampled along a curved edge.
pub const CURVE_SEGMENTS: usize = 16;

// =============================================================================
// Figure Layout
// =============================================================================

/// Fraction of the figure height reserved for the title.
pub const TITLE_BAND: f64 = 0.08;
/// Fraction of the figure width reserved for the color bar and its labels.
pub const COLORBAR_BAND: f64 = 0.14;
/// Color bar width as a fraction of the figure width.
pub const COLORBAR_WIDTH: f64 = 0.025;
/// Outer padding as a fraction of the smaller figure side.
pub const PADDING: f64 = 0.04;
/// Vertical strips used to paint the color bar gradient.
pub const COLORBAR_STEPS: usize = 128;
/// Upper bound on color-bar tick labels.
pub const MAX_TICKS: usize = 6;

/// Convert points to pixels at `dpi`.
pub fn pt_to_px(pt: f64, dpi: u32) -> f64 {
    pt * f64::from(dpi) / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_to_px() {
        assert_eq!(pt_to_px(72.0, 150), 150.0);
        assert_eq!(pt_to_px(7.0, 72), 7.0);
    }
}
