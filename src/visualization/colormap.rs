//! Viridis color scale and value normalization.

use plotters::style::RGBColor;

/// Viridis sampled at 0.0, 0.1, ..., 1.0.
const VIRIDIS: [(u8, u8, u8); 11] = [
    (68, 1, 84),
    (72, 36, 117),
    (65, 68, 135),
    (53, 95, 141),
    (42, 120, 142),
    (33, 145, 140),
    (34, 168, 132),
    (68, 191, 112),
    (122, 209, 81),
    (189, 223, 38),
    (253, 231, 37),
];

/// Viridis color at `t` in `[0, 1]`, linearly interpolated. Out-of-range
/// values are clamped.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;

    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (r0, g0, b0) = VIRIDIS[lo];
    let (r1, g1, b1) = VIRIDIS[hi];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Linear map from `[min, max]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub min: f64,
    pub max: f64,
}

impl Normalize {
    /// Bounds spanning every value, or `None` for no values.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(n) => Some(Self {
                min: n.min.min(v),
                max: n.max.max(v),
            }),
        })
    }

    /// Position of `value` in the range. A degenerate range (min == max)
    /// maps everything to 0.
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    /// Bounds of a degree list; `[0, 0]` when empty.
    pub fn for_degrees(degrees: &[usize]) -> Self {
        Self::from_values(degrees.iter().map(|d| *d as f64))
            .unwrap_or(Self { min: 0.0, max: 0.0 })
    }

    pub fn color(&self, value: f64) -> RGBColor {
        viridis(self.apply(value))
    }
}

/// Node fill colors: each degree placed on viridis between the smallest and
/// largest degree.
pub fn node_colors(degrees: &[usize]) -> Vec<RGBColor> {
    let norm = Normalize::for_degrees(degrees);
    degrees.iter().map(|d| norm.color(*d as f64)).collect()
}
