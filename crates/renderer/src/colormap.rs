//! Colors, named colormaps and boundary normalization.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRID: Color = Color::rgb(200, 200, 200);
    pub const LAND: Color = Color::rgb(235, 235, 235);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Linear interpolation between two colors, `t` in `[0, 1]`.
pub fn interpolate_color(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::new(
        mix(from.r, to.r),
        mix(from.g, to.g),
        mix(from.b, to.b),
        mix(from.a, to.a),
    )
}

const JET_STOPS: &[(f64, Color)] = &[
    (0.0, Color::rgb(0, 0, 128)),
    (0.125, Color::rgb(0, 0, 255)),
    (0.375, Color::rgb(0, 255, 255)),
    (0.625, Color::rgb(255, 255, 0)),
    (0.875, Color::rgb(255, 0, 0)),
    (1.0, Color::rgb(128, 0, 0)),
];

const BWR_STOPS: &[(f64, Color)] = &[
    (0.0, Color::rgb(0, 0, 255)),
    (0.5, Color::rgb(255, 255, 255)),
    (1.0, Color::rgb(255, 0, 0)),
];

/// Named continuous colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Jet,
    /// Diverging blue-white-red, centred on white.
    Bwr,
}

impl Colormap {
    /// Colormap for an id; unknown ids fall back to jet.
    pub fn from_id(id: &str) -> Self {
        match id.to_ascii_lowercase().as_str() {
            "bwr" => Colormap::Bwr,
            _ => Colormap::Jet,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Colormap::Jet => "jet",
            Colormap::Bwr => "bwr",
        }
    }

    fn stops(&self) -> &'static [(f64, Color)] {
        match self {
            Colormap::Jet => JET_STOPS,
            Colormap::Bwr => BWR_STOPS,
        }
    }

    /// Color at position `t` in `[0, 1]`.
    pub fn color_at(&self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                return interpolate_color(c0, c1, (t - t0) / (t1 - t0));
            }
        }
        stops[stops.len() - 1].1
    }

    /// `n` colors sampled evenly across the map.
    pub fn sample(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.color_at(0.5)],
            _ => (0..n).map(|i| self.color_at(i as f64 / (n - 1) as f64)).collect(),
        }
    }
}

/// Maps values to discrete bins defined by ascending boundaries.
///
/// Values below the first boundary land in the first bin and values at or
/// above the last boundary in the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryNorm {
    boundaries: Vec<f64>,
}

impl BoundaryNorm {
    pub fn new(boundaries: Vec<f64>) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of bins; zero with fewer than two boundaries.
    pub fn bins(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    /// Bin index of `value`, or `None` for NaN or an empty norm.
    pub fn bin(&self, value: f64) -> Option<usize> {
        let bins = self.bins();
        if bins == 0 || value.is_nan() {
            return None;
        }
        let upper = self.boundaries[1..bins].partition_point(|b| *b <= value);
        Some(upper.min(bins - 1))
    }

    /// One color per bin, spread across the colormap.
    pub fn bin_colors(&self, colormap: Colormap) -> Vec<Color> {
        colormap.sample(self.bins())
    }
}
