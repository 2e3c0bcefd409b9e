use foundation::Color;

/// Stroke and fill applied to one region polygon.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionStyle {
    /// `None` until the first color update lands.
    pub fill: Option<Color>,
    pub stroke: Color,
    pub weight: f64,
    pub fill_opacity: f64,
}

impl RegionStyle {
    pub const fn neutral() -> Self {
        Self {
            fill: None,
            stroke: Color::from_hex(0x666666),
            weight: 0.5,
            fill_opacity: 0.7,
        }
    }

    pub fn with_fill(self, fill: Color) -> Self {
        Self {
            fill: Some(fill),
            ..self
        }
    }
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Contiguous interval `(lower, upper]` drawn with a single color.
///
/// The first band is open below, the last open above.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorBand {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub color: Color,
}

impl ColorBand {
    /// Legend text: `<100`, `100-200`, `> 1900`.
    pub fn label(&self) -> String {
        match (self.lower, self.upper) {
            (None, Some(hi)) => format!("<{hi}"),
            (Some(lo), Some(hi)) => format!("{lo}-{hi}"),
            (Some(lo), None) => format!("> {lo}"),
            (None, None) => "all".to_string(),
        }
    }
}

const PRECIPITATION_COLORS: [Color; 20] = [
    Color::from_hex(0x990808),
    Color::from_hex(0xBB1818),
    Color::from_hex(0xD53C20),
    Color::from_hex(0xE06928),
    Color::from_hex(0xE89730),
    Color::from_hex(0xE0BE3C),
    Color::from_hex(0xB2DC58),
    Color::from_hex(0x96E86E),
    Color::from_hex(0x7AF085),
    Color::from_hex(0x5FEB9C),
    Color::from_hex(0x42E0B5),
    Color::from_hex(0x36D3D0),
    Color::from_hex(0x2AC6E7),
    Color::from_hex(0x2FA4F4),
    Color::from_hex(0x3580F7),
    Color::from_hex(0x3E5CFA),
    Color::from_hex(0x6333F7),
    Color::from_hex(0x5A1DD8),
    Color::from_hex(0x4A008A),
    Color::from_hex(0x3B0066),
];

/// Fixed threshold classification of values into display colors.
///
/// Invariant: `colors.len() == thresholds.len() + 1`, thresholds strictly ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    thresholds: Vec<f64>,
    colors: Vec<Color>,
}

impl ColorScale {
    /// Red-to-purple ramp in 100 mm steps from 100 to 1900.
    pub fn precipitation() -> Self {
        Self {
            thresholds: (1..=19).map(|i| f64::from(i) * 100.0).collect(),
            colors: PRECIPITATION_COLORS.to_vec(),
        }
    }

    /// Maps `value` to the color of the band `(t_i, t_i+1]` containing it.
    ///
    /// Anything at or below the lowest threshold, including NaN, gets the
    /// first color; anything above the highest gets the last.
    pub fn color_for(&self, value: f64) -> Color {
        let band = self.thresholds.partition_point(|t| *t < value);
        self.colors[band]
    }

    pub fn bands(&self) -> impl Iterator<Item = ColorBand> + '_ {
        self.colors.iter().enumerate().map(|(i, color)| ColorBand {
            lower: i.checked_sub(1).map(|j| self.thresholds[j]),
            upper: self.thresholds.get(i).copied(),
            color: *color,
        })
    }

    pub fn band_count(&self) -> usize {
        self.colors.len()
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::precipitation()
    }
}
