//! Color ramps and min–max color scales for choropleth layers.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses a `#rrggbb` string.
    ///
    /// Returns `None` for any other shape.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |a: u8, b: u8| {
            (f64::from(b) - f64::from(a))
                .mul_add(t, f64::from(a))
                .round()
                .clamp(0.0, 255.0) as u8
        };

        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named sequential ramps (`ColorBrewer`, nine classes).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RampName {
    #[default]
    #[serde(rename = "Reds_09")]
    #[strum(serialize = "Reds_09")]
    Reds,
    #[serde(rename = "Blues_09")]
    #[strum(serialize = "Blues_09")]
    Blues,
    #[serde(rename = "Greens_09")]
    #[strum(serialize = "Greens_09")]
    Greens,
    #[serde(rename = "Oranges_09")]
    #[strum(serialize = "Oranges_09")]
    Oranges,
    #[serde(rename = "Purples_09")]
    #[strum(serialize = "Purples_09")]
    Purples,
    #[serde(rename = "YlOrRd_09")]
    #[strum(serialize = "YlOrRd_09")]
    YlOrRd,
}

impl RampName {
    /// Hex stops, lightest first.
    #[must_use]
    pub const fn stops(self) -> &'static [&'static str] {
        match self {
            Self::Reds => &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d",
                "#a50f15", "#67000d",
            ],
            Self::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
            Self::Greens => &[
                "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45",
                "#006d2c", "#00441b",
            ],
            Self::Oranges => &[
                "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801",
                "#a63603", "#7f2704",
            ],
            Self::Purples => &[
                "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3",
                "#54278f", "#3f007d",
            ],
            Self::YlOrRd => &[
                "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c",
                "#bd0026", "#800026",
            ],
        }
    }

    /// Returns the parsed ramp.
    #[must_use]
    pub fn ramp(self) -> ColorRamp {
        ColorRamp::new(self.stops().iter().filter_map(|hex| Rgb::from_hex(hex)))
    }
}

/// Evenly spaced color stops interpolated linearly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    #[must_use]
    pub fn new(stops: impl IntoIterator<Item = Rgb>) -> Self {
        Self {
            stops: stops.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Color at position `t` in `[0, 1]`; values outside are clamped.
    ///
    /// An empty ramp yields black.
    #[must_use]
    pub fn color_at(&self, t: f64) -> Rgb {
        let black = Rgb { r: 0, g: 0, b: 0 };
        let Some(last) = self.stops.len().checked_sub(1) else {
            return black;
        };
        if last == 0 {
            return self.stops[0];
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        #[allow(clippy::cast_precision_loss)]
        let scaled = t * last as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let lower = (scaled.floor() as usize).min(last - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = scaled - lower as f64;

        self.stops[lower].lerp(self.stops[lower + 1], local)
    }
}

/// A linear min–max scale mapping values to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Builds the scale spanning `values`.
    ///
    /// Returns `None` when there is no finite value. When every value is
    /// equal the maximum is widened by one so the scale keeps a non-zero
    /// span.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, value| {
                Some(acc.map_or((value, value), |(min, max)| {
                    (min.min(value), max.max(value))
                }))
            })?;

        #[allow(clippy::float_cmp)]
        let max = if min == max { max + 1.0 } else { max };

        Some(Self { min, max })
    }

    /// Position of `value` within the scale, clamped to `[0, 1]`.
    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}
