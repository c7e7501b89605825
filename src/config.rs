//! Style groups for the gauge.
//!
//! Every leaf is optional. A group's derived `Default` is the *empty* group;
//! the populated group used when the caller says nothing lives in `preset()`
//! and is wired up as the builder default on [`GaugeConfig`]. Supplying any
//! group value therefore replaces the whole default group, it is never merged
//! field by field: `LabelStyle { font_family: Some(..), ..Default::default() }`
//! leaves `color` unset for that gauge.
//!
//! [`GaugeConfig`]: crate::GaugeConfig

use std::fmt;

/// Font family used whenever a text node has no usable family of its own.
/// An explicitly empty string also falls back here.
pub const DEFAULT_FONT_FAMILY: &str = "monospace";

/// Leaf fallbacks applied by the geometry arithmetic when a caller-supplied
/// group left the field unset.
pub const FALLBACK_LABEL_STEPS: u32 = 5;
pub const FALLBACK_LABEL_PADDING: f64 = 20.0;
pub const FALLBACK_DOT_COUNT: u32 = 25;
pub const FALLBACK_DOT_PADDING: f64 = 23.0;
pub const FALLBACK_PERCENTAGE_FONT_SIZE: f64 = 42.0;

/// A display length: a pixel count or a raw value passed through verbatim
/// (`"100%"`, `"32em"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Px(f64),
    Raw(String),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{}", crate::fmt_num(*v)),
            Dimension::Raw(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Px(value)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Raw(value.to_string())
    }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self {
        Dimension::Raw(value)
    }
}

/// Style for the background arc.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackStyle {
    pub color: Option<String>,
}

impl TrackStyle {
    /// Populated group used when the caller supplies no `track`.
    pub fn preset() -> Self {
        Self {
            color: Some("#e5e7eb".to_string()),
        }
    }
}

/// Style for the filled progress arc.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarStyle {
    pub color: Option<String>,
}

impl BarStyle {
    /// Populated group used when the caller supplies no `bar`.
    pub fn preset() -> Self {
        Self {
            color: Some("#1e6dfd".to_string()),
        }
    }
}

/// Style for the ring of numeric tick labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStyle {
    pub color: Option<String>,
    pub font_size: Option<f64>,
    /// Distance from the outer edge of the arc stroke to the label anchors.
    pub padding: Option<f64>,
    /// Number of intervals; the ring carries `steps + 1` labels.
    pub steps: Option<u32>,
    pub font_family: Option<String>,
}

impl LabelStyle {
    /// Populated group used when the caller supplies no `label`.
    pub fn preset() -> Self {
        Self {
            color: Some("#111827".to_string()),
            font_size: Some(13.0),
            padding: Some(FALLBACK_LABEL_PADDING),
            steps: Some(FALLBACK_LABEL_STEPS),
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
        }
    }
}

/// Style for the ring of decoration dots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotStyle {
    pub color: Option<String>,
    pub radius: Option<f64>,
    /// Distance from the arc radius to the dot centers.
    pub padding: Option<f64>,
    /// Number of dots in the ring.
    pub count: Option<u32>,
}

impl DotStyle {
    /// Populated group used when the caller supplies no `dot`.
    pub fn preset() -> Self {
        Self {
            color: Some("#555770".to_string()),
            radius: Some(1.5),
            padding: Some(FALLBACK_DOT_PADDING),
            count: Some(FALLBACK_DOT_COUNT),
        }
    }
}

/// Pass-through class for the tick label glyphs only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub class: Option<String>,
}

/// Style for the centered percentage readout. There is no populated preset:
/// the readout is off unless `show_percentage` is set, and its font size and
/// family have render-time fallbacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentageStyle {
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub class: Option<String>,
    pub font_family: Option<String>,
}
