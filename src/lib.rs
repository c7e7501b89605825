//! Semi-circular SVG progress gauge.
//!
//! A single widget: a track arc, a dash-offset progress arc, an optional ring
//! of tick labels, an optional ring of decoration dots, and an optional
//! centered percentage readout. Rendering is a pure function of the
//! configuration; the output is a [`Scene`] of drawing commands that
//! serializes to SVG markup for embedding in a host document.

// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;

// External crate imports
use bon::Builder;
use kurbo::{Point, Vec2};

// Standard library imports
use std::f64::consts::PI;
use std::fmt;

use config::{
    BarStyle, Dimension, DotStyle, LabelStyle, PercentageStyle, TextStyle, TrackStyle,
    DEFAULT_FONT_FAMILY, FALLBACK_DOT_COUNT, FALLBACK_DOT_PADDING, FALLBACK_LABEL_PADDING,
    FALLBACK_LABEL_STEPS, FALLBACK_PERCENTAGE_FONT_SIZE,
};

/// Logical canvas the geometry is computed on; the root element scales it to
/// the configured display size.
const CANVAS_SIZE: f64 = 512.0;

/// ViewBox height divisor. Crops the unused lower canvas while keeping the
/// semicircle and the percentage readout in view.
const VIEWBOX_CROP: f64 = 1.9;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Full configuration for one gauge.
///
/// Every field has a default. Style groups are replaced wholesale when
/// supplied, never merged field by field; see the [`config`] module docs for
/// the consequences.
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    /// Display width of the root element. The height is fixed at 50% of the
    /// sizing context.
    #[builder(into, default = Dimension::Raw("100%".to_string()))]
    pub size: Dimension,
    #[builder(default = 12.0)]
    pub stroke_width: f64,
    /// Current value. Clamped to `[0, max]` for the fill; the percentage
    /// readout shows it raw.
    #[builder(default = 50.0)]
    pub progress: f64,
    /// Upper bound of `progress`. A non-positive bound renders an empty fill.
    #[builder(default = 100.0)]
    pub max: f64,
    /// Transition hint for the bar's dash offset, in seconds.
    #[builder(default = 0.6)]
    pub animation_duration: f64,
    #[builder(default = TrackStyle::preset())]
    pub track: TrackStyle,
    #[builder(default = BarStyle::preset())]
    pub bar: BarStyle,
    #[builder(default = LabelStyle::preset())]
    pub label: LabelStyle,
    #[builder(default = DotStyle::preset())]
    pub dot: DotStyle,
    #[builder(default)]
    pub text: TextStyle,
    #[builder(default = false)]
    pub show_percentage: bool,
    #[builder(default)]
    pub percentage: PercentageStyle,
}

/// The gauge widget: owns its configuration plus the memoized label and dot
/// rings, so a host can re-render it cheaply on every frame.
#[derive(Debug, Clone)]
pub struct ArcGauge {
    config: GaugeConfig,
    label_cache: Option<(LabelDeps, Vec<DrawCommand>)>,
    dot_cache: Option<(DotDeps, Vec<DrawCommand>)>,
}

impl ArcGauge {
    pub fn new(config: GaugeConfig) -> Self {
        Self {
            config,
            label_cache: None,
            dot_cache: None,
        }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Update the value for the next render. The raw value is kept so the
    /// percentage readout can show it unclamped.
    pub fn set_progress(&mut self, value: f64) {
        self.config.progress = value;
    }

    /// Replace the whole configuration. The ring caches survive and are
    /// rebuilt only if their dependency fields actually changed.
    pub fn update_config(&mut self, config: GaugeConfig) {
        self.config = config;
    }

    /// Compute the drawing tree for the current configuration. Identical
    /// configuration always yields an identical scene.
    pub fn scene(&mut self) -> Scene {
        let geometry = ArcGeometry::derive(self.config.stroke_width);
        let path = geometry.path();

        let labels = self.cached_labels(&geometry);
        let dots = self.cached_dots(&geometry, labels.len());

        let mut scene = Scene::new(self.config.size.clone());

        // Bottom to top: track, bar, dots, labels, readout.
        scene.add_command(DrawCommand::Arc {
            d: path.clone(),
            stroke: self.config.track.color.clone(),
            stroke_width: self.config.stroke_width,
            dash: None,
        });
        scene.add_command(DrawCommand::Arc {
            d: path,
            stroke: self.config.bar.color.clone(),
            stroke_width: self.config.stroke_width,
            dash: Some(DashStroke {
                array: geometry.arc_length,
                offset: dash_offset(geometry.arc_length, self.config.progress, self.config.max),
                transition_secs: self.config.animation_duration,
            }),
        });
        for command in dots {
            scene.add_command(command);
        }
        for command in labels {
            scene.add_command(command);
        }
        if self.config.show_percentage {
            scene.add_command(self.percentage_readout());
        }

        scene
    }

    /// Render straight to markup.
    pub fn to_svg(&mut self) -> String {
        self.scene().to_svg()
    }

    fn cached_labels(&mut self, geometry: &ArcGeometry) -> Vec<DrawCommand> {
        let deps = LabelDeps::of(&self.config);
        if let Some((key, ring)) = &self.label_cache {
            if *key == deps {
                return ring.clone();
            }
        }
        let ring = label_ring(&self.config, geometry);
        self.label_cache = Some((deps, ring.clone()));
        ring
    }

    fn cached_dots(&mut self, geometry: &ArcGeometry, label_count: usize) -> Vec<DrawCommand> {
        let deps = DotDeps::of(&self.config, label_count);
        if let Some((key, ring)) = &self.dot_cache {
            if *key == deps {
                return ring.clone();
            }
        }
        let ring = dot_ring(&self.config, geometry, label_count);
        self.dot_cache = Some((deps, ring.clone()));
        ring
    }

    fn percentage_readout(&self) -> DrawCommand {
        let percentage = &self.config.percentage;
        // Empty-string families fall back too, not just missing ones.
        let font_family = percentage
            .font_family
            .as_deref()
            .filter(|family| !family.is_empty())
            .unwrap_or(DEFAULT_FONT_FAMILY);
        DrawCommand::Text {
            x: Dimension::Raw("50%".to_string()),
            y: Dimension::Raw("80%".to_string()),
            content: format!("{}%", fmt_num(self.config.progress)),
            fill: percentage.color.clone(),
            font_size: Some(
                percentage
                    .font_size
                    .unwrap_or(FALLBACK_PERCENTAGE_FONT_SIZE),
            ),
            font_family: Some(font_family.to_string()),
            class: percentage.class.clone(),
        }
    }
}

// ============================================================================
// ARC GEOMETRY DERIVATION
// ============================================================================

/// Geometry shared by the track and the bar, derived fresh each render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f64,
    /// Semicircle circumference, used as dash array and offset base.
    pub arc_length: f64,
}

impl ArcGeometry {
    pub fn derive(stroke_width: f64) -> Self {
        let center = Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);
        let radius = (CANVAS_SIZE - 50.0 - stroke_width * 4.0) / 2.0;
        Self {
            center,
            radius,
            arc_length: PI * radius,
        }
    }

    /// Half-circle path from the left end to the right end, drawn clockwise
    /// (large-arc 0, sweep 1). Shared verbatim by both arcs.
    pub fn path(&self) -> String {
        format!(
            "M {} {} A {} {} 0 0 1 {} {}",
            fmt_num(self.center.x - self.radius),
            fmt_num(self.center.y),
            fmt_num(self.radius),
            fmt_num(self.radius),
            fmt_num(self.center.x + self.radius),
            fmt_num(self.center.y),
        )
    }

    /// Polar placement around the center. Angle 0 lands on the arc's left
    /// end and π on its right end, sweeping the upper half-plane.
    fn point_at(&self, angle: f64, radius: f64) -> Point {
        self.center + Vec2::from_angle(angle - PI) * radius
    }
}

/// Fraction of the arc covered by `progress`, always finite. Out-of-range
/// progress clamps to the boundary; `max <= 0` counts as empty.
pub fn fill_fraction(progress: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    progress.clamp(0.0, max) / max
}

/// Length of the dashed stroke hidden from the start of the bar path. Zero
/// at full progress, the whole arc at zero progress.
pub fn dash_offset(arc_length: f64, progress: f64, max: f64) -> f64 {
    arc_length * (1.0 - fill_fraction(progress, max))
}

// ============================================================================
// LABEL AND DOT RING GENERATION
// ============================================================================

fn label_ring(config: &GaugeConfig, geometry: &ArcGeometry) -> Vec<DrawCommand> {
    let label = &config.label;
    let steps = label.steps.unwrap_or(FALLBACK_LABEL_STEPS);
    let placement_radius = geometry.radius
        + config.stroke_width / 2.0
        + label.padding.unwrap_or(FALLBACK_LABEL_PADDING);

    let glyph = |value: f64, angle: f64| {
        let pos = geometry.point_at(angle, placement_radius);
        DrawCommand::Text {
            x: Dimension::Px(pos.x),
            y: Dimension::Px(pos.y),
            content: fmt_num(value.round()),
            fill: label.color.clone(),
            font_size: label.font_size,
            font_family: label.font_family.clone(),
            class: config.text.class.clone(),
        }
    };

    if steps == 0 {
        // Degenerate ring: a single label at the arc's left end instead of a
        // division by zero in the angle formula.
        return vec![glyph(0.0, 0.0)];
    }

    (0..=steps)
        .map(|i| {
            let value = config.max / steps as f64 * i as f64;
            let angle = PI * i as f64 / steps as f64;
            glyph(value, angle)
        })
        .collect()
}

fn dot_ring(config: &GaugeConfig, geometry: &ArcGeometry, label_count: usize) -> Vec<DrawCommand> {
    let dot = &config.dot;
    let count = dot.count.unwrap_or(FALLBACK_DOT_COUNT);
    let steps = config.label.steps.unwrap_or(FALLBACK_LABEL_STEPS);
    let placement_radius = geometry.radius + dot.padding.unwrap_or(FALLBACK_DOT_PADDING);

    (0..count)
        .map(|i| {
            let angle = PI * i as f64 / count as f64;
            // A dot sitting on a label angle keeps its slot but loses its
            // radius, so the ring stays index-stable. With no label intervals
            // there is nothing to align against (and nothing to divide by).
            let on_label = label_count > 0
                && steps > 0
                && (i as f64) % (count as f64 / steps as f64) == 0.0;
            DrawCommand::Circle {
                center: geometry.point_at(angle, placement_radius),
                radius: if on_label { Some(0.0) } else { dot.radius },
                fill: dot.color.clone(),
            }
        })
        .collect()
}

// ============================================================================
// DEPENDENCY KEYS FOR MEMOIZED RINGS
// ============================================================================

// A ring is rebuilt only when the key it was built under no longer matches.
// The fields are exactly the inputs of the corresponding ring builder.

#[derive(Debug, Clone, PartialEq)]
struct LabelDeps {
    steps: Option<u32>,
    max: f64,
    stroke_width: f64,
    padding: Option<f64>,
    color: Option<String>,
    font_size: Option<f64>,
    font_family: Option<String>,
    class: Option<String>,
}

impl LabelDeps {
    fn of(config: &GaugeConfig) -> Self {
        Self {
            steps: config.label.steps,
            max: config.max,
            stroke_width: config.stroke_width,
            padding: config.label.padding,
            color: config.label.color.clone(),
            font_size: config.label.font_size,
            font_family: config.label.font_family.clone(),
            class: config.text.class.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DotDeps {
    count: Option<u32>,
    radius: Option<f64>,
    padding: Option<f64>,
    stroke_width: f64,
    steps: Option<u32>,
    color: Option<String>,
    label_count: usize,
}

impl DotDeps {
    fn of(config: &GaugeConfig, label_count: usize) -> Self {
        Self {
            count: config.dot.count,
            radius: config.dot.radius,
            padding: config.dot.padding,
            stroke_width: config.stroke_width,
            steps: config.label.steps,
            color: config.dot.color.clone(),
            label_count,
        }
    }
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

/// Dash parameters that turn the bar path into a partially revealed stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct DashStroke {
    /// The full arc length, so the stroke is one continuous dash.
    pub array: f64,
    /// Hidden prefix of the dash; shrinks linearly as progress grows.
    pub offset: f64,
    /// Transition hint for consecutive renders, in seconds.
    pub transition_secs: f64,
}

/// One drawing primitive. `None` style leaves emit no attribute at all.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Arc {
        d: String,
        stroke: Option<String>,
        stroke_width: f64,
        dash: Option<DashStroke>,
    },
    Circle {
        center: Point,
        radius: Option<f64>,
        fill: Option<String>,
    },
    Text {
        x: Dimension,
        y: Dimension,
        content: String,
        fill: Option<String>,
        font_size: Option<f64>,
        font_family: Option<String>,
        class: Option<String>,
    },
}

/// Ordered drawing tree for one render pass; later commands paint on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    size: Dimension,
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn new(size: Dimension) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn size(&self) -> &Dimension {
        &self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Serialize the scene as an SVG fragment for embedding in a host
    /// document.
    pub fn write_svg<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let size = escape_attr(&self.size.to_string());
        write!(
            out,
            "<svg width=\"{size}\" height=\"50%\" viewBox=\"0 0 {} {}\" \
             preserveAspectRatio=\"xMidYMid meet\" \
             style=\"display: block; width: {size}; position: relative\">",
            fmt_num(CANVAS_SIZE),
            fmt_num(CANVAS_SIZE / VIEWBOX_CROP),
        )?;
        for command in &self.commands {
            write_command(out, command)?;
        }
        out.write_str("</svg>")
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out)
            .expect("writing to a String cannot fail");
        out
    }
}

fn write_command<W: fmt::Write>(out: &mut W, command: &DrawCommand) -> fmt::Result {
    match command {
        DrawCommand::Arc {
            d,
            stroke,
            stroke_width,
            dash,
        } => {
            write!(out, "<path d=\"{}\" fill=\"none\"", escape_attr(d))?;
            if let Some(stroke) = stroke {
                write!(out, " stroke=\"{}\"", escape_attr(stroke))?;
            }
            write!(
                out,
                " stroke-width=\"{}\" stroke-linecap=\"round\"",
                fmt_num(*stroke_width)
            )?;
            if let Some(dash) = dash {
                write!(
                    out,
                    " stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\" \
                     style=\"transition: stroke-dashoffset {}s ease\"",
                    fmt_num(dash.array),
                    fmt_num(dash.offset),
                    fmt_num(dash.transition_secs),
                )?;
            }
            out.write_str("/>")
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
        } => {
            write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\"",
                fmt_num(center.x),
                fmt_num(center.y)
            )?;
            if let Some(radius) = radius {
                write!(out, " r=\"{}\"", fmt_num(*radius))?;
            }
            if let Some(fill) = fill {
                write!(out, " fill=\"{}\"", escape_attr(fill))?;
            }
            out.write_str("/>")
        }
        DrawCommand::Text {
            x,
            y,
            content,
            fill,
            font_size,
            font_family,
            class,
        } => {
            write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\"",
                escape_attr(&x.to_string()),
                escape_attr(&y.to_string()),
            )?;
            if let Some(fill) = fill {
                write!(out, " fill=\"{}\"", escape_attr(fill))?;
            }
            if let Some(font_size) = font_size {
                write!(out, " font-size=\"{}\"", fmt_num(*font_size))?;
            }
            if let Some(class) = class {
                write!(out, " class=\"{}\"", escape_attr(class))?;
            }
            if let Some(font_family) = font_family {
                write!(out, " font-family=\"{}\"", escape_attr(font_family))?;
            }
            write!(out, ">{}</text>", escape_attr(content))
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Render a number the way a human would write it in markup: integral values
/// without the trailing `.0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// TESTS
// ============================================================================
