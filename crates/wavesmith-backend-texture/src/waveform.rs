//! Waveform rasterizer.
//!
//! Draws a [`Signal`] as vertical bars around a center line, one column per
//! sample (or per span of samples for long signals), with an optional ghost of
//! the unmodified signal underneath and an optional envelope outline on top.

use serde::{Deserialize, Serialize};
use wavesmith_backend_audio::{resample_linear, Signal};
use wavesmith_spec::{ColorScheme, Envelope};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::RenderError;
use crate::png::{encode_rgb, PngConfig};

/// Smallest supported image height.
pub const MIN_HEIGHT: u32 = 8;

/// Largest supported image height.
pub const MAX_HEIGHT: u32 = 8192;

const CENTER_LINE_MIX: f64 = 0.3;
const GHOST_MIX: f64 = 0.35;
const OVERLAY_LIGHTEN: f64 = 0.5;

/// Rasterizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Upper bound on image width. Longer signals are aggregated per column.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Draw the base signal underneath when an envelope was applied.
    #[serde(default = "default_true")]
    pub ghost_base: bool,
    /// Draw the envelope arms as an outline.
    #[serde(default = "default_true")]
    pub envelope_overlay: bool,
}

fn default_height() -> u32 {
    256
}

fn default_max_width() -> u32 {
    4096
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            max_width: default_max_width(),
            ghost_base: true,
            envelope_overlay: true,
        }
    }
}

impl RenderConfig {
    /// Sets the image height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Sets the maximum image width.
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    fn check(&self) -> Result<(), RenderError> {
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&self.height) {
            return Err(RenderError::InvalidDimensions(format!(
                "height {} outside {}..={}",
                self.height, MIN_HEIGHT, MAX_HEIGHT
            )));
        }
        if self.max_width == 0 {
            return Err(RenderError::InvalidDimensions(
                "max_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to draw.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// The signal drawn in full color.
    pub signal: &'a Signal,
    /// Colors for the canvas and both halves of the waveform.
    pub colors: &'a ColorScheme,
    /// Envelope to outline, if any.
    pub envelope_overlay: Option<&'a Envelope>,
    /// Signal drawn faintly underneath, if any.
    pub ghost: Option<&'a Signal>,
}

impl<'a> RenderRequest<'a> {
    /// A plain request with no ghost and no overlay.
    pub fn new(signal: &'a Signal, colors: &'a ColorScheme) -> Self {
        Self {
            signal,
            colors,
            envelope_overlay: None,
            ghost: None,
        }
    }

    /// Adds an envelope outline.
    pub fn with_envelope(mut self, envelope: &'a Envelope) -> Self {
        self.envelope_overlay = Some(envelope);
        self
    }

    /// Adds a ghost signal.
    pub fn with_ghost(mut self, ghost: &'a Signal) -> Self {
        self.ghost = Some(ghost);
        self
    }
}

/// A rendered waveform image.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// PNG file bytes.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

struct Palette {
    background: Color,
    positive: Color,
    negative: Color,
}

impl Palette {
    fn parse(colors: &ColorScheme) -> Result<Self, RenderError> {
        let [background, positive, negative] = colors.fields().map(|(field, value)| {
            Color::from_hex(value).ok_or_else(|| RenderError::InvalidColor {
                field,
                value: value.to_string(),
            })
        });
        Ok(Self {
            background: background?,
            positive: positive?,
            negative: negative?,
        })
    }

    fn faded(&self, t: f64) -> Self {
        Self {
            background: self.background,
            positive: self.positive.lerp(&self.background, t),
            negative: self.negative.lerp(&self.background, t),
        }
    }
}

/// Maps an amplitude in [-1, 1] to a row, with +1 at the top.
pub fn amplitude_to_y(amplitude: f64, height: u32) -> u32 {
    let a = if amplitude.is_finite() {
        amplitude.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let max_y = height.saturating_sub(1);
    let y = ((1.0 - a) / 2.0 * max_y as f64).round() as u32;
    y.min(max_y)
}

/// Per-column `(min, max)` over the samples that fall in each column.
///
/// With at least as many columns as samples every column holds exactly one
/// sample. Otherwise column `c` covers `floor(c * n / w)..ceil((c + 1) * n / w)`.
pub fn column_ranges(samples: &[f64], width: u32) -> Vec<(f64, f64)> {
    let n = samples.len() as u64;
    let w = width as u64;
    if n == 0 || w == 0 {
        return Vec::new();
    }

    (0..w)
        .map(|c| {
            let start = (c * n / w) as usize;
            let end = (((c + 1) * n).div_ceil(w) as usize)
                .min(samples.len())
                .max(start + 1);
            samples[start..end]
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                    (lo.min(s), hi.max(s))
                })
        })
        .collect()
}

fn draw_bars(canvas: &mut Canvas, columns: &[(f64, f64)], palette: &Palette) {
    let height = canvas.height();
    let center = amplitude_to_y(0.0, height);
    let positive = palette.positive.to_rgb8();
    let negative = palette.negative.to_rgb8();

    for (x, &(min, max)) in columns.iter().enumerate() {
        let x = x as u32;
        if max >= 0.0 {
            canvas.vline(x, center, amplitude_to_y(max, height), positive);
        }
        if min < 0.0 {
            canvas.vline(x, center, amplitude_to_y(min, height), negative);
        }
    }
}

fn draw_outline(canvas: &mut Canvas, envelope: &Envelope, palette: &Palette) {
    let width = canvas.width() as usize;
    let height = canvas.height();
    let arms = [
        (&envelope.positive, 1.0, palette.positive),
        (&envelope.negative, -1.0, palette.negative),
    ];

    for (arm, sign, color) in arms {
        if arm.is_empty() {
            continue;
        }
        let rgb = color.lighten(OVERLAY_LIGHTEN).to_rgb8();
        for (x, v) in resample_linear(arm, width).into_iter().enumerate() {
            canvas.set_pixel(x as u32, amplitude_to_y(sign * v.abs(), height), rgb);
        }
    }
}

/// Renders a waveform into a canvas without encoding it.
///
/// # Errors
/// - [`RenderError::EmptySignal`] for a zero-length signal
/// - [`RenderError::InvalidColor`] when a scheme color is not a hex color
/// - [`RenderError::InvalidDimensions`] for an unsupported height or width
pub fn rasterize(request: &RenderRequest, config: &RenderConfig) -> Result<Canvas, RenderError> {
    if request.signal.is_empty() {
        return Err(RenderError::EmptySignal);
    }
    config.check()?;
    let palette = Palette::parse(request.colors)?;

    let width = u32::try_from(request.signal.len())
        .unwrap_or(u32::MAX)
        .min(config.max_width);
    let height = config.height;

    let mut canvas = Canvas::new(width, height, palette.background);
    let center_line = palette.background.lerp(&palette.positive, CENTER_LINE_MIX);
    canvas.hline(amplitude_to_y(0.0, height), center_line.to_rgb8());

    if let Some(ghost) = request.ghost.filter(|g| !g.is_empty()) {
        let columns = column_ranges(ghost.samples(), width);
        draw_bars(&mut canvas, &columns, &palette.faded(GHOST_MIX));
    }

    let columns = column_ranges(request.signal.samples(), width);
    draw_bars(&mut canvas, &columns, &palette);

    if let Some(envelope) = request.envelope_overlay {
        draw_outline(&mut canvas, envelope, &palette);
    }

    Ok(canvas)
}

/// Renders a waveform to PNG.
///
/// Same failure modes as [`rasterize`], plus [`RenderError::Png`] when
/// encoding fails.
pub fn render(request: &RenderRequest, config: &RenderConfig) -> Result<RenderResult, RenderError> {
    let canvas = rasterize(request, config)?;
    let png_data = encode_rgb(&canvas, &PngConfig::default())?;
    let hash = blake3::hash(&png_data).to_hex().to_string();

    Ok(RenderResult {
        png_data,
        hash,
        width: canvas.width(),
        height: canvas.height(),
    })
}
