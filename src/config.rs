use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::compose::pass::OverlayDesign;
use crate::foundation::core::{Canvas, Fps, OverlayRegion, Rgba8};
use crate::foundation::error::{TickerError, TickerResult};
use crate::render::surface::TextStyle;
use crate::transport::frame::{ColorSpace, VideoFlags};
use crate::transport::sender::Quality;

/// Text shown when no other text is configured.
pub const DEFAULT_TEXT: &str = "This is an example of ticker text rendered on the CPU and sent \
                                as live video with an alpha channel!";

/// Bold sans-serif faces looked up when no font path is configured.
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Complete description of a ticker run.
///
/// Every field has a default, so a config file only needs the fields it changes. Colors accept
/// `"#RRGGBB"`, `"#RRGGBBAA"`, `{"r":..,"g":..,"b":..,"a":..}` (0-255) or `[r, g, b(, a)]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TickerConfig {
    /// Output frame size.
    pub canvas: Canvas,
    /// Height of the ticker strip along the bottom edge.
    pub overlay_height: f64,
    /// Corner radius of the strip.
    pub corner_radius: f64,
    /// Gradient color at the strip's top-left corner.
    pub background_start: ConfigColor,
    /// Gradient color at the strip's bottom-right corner.
    pub background_end: ConfigColor,
    /// Ticker text.
    pub text: String,
    /// Font file; searched in [`FONT_SEARCH_PATHS`] when unset.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color.
    pub text_color: ConfigColor,
    /// Pixels the text moves per frame.
    pub step_px: f64,
    /// Output frame rate.
    pub fps: Fps,
    /// Color space; derived from the canvas height when unset.
    pub color_space: Option<ColorSpace>,
    /// Stream name.
    pub name: String,
    /// Output URL handed to the encoder.
    pub address: String,
    /// Encoder quality.
    pub quality: Quality,
    /// Container format for the encoder output.
    pub container: String,
    /// Frames between sender statistics log lines; one second of frames when unset.
    pub stats_every_frames: Option<u64>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            overlay_height: 120.0,
            corner_radius: 8.0,
            background_start: ConfigColor(Rgba8::new(0, 19, 69, 192)),
            background_end: ConfigColor(Rgba8::new(0, 89, 254, 192)),
            text: DEFAULT_TEXT.to_string(),
            font_path: None,
            font_size: 48.0,
            text_color: ConfigColor(Rgba8::white()),
            step_px: 4.0,
            fps: Fps::NTSC_59_94,
            color_space: None,
            name: "Graphics".to_string(),
            address: "udp://127.0.0.1:5000".to_string(),
            quality: Quality::Default,
            container: "matroska".to_string(),
            stats_every_frames: None,
        }
    }
}

impl TickerConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TickerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TickerError::serde(format!("parse ticker config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TickerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TickerError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON form.
    pub fn to_json_pretty(&self) -> TickerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TickerError::serde(format!("serialize ticker config: {e}")))
    }

    /// Check every field that can be checked without touching the filesystem.
    pub fn validate(&self) -> TickerResult<()> {
        self.canvas.validate()?;
        if !self.overlay_height.is_finite()
            || self.overlay_height <= 0.0
            || self.overlay_height > f64::from(self.canvas.height)
        {
            return Err(TickerError::validation(format!(
                "overlay_height must be in (0, {}]",
                self.canvas.height
            )));
        }
        self.region().validate(self.canvas)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(TickerError::validation("font_size must be finite and > 0"));
        }
        if !self.step_px.is_finite() || self.step_px < 0.0 {
            return Err(TickerError::validation("step_px must be finite and >= 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.name.trim().is_empty() {
            return Err(TickerError::validation("name must be non-empty"));
        }
        if self.address.trim().is_empty() {
            return Err(TickerError::validation("address must be non-empty"));
        }
        if self.container.trim().is_empty() {
            return Err(TickerError::validation("container must be non-empty"));
        }
        if self.stats_every_frames == Some(0) {
            return Err(TickerError::validation("stats_every_frames must be > 0"));
        }
        Ok(())
    }

    /// Ticker strip along the bottom of the canvas.
    pub fn region(&self) -> OverlayRegion {
        OverlayRegion::bottom_strip(self.canvas, self.overlay_height, self.corner_radius)
    }

    /// Configured color space, or the one matching the canvas height.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
            .unwrap_or_else(|| ColorSpace::for_height(self.canvas.height))
    }

    /// Frame flags: frames always carry meaningful alpha.
    pub fn video_flags(&self) -> VideoFlags {
        VideoFlags::ALPHA
    }

    /// Frames between statistics log lines.
    pub fn stats_interval(&self) -> u64 {
        self.stats_every_frames
            .unwrap_or_else(|| self.fps.frames_per_second_rounded())
    }

    /// The configured font path, or the first existing entry of [`FONT_SEARCH_PATHS`].
    pub fn resolve_font_path(&self) -> TickerResult<PathBuf> {
        if let Some(p) = &self.font_path {
            return Ok(p.clone());
        }
        FONT_SEARCH_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| {
                TickerError::text(
                    "no font_path configured and no bold sans-serif font found in the default \
                     locations",
                )
            })
    }

    /// Load the font and assemble the overlay design.
    #[tracing::instrument(skip(self))]
    pub fn to_design(&self) -> TickerResult<OverlayDesign> {
        let font_path = self.resolve_font_path()?;
        let font_data = std::fs::read(&font_path).map_err(|e| {
            TickerError::text(format!("read font '{}': {e}", font_path.display()))
        })?;
        tracing::debug!(font = %font_path.display(), bytes = font_data.len(), "font loaded");

        Ok(OverlayDesign {
            region: self.region(),
            background_start: self.background_start.0,
            background_end: self.background_end.0,
            text: self.text.clone(),
            text_style: TextStyle {
                font_data: Arc::new(font_data),
                size_px: self.font_size,
                color: self.text_color.0,
            },
        })
    }
}

/// Straight RGBA8 color as written in config files; serializes as `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigColor(pub Rgba8);

impl Serialize for ConfigColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let c = self.0;
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a))
    }
}

impl<'de> Deserialize<'de> for ConfigColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map(Self).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self(Rgba8::new(r, g, b, a))),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self(Rgba8::new(*r, *g, *b, 255))),
                [r, g, b, a] => Ok(Self(Rgba8::new(*r, *g, *b, *a))),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() || !(s.len() == 6 || s.len() == 8) {
        return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
    }
    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;
    let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
    Ok(Rgba8::new(r, g, b, a))
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
