use std::str::FromStr;

use crate::foundation::error::{TickerError, TickerResult};

pub use kurbo::{Point, Rect, RoundedRect, Vec2};

/// Transport timestamp resolution: ticks per second (100 ns units).
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Absolute 0-based index of a generated frame since the loop started.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// 59.94 fps, the default ticker frame rate.
    pub const NTSC_59_94: Self = Self {
        num: 60_000,
        den: 1_001,
    };

    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> TickerResult<Self> {
        if den == 0 {
            return Err(TickerError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TickerError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of frame `frame` in 100 ns ticks, computed without accumulated rounding drift.
    pub fn timestamp_ticks(self, frame: FrameIndex) -> i64 {
        let t = u128::from(frame.0) * u128::from(TICKS_PER_SECOND) * u128::from(self.den)
            / u128::from(self.num);
        i64::try_from(t).unwrap_or(i64::MAX)
    }

    /// Number of frames in (roughly) one second, at least one.
    pub fn frames_per_second_rounded(self) -> u64 {
        (self.as_f64().round() as u64).max(1)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::NTSC_59_94
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Fps {
    type Err = TickerError;

    /// Accepts `"60"`, `"60000/1001"` or a decimal such as `"59.94"`.
    ///
    /// Decimals within 0.01 of an NTSC rate (`n * 1000/1001`) map to that exact rational.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let num = n
                .trim()
                .parse::<u32>()
                .map_err(|e| TickerError::validation(format!("invalid fps numerator '{n}': {e}")))?;
            let den = d.trim().parse::<u32>().map_err(|e| {
                TickerError::validation(format!("invalid fps denominator '{d}': {e}"))
            })?;
            return Self::new(num, den);
        }

        let v = s
            .parse::<f64>()
            .map_err(|e| TickerError::validation(format!("invalid fps '{s}': {e}")))?;
        if !v.is_finite() || v <= 0.0 || v > f64::from(u32::MAX / 1000) {
            return Err(TickerError::validation(format!("fps out of range: {s}")));
        }
        if v.fract() == 0.0 {
            return Self::new(v as u32, 1);
        }
        let ntsc_base = (v * 1.001).round();
        if ntsc_base > 0.0 && (ntsc_base * 1000.0 / 1001.0 - v).abs() < 0.01 {
            return Self::new(ntsc_base as u32 * 1000, 1001);
        }
        Self::new((v * 1000.0).round() as u32, 1000)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Dimensions must be non-zero and fit the rasterizer (`u16`).
    pub fn new(width: u32, height: u32) -> TickerResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check dimension limits.
    pub fn validate(self) -> TickerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TickerError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(TickerError::validation(format!(
                "canvas {}x{} exceeds the {}px rasterizer limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Row stride in bytes for a 4-byte-per-pixel layout.
    pub fn stride(self) -> usize {
        self.width as usize * 4
    }

    /// Total byte length for a 4-byte-per-pixel layout.
    pub fn byte_len(self) -> usize {
        self.stride() * self.height as usize
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The full canvas as a rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Straight (unpremultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Opaque white.
    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels in transport byte order `[b, g, r, a]`.
    pub fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

/// Fixed rectangle of the canvas that holds the ticker, with rounded corners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayRegion {
    /// Region bounds in canvas pixels.
    pub rect: Rect,
    /// Corner radius in pixels.
    pub radius: f64,
}

impl OverlayRegion {
    /// A strip of `height` pixels along the bottom edge of `canvas`.
    pub fn bottom_strip(canvas: Canvas, height: f64, radius: f64) -> Self {
        let h = f64::from(canvas.height);
        Self {
            rect: Rect::new(0.0, (h - height).max(0.0), f64::from(canvas.width), h),
            radius,
        }
    }

    /// Check that the region is non-empty, inside `canvas`, and has a sane radius.
    pub fn validate(&self, canvas: Canvas) -> TickerResult<()> {
        let r = self.rect;
        if ![r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) {
            return Err(TickerError::validation("overlay rect must be finite"));
        }
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return Err(TickerError::validation(
                "overlay rect must have positive width and height",
            ));
        }
        let bounds = canvas.rect();
        if r.x0 < bounds.x0 || r.y0 < bounds.y0 || r.x1 > bounds.x1 || r.y1 > bounds.y1 {
            return Err(TickerError::validation(format!(
                "overlay rect {r:?} does not fit inside the {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(TickerError::validation(
                "overlay corner radius must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// The region as a kurbo rounded rectangle.
    pub fn rounded_rect(&self) -> RoundedRect {
        RoundedRect::from_rect(self.rect, self.radius)
    }
}

impl Default for OverlayRegion {
    fn default() -> Self {
        Self::bottom_strip(Canvas::default(), 120.0, 8.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
