use std::sync::Arc;

use crate::foundation::core::{Canvas, Point, RoundedRect, Rgba8};
use crate::foundation::error::TickerResult;

/// Byte layout of pixels produced by [`DrawingSurface::read_pixels`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PixelLayout {
    /// 4 bytes per pixel in `b, g, r, a` order, color independent of alpha.
    Bgra8Unpremul,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgra8Unpremul => 4,
        }
    }
}

/// Description of a fixed-size pixel surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Surface dimensions.
    pub canvas: Canvas,
    /// Readback layout.
    pub layout: PixelLayout,
}

impl ImageInfo {
    /// BGRA, unpremultiplied alpha, tightly packed rows.
    pub fn bgra_unpremul(canvas: Canvas) -> Self {
        Self {
            canvas,
            layout: PixelLayout::Bgra8Unpremul,
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.canvas.width as usize * self.layout.bytes_per_pixel()
    }

    /// Total bytes for one frame.
    pub fn byte_len(&self) -> usize {
        self.stride() * self.canvas.height as usize
    }
}

/// Two-stop linear gradient in canvas coordinates, colors in straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point where `start_color` is fully applied.
    pub start: Point,
    /// Point where `end_color` is fully applied.
    pub end: Point,
    /// Color at `start`.
    pub start_color: Rgba8,
    /// Color at `end`.
    pub end_color: Rgba8,
}

impl LinearGradient {
    /// Color at canvas position `p`, clamped outside the `[start, end]` span.
    pub fn color_at(&self, p: Point) -> Rgba8 {
        let axis = self.end - self.start;
        let len2 = axis.hypot2();
        let t = if len2 <= f64::EPSILON {
            0.0
        } else {
            ((p - self.start).dot(axis) / len2).clamp(0.0, 1.0)
        };
        let lerp = |a: u8, b: u8| -> u8 {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        let (s, e) = (self.start_color, self.end_color);
        Rgba8::new(
            lerp(s.r, e.r),
            lerp(s.g, e.g),
            lerp(s.b, e.b),
            lerp(s.a, e.a),
        )
    }
}

/// Font, size and color for a single line of text.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Raw font file bytes (TTF/OTF).
    pub font_data: Arc<Vec<u8>>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text fill color.
    pub color: Rgba8,
}

/// Measured metrics of a prepared text line, all positive and in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance of the whole line.
    pub width: f64,
    /// Distance from the baseline up to the top of the tallest glyphs.
    pub ascent: f64,
    /// Distance from the baseline down to the bottom of the descenders.
    pub descent: f64,
}

/// A fixed-size 2D drawing target.
///
/// Draw calls are not expected to fail; a broken backend reports itself through
/// [`DrawingSurface::read_pixels`].
pub trait DrawingSurface {
    /// Backend-specific shaped text, prepared once and drawn many times.
    type Text;

    /// Dimensions and readback layout.
    fn info(&self) -> ImageInfo;

    /// Reset every pixel to fully transparent (all channels zero).
    fn clear(&mut self);

    /// Fill a rounded rectangle with a linear gradient.
    fn fill_rounded_rect(&mut self, shape: RoundedRect, paint: &LinearGradient);

    /// Shape a single line of text.
    fn prepare_text(&mut self, text: &str, style: &TextStyle) -> TickerResult<Self::Text>;

    /// Metrics of prepared text.
    fn text_metrics(&self, text: &Self::Text) -> TextMetrics;

    /// Draw prepared text with its left baseline point at `origin`.
    fn draw_text(&mut self, text: &Self::Text, origin: Point);

    /// Copy the surface into `dst` in [`ImageInfo::layout`], rows `stride` bytes apart.
    ///
    /// Errors are render-read failures.
    fn read_pixels(&mut self, dst: &mut [u8], stride: usize) -> TickerResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
