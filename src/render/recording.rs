use kurbo::Shape;

use crate::foundation::core::{Canvas, Point, Rect, RoundedRect, Rgba8};
use crate::foundation::error::{TickerError, TickerResult};
use crate::render::surface::{DrawingSurface, ImageInfo, LinearGradient, TextMetrics, TextStyle};

/// One drawing command captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// `clear()`.
    Clear,
    /// `fill_rounded_rect()`.
    FillRoundedRect {
        /// Filled shape.
        shape: RoundedRect,
        /// Paint used.
        paint: LinearGradient,
    },
    /// `draw_text()`.
    DrawText {
        /// Text content.
        text: String,
        /// Left baseline point.
        origin: Point,
    },
}

/// Text prepared by [`RecordingSurface`]; metrics come from a fixed per-character advance.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedText {
    /// Text content.
    pub text: String,
    /// Synthetic metrics.
    pub metrics: TextMetrics,
    /// Fill color.
    pub color: Rgba8,
}

/// Deterministic in-memory surface for tests and debugging.
///
/// Paints replace pixels (no blending): shapes are filled per pixel center, text is drawn as a
/// solid bar covering its advance and ascent/descent box. Every call is recorded. Readback can be
/// made to fail from a given read onward to exercise render-read failure handling.
#[derive(Debug)]
pub struct RecordingSurface {
    info: ImageInfo,
    pixels: Vec<u8>,
    ops: Vec<DrawOp>,
    reads: u64,
    fail_from_read: Option<u64>,
    advance_per_char: Option<f64>,
}

impl RecordingSurface {
    /// Create a transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> Self {
        let info = ImageInfo::bgra_unpremul(canvas);
        Self {
            info,
            pixels: vec![0; info.byte_len()],
            ops: Vec::new(),
            reads: 0,
            fail_from_read: None,
            advance_per_char: None,
        }
    }

    /// Make the read with 0-based index `n`, and every read after it, fail.
    pub fn fail_from_read(mut self, n: u64) -> Self {
        self.fail_from_read = Some(n);
        self
    }

    /// Override the per-character advance used for text width (default: half the font size).
    pub fn with_advance_per_char(mut self, advance: f64) -> Self {
        self.advance_per_char = Some(advance);
        self
    }

    /// Commands recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded commands.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of `read_pixels` calls, successful or not.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Current pixels in BGRA straight-alpha order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn fill_where(&mut self, bounds: Rect, mut color_at: impl FnMut(Point) -> Option<Rgba8>) {
        let clip = bounds.intersect(self.info.canvas.rect());
        if clip.area() <= 0.0 {
            return;
        }
        let stride = self.info.stride();
        let x0 = clip.x0.floor().max(0.0) as usize;
        let y0 = clip.y0.floor().max(0.0) as usize;
        let x1 = (clip.x1.ceil() as usize).min(self.info.width() as usize);
        let y1 = (clip.y1.ceil() as usize).min(self.info.height() as usize);
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some(c) = color_at(center) {
                    let i = y * stride + x * 4;
                    self.pixels[i..i + 4].copy_from_slice(&c.to_bgra());
                }
            }
        }
    }
}

impl DrawingSurface for RecordingSurface {
    type Text = RecordedText;

    fn info(&self) -> ImageInfo {
        self.info
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
        self.pixels.fill(0);
    }

    fn fill_rounded_rect(&mut self, shape: RoundedRect, paint: &LinearGradient) {
        self.ops.push(DrawOp::FillRoundedRect {
            shape,
            paint: *paint,
        });
        self.fill_where(shape.rect(), |p| {
            shape.contains(p).then(|| paint.color_at(p))
        });
    }

    fn prepare_text(&mut self, text: &str, style: &TextStyle) -> TickerResult<Self::Text> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(TickerError::text("text size_px must be finite and > 0"));
        }
        let size = f64::from(style.size_px);
        let advance = self.advance_per_char.unwrap_or(size * 0.5);
        Ok(RecordedText {
            text: text.to_string(),
            metrics: TextMetrics {
                width: advance * text.chars().count() as f64,
                ascent: size * 0.8,
                descent: size * 0.2,
            },
            color: style.color,
        })
    }

    fn text_metrics(&self, text: &Self::Text) -> TextMetrics {
        text.metrics
    }

    fn draw_text(&mut self, text: &Self::Text, origin: Point) {
        self.ops.push(DrawOp::DrawText {
            text: text.text.clone(),
            origin,
        });
        let m = text.metrics;
        let bar = Rect::new(
            origin.x,
            origin.y - m.ascent,
            origin.x + m.width,
            origin.y + m.descent,
        );
        let color = text.color;
        self.fill_where(bar, |_| Some(color));
    }

    fn read_pixels(&mut self, dst: &mut [u8], stride: usize) -> TickerResult<()> {
        let n = self.reads;
        self.reads += 1;
        if self.fail_from_read.is_some_and(|k| n >= k) {
            return Err(TickerError::render_read(format!(
                "recording surface refused read #{n}"
            )));
        }
        let row = self.info.stride();
        if stride < row || dst.len() < stride * (self.info.height() as usize - 1) + row {
            return Err(TickerError::render_read("destination too small"));
        }
        for (y, src) in self.pixels.chunks_exact(row).enumerate() {
            dst[y * stride..y * stride + row].copy_from_slice(src);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
