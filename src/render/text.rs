use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{TickerError, TickerResult};
use crate::render::surface::TextMetrics;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A shaped single-line layout plus the font it was shaped with.
#[derive(Clone)]
pub struct ShapedLine {
    pub(crate) layout: Arc<parley::Layout<TextBrushRgba8>>,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) metrics: TextMetrics,
    /// Baseline offset of the first line from the layout's top edge.
    pub(crate) baseline: f64,
}

impl std::fmt::Debug for ShapedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedLine")
            .field("metrics", &self.metrics)
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

impl ShapedLine {
    /// Measured metrics.
    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape one unbroken line of text using provided font bytes and styling.
    pub(crate) fn shape_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        color: Rgba8,
    ) -> TickerResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TickerError::text("text size_px must be finite and > 0"));
        }
        if font_bytes.is_empty() {
            return Err(TickerError::text("font data is empty"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TickerError::text("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TickerError::text("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        // No width limit: a ticker is always a single line.
        layout.break_all_lines(None);

        let (metrics, baseline) = line_metrics(&layout, size_px);
        tracing::debug!(
            width = metrics.width,
            ascent = metrics.ascent,
            descent = metrics.descent,
            "shaped ticker text"
        );

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        Ok(ShapedLine {
            layout: Arc::new(layout),
            font,
            metrics,
            baseline,
        })
    }
}

/// Width plus first-line ascent/descent; falls back to size-based estimates for empty text.
fn line_metrics(layout: &parley::Layout<TextBrushRgba8>, size_px: f32) -> (TextMetrics, f64) {
    let mut width = 0.0f64;
    let mut first = None;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(f64::from(m.advance));
        if first.is_none() {
            first = Some((f64::from(m.ascent), f64::from(m.descent), f64::from(m.baseline)));
        }
    }
    let size = f64::from(size_px);
    let (ascent, descent, baseline) = first.unwrap_or((size * 0.8, size * 0.2, size * 0.8));
    (
        TextMetrics {
            width,
            ascent,
            descent,
        },
        baseline,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
