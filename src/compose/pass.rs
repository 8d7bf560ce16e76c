use crate::foundation::core::{OverlayRegion, Point, Rgba8};
use crate::foundation::error::TickerResult;
use crate::render::frame::FrameBuffer;
use crate::render::surface::{DrawingSurface, LinearGradient, TextMetrics, TextStyle};

/// Everything the ticker graphic is drawn from, fixed for the life of a run.
#[derive(Clone, Debug)]
pub struct OverlayDesign {
    /// Background strip and corner radius.
    pub region: OverlayRegion,
    /// Gradient color at the region's top-left corner.
    pub background_start: Rgba8,
    /// Gradient color at the region's bottom-right corner.
    pub background_end: Rgba8,
    /// Ticker text content.
    pub text: String,
    /// Ticker font, size and color.
    pub text_style: TextStyle,
}

/// Draws one ticker frame: clear, gradient strip, text.
///
/// Text is shaped and measured once at construction; the baseline is placed so the text's
/// ascent/descent box is vertically centered in the overlay region.
pub struct CompositionPass<T> {
    region: OverlayRegion,
    paint: LinearGradient,
    text: T,
    metrics: TextMetrics,
    baseline_y: f64,
}

impl<T> CompositionPass<T> {
    /// Shape the ticker text on `surface` and precompute paint and placement.
    pub fn new<S>(surface: &mut S, design: &OverlayDesign) -> TickerResult<Self>
    where
        S: DrawingSurface<Text = T>,
    {
        design.region.validate(surface.info().canvas)?;

        let text = surface.prepare_text(&design.text, &design.text_style)?;
        let metrics = surface.text_metrics(&text);
        let r = design.region.rect;
        let baseline_y = r.y0 + (r.height() + metrics.ascent - metrics.descent) / 2.0;

        tracing::debug!(
            text_width = metrics.width,
            baseline_y,
            "composition pass ready"
        );

        Ok(Self {
            region: design.region,
            paint: LinearGradient {
                start: Point::new(r.x0, r.y0),
                end: Point::new(r.x1, r.y1),
                start_color: design.background_start,
                end_color: design.background_end,
            },
            text,
            metrics,
            baseline_y,
        })
    }

    /// Measured advance of the ticker text.
    pub fn text_width(&self) -> f64 {
        self.metrics.width
    }

    /// Measured text metrics.
    pub fn text_metrics(&self) -> TextMetrics {
        self.metrics
    }

    /// Baseline y coordinate used for every frame.
    pub fn baseline_y(&self) -> f64 {
        self.baseline_y
    }

    /// Background paint.
    pub fn paint(&self) -> &LinearGradient {
        &self.paint
    }

    /// Render the frame for `scroll_x` into `frame`.
    pub fn render<S>(&self, frame: &mut FrameBuffer<S>, scroll_x: f64)
    where
        S: DrawingSurface<Text = T>,
    {
        frame.clear();
        let surface = frame.surface_mut();
        surface.fill_rounded_rect(self.region.rounded_rect(), &self.paint);
        surface.draw_text(&self.text, Point::new(scroll_x, self.baseline_y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pass.rs"]
mod tests;
