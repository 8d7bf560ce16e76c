use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TickerError, TickerResult};

/// Horizontal scroll state of the ticker text.
///
/// `scroll_x` is the left edge of the text in canvas pixels. It starts at the right edge of the
/// canvas, moves left by `step` every frame and jumps back to the right edge once the text has
/// completely left the canvas (`scroll_x <= -text_width`). Reachable states therefore lie in
/// `(-text_width, canvas_width]`.
///
/// The spacing between passes is in frames, not seconds: any jitter in frame cadence shows up as
/// jitter in the scroll, so the gap between passes is only approximately constant in wall time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickerAnimator {
    scroll_x: f64,
    canvas_width: f64,
    text_width: f64,
    step: f64,
}

impl TickerAnimator {
    /// Create an animator with `scroll_x = canvas_width`.
    pub fn new(canvas_width: f64, text_width: f64, step: f64) -> TickerResult<Self> {
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(TickerError::validation("canvas width must be finite and > 0"));
        }
        if !text_width.is_finite() || text_width < 0.0 {
            return Err(TickerError::validation("text width must be finite and >= 0"));
        }
        if !step.is_finite() || step < 0.0 {
            return Err(TickerError::validation("scroll step must be finite and >= 0"));
        }
        Ok(Self {
            scroll_x: canvas_width,
            canvas_width,
            text_width,
            step,
        })
    }

    /// Rebind the measured text width and restart from the right edge.
    pub fn with_text_width(self, text_width: f64) -> TickerResult<Self> {
        Self::new(self.canvas_width, text_width, self.step)
    }

    /// Current left edge of the text.
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// Pixels moved per frame.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Measured width of the text.
    pub fn text_width(&self) -> f64 {
        self.text_width
    }

    /// Width of the canvas the text scrolls across.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Move one frame to the left, wrapping once the text has fully exited.
    ///
    /// Returns the new `scroll_x`.
    pub fn advance(&mut self) -> f64 {
        self.scroll_x -= self.step;
        if self.scroll_x <= -self.text_width {
            self.scroll_x = self.canvas_width;
        }
        self.scroll_x
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.scroll_x = self.canvas_width;
    }

    /// Transitions per full pass, or `None` when the text never moves.
    pub fn period(&self) -> Option<u64> {
        if self.step <= 0.0 {
            return None;
        }
        let travel = self.canvas_width + self.text_width;
        Some(((travel / self.step).ceil() as u64).max(1))
    }

    /// State after `frame.0` transitions from the initial state.
    ///
    /// Matches repeated [`TickerAnimator::advance`] calls exactly when `step` and both widths are
    /// exactly representable (integers, halves, ...).
    pub fn position_at(&self, frame: FrameIndex) -> f64 {
        match self.period() {
            None => self.canvas_width,
            Some(p) => self.canvas_width - (frame.0 % p) as f64 * self.step,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ticker.rs"]
mod tests;
