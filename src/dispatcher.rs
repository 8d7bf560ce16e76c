use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::animation::ticker::TickerAnimator;
use crate::compose::pass::{CompositionPass, OverlayDesign};
use crate::config::TickerConfig;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::TickerResult;
use crate::render::frame::FrameBuffer;
use crate::render::surface::DrawingSurface;
use crate::transport::frame::{ColorSpace, MediaFrame, Pacing, VideoFlags};
use crate::transport::sender::FrameSender;

/// Cloneable flag that asks a running [`FrameDispatcher::run`] to stop.
///
/// Checked once per iteration, before composition; settable from any thread.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A signal that has not been raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the signal has been raised.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Stream parameters that are not part of the drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchOptions {
    /// Pixels the text moves per frame.
    pub step_px: f64,
    /// Nominal frame rate written into every frame.
    pub fps: Fps,
    /// Color matrix written into every frame.
    pub color_space: ColorSpace,
    /// Video flags written into every frame.
    pub flags: VideoFlags,
    /// Frames between sender statistics log lines.
    pub stats_interval: u64,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            step_px: 4.0,
            fps: Fps::NTSC_59_94,
            color_space: ColorSpace::Bt709,
            flags: VideoFlags::ALPHA,
            stats_interval: Fps::NTSC_59_94.frames_per_second_rounded(),
        }
    }
}

/// Why [`FrameDispatcher::run`] returned normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The [`StopSignal`] was raised.
    Signal,
    /// The requested number of frames was generated.
    FrameLimit,
}

/// Totals of one [`FrameDispatcher::run`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to the sender.
    pub frames: u64,
    /// Bytes the sender accepted.
    pub bytes: u64,
    /// Why the loop ended.
    pub reason: StopReason,
}

/// Drives the generation loop: animate, compose, read back, send.
///
/// Owns the frame buffer, the composition pass, the animator and the single [`MediaFrame`] whose
/// data is refilled every iteration. The header of that frame is fixed at construction.
pub struct FrameDispatcher<S: DrawingSurface> {
    buffer: FrameBuffer<S>,
    pass: CompositionPass<S::Text>,
    animator: TickerAnimator,
    frame: MediaFrame,
    next_index: FrameIndex,
    stats_interval: u64,
}

impl<S: DrawingSurface> FrameDispatcher<S> {
    /// Prepare the ticker described by `design` on `surface`.
    #[tracing::instrument(skip(surface, design))]
    pub fn new(
        mut surface: S,
        design: &OverlayDesign,
        opts: DispatchOptions,
    ) -> TickerResult<Self> {
        let pass = CompositionPass::new(&mut surface, design)?;
        let buffer = FrameBuffer::new(surface)?;
        let info = buffer.info();
        let animator =
            TickerAnimator::new(f64::from(info.width()), pass.text_width(), opts.step_px)?;
        let frame = MediaFrame::video(info, opts.fps, opts.color_space, opts.flags)?;

        tracing::info!(
            width = info.width(),
            height = info.height(),
            fps = %opts.fps,
            text_width = pass.text_width(),
            "ticker ready"
        );

        Ok(Self {
            buffer,
            pass,
            animator,
            frame,
            next_index: FrameIndex(0),
            stats_interval: opts.stats_interval.max(1),
        })
    }

    /// Validate `config`, load its font and prepare the ticker on `surface`.
    pub fn from_config(surface: S, config: &TickerConfig) -> TickerResult<Self> {
        config.validate()?;
        let design = config.to_design()?;
        let opts = DispatchOptions {
            step_px: config.step_px,
            fps: config.fps,
            color_space: config.color_space(),
            flags: config.video_flags(),
            stats_interval: config.stats_interval(),
        };
        Self::new(surface, &design, opts)
    }

    /// The persistent frame descriptor (holds the most recently generated frame).
    pub fn frame(&self) -> &MediaFrame {
        &self.frame
    }

    /// Scroll state.
    pub fn animator(&self) -> &TickerAnimator {
        &self.animator
    }

    /// Composition pass.
    pub fn pass(&self) -> &CompositionPass<S::Text> {
        &self.pass
    }

    /// Borrow the drawing surface.
    pub fn surface(&self) -> &S {
        self.buffer.surface()
    }

    /// Number of frames generated and sent so far.
    pub fn frames_generated(&self) -> u64 {
        self.next_index.0
    }

    /// Compose frame `index` into the frame descriptor without sending it or touching the
    /// animator.
    pub fn render_frame_at(&mut self, index: FrameIndex) -> TickerResult<&MediaFrame> {
        let x = self.animator.position_at(index);
        self.pass.render(&mut self.buffer, x);
        self.buffer.read_into(self.frame.data_mut())?;
        Ok(&self.frame)
    }

    /// Generate, send and advance one frame. Returns the bytes the sender accepted.
    ///
    /// A render-read failure is returned before anything is sent; the animator is not advanced.
    pub fn step_frame<F: FrameSender>(&mut self, sender: &mut F) -> TickerResult<usize> {
        self.pass.render(&mut self.buffer, self.animator.scroll_x());
        self.buffer.read_into(self.frame.data_mut())?;
        self.frame.set_pacing(Pacing::Auto);
        let accepted = sender.send(&self.frame);
        self.next_index = self.next_index.next();
        self.animator.advance();
        Ok(accepted)
    }

    /// Run until `stop` is raised or `limit` frames have been generated.
    ///
    /// `on_frame` is called after every send with the frame's index and the bytes accepted.
    /// A render-read failure ends the loop immediately and is returned.
    #[tracing::instrument(skip_all, fields(address = %sender.address(), limit = ?limit))]
    pub fn run<F, P>(
        &mut self,
        sender: &mut F,
        stop: &StopSignal,
        limit: Option<u64>,
        mut on_frame: P,
    ) -> TickerResult<RunStats>
    where
        F: FrameSender,
        P: FnMut(FrameIndex, usize),
    {
        let mut frames = 0u64;
        let mut bytes = 0u64;
        let reason = loop {
            if stop.is_stopped() {
                break StopReason::Signal;
            }
            if limit.is_some_and(|n| frames >= n) {
                break StopReason::FrameLimit;
            }

            let index = self.next_index;
            let accepted = self.step_frame(sender).inspect_err(|e| {
                tracing::error!(frame = index.0, error = %e, "frame generation failed");
            })?;
            frames += 1;
            bytes += accepted as u64;
            on_frame(index, accepted);

            if frames.is_multiple_of(self.stats_interval) {
                let s = sender.stats();
                tracing::info!(
                    frames = s.frames,
                    bytes = s.bytes,
                    dropped = s.dropped,
                    scroll_x = self.animator.scroll_x(),
                    "sender statistics"
                );
            }
        };

        tracing::info!(frames, bytes, ?reason, "dispatch loop finished");
        Ok(RunStats {
            frames,
            bytes,
            reason,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/dispatch/dispatcher.rs"]
mod tests;
