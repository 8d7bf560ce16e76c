//! Tickercast generates a scrolling news-ticker graphic and streams it as live video.
//!
//! Every frame is a fully transparent canvas with a rounded, semi-transparent gradient strip along
//! the bottom and a line of text scrolling right to left across it. Frames are BGRA with straight
//! alpha so receivers can key the graphic over other video.
//!
//! - Describe the graphic with a [`TickerConfig`] (or an [`OverlayDesign`])
//! - Create a [`FrameDispatcher`] on a [`DrawingSurface`] such as [`CpuSurface`]
//! - Drive it with [`FrameDispatcher::run`] into a [`FrameSender`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Scroll animation.
pub mod animation;
/// Per-frame composition.
pub mod compose;
/// Ticker configuration.
pub mod config;
/// The generation loop.
pub mod dispatcher;
pub mod render;
pub mod transport;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, OverlayRegion, Point, Rect, Rgba8, RoundedRect, TICKS_PER_SECOND,
    Vec2,
};
pub use crate::foundation::error::{TickerError, TickerResult};

pub use crate::animation::ticker::TickerAnimator;
pub use crate::compose::pass::{CompositionPass, OverlayDesign};
pub use crate::config::{ConfigColor, TickerConfig};
pub use crate::dispatcher::{DispatchOptions, FrameDispatcher, RunStats, StopReason, StopSignal};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameBuffer;
pub use crate::render::recording::RecordingSurface;
pub use crate::render::surface::{
    DrawingSurface, ImageInfo, LinearGradient, PixelLayout, TextMetrics, TextStyle,
};
pub use crate::transport::ffmpeg::{FfmpegSender, FfmpegSenderOpts};
pub use crate::transport::frame::{
    Codec, ColorSpace, FrameHeader, FrameType, MediaFrame, Pacing, VideoFlags,
};
pub use crate::transport::pacer::{Clock, FramePacer, MonotonicClock};
pub use crate::transport::sender::{
    DiscardSender, FrameSender, InMemorySender, Quality, SenderInfo, SenderStats,
};
