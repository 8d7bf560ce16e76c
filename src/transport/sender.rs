use crate::foundation::core::Fps;
use crate::transport::frame::{FrameHeader, MediaFrame, Pacing};
use crate::transport::pacer::{Clock, FramePacer, MonotonicClock};

/// Quality/profile requested from the sender's encoder.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Sender's own default (medium).
    #[default]
    Default,
    /// Lowest bandwidth.
    Low,
    /// Balanced.
    Medium,
    /// Highest fidelity.
    High,
}

/// Optional vendor information attached to a stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SenderInfo {
    /// Product that generated the stream.
    pub product_name: String,
    /// Who makes the product.
    pub manufacturer: String,
    /// Product version.
    pub version: String,
}

impl SenderInfo {
    /// Information describing this crate.
    pub fn this_crate() -> Self {
        Self {
            product_name: env!("CARGO_PKG_NAME").to_string(),
            manufacturer: "tickercast".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Running counters kept by a sender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SenderStats {
    /// Frames accepted for delivery.
    pub frames: u64,
    /// Bytes accepted for delivery.
    pub bytes: u64,
    /// Frames refused (wrong format, closed output).
    pub dropped: u64,
}

/// Sink contract for delivering generated frames to receivers.
///
/// `send` is fire-and-forget: it never reports delivery failures to the caller. Senders that honor
/// [`Pacing::Auto`] hold the caller inside `send` until the frame is due. The frame is borrowed
/// only for the duration of the call; implementations must copy whatever they keep.
///
/// Resources are released on drop.
pub trait FrameSender {
    /// Human-readable identifier of where receivers connect.
    fn address(&self) -> &str;

    /// Deliver one frame; returns the number of bytes accepted (0 when dropped).
    fn send(&mut self, frame: &MediaFrame) -> usize;

    /// Counters since construction.
    fn stats(&self) -> SenderStats;

    /// Attach vendor information to the stream. Senders without metadata support ignore it.
    fn set_sender_info(&mut self, _info: SenderInfo) {}
}

impl<T: FrameSender + ?Sized> FrameSender for &mut T {
    fn address(&self) -> &str {
        (**self).address()
    }

    fn send(&mut self, frame: &MediaFrame) -> usize {
        (**self).send(frame)
    }

    fn stats(&self) -> SenderStats {
        (**self).stats()
    }

    fn set_sender_info(&mut self, info: SenderInfo) {
        (**self).set_sender_info(info);
    }
}

/// `HOSTNAME (name)`, the display form of a stream name.
pub fn stream_display_name(name: &str) -> String {
    let host = std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string());
    format!("{} ({name})", host.trim())
}

/// A frame captured by [`InMemorySender`].
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Header at send time.
    pub header: FrameHeader,
    /// Pacing at send time.
    pub pacing: Pacing,
    /// Copy of the pixel data.
    pub data: Vec<u8>,
}

/// In-memory sender for tests and debugging. Never waits.
#[derive(Debug, Default)]
pub struct InMemorySender {
    address: String,
    info: Option<SenderInfo>,
    stats: SenderStats,
    frames: Vec<CapturedFrame>,
}

impl InMemorySender {
    /// Create an empty sender named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            address: format!("memory://{name}"),
            ..Self::default()
        }
    }

    /// Frames in send order.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Vendor information, if any was attached.
    pub fn sender_info(&self) -> Option<&SenderInfo> {
        self.info.as_ref()
    }
}

impl FrameSender for InMemorySender {
    fn address(&self) -> &str {
        &self.address
    }

    fn send(&mut self, frame: &MediaFrame) -> usize {
        self.frames.push(CapturedFrame {
            header: *frame.header(),
            pacing: frame.pacing(),
            data: frame.data().to_vec(),
        });
        self.stats.frames += 1;
        self.stats.bytes += frame.data_len() as u64;
        frame.data_len()
    }

    fn stats(&self) -> SenderStats {
        self.stats
    }

    fn set_sender_info(&mut self, info: SenderInfo) {
        self.info = Some(info);
    }
}

/// Sender that paces frames like a real output but delivers them nowhere.
///
/// Useful for dry runs and for measuring how fast frames can be generated.
#[derive(Debug)]
pub struct DiscardSender<C = MonotonicClock> {
    address: String,
    pacer: FramePacer<C>,
    stats: SenderStats,
}

impl DiscardSender<MonotonicClock> {
    /// Discard frames named `name`, pacing at `fps`.
    pub fn new(name: &str, fps: Fps) -> Self {
        Self::with_pacer(name, FramePacer::new(fps))
    }
}

impl<C: Clock> DiscardSender<C> {
    /// Discard frames using a custom pacer.
    pub fn with_pacer(name: &str, pacer: FramePacer<C>) -> Self {
        Self {
            address: format!("discard://{name}"),
            pacer,
            stats: SenderStats::default(),
        }
    }
}

impl<C: Clock> FrameSender for DiscardSender<C> {
    fn address(&self) -> &str {
        &self.address
    }

    fn send(&mut self, frame: &MediaFrame) -> usize {
        self.pacer.wait(frame.pacing());
        self.stats.frames += 1;
        self.stats.bytes += frame.data_len() as u64;
        frame.data_len()
    }

    fn stats(&self) -> SenderStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/sender.rs"]
mod tests;
