use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TickerError, TickerResult};
use crate::render::surface::{ImageInfo, PixelLayout};

/// Kind of media carried by a [`MediaFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FrameType {
    /// Uncompressed video.
    Video,
}

/// Pixel codec of the frame data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Codec {
    /// 8-bit `b, g, r, a` per pixel.
    Bgra,
}

impl Codec {
    /// FourCC code as a little-endian `u32`.
    pub fn fourcc(self) -> u32 {
        match self {
            Self::Bgra => u32::from_le_bytes(*b"BGRA"),
        }
    }

    /// Name of the matching `ffmpeg` raw pixel format.
    pub fn ffmpeg_pix_fmt(self) -> &'static str {
        match self {
            Self::Bgra => "bgra",
        }
    }
}

/// Color matrix receivers should assume for the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// ITU-R BT.601, for standard definition.
    Bt601,
    /// ITU-R BT.709, for HD and above.
    Bt709,
}

impl ColorSpace {
    /// BT.709 for HD and UHD heights, BT.601 below 720 lines.
    pub fn for_height(height: u32) -> Self {
        if height >= 720 { Self::Bt709 } else { Self::Bt601 }
    }
}

bitflags::bitflags! {
    /// Per-frame video flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VideoFlags: u32 {
        /// The alpha channel carries meaningful opacity.
        const ALPHA = 1 << 0;
        /// Color channels are premultiplied by alpha.
        const PREMULTIPLIED = 1 << 1;
        /// Frame is interlaced.
        const INTERLACED = 1 << 2;
    }
}

/// How the sender should time a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Caller-supplied timestamp in 100 ns ticks; the sender does not hold the caller.
    Explicit(i64),
    /// Sender clocks frames at the configured frame rate, holding `send` until each is due.
    Auto,
}

/// Fields of a [`MediaFrame`] that never change across a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameHeader {
    /// Media kind.
    pub frame_type: FrameType,
    /// Pixel codec.
    pub codec: Codec,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes between the starts of consecutive rows.
    pub stride: usize,
    /// Nominal frame rate.
    pub frame_rate: Fps,
    /// Display aspect ratio.
    pub aspect_ratio: f32,
    /// Color matrix.
    pub color_space: ColorSpace,
    /// Alpha / interlace flags.
    pub flags: VideoFlags,
}

impl FrameHeader {
    /// Total bytes of pixel data.
    pub fn data_len(&self) -> usize {
        self.stride * self.height as usize
    }
}

/// Transport-ready frame: fixed header, pacing policy, and pixel data.
///
/// One `MediaFrame` is allocated up front and refilled every iteration; only the data and the
/// pacing value change.
#[derive(Clone, Debug)]
pub struct MediaFrame {
    header: FrameHeader,
    pacing: Pacing,
    data: Vec<u8>,
}

impl MediaFrame {
    /// A zeroed BGRA video frame matching `info`.
    pub fn video(
        info: ImageInfo,
        frame_rate: Fps,
        color_space: ColorSpace,
        flags: VideoFlags,
    ) -> TickerResult<Self> {
        let codec = match info.layout {
            PixelLayout::Bgra8Unpremul => Codec::Bgra,
        };
        if flags.contains(VideoFlags::PREMULTIPLIED) {
            return Err(TickerError::validation(
                "BGRA frames from the frame buffer are unpremultiplied",
            ));
        }
        let header = FrameHeader {
            frame_type: FrameType::Video,
            codec,
            width: info.width(),
            height: info.height(),
            stride: info.stride(),
            frame_rate,
            aspect_ratio: info.canvas.aspect_ratio(),
            color_space,
            flags,
        };
        Ok(Self {
            header,
            pacing: Pacing::Auto,
            data: vec![0; header.data_len()],
        })
    }

    /// The invariant header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Current pacing policy.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Set the pacing policy for the next send.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    /// Use an explicit timestamp derived from `index` and the header's frame rate.
    pub fn set_explicit_timestamp(&mut self, index: FrameIndex) {
        self.pacing = Pacing::Explicit(self.header.frame_rate.timestamp_ticks(index));
    }

    /// Pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel data for refilling in place.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel data length in bytes.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Tightly packed straight-alpha RGBA copy of the data (for image encoders).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let h = &self.header;
        let row = h.width as usize * 4;
        let mut out = Vec::with_capacity(row * h.height as usize);
        for y in 0..h.height as usize {
            let src = &self.data[y * h.stride..y * h.stride + row];
            for px in src.chunks_exact(4) {
                out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/frame.rs"]
mod tests;
