use std::io::{Read, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::foundation::error::{TickerError, TickerResult};
use crate::transport::frame::{ColorSpace, FrameHeader, MediaFrame, VideoFlags};
use crate::transport::pacer::FramePacer;
use crate::transport::sender::{
    FrameSender, Quality, SenderInfo, SenderStats, stream_display_name,
};

/// Options for [`FfmpegSender`].
#[derive(Clone, Debug)]
pub struct FfmpegSenderOpts {
    /// Stream name shown to receivers.
    pub name: String,
    /// Output URL or path handed to `ffmpeg` (e.g. `udp://239.1.1.1:5000`, `srt://...`).
    pub address: String,
    /// Encoder quality profile.
    pub quality: Quality,
    /// Container format passed as `-f`.
    pub container: String,
    /// `ffmpeg` executable.
    pub ffmpeg_bin: PathBuf,
    /// Vendor information written as stream metadata.
    pub info: Option<SenderInfo>,
}

impl FfmpegSenderOpts {
    /// Options for streaming `name` to `address` with defaults for everything else.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            quality: Quality::Default,
            container: "matroska".to_string(),
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            info: None,
        }
    }
}

/// Sender that spawns the system `ffmpeg`, streams raw BGRA frames to its stdin, and lets it
/// encode (VP9 with alpha) and deliver to a network URL.
///
/// Pacing happens here: with [`Pacing::Auto`](crate::Pacing::Auto) each `send` blocks until the
/// frame is due at the configured frame rate. Write failures are logged and counted as drops;
/// they are never returned to the caller. The child process is closed and reaped on drop.
pub struct FfmpegSender {
    opts: FfmpegSenderOpts,
    header: FrameHeader,
    pacer: FramePacer,
    stats: SenderStats,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    write_failed: bool,
}

impl FfmpegSender {
    /// Spawn `ffmpeg` for frames shaped like `header`.
    #[tracing::instrument(skip(opts, header), fields(address = %opts.address, name = %opts.name))]
    pub fn new(opts: FfmpegSenderOpts, header: &FrameHeader) -> TickerResult<Self> {
        if opts.address.trim().is_empty() {
            return Err(TickerError::validation("sender address must be non-empty"));
        }
        if header.width == 0 || header.height == 0 {
            return Err(TickerError::validation(
                "ffmpeg sender width/height must be non-zero",
            ));
        }
        if !is_ffmpeg_available(&opts.ffmpeg_bin) {
            return Err(TickerError::transport(format!(
                "'{}' is required for streaming, but could not be run",
                opts.ffmpeg_bin.display()
            )));
        }

        let mut cmd = Command::new(&opts.ffmpeg_bin);
        cmd.args(ffmpeg_args(&opts, header))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            TickerError::transport(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TickerError::transport("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TickerError::transport("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::info!(
            stream = %stream_display_name(&opts.name),
            "ffmpeg sender started"
        );

        Ok(Self {
            pacer: FramePacer::new(header.frame_rate),
            header: *header,
            stats: SenderStats::default(),
            child: Some(child),
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            scratch: Vec::new(),
            write_failed: false,
            opts,
        })
    }

    fn drop_frame(&mut self, reason: &str) -> usize {
        self.stats.dropped += 1;
        if self.stats.dropped == 1 || self.stats.dropped.is_multiple_of(600) {
            tracing::warn!(dropped = self.stats.dropped, "ffmpeg sender dropped frame: {reason}");
        }
        0
    }

    fn finish(&mut self) {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return;
        };
        let status = child.wait();
        let stderr_bytes = self
            .stderr_drain
            .take()
            .and_then(|h| h.join().ok())
            .and_then(|r| r.ok())
            .unwrap_or_default();
        match status {
            Ok(s) if s.success() => tracing::info!(
                frames = self.stats.frames,
                dropped = self.stats.dropped,
                "ffmpeg sender closed"
            ),
            Ok(s) => tracing::warn!(
                status = %s,
                stderr = %String::from_utf8_lossy(&stderr_bytes).trim(),
                "ffmpeg exited with failure"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to wait for ffmpeg to finish"),
        }
    }
}

impl FrameSender for FfmpegSender {
    fn address(&self) -> &str {
        &self.opts.address
    }

    fn send(&mut self, frame: &MediaFrame) -> usize {
        if self.write_failed {
            return self.drop_frame("output closed");
        }
        let h = frame.header();
        if h.width != self.header.width || h.height != self.header.height {
            return self.drop_frame("frame size differs from the stream format");
        }
        if frame.data_len() < h.data_len() {
            return self.drop_frame("frame data shorter than stride * height");
        }

        self.pacer.wait(frame.pacing());

        let row = h.width as usize * 4;
        let payload: &[u8] = if h.stride == row {
            &frame.data()[..h.data_len()]
        } else {
            self.scratch.clear();
            for y in 0..h.height as usize {
                self.scratch
                    .extend_from_slice(&frame.data()[y * h.stride..y * h.stride + row]);
            }
            &self.scratch
        };

        let Some(stdin) = self.stdin.as_mut() else {
            return self.drop_frame("sender already finalized");
        };
        match stdin.write_all(payload) {
            Ok(()) => {
                self.stats.frames += 1;
                self.stats.bytes += payload.len() as u64;
                payload.len()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to write frame to ffmpeg stdin");
                self.write_failed = true;
                self.drop_frame("write failed")
            }
        }
    }

    fn stats(&self) -> SenderStats {
        self.stats
    }

    fn set_sender_info(&mut self, info: SenderInfo) {
        // Container metadata is fixed once ffmpeg has started.
        tracing::debug!(
            product = %info.product_name,
            "sender info must be supplied before the stream starts; ignoring"
        );
    }
}

impl Drop for FfmpegSender {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Full `ffmpeg` argument list for streaming frames shaped like `header`.
pub fn ffmpeg_args(opts: &FfmpegSenderOpts, header: &FrameHeader) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        header.codec.ffmpeg_pix_fmt().into(),
        "-s".into(),
        format!("{}x{}", header.width, header.height),
        // For rawvideo input, `-r` before `-i` sets the input frame rate.
        "-r".into(),
        format!("{}/{}", header.frame_rate.num, header.frame_rate.den),
        "-i".into(),
        "pipe:0".into(),
        "-an".into(),
    ];

    let (crf, cpu_used) = match opts.quality {
        Quality::Low => (45, 8),
        Quality::Default | Quality::Medium => (35, 6),
        Quality::High => (24, 4),
    };
    let pix_fmt = if header.flags.contains(VideoFlags::ALPHA) {
        "yuva420p"
    } else {
        "yuv420p"
    };
    let colorspace = match header.color_space {
        ColorSpace::Bt601 => "smpte170m",
        ColorSpace::Bt709 => "bt709",
    };
    let cpu_used = cpu_used.to_string();
    let crf = crf.to_string();
    let title = format!("title={}", stream_display_name(&opts.name));
    args.extend(
        [
            "-c:v",
            "libvpx-vp9",
            "-pix_fmt",
            pix_fmt,
            "-deadline",
            "realtime",
            "-cpu-used",
            cpu_used.as_str(),
            "-crf",
            crf.as_str(),
            "-b:v",
            "0",
            "-colorspace",
            colorspace,
            "-metadata",
            title.as_str(),
        ]
        .map(String::from),
    );
    if let Some(info) = &opts.info {
        args.push("-metadata".into());
        args.push(format!(
            "comment={} {} ({})",
            info.product_name, info.version, info.manufacturer
        ));
    }
    args.extend(["-f".to_string(), opts.container.clone(), opts.address.clone()]);
    args
}

/// Return `true` when `bin -version` runs successfully.
pub fn is_ffmpeg_available(bin: &std::path::Path) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/transport/ffmpeg.rs"]
mod tests;
