//! Frame delivery: the transport-ready frame, the sender contract, frame-rate pacing, and the
//! shipped senders.

/// `ffmpeg`-backed network sender.
pub mod ffmpeg;
/// Transport-ready frame descriptor.
pub mod frame;
/// Auto-pace clock.
pub mod pacer;
/// Sender contract and in-process senders.
pub mod sender;
