//! Drawing surfaces and the per-frame pixel buffer.
//!
//! [`DrawingSurface`](surface::DrawingSurface) is the seam to the rasterizer. The crate ships a
//! `vello_cpu` implementation ([`cpu::CpuSurface`]) and a deterministic recording one for tests
//! ([`recording::RecordingSurface`]).

/// CPU rasterizer backed by `vello_cpu` and `parley`.
pub mod cpu;
/// Frame buffer wrapper with clear/readback semantics.
pub mod frame;
/// Deterministic in-memory surface.
pub mod recording;
/// Drawing surface trait and paint/text descriptions.
pub mod surface;
pub(crate) mod text;

pub use text::ShapedLine;
