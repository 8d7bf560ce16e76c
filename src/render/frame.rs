use crate::foundation::error::{TickerError, TickerResult};
use crate::render::surface::{DrawingSurface, ImageInfo};

/// The drawing target for each generated frame.
///
/// Wraps a [`DrawingSurface`] together with the fixed [`ImageInfo`] captured at construction, so
/// readback always produces the same dimensions, stride and layout for the life of the buffer.
pub struct FrameBuffer<S> {
    surface: S,
    info: ImageInfo,
}

impl<S: DrawingSurface> FrameBuffer<S> {
    /// Wrap `surface`, freezing its current [`ImageInfo`].
    pub fn new(surface: S) -> TickerResult<Self> {
        let info = surface.info();
        info.canvas.validate()?;
        Ok(Self { surface, info })
    }

    /// Dimensions, stride and layout.
    pub fn info(&self) -> ImageInfo {
        self.info
    }

    /// Bytes required by [`FrameBuffer::read_into`].
    pub fn byte_len(&self) -> usize {
        self.info.byte_len()
    }

    /// Borrow the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the underlying surface for drawing.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Reset all pixels to fully transparent.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Copy rendered pixels into `dst` (row-major, top-left origin, `info().stride()` per row).
    ///
    /// Any failure is reported as [`TickerError::RenderRead`].
    pub fn read_into(&mut self, dst: &mut [u8]) -> TickerResult<()> {
        if dst.len() != self.info.byte_len() {
            return Err(TickerError::render_read(format!(
                "destination holds {} bytes, frame needs {}",
                dst.len(),
                self.info.byte_len()
            )));
        }
        if self.surface.info() != self.info {
            return Err(TickerError::render_read(
                "drawing surface changed dimensions after startup",
            ));
        }
        self.surface
            .read_pixels(dst, self.info.stride())
            .map_err(|e| match e {
                TickerError::RenderRead(_) => e,
                other => TickerError::render_read(other.to_string()),
            })
    }

    /// Release the wrapper and return the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
