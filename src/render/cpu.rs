use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{Canvas, Point, Rect, RoundedRect};
use crate::foundation::error::{TickerError, TickerResult};
use crate::foundation::math::{premul_rgba8, premul_rgba_to_straight_bgra};
use crate::render::surface::{DrawingSurface, ImageInfo, LinearGradient, TextMetrics, TextStyle};
use crate::render::text::{ShapedLine, TextLayoutEngine};

#[derive(Clone, Copy, Debug, PartialEq)]
struct GradientKey {
    paint: LinearGradient,
    rect: Rect,
}

/// CPU drawing surface powered by `vello_cpu` for vector/text rasterization.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized on readback, which
/// converts the premultiplied RGBA pixmap into unpremultiplied BGRA.
pub struct CpuSurface {
    info: ImageInfo,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    text_engine: TextLayoutEngine,
    gradient_cache: Option<(GradientKey, vello_cpu::Image)>,
}

impl CpuSurface {
    /// Create a transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> TickerResult<Self> {
        canvas.validate()?;
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| TickerError::validation("surface width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| TickerError::validation("surface height exceeds u16"))?;
        Ok(Self {
            info: ImageInfo::bgra_unpremul(canvas),
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            text_engine: TextLayoutEngine::new(),
            gradient_cache: None,
        })
    }

    fn gradient_paint(
        &mut self,
        paint: &LinearGradient,
        rect: Rect,
    ) -> TickerResult<vello_cpu::Image> {
        let key = GradientKey {
            paint: *paint,
            rect,
        };
        if let Some((k, img)) = &self.gradient_cache
            && *k == key
        {
            return Ok(img.clone());
        }

        let w = rect.width().ceil().max(1.0) as u32;
        let h = rect.height().ceil().max(1.0) as u32;
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(
                    rect.x0 + f64::from(x) + 0.5,
                    rect.y0 + f64::from(y) + 0.5,
                );
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&premul_rgba8(paint.color_at(p).to_array()));
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache = Some((key, img.clone()));
        Ok(img)
    }
}

impl DrawingSurface for CpuSurface {
    type Text = ShapedLine;

    fn info(&self) -> ImageInfo {
        self.info
    }

    fn clear(&mut self) {
        self.ctx.reset();
        clear_pixmap_to_transparent(&mut self.pixmap);
    }

    fn fill_rounded_rect(&mut self, shape: RoundedRect, paint: &LinearGradient) {
        let rect = shape.rect();
        let img = match self.gradient_paint(paint, rect) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(error = %e, "skipping gradient fill");
                return;
            }
        };

        // Paint image space starts at the rect origin; draw the shape in that local space.
        let local = RoundedRect::from_rect(
            Rect::new(0.0, 0.0, rect.width(), rect.height()),
            shape.radii(),
        );
        let mut path = kurbo::BezPath::new();
        for el in local.path_elements(0.1) {
            path.push(el);
        }

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint(img);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    #[tracing::instrument(skip(self, style), fields(size_px = style.size_px))]
    fn prepare_text(&mut self, text: &str, style: &TextStyle) -> TickerResult<Self::Text> {
        self.text_engine
            .shape_line(text, &style.font_data, style.size_px, style.color)
    }

    fn text_metrics(&self, text: &Self::Text) -> TextMetrics {
        text.metrics()
    }

    fn draw_text(&mut self, text: &Self::Text, origin: Point) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x,
            origin.y - text.baseline,
        )));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn read_pixels(&mut self, dst: &mut [u8], stride: usize) -> TickerResult<()> {
        let row = self.info.stride();
        let height = self.info.height() as usize;
        if stride < row {
            return Err(TickerError::render_read(format!(
                "stride {stride} is smaller than a {row}-byte row"
            )));
        }
        if height > 0 && dst.len() < stride * (height - 1) + row {
            return Err(TickerError::render_read(format!(
                "destination of {} bytes cannot hold {height} rows at stride {stride}",
                dst.len()
            )));
        }
        if u32::from(self.pixmap.width()) != self.info.width()
            || u32::from(self.pixmap.height()) != self.info.height()
        {
            return Err(TickerError::render_read("pixmap size does not match surface"));
        }

        // Rasterize from scratch so repeated reads of the same commands are identical.
        clear_pixmap_to_transparent(&mut self.pixmap);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let src = self.pixmap.data_as_u8_slice();
        if src.len() != self.info.byte_len() {
            return Err(TickerError::render_read(format!(
                "pixmap produced {} bytes, expected {}",
                src.len(),
                self.info.byte_len()
            )));
        }
        for (y, src_row) in src.chunks_exact(row).enumerate() {
            let start = y * stride;
            premul_rgba_to_straight_bgra(src_row, &mut dst[start..start + row]);
        }
        Ok(())
    }
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> TickerResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TickerError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TickerError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(TickerError::validation("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> TickerResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
