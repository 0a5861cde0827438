use std::sync::Arc;

use vello_cpu::kurbo::{Affine, BezPath, Rect};
use vello_cpu::peniko::Color;

use crate::foundation::core::{Rgba8, Size, unpremultiply_in_place};
use crate::foundation::error::{ReelError, ReelResult};
use crate::surface::{FrameRGBA, Surface};

/// Raster surface backed by a `vello_cpu` render context.
///
/// Drawing goes through [`RasterSurface::context`]. Contents persist across frames like a 2D
/// canvas: committed pixels are replayed underneath whatever is drawn next, and [`Surface::clear`]
/// fills the whole area with the clear color.
pub struct RasterSurface {
    ctx: vello_cpu::RenderContext,
    committed: vello_cpu::Pixmap,
    open: bool,
    width: u16,
    height: u16,
    clear_rgba: Rgba8,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("open", &self.open)
            .field("clear_rgba", &self.clear_rgba)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Create a transparent surface of `size`.
    pub fn new(size: Size) -> ReelResult<Self> {
        let (width, height) = raster_dims(size)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            committed: vello_cpu::Pixmap::new(width, height),
            open: false,
            width,
            height,
            clear_rgba: Rgba8::WHITE,
        })
    }

    /// Borrow the render context for drawing.
    ///
    /// The first call after a commit replays the committed pixels so new drawing lands on top.
    pub fn context(&mut self) -> &mut vello_cpu::RenderContext {
        if !self.open {
            self.open_with_background();
        }
        &mut self.ctx
    }

    /// Fill a rectangle in pixel coordinates with a straight-alpha color.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        let ctx = self.context();
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(to_vello_color(color));
        ctx.fill_rect(&Rect::new(x, y, x + w, y + h));
    }

    /// Fill an arbitrary path with a straight-alpha color.
    pub fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8) {
        let ctx = self.context();
        ctx.set_transform(transform);
        ctx.set_paint(to_vello_color(color));
        ctx.fill_path(path);
    }

    /// Read back one pixel of the current visual state.
    pub fn pixel(&mut self, x: u32, y: u32) -> ReelResult<Rgba8> {
        self.commit();
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return Err(ReelError::validation(format!(
                "pixel ({x}, {y}) outside {}x{} surface",
                self.width, self.height
            )));
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.committed.data_as_u8_slice()[i..i + 4]);
        unpremultiply_in_place(&mut px);
        Ok(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    fn open_with_background(&mut self) {
        let (w, h) = (self.width, self.height);
        let background = std::mem::replace(&mut self.committed, vello_cpu::Pixmap::new(w, h));

        self.ctx.reset();
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(background)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        self.ctx
            .fill_rect(&Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        self.open = true;
    }

    fn commit(&mut self) {
        if !self.open {
            return;
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.committed);
        self.open = false;
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }

    fn check_size(&self, size: Size) -> ReelResult<()> {
        raster_dims(size).map(|_| ())
    }

    fn resize(&mut self, size: Size) -> ReelResult<()> {
        let (width, height) = raster_dims(size)?;
        self.ctx = vello_cpu::RenderContext::new(width, height);
        self.committed = vello_cpu::Pixmap::new(width, height);
        self.open = false;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn set_clear_color(&mut self, color: Rgba8) {
        self.clear_rgba = color;
    }

    fn clear(&mut self) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let color = to_vello_color(self.clear_rgba);
        // Translucent clear colors blend over the previous contents.
        let ctx = self.context();
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(color);
        ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
    }

    fn snapshot(&mut self) -> ReelResult<FrameRGBA> {
        self.commit();
        let mut data = self.committed.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut data);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        })
    }
}

fn raster_dims(size: Size) -> ReelResult<(u16, u16)> {
    let size = size.validate()?;
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| ReelError::validation("raster surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| ReelError::validation("raster surface height exceeds u16"))?;
    Ok((w, h))
}

fn to_vello_color(c: Rgba8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
