use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{ReelError, ReelResult};
use crate::surface::{FrameRGBA, Surface};

/// Largest pixel buffer a [`FramebufferSurface`] allocates, in bytes (1 GiB).
pub const MAX_FRAMEBUFFER_BYTES: usize = 1 << 30;

/// Plain RGBA8 frame buffer with a latched clear color.
///
/// This is the shape of a GPU context: the clear color is state set once, `clear` replaces every
/// pixel with it (no blending), and drawing writes straight into the buffer.
#[derive(Clone, Debug)]
pub struct FramebufferSurface {
    buffer: image::RgbaImage,
    clear_rgba: Rgba8,
}

impl FramebufferSurface {
    /// Create a transparent buffer of `size`.
    pub fn new(size: Size) -> ReelResult<Self> {
        framebuffer_dims(size)?;
        Ok(Self {
            buffer: image::RgbaImage::new(size.width, size.height),
            clear_rgba: Rgba8::WHITE,
        })
    }

    /// The latched clear color.
    pub fn clear_color(&self) -> Rgba8 {
        self.clear_rgba
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.buffer
    }

    /// Borrow the pixel buffer mutably for drawing.
    pub fn pixels_mut(&mut self) -> &mut image::RgbaImage {
        &mut self.buffer
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let p = self.buffer.get_pixel_checked(x, y)?;
        Some(Rgba8::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite a clipped rectangle with `color`.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba8) {
        let x1 = x.saturating_add(w).min(self.buffer.width());
        let y1 = y.saturating_add(h).min(self.buffer.height());
        let px = image::Rgba(color.to_array());
        for yy in y..y1 {
            for xx in x..x1 {
                self.buffer.put_pixel(xx, yy, px);
            }
        }
    }
}

impl Surface for FramebufferSurface {
    fn size(&self) -> Size {
        Size::new(self.buffer.width(), self.buffer.height())
    }

    fn check_size(&self, size: Size) -> ReelResult<()> {
        framebuffer_dims(size)
    }

    fn resize(&mut self, size: Size) -> ReelResult<()> {
        framebuffer_dims(size)?;
        self.buffer = image::RgbaImage::new(size.width, size.height);
        Ok(())
    }

    fn set_clear_color(&mut self, color: Rgba8) {
        self.clear_rgba = color;
    }

    fn clear(&mut self) {
        let px = image::Rgba(self.clear_rgba.to_array());
        for p in self.buffer.pixels_mut() {
            *p = px;
        }
    }

    fn snapshot(&mut self) -> ReelResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: self.buffer.width(),
            height: self.buffer.height(),
            data: self.buffer.as_raw().clone(),
        })
    }
}

fn framebuffer_dims(size: Size) -> ReelResult<()> {
    let size = size.validate()?;
    match size.rgba_len() {
        Some(len) if len <= MAX_FRAMEBUFFER_BYTES => Ok(()),
        _ => Err(ReelError::validation(format!(
            "frame buffer of {}x{} exceeds {MAX_FRAMEBUFFER_BYTES} bytes",
            size.width, size.height
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/framebuffer.rs"]
mod tests;
