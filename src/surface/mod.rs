//! Drawable surfaces the recorder can clear, resize and serialize.
//!
//! A surface is the only thing the recorder knows about drawing. How pixels get there is up to
//! the adapter; the recorder only needs the three capabilities of [`Surface`].

use std::io::Cursor;

use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{ReelError, ReelResult};

/// Raw frame buffer adapter with a latched clear color.
pub mod framebuffer;
/// Vector raster adapter powered by `vello_cpu`.
pub mod raster;

/// A snapshot of a surface as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    /// Encode the frame as PNG bytes.
    pub fn encode_png(&self) -> ReelResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ReelError::serialization("frame byte length does not match size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| ReelError::serialization(format!("png encode failed: {e}")))?;
        Ok(buf)
    }
}

/// A frame whose pixels were captured but whose bytes are not produced yet.
///
/// The snapshot is taken when the frame is requested, so later drawing on the surface does not
/// leak into it. [`PendingFrame::resolve`] performs the encode.
#[derive(Debug)]
pub struct PendingFrame {
    snapshot: FrameRGBA,
}

impl PendingFrame {
    /// Wrap an already captured snapshot.
    pub fn new(snapshot: FrameRGBA) -> Self {
        Self { snapshot }
    }

    /// Borrow the captured pixels.
    pub fn snapshot(&self) -> &FrameRGBA {
        &self.snapshot
    }

    /// Produce the PNG bytes for the captured pixels.
    pub fn resolve(self) -> ReelResult<Vec<u8>> {
        self.snapshot.encode_png()
    }
}

/// Capability set the recorder needs from a drawable surface.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> Size;

    /// Check whether the adapter can hold a surface of `size` without mutating anything.
    fn check_size(&self, size: Size) -> ReelResult<()> {
        size.validate().map(|_| ())
    }

    /// Resize the surface. Existing contents are discarded.
    fn resize(&mut self, size: Size) -> ReelResult<()>;

    /// Set the color used by [`Surface::clear`].
    fn set_clear_color(&mut self, color: Rgba8);

    /// Fill the whole surface with the clear color.
    fn clear(&mut self);

    /// Copy the current visual state out as straight-alpha RGBA8.
    fn snapshot(&mut self) -> ReelResult<FrameRGBA>;

    /// Request serialization of the current visual state.
    ///
    /// The returned frame already holds the pixels as they are now.
    fn serialize_frame(&mut self) -> ReelResult<PendingFrame> {
        Ok(PendingFrame::new(self.snapshot()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/frame.rs"]
mod tests;
