//! CPU raster surface: an RGBA8 pixel buffer filled through the AGG scanline
//! rasterizer.
//!
//! Each path is fed to `RasterizerScanlineAa` as one closed polygon (non-zero
//! winding) and swept into the buffer with `render_scanlines_aa_solid` over
//! a non-premultiplied `PixfmtRgba32`.

use agg_rust::color::Rgba8;
use agg_rust::pixfmt_rgba::PixfmtRgba32;
use agg_rust::rasterizer_scanline_aa::RasterizerScanlineAa;
use agg_rust::renderer_base::RendererBase;
use agg_rust::renderer_scanline::render_scanlines_aa_solid;
use agg_rust::rendering_buffer::RowAccessor;
use agg_rust::scanline_u::ScanlineU8;

use grassfield_core::color::{BladeColor, ColorModel, Rgba};
use grassfield_core::error::GrassError;
use grassfield_core::path::Path;
use grassfield_core::surface::Surface;

const BPP: usize = 4;

/// Row accessor over a tightly packed RGBA buffer of `width` x `height`.
///
/// The accessor holds a raw pointer into `data`; callers keep it inside the
/// scope of the `&mut` borrow it was built from.
#[allow(unsafe_code)]
fn attach_rows(data: &mut [u8], width: u32, height: u32) -> RowAccessor {
    debug_assert_eq!(data.len(), width as usize * height as usize * BPP);
    let mut rows = RowAccessor::new();
    // SAFETY: `data` is exactly `height` rows of `width * 4` bytes and is
    // neither moved nor reallocated while the accessor is alive.
    unsafe { rows.attach(data.as_mut_ptr(), width, height, (width as usize * BPP) as i32) };
    rows
}

/// An RGBA8 pixel buffer, row-major, straight alpha. Starts fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
    /// Value every pixel takes on resize.
    background: [u8; 4],
}

impl Pixmap {
    /// Creates a transparent pixmap.
    ///
    /// Returns `GrassError::InvalidDimensions` if either dimension is zero
    /// or the buffer does not fit the rasterizer's 32-bit row addressing.
    pub fn new(width: usize, height: usize) -> Result<Self, GrassError> {
        let (w, h, len) = Self::checked_dims(width, height)?;
        Ok(Self {
            width: w,
            height: h,
            data: vec![0; len],
            background: [0; 4],
        })
    }

    fn checked_dims(width: usize, height: usize) -> Result<(u32, u32, usize), GrassError> {
        if width == 0 || height == 0 {
            return Err(GrassError::InvalidDimensions);
        }
        let stride = width
            .checked_mul(BPP)
            .filter(|&s| i32::try_from(s).is_ok())
            .ok_or(GrassError::InvalidDimensions)?;
        let h = u32::try_from(height).map_err(|_| GrassError::InvalidDimensions)?;
        let len = stride
            .checked_mul(height)
            .ok_or(GrassError::InvalidDimensions)?;
        Ok((width as u32, h, len))
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The RGBA value at `(x, y)`, or `None` outside the pixmap.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = (y * self.width() + x) * BPP;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Sets the color the pixmap clears to and fills it immediately.
    ///
    /// Subsequent resizes (including the one at the start of every scene
    /// pass) clear to this color instead of transparent.
    pub fn set_background(&mut self, color: Rgba) {
        self.background = color.to_rgba8();
        self.clear();
    }

    fn clear(&mut self) {
        let bg = self.background;
        for px in self.data.chunks_exact_mut(BPP) {
            px.copy_from_slice(&bg);
        }
    }

    /// Fills the closed contour `path` with `color` using the non-zero
    /// winding rule. Paths with non-finite coordinates or bounds entirely
    /// off the pixmap are skipped.
    pub fn fill_rgba(&mut self, path: &Path, color: Rgba) {
        if path
            .points()
            .any(|(x, y)| !(x.is_finite() && y.is_finite()))
        {
            return;
        }
        let (min_x, min_y, max_x, max_y) = path.bounds();
        if max_x <= 0.0
            || max_y <= 0.0
            || min_x >= self.width as f64
            || min_y >= self.height as f64
        {
            return;
        }
        let mut points = path.points();
        let Some((x0, y0)) = points.next() else {
            return;
        };

        let mut ras = RasterizerScanlineAa::new();
        ras.clip_box(0.0, 0.0, self.width as f64, self.height as f64);
        ras.move_to_d(x0, y0);
        for (x, y) in points {
            ras.line_to_d(x, y);
        }

        let [r, g, b, a] = color.to_rgba8();
        let solid = Rgba8::new(r as u32, g as u32, b as u32, a as u32);
        let mut rows = attach_rows(&mut self.data, self.width, self.height);
        let mut ren = RendererBase::new(PixfmtRgba32::new(&mut rows));
        let mut sl = ScanlineU8::new();
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &solid);
    }
}

impl Surface for Pixmap {
    /// Reallocates to the new size, cleared to the background color.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), GrassError> {
        let (w, h, len) = Self::checked_dims(width, height)?;
        self.width = w;
        self.height = h;
        self.data.resize(len, 0);
        self.clear();
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: &BladeColor) -> Result<(), GrassError> {
        self.fill_rgba(path, color.to_rgba());
        Ok(())
    }
}
