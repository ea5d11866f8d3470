//! PNG export of a rendered [`Pixmap`].
//!
//! Feature-gated behind `png` (default on) so that consumers that only need
//! the raster or SVG surfaces do not pull in the `image` crate.

use std::path::Path;

use grassfield_core::error::GrassError;
use log::info;

use crate::raster::Pixmap;

/// Writes a pixmap as an RGBA PNG.
///
/// Returns `GrassError::InvalidDimensions` if the pixmap dimensions overflow
/// `u32`, or `GrassError::Io` on write failure.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), GrassError> {
    let w = u32::try_from(pixmap.width()).map_err(|_| GrassError::InvalidDimensions)?;
    let h = u32::try_from(pixmap.height()).map_err(|_| GrassError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, pixmap.data().to_vec())
        .ok_or_else(|| GrassError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| GrassError::Io(e.to_string()))?;
    info!("wrote {w}x{h} PNG to {}", path.display());
    Ok(())
}
