#![deny(unsafe_code)]
//! Concrete drawing surfaces for grassfield scenes.
//!
//! `grassfield-core` defines the [`Surface`](grassfield_core::Surface) trait
//! and generates blades; this crate provides the targets they are drawn on:
//! an anti-aliased RGBA [`Pixmap`] (with PNG export behind the `png` feature)
//! and an [`SvgDocument`]. The CLI depends on this crate so output dispatch
//! lives in one place.

pub mod raster;
pub mod svg;

#[cfg(feature = "png")]
pub mod snapshot;

use std::path::Path;

use grassfield_core::error::GrassError;

pub use raster::Pixmap;
pub use svg::SvgDocument;

/// Output formats, chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Infers the format from the extension of `path` (case-insensitive).
    ///
    /// Returns `GrassError::InvalidParameter` for missing or unknown
    /// extensions, and for `.png` when the `png` feature is disabled.
    pub fn from_path(path: &Path) -> Result<Self, GrassError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            #[cfg(feature = "png")]
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(GrassError::InvalidParameter(format!(
                "unsupported output extension {other:?} (expected .png or .svg)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/field.SVG")).unwrap(),
            OutputFormat::Svg
        );
        #[cfg(feature = "png")]
        assert_eq!(
            OutputFormat::from_path(Path::new("grass.png")).unwrap(),
            OutputFormat::Png
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            OutputFormat::from_path(Path::new("grass.jpg")),
            Err(GrassError::InvalidParameter(_))
        ));
        assert!(OutputFormat::from_path(Path::new("grass")).is_err());
    }

    #[test]
    fn surfaces_are_usable_as_trait_objects() {
        use grassfield_core::surface::Surface;
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        let mut doc = SvgDocument::new();
        let surfaces: [&mut dyn Surface; 2] = [&mut pixmap, &mut doc];
        for s in surfaces {
            s.resize(3, 2).unwrap();
        }
        assert_eq!(pixmap.width(), 3);
        assert_eq!(doc.height(), 2);
    }
}
