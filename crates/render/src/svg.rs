//! SVG surface: collects one `<path>` element per fill.

use std::fmt::Write as _;
use std::path::Path as FsPath;

use log::info;

use grassfield_core::color::BladeColor;
use grassfield_core::error::GrassError;
use grassfield_core::path::Path;
use grassfield_core::surface::Surface;

/// An in-memory SVG document sized in user units (one unit per pixel).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgDocument {
    width: usize,
    height: usize,
    body: String,
    elements: usize,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of `<path>` elements drawn since the last resize.
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Serializes the full document, including the XML prolog.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.width, self.height);
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             {}</svg>\n",
            self.body
        )
    }

    /// Writes the document to `path`.
    ///
    /// Returns `GrassError::Io` on write failure.
    pub fn write(&self, path: &FsPath) -> Result<(), GrassError> {
        std::fs::write(path, self.to_svg_string()).map_err(|e| GrassError::Io(e.to_string()))?;
        info!("wrote {} paths to {}", self.elements, path.display());
        Ok(())
    }
}

impl Surface for SvgDocument {
    fn resize(&mut self, width: usize, height: usize) -> Result<(), GrassError> {
        if width == 0 || height == 0 {
            return Err(GrassError::InvalidDimensions);
        }
        self.width = width;
        self.height = height;
        self.body.clear();
        self.elements = 0;
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: &BladeColor) -> Result<(), GrassError> {
        // Writing to a String cannot fail.
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\"/>",
            path.to_svg_data(),
            color
        );
        self.elements += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grassfield_core::color::ColorMode;
    use grassfield_core::params::SceneParams;
    use grassfield_core::scene::draw_scene;

    fn triangle() -> Path {
        let mut p = Path::move_to(0.0, 0.0);
        p.line_to(4.0, 0.0);
        p.line_to(2.0, 3.0);
        p
    }

    #[test]
    fn header_carries_dimensions() {
        let mut doc = SvgDocument::new();
        doc.resize(120, 80).unwrap();
        let svg = doc.to_svg_string();
        assert!(svg.contains("width=\"120\""));
        assert!(svg.contains("height=\"80\""));
        assert!(svg.contains("viewBox=\"0 0 120 80\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn fill_emits_path_element() {
        let mut doc = SvgDocument::new();
        doc.resize(10, 10).unwrap();
        let color = BladeColor::from_rgb_hex(ColorMode::Hsv, "#ff0000", 1.0).unwrap();
        doc.fill_path(&triangle(), &color).unwrap();
        assert!(doc
            .to_svg_string()
            .contains("<path d=\"M0 0 L4 0 L2 3 Z\" fill=\"rgb(255, 0, 0)\"/>"));
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn resize_clears_and_rejects_zero() {
        let mut doc = SvgDocument::new();
        doc.resize(10, 10).unwrap();
        let color = BladeColor::from_rgb_hex(ColorMode::Hsl, "#00ff00", 1.0).unwrap();
        doc.fill_path(&triangle(), &color).unwrap();
        doc.resize(5, 5).unwrap();
        assert_eq!(doc.element_count(), 0);
        assert!(!doc.to_svg_string().contains("<path"));
        assert!(matches!(
            doc.resize(0, 5),
            Err(GrassError::InvalidDimensions)
        ));
    }

    #[test]
    fn scene_writes_one_path_per_blade() {
        let params = SceneParams {
            width: 50,
            height: 40,
            nblades: 12,
            ..SceneParams::default()
        };
        let mut doc = SvgDocument::new();
        draw_scene(&params, &mut doc).unwrap();
        let svg = doc.to_svg_string();
        assert_eq!(svg.matches("<path ").count(), 12);
        assert!(svg.contains("fill=\"hsl("));
    }

    #[test]
    fn write_to_disk() {
        let mut doc = SvgDocument::new();
        doc.resize(8, 8).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.svg");
        doc.write(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, doc.to_svg_string());
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let doc = SvgDocument::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.svg");
        assert!(matches!(doc.write(&path), Err(GrassError::Io(_))));
    }
}
