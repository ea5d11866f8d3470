//! The `Surface` trait that scenes are drawn onto.
//!
//! The trait is object-safe so the scene driver can target a raster, an SVG
//! document or a plain command recorder through `&mut dyn Surface`.

use serde::Serialize;

use crate::color::BladeColor;
use crate::error::GrassError;
use crate::path::{FillCommand, Path};

/// A 2D drawing target that accepts filled closed paths.
pub trait Surface {
    /// Resizes the surface to `width` x `height` and clears it.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), GrassError>;

    /// Fills the closed contour `path` with `color`. No stroke.
    fn fill_path(&mut self, path: &Path, color: &BladeColor) -> Result<(), GrassError>;
}

/// A surface that records fill commands instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandList {
    width: usize,
    height: usize,
    commands: Vec<FillCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Recorded commands in submission order.
    pub fn commands(&self) -> &[FillCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<FillCommand> {
        self.commands
    }
}

impl Surface for CommandList {
    fn resize(&mut self, width: usize, height: usize) -> Result<(), GrassError> {
        self.width = width;
        self.height = height;
        self.commands.clear();
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: &BladeColor) -> Result<(), GrassError> {
        self.commands.push(FillCommand {
            path: path.clone(),
            color: *color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorMode;

    fn red() -> BladeColor {
        BladeColor::from_rgb_hex(ColorMode::Hsl, "#ff0000", 1.0).unwrap()
    }

    #[test]
    fn surface_trait_is_object_safe() {
        let mut list = CommandList::new();
        let surface: &mut dyn Surface = &mut list;
        surface.resize(4, 3).unwrap();
        surface.fill_path(&Path::move_to(1.0, 1.0), &red()).unwrap();
        assert_eq!(list.width(), 4);
        assert_eq!(list.height(), 3);
        assert_eq!(list.commands().len(), 1);
    }

    #[test]
    fn resize_clears_recorded_commands() {
        let mut list = CommandList::new();
        list.resize(10, 10).unwrap();
        list.fill_path(&Path::move_to(0.0, 0.0), &red()).unwrap();
        list.fill_path(&Path::move_to(1.0, 0.0), &red()).unwrap();
        assert_eq!(list.commands().len(), 2);
        list.resize(20, 5).unwrap();
        assert!(list.commands().is_empty());
        assert_eq!((list.width(), list.height()), (20, 5));
    }

    #[test]
    fn commands_keep_submission_order() {
        let mut list = CommandList::new();
        for i in 0..3 {
            list.fill_path(&Path::move_to(i as f64, 0.0), &red()).unwrap();
        }
        let xs: Vec<f64> = list
            .into_commands()
            .iter()
            .map(|c| c.path.commands()[0].point().0)
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }
}
