//! Closed polygonal paths and the fill commands that carry them to a surface.

use std::fmt::Write as _;

use serde::Serialize;

use crate::color::BladeColor;

/// A single path instruction in surface coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

impl PathCommand {
    pub fn point(&self) -> (f64, f64) {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => (x, y),
        }
    }
}

/// A single closed contour: one `MoveTo` followed by `LineTo`s.
///
/// Filling always closes the contour back to its starting point, so no
/// explicit close command is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Starts a new contour at `(x, y)`.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::with_capacity(x, y, 0)
    }

    /// Starts a new contour with room for `line_count` further vertices.
    pub fn with_capacity(x: f64, y: f64, line_count: usize) -> Self {
        let mut commands = Vec::with_capacity(line_count + 1);
        commands.push(PathCommand::MoveTo { x, y });
        Self { commands }
    }

    /// Appends a straight segment to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// All vertices in order, starting with the `MoveTo` point.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always false: a path holds at least its starting `MoveTo`.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.points().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), (x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }

    /// SVG path data, e.g. `M1 2 L3 4 Z`.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            let op = match cmd {
                PathCommand::MoveTo { .. } => 'M',
                PathCommand::LineTo { .. } => 'L',
            };
            let (x, y) = cmd.point();
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = write!(d, "{op}{x} {y}");
        }
        d.push_str(" Z");
        d
    }
}

/// One blade's worth of output: a closed outline and its fill color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillCommand {
    pub path: Path,
    pub color: BladeColor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorMode;

    fn triangle() -> Path {
        let mut p = Path::move_to(0.0, 0.0);
        p.line_to(4.0, 0.0);
        p.line_to(2.0, 3.0);
        p
    }

    #[test]
    fn move_to_starts_with_single_command() {
        let p = Path::move_to(1.0, 2.0);
        assert_eq!(p.len(), 1);
        assert!(!p.is_empty());
        assert_eq!(p.commands()[0], PathCommand::MoveTo { x: 1.0, y: 2.0 });
    }

    #[test]
    fn points_include_start() {
        let pts: Vec<_> = triangle().points().collect();
        assert_eq!(pts, vec![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]);
    }

    #[test]
    fn bounds_cover_all_points() {
        assert_eq!(triangle().bounds(), (0.0, 0.0, 4.0, 3.0));
    }

    #[test]
    fn svg_data_closes_contour() {
        assert_eq!(triangle().to_svg_data(), "M0 0 L4 0 L2 3 Z");
    }

    #[test]
    fn fill_command_serializes_points_and_color() {
        let cmd = FillCommand {
            path: triangle(),
            color: BladeColor::from_rgb_hex(ColorMode::Hsv, "#ff0000", 1.0).unwrap(),
        };
        let v = serde_json::to_value(&cmd).unwrap();
        assert_eq!(v["color"], "rgb(255, 0, 0)");
        assert_eq!(v["path"]["commands"][0]["op"], "move_to");
        assert_eq!(v["path"]["commands"][2]["op"], "line_to");
        assert_eq!(v["path"]["commands"][2]["y"], 3.0);
    }
}
