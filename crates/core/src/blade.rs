//! The blade generator: random control points, outline and color per blade.
//!
//! Every blade consumes exactly ten draws from the shared PRNG, in this order:
//! base x, base width, tip x, tip y, bend x, bend y, bend width, then the hue,
//! saturation and lightness/value deltas. Changing the order changes every
//! scene rendered from a saved seed.

use log::trace;

use crate::color::{BladeColor, ColorModel};
use crate::error::GrassError;
use crate::interp::{clamp, quadratic_bezier, sample_range, Point, Range};
use crate::params::SceneParams;
use crate::path::{FillCommand, Path};
use crate::prng::Mulberry32;

/// Edge margin used when no `clear_edge` fraction is configured.
pub const FIXED_EDGE_MARGIN: f64 = 0.1;

/// One blade in model space: y grows upward from the ground at 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blade {
    /// Ground anchor; `y` is always 0 and `w` is the half-width at the base.
    pub base: Point,
    /// Bend control point with its own half-width.
    pub control: Point,
    /// Tip; `w` is always 0.
    pub end: Point,
    pub color: BladeColor,
}

/// Builds the closed outline of a blade in surface coordinates (y flipped).
///
/// Walks the Bézier spine out to the tip on the left side (`-w`) and back
/// down on the right side (`+w`), giving `2 * nsegments` line segments after
/// the initial move.
///
/// Returns `GrassError::InvalidParameter` if `nsegments` is 0.
pub fn blade_outline(blade: &Blade, nsegments: usize, height: f64) -> Result<Path, GrassError> {
    if nsegments == 0 {
        return Err(GrassError::InvalidParameter(
            "nsegments must be at least 1".to_owned(),
        ));
    }
    let n = nsegments as f64;
    let total = 2 * nsegments;
    let Blade {
        base, control, end, ..
    } = *blade;

    let mut path = Path::with_capacity(base.x - base.w, height - base.y, total);
    for p in 1..=total {
        let t = p.min(total - p) as f64 / n;
        let side = if p <= nsegments { -1.0 } else { 1.0 };
        let pos = quadratic_bezier(base, control, end, t);
        path.line_to(pos.x + pos.w * side, height - pos.y);
    }
    Ok(path)
}

/// Draws blades one after another from a single seeded PRNG.
///
/// The generator owns its PRNG; two generators built from equal params
/// produce identical blades.
#[derive(Debug, Clone)]
pub struct BladeGenerator {
    rng: Mulberry32,
    width: f64,
    height: f64,
    edge_margin: f64,
    blade_width: Range,
    spread: f64,
    color_spread: [f64; 3],
    base_color: BladeColor,
    nsegments: usize,
}

impl BladeGenerator {
    /// Validates `params` and seeds a fresh PRNG from `params.seed`.
    pub fn new(params: &SceneParams) -> Result<Self, GrassError> {
        params.validate()?;
        Ok(Self {
            rng: Mulberry32::new(params.seed),
            width: params.width as f64,
            height: params.height as f64,
            edge_margin: params.clear_edge.unwrap_or(FIXED_EDGE_MARGIN),
            blade_width: params.blade_width()?,
            spread: params.spread,
            color_spread: [
                params.hue_spread,
                params.saturation_spread,
                params.lightness_spread,
            ],
            base_color: params.base_color()?,
            nsegments: params.nsegments,
        })
    }

    fn draw(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// Samples an x coordinate within `spread` of `x`, kept on the surface.
    fn jitter_x(&mut self, x: f64) -> Result<f64, GrassError> {
        let lo = clamp(x - self.spread, 0.0, self.width)?;
        let hi = clamp(x + self.spread, 0.0, self.width)?;
        sample_range(lo, hi, self.draw())
    }

    fn color_delta(&mut self, spread: f64) -> Result<f64, GrassError> {
        sample_range(-spread, spread, self.draw())
    }

    /// Samples the next blade's control points and color.
    pub fn next_blade(&mut self) -> Result<Blade, GrassError> {
        let margin = self.edge_margin;
        let base_x = sample_range(margin, 1.0 - margin, self.draw())? * self.width;
        let base_w = self.draw();
        let base = Point::new(base_x, 0.0, self.blade_width.sample(base_w));

        let end_x = self.jitter_x(base.x)?;
        let end_y = sample_range(self.height / 2.0, self.height, self.draw())?;
        let end = Point::new(end_x, end_y, 0.0);

        let control_x = self.jitter_x(base.x)?;
        let control_y = sample_range(end.y / 2.0, end.y, self.draw())?;
        let control_w = sample_range(base.w / 2.0, base.w, self.draw())?;
        let control = Point::new(control_x, control_y, control_w);

        let [hs, ss, ls] = self.color_spread;
        let dh = self.color_delta(hs)?;
        let ds = self.color_delta(ss)?;
        let dl = self.color_delta(ls)?;
        let color = self.base_color.modify(dh, ds, dl);

        Ok(Blade {
            base,
            control,
            end,
            color,
        })
    }

    /// Samples the next blade and converts it into a fill command.
    pub fn next_fill(&mut self) -> Result<FillCommand, GrassError> {
        let blade = self.next_blade()?;
        trace!(
            "blade base=({:.2}, w={:.2}) tip=({:.2}, {:.2}) color={}",
            blade.base.x,
            blade.base.w,
            blade.end.x,
            blade.end.y,
            blade.color
        );
        Ok(FillCommand {
            path: blade_outline(&blade, self.nsegments, self.height)?,
            color: blade.color,
        })
    }
}
