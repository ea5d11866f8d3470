//! Cylindrical color models used to tint grass blades.
//!
//! A base color is parsed from an `#rrggbb` literal into either HSL (with an
//! alpha channel) or HSV, perturbed per blade with [`ColorModel::modify`],
//! and rendered either as a CSS color string (`Display`) or as straight RGBA
//! for raster surfaces. Hue is stored in turns, so one full rotation is 1.0.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::GrassError;

/// Number of hex digits in an `#rrggbb` literal, excluding the `#`.
const HEX_DIGITS: usize = 6;

/// Parses `#rrggbb` (case insensitive, leading `#` required) into 8-bit channels.
///
/// Returns `GrassError::Format` if the literal does not match the pattern.
pub fn parse_rgb_hex(hex: &str) -> Result<[u8; 3], GrassError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == HEX_DIGITS && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| GrassError::Format(format!("expected #rrggbb, got {hex:?}")))?;
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| GrassError::Format(format!("invalid channel in {hex:?}: {e}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Straight (non-premultiplied) RGBA with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Quantizes to 8 bits per channel with rounding.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        ]
    }
}

fn unit_to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Wraps a hue into [0, 1) by floor subtraction; never negative.
fn wrap_hue(h: f64) -> f64 {
    let w = h - h.floor();
    // Tiny negative inputs round up to exactly 1.0.
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Hue (in turns) of an RGB triple whose max/min channels and chroma are known.
fn rgb_hue(r: f64, g: f64, b: f64, max: f64, chroma: f64) -> f64 {
    let h = if chroma == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / chroma).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / chroma + 2.0) / 6.0
    } else {
        ((r - g) / chroma + 4.0) / 6.0
    };
    wrap_hue(h)
}

/// Maps a hue and chroma to the RGB triple before the lightness offset `m` is added.
fn hue_to_rgb(h: f64, chroma: f64) -> (f64, f64, f64) {
    let hp = wrap_hue(h) * 6.0;
    let x = chroma * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    match hp as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    }
}

fn rgb8_to_unit(rgb: [u8; 3]) -> (f64, f64, f64) {
    (
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    )
}

/// The per-blade color capability shared by the HSL and HSV variants.
pub trait ColorModel: Copy + fmt::Display {
    /// Returns a new color with hue rotated by `dh` turns (wrapped into [0, 1))
    /// and the other two channels shifted by `ds`/`dc` and clamped to [0, 1].
    fn modify(&self, dh: f64, ds: f64, dc: f64) -> Self;

    /// Converts to straight RGBA for raster surfaces.
    fn to_rgba(&self) -> Rgba;
}

/// Hue/saturation/lightness color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    h: f64,
    s: f64,
    l: f64,
    alpha: f64,
}

impl HslColor {
    /// Creates a color from raw channels. Hue is wrapped, the rest clamped.
    pub fn new(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Parses `#rrggbb` and converts to HSL with the given alpha.
    pub fn from_rgb_hex(hex: &str, alpha: f64) -> Result<Self, GrassError> {
        Ok(Self::from_rgb8(parse_rgb_hex(hex)?, alpha))
    }

    /// Converts 8-bit RGB channels to HSL.
    pub fn from_rgb8(rgb: [u8; 3], alpha: f64) -> Self {
        let (r, g, b) = rgb8_to_unit(rgb);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;
        let l = (max + min) / 2.0;
        let s = if chroma == 0.0 {
            0.0
        } else {
            chroma / (1.0 - (2.0 * l - 1.0).abs())
        };
        Self::new(rgb_hue(r, g, b, max, chroma), s, l, alpha)
    }

    /// `[hue, saturation, lightness]`.
    pub fn hsl(&self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Converts back to 8-bit RGB channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let rgba = self.to_rgba();
        [unit_to_u8(rgba.r), unit_to_u8(rgba.g), unit_to_u8(rgba.b)]
    }
}

impl ColorModel for HslColor {
    fn modify(&self, dh: f64, ds: f64, dl: f64) -> Self {
        Self {
            h: wrap_hue(self.h + dh),
            s: (self.s + ds).clamp(0.0, 1.0),
            l: (self.l + dl).clamp(0.0, 1.0),
            alpha: self.alpha,
        }
    }

    fn to_rgba(&self) -> Rgba {
        let chroma = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let (r, g, b) = hue_to_rgb(self.h, chroma);
        let m = self.l - chroma / 2.0;
        Rgba {
            r: r + m,
            g: g + m,
            b: b + m,
            a: self.alpha,
        }
    }
}

impl fmt::Display for HslColor {
    /// CSS color level 4 syntax: `hsl(<turns>turn <s>% <l>% / <alpha>)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}turn {}% {}% / {})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.alpha
        )
    }
}

/// Hue/saturation/value color. Always opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    h: f64,
    s: f64,
    v: f64,
}

impl HsvColor {
    /// Creates a color from raw channels. Hue is wrapped, the rest clamped.
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Parses `#rrggbb` and converts to HSV.
    pub fn from_rgb_hex(hex: &str) -> Result<Self, GrassError> {
        Ok(Self::from_rgb8(parse_rgb_hex(hex)?))
    }

    /// Converts 8-bit RGB channels to HSV.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let (r, g, b) = rgb8_to_unit(rgb);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;
        let s = if max == 0.0 { 0.0 } else { chroma / max };
        Self::new(rgb_hue(r, g, b, max, chroma), s, max)
    }

    /// `[hue, saturation, value]`.
    pub fn hsv(&self) -> [f64; 3] {
        [self.h, self.s, self.v]
    }

    /// Converts back to 8-bit RGB channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let rgba = self.to_rgba();
        [unit_to_u8(rgba.r), unit_to_u8(rgba.g), unit_to_u8(rgba.b)]
    }
}

impl ColorModel for HsvColor {
    fn modify(&self, dh: f64, ds: f64, dv: f64) -> Self {
        Self {
            h: wrap_hue(self.h + dh),
            s: (self.s + ds).clamp(0.0, 1.0),
            v: (self.v + dv).clamp(0.0, 1.0),
        }
    }

    fn to_rgba(&self) -> Rgba {
        let chroma = self.v * self.s;
        let (r, g, b) = hue_to_rgb(self.h, chroma);
        let m = self.v - chroma;
        Rgba {
            r: r + m,
            g: g + m,
            b: b + m,
            a: 1.0,
        }
    }
}

impl fmt::Display for HsvColor {
    /// Rendered through RGB since CSS has no HSV syntax: `rgb(r, g, b)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "rgb({r}, {g}, {b})")
    }
}

/// Which color model blade colors are derived in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// HSL with alpha and edge clearance.
    #[default]
    Hsl,
    /// HSV, opaque.
    Hsv,
}

impl ColorMode {
    /// Parses `"hsl"` or `"hsv"` (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, GrassError> {
        match name.to_ascii_lowercase().as_str() {
            "hsl" => Ok(ColorMode::Hsl),
            "hsv" => Ok(ColorMode::Hsv),
            _ => Err(GrassError::InvalidParameter(format!(
                "unknown color mode '{name}', expected hsl or hsv"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Hsl => "hsl",
            ColorMode::Hsv => "hsv",
        }
    }
}

/// A blade color in whichever model the scene was configured with.
///
/// Serializes as its CSS string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BladeColor {
    Hsl(HslColor),
    Hsv(HsvColor),
}

impl BladeColor {
    /// Parses the base color for `mode`. `alpha` is ignored in HSV mode.
    pub fn from_rgb_hex(mode: ColorMode, hex: &str, alpha: f64) -> Result<Self, GrassError> {
        Ok(match mode {
            ColorMode::Hsl => BladeColor::Hsl(HslColor::from_rgb_hex(hex, alpha)?),
            ColorMode::Hsv => BladeColor::Hsv(HsvColor::from_rgb_hex(hex)?),
        })
    }

    pub fn mode(&self) -> ColorMode {
        match self {
            BladeColor::Hsl(_) => ColorMode::Hsl,
            BladeColor::Hsv(_) => ColorMode::Hsv,
        }
    }
}

impl ColorModel for BladeColor {
    fn modify(&self, dh: f64, ds: f64, dc: f64) -> Self {
        match self {
            BladeColor::Hsl(c) => BladeColor::Hsl(c.modify(dh, ds, dc)),
            BladeColor::Hsv(c) => BladeColor::Hsv(c.modify(dh, ds, dc)),
        }
    }

    fn to_rgba(&self) -> Rgba {
        match self {
            BladeColor::Hsl(c) => c.to_rgba(),
            BladeColor::Hsv(c) => c.to_rgba(),
        }
    }
}

impl fmt::Display for BladeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BladeColor::Hsl(c) => fmt::Display::fmt(c, f),
            BladeColor::Hsv(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl Serialize for BladeColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
