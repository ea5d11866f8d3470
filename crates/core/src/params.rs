//! Scene parameters and the JSON helpers used to read them.
//!
//! [`SceneParams`] is the immutable configuration bag for one generation
//! pass. It can be built from defaults, deserialized with serde, or
//! extracted leniently from a JSON object with [`SceneParams::from_json`],
//! where missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::color::{BladeColor, ColorMode};
use crate::error::GrassError;
use crate::interp::Range;

const DEFAULT_WIDTH: usize = 800;
const DEFAULT_HEIGHT: usize = 600;
const DEFAULT_SEED: u32 = 0;
const DEFAULT_NBLADES: usize = 200;
const DEFAULT_NSEGMENTS: usize = 8;
const DEFAULT_BLADE_WIDTH_MIN: f64 = 2.0;
const DEFAULT_BLADE_WIDTH_MAX: f64 = 6.0;
/// Horizontal jitter of tip and control point, in pixels.
const DEFAULT_SPREAD: f64 = 40.0;
/// Fraction of the width kept clear at each side.
const DEFAULT_CLEAR_EDGE: f64 = 0.05;
const DEFAULT_HUE_SPREAD: f64 = 0.05;
const DEFAULT_SATURATION_SPREAD: f64 = 0.1;
const DEFAULT_LIGHTNESS_SPREAD: f64 = 0.1;
const DEFAULT_BASE_COLOR: &str = "#3a9a2a";
const DEFAULT_COLOR_ALPHA: f64 = 1.0;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts an `i64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_i64(params: &Value, name: &str, default: i64) -> i64 {
    params.get(name).and_then(Value::as_i64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Everything one generation pass needs.
///
/// `clear_edge` doubles as the edge mode flag: `Some(f)` keeps a fraction
/// `f` of the width clear at each side, `None` uses the fixed 0.1 margin.
/// The two are independent of `color_mode`; only [`SceneParams::from_json`]
/// ties them together, picking the fixed margin for HSV scenes that leave
/// `clear_edge` unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub nblades: usize,
    pub nsegments: usize,
    pub blade_width_min: f64,
    pub blade_width_max: f64,
    pub spread: f64,
    pub clear_edge: Option<f64>,
    pub hue_spread: f64,
    pub saturation_spread: f64,
    /// Lightness spread in HSL mode, value spread in HSV mode.
    pub lightness_spread: f64,
    pub base_color: String,
    /// Ignored in HSV mode.
    pub color_alpha: f64,
    pub color_mode: ColorMode,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED,
            nblades: DEFAULT_NBLADES,
            nsegments: DEFAULT_NSEGMENTS,
            blade_width_min: DEFAULT_BLADE_WIDTH_MIN,
            blade_width_max: DEFAULT_BLADE_WIDTH_MAX,
            spread: DEFAULT_SPREAD,
            clear_edge: Some(DEFAULT_CLEAR_EDGE),
            hue_spread: DEFAULT_HUE_SPREAD,
            saturation_spread: DEFAULT_SATURATION_SPREAD,
            lightness_spread: DEFAULT_LIGHTNESS_SPREAD,
            base_color: DEFAULT_BASE_COLOR.to_owned(),
            color_alpha: DEFAULT_COLOR_ALPHA,
            color_mode: ColorMode::Hsl,
        }
    }
}

impl SceneParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Numbers of the wrong type fall back silently. Negative `nblades`
    /// means an empty scene; `seed` wraps to 32 bits. A `null`
    /// `clear_edge` selects the fixed margin, as does a missing one in HSV
    /// mode. Returns `GrassError::ParamTypeMismatch` if `base_color` or
    /// `color_mode` is present but not a string, and
    /// `GrassError::InvalidParameter` for an unknown color mode or an
    /// `nsegments` that is not a positive integer.
    pub fn from_json(params: &Value) -> Result<Self, GrassError> {
        let d = Self::default();
        for key in ["base_color", "color_mode"] {
            if let Some(v) = params.get(key).filter(|v| !v.is_string()) {
                return Err(GrassError::ParamTypeMismatch {
                    name: key.to_owned(),
                    expected: "string".to_owned(),
                    got: json_type_name(v).to_owned(),
                });
            }
        }
        let color_mode = ColorMode::from_name(&param_string(
            params,
            "color_mode",
            d.color_mode.name(),
        ))?;
        let clear_edge = match params.get("clear_edge") {
            None if color_mode == ColorMode::Hsv => None,
            None => d.clear_edge,
            Some(Value::Null) => None,
            Some(v) => v.as_f64().or(d.clear_edge),
        };
        let nsegments = match params.get("nsegments") {
            None => d.nsegments,
            Some(v) => v
                .as_u64()
                .filter(|&n| n >= 1)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    GrassError::InvalidParameter(format!(
                        "nsegments must be a positive integer, got {v}"
                    ))
                })?,
        };
        Ok(Self {
            width: param_usize(params, "width", d.width),
            height: param_usize(params, "height", d.height),
            seed: param_i64(params, "seed", d.seed as i64) as u32,
            nblades: param_i64(params, "nblades", d.nblades as i64).max(0) as usize,
            nsegments,
            blade_width_min: param_f64(params, "blade_width_min", d.blade_width_min),
            blade_width_max: param_f64(params, "blade_width_max", d.blade_width_max),
            spread: param_f64(params, "spread", d.spread),
            clear_edge,
            hue_spread: param_f64(params, "hue_spread", d.hue_spread),
            saturation_spread: param_f64(params, "saturation_spread", d.saturation_spread),
            lightness_spread: param_f64(params, "lightness_spread", d.lightness_spread),
            base_color: param_string(params, "base_color", &d.base_color),
            color_alpha: param_f64(params, "color_alpha", d.color_alpha),
            color_mode,
        })
    }

    /// Checks the preconditions of a generation pass.
    ///
    /// Returns `GrassError::InvalidParameter` for zero segments or any
    /// non-finite numeric parameter, and `GrassError::Format` for a bad
    /// base color.
    pub fn validate(&self) -> Result<(), GrassError> {
        if self.nsegments == 0 {
            return Err(GrassError::InvalidParameter(
                "nsegments must be at least 1".to_owned(),
            ));
        }
        let numeric = [
            ("blade_width_min", self.blade_width_min),
            ("blade_width_max", self.blade_width_max),
            ("spread", self.spread),
            ("clear_edge", self.clear_edge.unwrap_or(0.0)),
            ("hue_spread", self.hue_spread),
            ("saturation_spread", self.saturation_spread),
            ("lightness_spread", self.lightness_spread),
            ("color_alpha", self.color_alpha),
        ];
        if let Some((name, v)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GrassError::InvalidParameter(format!(
                "{name} must be finite, got {v}"
            )));
        }
        self.base_color()?;
        Ok(())
    }

    /// The configured blade half-width range, normalized.
    pub fn blade_width(&self) -> Result<Range, GrassError> {
        Range::new(self.blade_width_min, self.blade_width_max)
    }

    /// The parsed base color in the configured color mode.
    pub fn base_color(&self) -> Result<BladeColor, GrassError> {
        BladeColor::from_rgb_hex(self.color_mode, &self.base_color, self.color_alpha)
    }

    /// Current parameter values as a JSON object.
    pub fn to_json(&self) -> Value {
        // Every field is a plain number, string or null.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema describing all parameters, their types, ranges and defaults.
    pub fn param_schema() -> Value {
        json!({
            "width": {
                "type": "integer",
                "default": DEFAULT_WIDTH,
                "min": 1,
                "description": "Surface width in pixels"
            },
            "height": {
                "type": "integer",
                "default": DEFAULT_HEIGHT,
                "min": 1,
                "description": "Surface height in pixels"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "32-bit PRNG seed; the only source of randomness"
            },
            "nblades": {
                "type": "integer",
                "default": DEFAULT_NBLADES,
                "min": 0,
                "description": "Number of blades drawn"
            },
            "nsegments": {
                "type": "integer",
                "default": DEFAULT_NSEGMENTS,
                "min": 1,
                "description": "Curve segments per blade side"
            },
            "blade_width_min": {
                "type": "number",
                "default": DEFAULT_BLADE_WIDTH_MIN,
                "min": 0.0,
                "description": "Smallest blade half-width at the base, in pixels"
            },
            "blade_width_max": {
                "type": "number",
                "default": DEFAULT_BLADE_WIDTH_MAX,
                "min": 0.0,
                "description": "Largest blade half-width at the base, in pixels"
            },
            "spread": {
                "type": "number",
                "default": DEFAULT_SPREAD,
                "min": 0.0,
                "description": "Horizontal jitter of tip and bend, in pixels"
            },
            "clear_edge": {
                "type": ["number", "null"],
                "default": DEFAULT_CLEAR_EDGE,
                "min": 0.0,
                "max": 0.5,
                "description": "Fraction of width kept clear at each side; null (or unset in hsv mode) uses a fixed 0.1 margin"
            },
            "hue_spread": {
                "type": "number",
                "default": DEFAULT_HUE_SPREAD,
                "min": 0.0,
                "max": 1.0,
                "description": "Maximum hue offset per blade, in turns"
            },
            "saturation_spread": {
                "type": "number",
                "default": DEFAULT_SATURATION_SPREAD,
                "min": 0.0,
                "max": 1.0,
                "description": "Maximum saturation offset per blade"
            },
            "lightness_spread": {
                "type": "number",
                "default": DEFAULT_LIGHTNESS_SPREAD,
                "min": 0.0,
                "max": 1.0,
                "description": "Maximum lightness (HSL) or value (HSV) offset per blade"
            },
            "base_color": {
                "type": "string",
                "default": DEFAULT_BASE_COLOR,
                "description": "Base blade color as #rrggbb"
            },
            "color_alpha": {
                "type": "number",
                "default": DEFAULT_COLOR_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Blade opacity (HSL mode only)"
            },
            "color_mode": {
                "type": "string",
                "default": "hsl",
                "enum": ["hsl", "hsv"],
                "description": "Color model blade colors are varied in"
            }
        })
    }
}
