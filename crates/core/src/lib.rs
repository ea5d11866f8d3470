#![deny(unsafe_code)]
//! Core types for the grassfield procedural grass generator.
//!
//! Provides the `Mulberry32` PRNG, `Range`/`Point` interpolation helpers,
//! `HslColor`/`HsvColor` (unified as `BladeColor`), the blade generator, the
//! `Surface` trait and the `Scene` driver that ties them together.

pub mod blade;
pub mod color;
pub mod error;
pub mod interp;
pub mod params;
pub mod path;
pub mod prng;
pub mod scene;
pub mod surface;

pub use blade::{blade_outline, Blade, BladeGenerator};
pub use color::{BladeColor, ColorMode, ColorModel, HslColor, HsvColor, Rgba};
pub use error::GrassError;
pub use interp::{clamp, lerp, quadratic_bezier, sample_range, Point, Range};
pub use params::SceneParams;
pub use path::{FillCommand, Path, PathCommand};
pub use prng::Mulberry32;
pub use scene::{draw_scene, generate, ParamsProvider, Scene};
pub use surface::{CommandList, Surface};
