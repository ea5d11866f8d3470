//! The scene driver: parameters in, one full redraw of a surface out.
//!
//! Parameters come from an injected [`ParamsProvider`]; whatever owns the
//! UI calls [`Scene::regenerate`] whenever those parameters change. Every
//! call re-seeds the PRNG and redraws from scratch, so nothing carries over
//! between invocations.

use log::debug;
use serde_json::Value;

use crate::blade::BladeGenerator;
use crate::error::GrassError;
use crate::params::SceneParams;
use crate::path::FillCommand;
use crate::surface::{CommandList, Surface};

/// Source of the current scene parameters.
pub trait ParamsProvider {
    /// Returns the parameters for the next generation pass.
    fn scene_params(&self) -> Result<SceneParams, GrassError>;
}

impl ParamsProvider for SceneParams {
    fn scene_params(&self) -> Result<SceneParams, GrassError> {
        Ok(self.clone())
    }
}

impl ParamsProvider for Value {
    fn scene_params(&self) -> Result<SceneParams, GrassError> {
        SceneParams::from_json(self)
    }
}

/// Draws one full scene onto `surface` and returns the number of blades drawn.
///
/// The surface is resized (and thereby cleared) to the scene dimensions,
/// then receives one fill per blade in index order. Parameters are
/// validated before the surface is touched.
pub fn draw_scene(params: &SceneParams, surface: &mut dyn Surface) -> Result<usize, GrassError> {
    let mut blades = BladeGenerator::new(params)?;
    debug!(
        "drawing {} blades ({} segments) on {}x{} with seed {}",
        params.nblades, params.nsegments, params.width, params.height, params.seed
    );
    surface.resize(params.width, params.height)?;
    for _ in 0..params.nblades {
        let fill = blades.next_fill()?;
        surface.fill_path(&fill.path, &fill.color)?;
    }
    Ok(params.nblades)
}

/// Generates a scene as a list of fill commands.
pub fn generate(params: &SceneParams) -> Result<Vec<FillCommand>, GrassError> {
    let mut list = CommandList::new();
    draw_scene(params, &mut list)?;
    Ok(list.into_commands())
}

/// A scene bound to a parameter source.
#[derive(Debug, Clone)]
pub struct Scene<P> {
    provider: P,
}

impl<P: ParamsProvider> Scene<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Mutable access for the UI layer to update parameters before the next
    /// [`regenerate`](Self::regenerate).
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Reads the current parameters and redraws `surface` from scratch.
    ///
    /// Returns the parameters that were used.
    pub fn regenerate(&self, surface: &mut dyn Surface) -> Result<SceneParams, GrassError> {
        let params = self.provider.scene_params()?;
        draw_scene(&params, surface)?;
        Ok(params)
    }
}
