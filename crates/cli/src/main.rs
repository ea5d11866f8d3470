#![deny(unsafe_code)]
//! CLI binary for the grassfield procedural grass generator.
//!
//! Subcommands:
//! - `render` - draw a scene and write it as PNG or SVG
//! - `commands` - dump the scene's fill commands as JSON
//! - `schema` - print the parameter schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use grassfield_core::color::{parse_rgb_hex, Rgba};
use grassfield_core::{draw_scene, CommandList, SceneParams};
use grassfield_render::snapshot::write_png;
use grassfield_render::{OutputFormat, Pixmap, SvgDocument};
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "grassfield", about = "Procedural grass field generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Scene parameters: a JSON base plus per-field overrides.
#[derive(Args)]
struct SceneArgs {
    /// Scene parameters as a JSON string; flags below override its keys.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Surface width in pixels.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Surface height in pixels.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// 32-bit PRNG seed.
    #[arg(short, long)]
    seed: Option<u32>,

    /// Number of blades.
    #[arg(short = 'n', long)]
    blades: Option<usize>,

    /// Curve segments per blade side.
    #[arg(long)]
    segments: Option<usize>,

    /// Smallest blade half-width.
    #[arg(long)]
    width_min: Option<f64>,

    /// Largest blade half-width.
    #[arg(long)]
    width_max: Option<f64>,

    /// Horizontal jitter of tip and bend.
    #[arg(long)]
    spread: Option<f64>,

    /// Fraction of the width kept clear at each side.
    #[arg(long, conflicts_with = "fixed_edge")]
    clear_edge: Option<f64>,

    /// Use the fixed 0.1 edge margin instead of a clear-edge fraction.
    #[arg(long)]
    fixed_edge: bool,

    /// Maximum hue offset per blade, in turns.
    #[arg(long)]
    hue_spread: Option<f64>,

    /// Maximum saturation offset per blade.
    #[arg(long)]
    saturation_spread: Option<f64>,

    /// Maximum lightness/value offset per blade.
    #[arg(long)]
    lightness_spread: Option<f64>,

    /// Base blade color as #rrggbb.
    #[arg(short, long)]
    color: Option<String>,

    /// Blade opacity (HSL mode only).
    #[arg(long)]
    alpha: Option<f64>,

    /// Color model: hsl or hsv.
    #[arg(long)]
    mode: Option<String>,
}

impl SceneArgs {
    /// Merges the flags over the `--params` object and parses the result,
    /// so flag values get the same checks as JSON keys.
    fn scene_params(&self) -> Result<SceneParams, CliError> {
        let mut merged: Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let fields = merged
            .as_object_mut()
            .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;

        let overrides = [
            ("width", self.width.map(Value::from)),
            ("height", self.height.map(Value::from)),
            ("seed", self.seed.map(Value::from)),
            ("nblades", self.blades.map(Value::from)),
            ("nsegments", self.segments.map(Value::from)),
            ("blade_width_min", self.width_min.map(Value::from)),
            ("blade_width_max", self.width_max.map(Value::from)),
            ("spread", self.spread.map(Value::from)),
            ("clear_edge", self.clear_edge.map(Value::from)),
            ("hue_spread", self.hue_spread.map(Value::from)),
            ("saturation_spread", self.saturation_spread.map(Value::from)),
            ("lightness_spread", self.lightness_spread.map(Value::from)),
            ("base_color", self.color.clone().map(Value::from)),
            ("color_alpha", self.alpha.map(Value::from)),
            ("color_mode", self.mode.clone().map(Value::from)),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                fields.insert(key.to_owned(), value);
            }
        }
        if self.fixed_edge {
            fields.insert("clear_edge".to_owned(), Value::Null);
        }

        let params = SceneParams::from_json(&merged)?;
        params.validate()?;
        Ok(params)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Draw a scene and write it to a PNG or SVG file.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output file path; the extension selects the format.
        #[arg(short, long, default_value = "grass.png")]
        output: PathBuf,

        /// Opaque background color (#rrggbb) for PNG output.
        #[arg(long)]
        background: Option<String>,
    },
    /// Print the scene's fill commands as JSON.
    Commands {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Print the parameter schema.
    Schema,
}

fn render(
    params: &SceneParams,
    output: &Path,
    background: Option<&str>,
) -> Result<OutputFormat, CliError> {
    let format = OutputFormat::from_path(output)?;
    match format {
        OutputFormat::Png => {
            let mut pixmap = Pixmap::new(1, 1)?;
            if let Some(hex) = background {
                let [r, g, b] = parse_rgb_hex(hex)?;
                pixmap.set_background(Rgba {
                    r: r as f64 / 255.0,
                    g: g as f64 / 255.0,
                    b: b as f64 / 255.0,
                    a: 1.0,
                });
            }
            draw_scene(params, &mut pixmap)?;
            write_png(&pixmap, output)?;
        }
        OutputFormat::Svg => {
            let mut doc = SvgDocument::new();
            draw_scene(params, &mut doc)?;
            doc.write(output)?;
        }
    }
    Ok(format)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = SceneParams::param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Value::Object(fields) = schema {
                for (name, field) in &fields {
                    println!(
                        "  {name:<18} {:<16} default {:<10} {}",
                        field["type"].to_string(),
                        field["default"].to_string(),
                        field["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Commands { scene } => {
            let params = scene.scene_params()?;
            let mut list = CommandList::new();
            draw_scene(&params, &mut list)?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        Command::Render {
            scene,
            output,
            background,
        } => {
            let params = scene.scene_params()?;
            debug!("resolved parameters: {}", params.to_json());
            let format = render(&params, &output, background.as_deref())?;

            if cli.json {
                let info = serde_json::json!({
                    "format": format.name(),
                    "output": output.display().to_string(),
                    "params": params.to_json(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} blades ({}x{}, seed {}) -> {}",
                    params.nblades,
                    params.width,
                    params.height,
                    params.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
