//! Command-line front end: load an OBJ, render it, write a PNG.
//!
//! Options come from defaults, then an optional RON file, then flags.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shadery::engine::load_texture;
use shadery::math::vec3::Vec3;
use shadery::{load_obj, Engine, RenderConfig, RenderMode, ShadingMode};

/// Render a triangle mesh to a PNG with a software rasterizer.
#[derive(Parser, Debug)]
#[command(name = "shadery")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Wavefront OBJ mesh to render
    #[arg(name = "MESH")]
    mesh: PathBuf,

    /// Texture image sampled with the mesh UVs
    #[arg(name = "TEXTURE")]
    texture: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// RON file with render options; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    eye: Option<Vec<f32>>,

    /// Point the camera looks at
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    center: Option<Vec<f32>>,

    /// Camera up hint
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    up: Option<Vec<f32>>,

    /// Direction the light travels
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    light: Option<Vec<f32>>,

    /// Weight of the specular highlight
    #[arg(long)]
    specular: Option<f32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Values above 1 shrink the model inside the canvas
    #[arg(long)]
    scale: Option<f32>,

    /// Fill color as R,G,B[,A]
    #[arg(long, value_parser = parse_rgba)]
    fill: Option<[u8; 4]>,

    #[arg(long, value_enum)]
    shading: Option<ShadingMode>,

    #[arg(long, value_enum)]
    mode: Option<RenderMode>,
}

fn parse_rgba(s: &str) -> Result<[u8; 4], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [r, g, b] => Ok([r, g, b, 255]),
        [r, g, b, a] => Ok([r, g, b, a]),
        _ => Err(format!("expected 3 or 4 components, got {}", parts.len())),
    }
}

fn to_vec3(values: &[f32]) -> Vec3 {
    Vec3::new(values[0], values[1], values[2])
}

impl Cli {
    fn config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_ron_file(path)?,
            None => RenderConfig::default(),
        };

        if let Some(v) = &self.eye {
            config.eye = to_vec3(v);
        }
        if let Some(v) = &self.center {
            config.center = to_vec3(v);
        }
        if let Some(v) = &self.up {
            config.up = to_vec3(v);
        }
        if let Some(v) = &self.light {
            config.light_direction = to_vec3(v);
        }
        if let Some(specular) = self.specular {
            config.specular = specular;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(fill) = self.fill {
            config.fill_color = fill;
        }
        if let Some(shading) = self.shading {
            config.shading = shading;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let engine = Engine::new(config).context("Invalid render options")?;

    let (mesh, _report) = load_obj(&cli.mesh)?;
    let mesh = mesh.center_align();
    let texture = load_texture(cli.texture.as_deref());

    let frame = engine
        .render(&mesh, texture.as_ref())
        .with_context(|| format!("Failed to render {}", cli.mesh.display()))?;
    frame.renderer.save_png(&cli.output)?;

    info!(
        output = %cli.output.display(),
        width = frame.renderer.width(),
        height = frame.renderer.height(),
        "Wrote image"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
