use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_renderer::{raytrace, RenderConfig};

mod cli;

use cli::{init_logger, Args};

fn render_file(path: &Path, args: &Args, config: &RenderConfig) -> Result<()> {
    let output = args.output_for(path);
    log::info!("Reading scene {}", path.display());
    log::info!("Writing image {}", output.display());

    let mut scene = glint_core::load_scene(path)
        .with_context(|| format!("Failed to load scene {}", path.display()))?;
    if let Some(samples) = args.samples {
        scene.pixel_samples = samples;
    }

    let start = Instant::now();
    let image = raytrace(&scene, config);
    log::info!("Timing: {:.2}s, raytrace", start.elapsed().as_secs_f64());

    image
        .save_png(&output)
        .with_context(|| format!("Failed to write image {}", output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    if args.output.is_some() && args.files.len() > 1 {
        bail!("--output can only be used with a single scene file");
    }

    let config = RenderConfig::default().with_recursion(args.recursion());
    log::debug!("Render config: {:?}", config);

    for path in &args.files {
        render_file(path, &args, &config)?;
    }

    Ok(())
}
