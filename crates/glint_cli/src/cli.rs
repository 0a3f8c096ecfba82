use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::RecursionPolicy;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Render JSON scene files with a Whitted-style raytracer")]
pub struct Args {
    /// Scene files to render; each is saved next to itself as <stem>.png
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output image path (only with a single scene file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Follow up to N mirror bounces instead of the default depth rule
    #[arg(long, value_name = "N")]
    pub bounces: Option<u32>,

    /// Override the scene's samples per pixel axis
    #[arg(long, short = 's', value_name = "N")]
    pub samples: Option<u32>,
}

impl Args {
    pub fn recursion(&self) -> RecursionPolicy {
        self.bounces.map_or(RecursionPolicy::Reference, RecursionPolicy::Bounces)
    }

    /// Where the image for `scene_path` is written.
    pub fn output_for(&self, scene_path: &std::path::Path) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => scene_path.with_extension("png"),
        }
    }
}

/// Initialize env_logger at `level`; `RUST_LOG` still takes precedence.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
