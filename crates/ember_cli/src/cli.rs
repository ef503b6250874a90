use clap::{Parser, ValueEnum};
use ember_renderer::{RenderConfig, RenderMode, Seeding};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// A small diffuse sphere resting on a large ground sphere
    TwoSpheres,
    /// Diffuse, metal and hollow glass spheres side by side
    Materials,
    /// Three large spheres in a field of random small ones
    Random,
}

/// Render modes, mirrored from the renderer for clap
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeChoice {
    Shaded,
    NormalMap,
    Grayscale,
    Diffuse,
}

impl From<ModeChoice> for RenderMode {
    fn from(mode: ModeChoice) -> Self {
        match mode {
            ModeChoice::Shaded => RenderMode::Shaded,
            ModeChoice::NormalMap => RenderMode::NormalMap,
            ModeChoice::Grayscale => RenderMode::Grayscale,
            ModeChoice::Diffuse => RenderMode::Diffuse,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Offline Monte Carlo path tracer writing PPM images")]
pub struct Args {
    /// JSON render config; flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scene to render
    #[arg(long, value_enum, default_value = "random")]
    pub scene: SceneChoice,

    /// Output file path (plain-text PPM)
    #[arg(short, long, default_value = "output/image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Number of row bands rendered in parallel
    #[arg(long)]
    pub bands: Option<u32>,

    /// Display gamma
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Base seed for sampling (and for the random scene layout)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mix the seed with OS entropy so every run differs
    #[arg(long)]
    pub nondeterministic: bool,

    /// Render mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeChoice>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of `config`.
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(bands) = self.bands {
            config.band_count = bands;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.nondeterministic {
            config.seeding = Seeding::Entropy;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        config
    }
}
