use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use phong_ray_tracer::render::{RenderSettings, MAX_DEPTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Fixed ground plane, 32 spheres and 16 lights
    Classic,
    /// Ground plane with spheres and lights placed from --seed
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "phong-ray-tracer")]
#[command(about = "Renders spheres over a checkerboard plane with Phong shading, shadows and reflections")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Maximum number of reflection bounces
    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: u32,

    /// Output file, binary PPM
    #[arg(short, long, default_value = "result.ppm")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = SceneKind::Classic)]
    pub scene: SceneKind,

    /// Seed for the random scene
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of spheres in the random scene
    #[arg(long, default_value_t = 32)]
    pub spheres: usize,

    /// Number of lights in the random scene
    #[arg(long, default_value_t = 16)]
    pub lights: usize,

    /// Reference PPM to compare the rendered image against
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Worker threads, defaults to one per core
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            max_depth: self.max_depth,
        }
    }
}
