//! Command line options and the startup configuration they produce.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{value_parser, Arg, ArgMatches, Command};
use log::LevelFilter;
use thiserror::Error;

use crate::core::Camera;
use crate::populate::PopulateConfig;

pub const DEFAULT_WIDTH: usize = 800;
pub const DEFAULT_HEIGHT: usize = 600;
pub const DEFAULT_FPS: usize = 60;
pub const DEFAULT_TEXTURE: &str = "textures/texture.png";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum object count {min} is larger than maximum {max}")]
    InvalidObjectRange { min: usize, max: usize },
    #[error("window size must be non-zero, got {width}x{height}")]
    ZeroWindowSize { width: usize, height: usize },
    #[error("far clip plane must be beyond the near plane ({near}), got {far}")]
    InvalidFar { near: f32, far: f32 },
    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub populate: PopulateConfig,
    /// Fixed seed for a reproducible scene; entropy when absent.
    pub seed: Option<u64>,
    pub texture: PathBuf,
    pub fps: usize,
    pub far: f32,
    pub log_level: LevelFilter,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            populate: PopulateConfig::default(),
            seed: None,
            texture: PathBuf::from(DEFAULT_TEXTURE),
            fps: DEFAULT_FPS,
            far: Camera::DEFAULT_FAR,
            log_level: LevelFilter::Info,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.populate.min_objects > self.populate.max_objects {
            return Err(ConfigError::InvalidObjectRange {
                min: self.populate.min_objects,
                max: self.populate.max_objects,
            });
        }
        if self.far.is_nan() || self.far <= Camera::DEFAULT_NEAR {
            return Err(ConfigError::InvalidFar {
                near: Camera::DEFAULT_NEAR,
                far: self.far,
            });
        }
        Ok(())
    }
}

pub fn create_clap_command() -> Command {
    Command::new("scene_viewer")
        .about("Interactive viewer for a randomly populated scene of spinning cubes and pyramids")
        .version("0.1")
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help("Window width [default: 800]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help("Window height [default: 600]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("min-objects")
                .long("min-objects")
                .value_name("N")
                .help("Fewest objects the scene is populated with [default: 5]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-objects")
                .long("max-objects")
                .value_name("N")
                .help("Most objects the scene is populated with [default: 30]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for a reproducible scene. Random if not supplied.")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("texture")
                .short('t')
                .long("texture")
                .value_name("FILE")
                .help("Image used by textured objects. A checkerboard is used if it can't be loaded.")
                .default_value(DEFAULT_TEXTURE)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("FPS")
                .help("Target frame rate [default: 60]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("far")
                .long("far")
                .value_name("DISTANCE")
                .help("Far clip plane distance [default: 5]")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("One of off, error, warn, info, debug, trace")
                .default_value("info"),
        )
}

pub fn handle_clap_matches(matches: &ArgMatches) -> Result<ViewerConfig, ConfigError> {
    let defaults = ViewerConfig::default();
    let level = matches
        .get_one::<String>("log-level")
        .map(|s| s.as_str())
        .unwrap_or("info");
    let log_level =
        LevelFilter::from_str(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))?;

    let config = ViewerConfig {
        width: matches.get_one::<usize>("width").copied().unwrap_or(defaults.width),
        height: matches.get_one::<usize>("height").copied().unwrap_or(defaults.height),
        populate: PopulateConfig {
            min_objects: matches
                .get_one::<usize>("min-objects")
                .copied()
                .unwrap_or(defaults.populate.min_objects),
            max_objects: matches
                .get_one::<usize>("max-objects")
                .copied()
                .unwrap_or(defaults.populate.max_objects),
        },
        seed: matches.get_one::<u64>("seed").copied(),
        texture: matches
            .get_one::<PathBuf>("texture")
            .cloned()
            .unwrap_or(defaults.texture),
        fps: matches.get_one::<usize>("fps").copied().unwrap_or(defaults.fps),
        far: matches.get_one::<f32>("far").copied().unwrap_or(defaults.far),
        log_level,
    };
    config.validate()?;
    Ok(config)
}
