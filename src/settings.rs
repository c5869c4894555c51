use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SettingsError;
use crate::render::render3d::RenderSettings;

pub const DEFAULT_CONFIG: &str = "tinycaster.toml";

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "First-person raycaster")]
pub struct Cli {
    /// TOML settings file (defaults to ./tinycaster.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Map file: a 16x16 grid of digits and spaces
    #[arg(long)]
    pub map: Option<PathBuf>,
    /// Render a single frame to this PPM file and exit
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    #[arg(long)]
    pub width: Option<usize>,
    #[arg(long)]
    pub height: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub walls: PathBuf,
    pub monsters: PathBuf,
    pub gun: Option<PathBuf>,
    pub map: Option<PathBuf>,
    pub start_x: f32,
    pub start_y: f32,
    pub start_heading: f32,
    pub fov: f32,
    pub turn_speed: f32,
    pub walk_speed: f32,
    pub monster_speed: f32,
    pub tick_ms: u64,
    pub shot_ms: u64,
    pub floor_texture: usize,
    pub ceiling_texture: usize,
    pub max_cast_distance: f32,
    pub max_sprite_distance: f32,
    pub hit_distance: f32,
    pub hit_cone: f32,
    pub minimap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            width: 1024,
            height: 512,
            walls: "texture/walltext.png".into(),
            monsters: "texture/monsters.png".into(),
            gun: Some("texture/gun.png".into()),
            map: None,
            start_x: 2.0,
            start_y: 14.0,
            start_heading: -FRAC_PI_2,
            fov: FRAC_PI_3,
            turn_speed: 0.1,
            walk_speed: 0.1,
            monster_speed: 0.01,
            tick_ms: 16,
            shot_ms: 150,
            floor_texture: render.floor_texture,
            ceiling_texture: render.ceiling_texture,
            max_cast_distance: render.max_cast_distance,
            max_sprite_distance: render.max_sprite_distance,
            hit_distance: 8.0,
            hit_cone: 0.05,
            minimap: render.minimap,
        }
    }
}

impl Settings {
    /// Reads `path`, or `./tinycaster.toml` if none is given. An explicit
    /// path must exist; the implicit one falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };
        if !explicit && !path.exists() {
            warn!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.clone(),
            source,
        })?;
        settings.validate()?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Rejects values the renderer divides by or sizes buffers with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |key, reason| Err(SettingsError::Invalid { key, reason });
        if self.width == 0 {
            return invalid("width", "must be positive");
        }
        if self.height == 0 {
            return invalid("height", "must be positive");
        }
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= PI {
            return invalid("fov", "must be between 0 and pi radians");
        }
        for (key, value) in [
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("start_heading", self.start_heading),
            ("turn_speed", self.turn_speed),
            ("walk_speed", self.walk_speed),
            ("monster_speed", self.monster_speed),
            ("max_cast_distance", self.max_cast_distance),
            ("max_sprite_distance", self.max_sprite_distance),
            ("hit_distance", self.hit_distance),
            ("hit_cone", self.hit_cone),
        ] {
            if !value.is_finite() {
                return invalid(key, "must be a finite number");
            }
        }
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Command-line flags win over the file.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(map) = &cli.map {
            self.map = Some(map.clone());
        }
        if let Some(w) = cli.width {
            self.width = w;
        }
        if let Some(h) = cli.height {
            self.height = h;
        }
        self
    }

    pub fn render(&self) -> RenderSettings {
        RenderSettings {
            floor_texture: self.floor_texture,
            ceiling_texture: self.ceiling_texture,
            max_cast_distance: self.max_cast_distance,
            max_sprite_distance: self.max_sprite_distance,
            minimap: self.minimap,
            ..RenderSettings::default()
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn shot(&self) -> Duration {
        Duration::from_millis(self.shot_ms)
    }
}
