//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//!
//! [controls]
//! up = keyboard up
//! down = keyboard down
//! left = keyboard left
//! right = keyboard right
//! vertical_speed = 20.0
//! horizontal_speed = 20.0
//! flip_facing = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::movementcontrols::MovementControlsConfig;
use crate::error::ConfigError;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings and the movement controls options used when
/// spawning controlled entities.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Movement controls options (`[controls]` section).
    pub controls: MovementControlsConfig,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            controls: MovementControlsConfig::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns an error
    /// if the file cannot be read or parsed, or if the controls are invalid;
    /// in that case nothing is changed.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(ConfigError::Load)?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        let mut next = self.clone();

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            next.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            next.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            next.target_fps = fps as u32;
        }

        // [controls] section
        let controls = &mut next.controls;
        if let Some(up) = config.get("controls", "up") {
            controls.up_binding = up.parse()?;
        }
        if let Some(down) = config.get("controls", "down") {
            controls.down_binding = down.parse()?;
        }
        if let Some(left) = config.get("controls", "left") {
            controls.left_binding = left.parse()?;
        }
        if let Some(right) = config.get("controls", "right") {
            controls.right_binding = right.parse()?;
        }
        if let Some(speed) = config.getfloat("controls", "vertical_speed").ok().flatten() {
            controls.vertical_speed = speed as f32;
        }
        if let Some(speed) = config.getfloat("controls", "horizontal_speed").ok().flatten() {
            controls.horizontal_speed = speed as f32;
        }
        if let Some(flip) = config.getbool("controls", "flip_facing").ok().flatten() {
            controls.flip_facing = flip;
        }
        controls.validate()?;

        info!(
            "Config: {}x{} window, fps={}, speeds v={} h={}, flip_facing={}",
            next.window_width,
            next.window_height,
            next.target_fps,
            next.controls.vertical_speed,
            next.controls.horizontal_speed,
            next.controls.flip_facing
        );
        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [controls] section
        let controls = &self.controls;
        config.set("controls", "up", Some(controls.up_binding.to_string()));
        config.set("controls", "down", Some(controls.down_binding.to_string()));
        config.set("controls", "left", Some(controls.left_binding.to_string()));
        config.set("controls", "right", Some(controls.right_binding.to_string()));
        config.set(
            "controls",
            "vertical_speed",
            Some(controls.vertical_speed.to_string()),
        );
        config.set(
            "controls",
            "horizontal_speed",
            Some(controls.horizontal_speed.to_string()),
        );
        config.set(
            "controls",
            "flip_facing",
            Some(controls.flip_facing.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set window size.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
