//! Configuration for the dimen6 terminal showcase.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. Every field is optional; anything missing falls back to its
//! default, and a missing file yields [`Config::default`].

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use dimen6_core::{Bounds, ColorTheme, FieldSettings};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Largest accepted estimate for one terminal cell, in pixels.
pub const MAX_CELL_PIXELS: f64 = 128.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub particles: FieldSettings,
    pub display: DisplayConfig,
    pub contact: ContactConfig,
    pub showcase: ShowcaseConfig,
}

/// Terminal and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Whether the particle background is drawn at all.
    pub particles: bool,
    pub theme: ColorTheme,
    /// Estimated cell width in pixels, used when the terminal hides its pixel size.
    pub cell_width: f64,
    /// Estimated cell height in pixels.
    pub cell_height: f64,
    /// Quiet period after the last resize event before the field is rebuilt.
    pub resize_debounce_ms: u64,
    /// Show the loading screen on startup.
    pub loader: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            particles: true,
            theme: ColorTheme::default(),
            cell_width: 9.0,
            cell_height: 18.0,
            resize_debounce_ms: 200,
            loader: true,
        }
    }
}

/// Contact channels offered by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Endpoint receiving the e-mail form as JSON.
    pub endpoint: String,
    pub whatsapp: String,
    pub instagram: String,
    pub email: String,
    pub linkedin: String,
    /// Request timeout for the e-mail endpoint.
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/api/contato".to_string(),
            whatsapp: "https://wa.me/5594992691894".to_string(),
            instagram: "https://instagram.com/dimen_6_".to_string(),
            email: "mailto:contato@dimen6.com".to_string(),
            linkedin: "https://linkedin.com/in/dimen6".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Landing page decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub stats: Vec<StatConfig>,
    pub marquee: MarqueeConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            stats: vec![
                StatConfig::new("projects delivered", 120, "+"),
                StatConfig::new("client satisfaction", 98, "%"),
                StatConfig::new("years building", 6, ""),
            ],
            marquee: MarqueeConfig::default(),
        }
    }
}

/// One animated counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    pub label: String,
    pub target: u32,
    #[serde(default)]
    pub suffix: String,
}

impl StatConfig {
    pub fn new(label: &str, target: u32, suffix: &str) -> Self {
        Self {
            label: label.to_string(),
            target,
            suffix: suffix.to_string(),
        }
    }
}

/// Scrolling tech-stack ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub items: Vec<String>,
    /// Speed multiplier; one cycle takes `20 / speed` seconds.
    pub speed: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            items: ["Rust", "Python", "Flask", "JavaScript", "Figma", "Docker", "PostgreSQL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            speed: 1.0,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the particle field cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.particles;
        if !is_positive(field.density) {
            return Err(ConfigError::Invalid("particles.density must be positive".into()));
        }
        if field.fps == 0 {
            return Err(ConfigError::Invalid("particles.fps must be at least 1".into()));
        }
        if !field.link_distance.is_finite() || field.link_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "particles.link_distance must not be negative".into(),
            ));
        }
        if !field.link_opacity.is_finite() {
            return Err(ConfigError::Invalid("particles.link_opacity must be a number".into()));
        }
        if !field.speed.is_finite() || field.speed < 0.0 {
            return Err(ConfigError::Invalid("particles.speed must not be negative".into()));
        }
        if !is_range(field.radius) || !is_range(field.opacity) {
            return Err(ConfigError::Invalid(
                "particles.radius and particles.opacity need finite min <= max".into(),
            ));
        }

        let display = &self.display;
        for (name, value) in [("cell_width", display.cell_width), ("cell_height", display.cell_height)] {
            if !is_positive(value) || value > MAX_CELL_PIXELS {
                return Err(ConfigError::Invalid(format!(
                    "display.{name} must be between 0 and {MAX_CELL_PIXELS} pixels"
                )));
            }
        }

        if !is_positive(self.showcase.marquee.speed) {
            return Err(ConfigError::Invalid("showcase.marquee.speed must be positive".into()));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_range(bounds: Bounds) -> bool {
    bounds.min.is_finite() && bounds.max.is_finite() && bounds.is_ordered()
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "dimen6", "dimen6").ok_or(ConfigError::NoConfigDir)
}

/// Path of the configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Directory for runtime files such as the log.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}
