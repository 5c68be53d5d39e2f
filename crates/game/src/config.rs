//! App configuration (camera tuning, story pacing, job-match endpoint).
//! Loaded from careermap.ron at startup.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the current directory.
pub const CONFIG_FILE: &str = "careermap.ron";
/// Overrides `job_match.base_url` when set.
pub const API_BASE_URL_ENV: &str = "CAREERMAP_API_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Camera steering tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Fraction of the remaining gap closed each tick.
    #[serde(default = "default_lerp_fraction")]
    pub lerp_fraction: f32,
    /// Distance under which the camera counts as arrived.
    #[serde(default = "default_arrival_threshold")]
    pub arrival_threshold: f32,
    #[serde(default = "default_overview_position")]
    pub overview_position: [f32; 3],
    #[serde(default)]
    pub overview_look_at: [f32; 3],
    /// Added to an entry's position to get the focus camera position.
    #[serde(default = "default_focus_offset")]
    pub focus_offset: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
}

fn default_lerp_fraction() -> f32 {
    0.05
}
fn default_arrival_threshold() -> f32 {
    0.1
}
fn default_overview_position() -> [f32; 3] {
    [0.0, 12.0, 18.0]
}
fn default_focus_offset() -> [f32; 3] {
    [0.0, 2.0, 4.0]
}
fn default_fov() -> f32 {
    45.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lerp_fraction: default_lerp_fraction(),
            arrival_threshold: default_arrival_threshold(),
            overview_position: default_overview_position(),
            overview_look_at: [0.0; 3],
            focus_offset: default_focus_offset(),
            fov_degrees: default_fov(),
        }
    }
}

impl CameraConfig {
    pub fn overview_position(&self) -> Vec3 {
        Vec3::from_array(self.overview_position)
    }

    pub fn overview_look_at(&self) -> Vec3 {
        Vec3::from_array(self.overview_look_at)
    }

    pub fn focus_offset(&self) -> Vec3 {
        Vec3::from_array(self.focus_offset)
    }

    /// Keep the fraction in (0, 1] and the threshold positive so the camera
    /// always converges and arrival is reachable.
    fn sanitize(&mut self) {
        if !(self.lerp_fraction > 0.0 && self.lerp_fraction <= 1.0) {
            log::warn!("lerp_fraction {} out of range, using default", self.lerp_fraction);
            self.lerp_fraction = default_lerp_fraction();
        }
        if !(self.arrival_threshold > 0.0) {
            log::warn!("arrival_threshold {} out of range, using default", self.arrival_threshold);
            self.arrival_threshold = default_arrival_threshold();
        }
    }
}

/// Visual-novel pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryConfig {
    /// Milliseconds between revealed characters.
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: u64,
}

fn default_typing_interval_ms() -> u64 {
    26
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: default_typing_interval_ms(),
        }
    }
}

impl StoryConfig {
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms.max(1))
    }
}

/// Where the job-match service lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for JobMatchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl JobMatchConfig {
    pub fn client_config(&self) -> jobmatch::ClientConfig {
        jobmatch::ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

/// Persistent settings. Loaded from `careermap.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub story: StoryConfig,
    #[serde(default)]
    pub job_match: JobMatchConfig,
    /// Fixed scene ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
    /// Optional RON file with location entries replacing the built-in ones.
    #[serde(default)]
    pub locations_path: Option<PathBuf>,
    /// Viewport used for picking and overlay layout.
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
}

fn default_tick_rate() -> f64 {
    60.0
}
fn default_viewport() -> [u32; 2] {
    [1280, 720]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            story: StoryConfig::default(),
            job_match: JobMatchConfig::default(),
            tick_rate_hz: default_tick_rate(),
            locations_path: None,
            viewport: default_viewport(),
        }
    }
}

impl AppConfig {
    /// Load config from `careermap.ron`, then apply environment overrides.
    /// If the file is missing or invalid, defaults are used.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = match Self::load_from(&path) {
            Ok(c) => c,
            Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}, using defaults");
                Self::default()
            }
        };
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            config.apply_base_url_override(&url);
        }
        config
    }

    /// Load and sanitize a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: AppConfig = ron::from_str(data)?;
        config.camera.sanitize();
        if !(config.tick_rate_hz > 0.0 && config.tick_rate_hz.is_finite()) {
            log::warn!("tick_rate_hz {} out of range, using default", config.tick_rate_hz);
            config.tick_rate_hz = default_tick_rate();
        }
        Ok(config)
    }

    fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        log::info!("Job match endpoint overridden by {}: {}", API_BASE_URL_ENV, url);
        self.job_match.base_url = url.to_string();
    }

    pub fn viewport(&self) -> renderer::Viewport {
        renderer::Viewport::new(self.viewport[0].max(1), self.viewport[1].max(1))
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}
