//! Viewer configuration
//!
//! Every literal the viewer is built from lives here, with defaults that
//! reproduce the stock scene. On the desktop the configuration is layered
//! (lowest to highest priority):
//! 1. built-in defaults
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`CUBEVIEW_SECTION__KEY`)
//!
//! In the browser a JSON options object is merged over the defaults instead.
//!
//! Colors are `0xRRGGBB` integers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "CUBEVIEW_";

/// Main viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub lights: LightsConfig,
    pub renderer: RendererConfig,
    pub ground: GroundConfig,
    pub grid: GridConfig,
    pub cube: CubeConfig,
    pub debug: DebugConfig,
}

impl ViewerConfig {
    /// Load configuration from the default `config` directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory.
    ///
    /// Missing files are skipped, so an empty or absent directory yields the
    /// defaults (plus any environment overrides).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(ViewerConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CUBEVIEW_CUBE__COLOR=16711680 -> cube.color = 0xff0000
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: ViewerConfig = figment.extract().map_err(Box::new)?;
        Ok(config)
    }

    /// Parse a JSON options document over the defaults.
    ///
    /// Any subset of sections and keys may be given.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject values the scene cannot be built from.
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(invalid(format!("camera.fov must be in (0, 180), got {}", camera.fov)));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        finite_point("camera.position", camera.position)?;
        finite_point("camera.target", camera.target)?;
        if camera.position == camera.target {
            return Err(invalid(format!(
                "camera.position must differ from camera.target, both are {:?}",
                camera.target
            )));
        }

        let controls = &self.controls;
        if !(controls.damping_factor > 0.0 && controls.damping_factor <= 1.0) {
            return Err(invalid(format!(
                "controls.damping_factor must be in (0, 1], got {}",
                controls.damping_factor
            )));
        }
        for (name, speed) in [
            ("controls.rotate_speed", controls.rotate_speed),
            ("controls.zoom_speed", controls.zoom_speed),
        ] {
            if !(speed >= 0.0 && speed.is_finite()) {
                return Err(invalid(format!("{name} must be finite and >= 0, got {speed}")));
            }
        }
        if !(controls.min_distance >= 0.0
            && controls.max_distance > controls.min_distance
            && controls.max_distance.is_finite())
        {
            return Err(invalid(format!(
                "controls distances must satisfy 0 <= min < max, got min={} max={}",
                controls.min_distance, controls.max_distance
            )));
        }

        let lights = &self.lights;
        for (name, intensity) in [
            ("lights.ambient_intensity", lights.ambient_intensity),
            ("lights.directional_intensity", lights.directional_intensity),
        ] {
            if !(intensity >= 0.0 && intensity.is_finite()) {
                return Err(invalid(format!("{name} must be finite and >= 0, got {intensity}")));
            }
        }
        finite_point("lights.directional_position", lights.directional_position)?;
        if lights.directional_position == camera.target {
            return Err(invalid(format!(
                "lights.directional_position must differ from camera.target, both are {:?}",
                camera.target
            )));
        }
        if lights.shadow_map_size == 0 {
            return Err(invalid("lights.shadow_map_size must be non-zero".to_string()));
        }

        let ground = &self.ground;
        if !(ground.width > 0.0 && ground.width.is_finite())
            || !(ground.depth > 0.0 && ground.depth.is_finite())
            || !ground.y.is_finite()
        {
            return Err(invalid(format!(
                "ground plane must have a finite positive size and height, got {}x{} at y={}",
                ground.width, ground.depth, ground.y
            )));
        }

        let grid = &self.grid;
        if !(grid.size > 0.0 && grid.size.is_finite()) || grid.divisions == 0 {
            return Err(invalid(format!(
                "grid needs a positive size and at least one division, got size={} divisions={}",
                grid.size, grid.divisions
            )));
        }
        if !(grid.line_width > 0.0 && grid.line_width.is_finite()) {
            return Err(invalid(format!(
                "grid.line_width must be positive, got {}",
                grid.line_width
            )));
        }

        if !self.cube.size.iter().all(|&s| s > 0.0 && s.is_finite()) {
            return Err(invalid(format!("cube.size must be positive, got {:?}", self.cube.size)));
        }
        finite_point("cube.position", self.cube.position)?;
        Ok(())
    }
}

fn finite_point(name: &str, point: [f32; 3]) -> Result<(), ConfigError> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {point:?}")))
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title (desktop only)
    pub title: String,
    /// Upper bound on the window size in pixels, unbounded when absent
    pub max_size: Option<[u32; 2]>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cubeview".to_string(),
            max_size: None,
        }
    }
}

/// Perspective camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    /// Point the camera looks at and orbits around
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [5.0, 5.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame when damping
    pub damping_factor: f32,
    /// Orbit speed; 1.0 moves 1% of the target distance per dragged pixel
    pub rotate_speed: f32,
    /// Fraction of the target distance one wheel notch zooms by
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 500.0,
        }
    }
}

/// Light configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    /// Position the directional light shines from, towards `camera.target`
    pub directional_position: [f32; 3],
    pub cast_shadow: bool,
    /// Shadow map resolution in texels per side
    pub shadow_map_size: u32,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x404040,
            ambient_intensity: 3.0,
            directional_color: 0xffffff,
            directional_intensity: 3.0,
            directional_position: [5.0, 10.0, 7.0],
            cast_shadow: true,
            shadow_map_size: 1024,
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub background_color: u32,
    /// Master switch for shadow maps
    pub shadows: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background_color: 0x000000,
            shadows: true,
        }
    }
}

/// Ground plane configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    pub color: u32,
    /// Height of the plane
    pub y: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 10.0,
            color: 0x333333,
            y: 0.0,
        }
    }
}

/// Grid overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    /// Side length of the square grid
    pub size: f32,
    pub divisions: u32,
    pub center_color: u32,
    pub line_color: u32,
    /// Radius of the cylinders the lines are drawn with
    pub line_width: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 10.0,
            divisions: 10,
            center_color: 0x444444,
            line_color: 0x888888,
            line_width: 0.01,
        }
    }
}

/// Demo cube configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Edge lengths along X, Y, Z
    pub size: [f32; 3],
    pub color: u32,
    /// Center of the cube
    pub position: [f32; 3],
    pub cast_shadow: bool,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: [1.0, 1.0, 1.0],
            color: 0x1E90FF,
            // Resting on the ground plane
            position: [0.0, 0.5, 0.0],
            cast_shadow: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("invalid options object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
