use bevy::light::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::UpdateMode;
use motion::{MotionTuning, OrbitTuning, TuningError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const SETTINGS_FILE_PATH: &str = "./settings.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowQualitySetting {
    Off,
    Low,
    Medium,
    High,
}

impl Default for ShadowQualitySetting {
    fn default() -> Self {
        Self::Medium
    }
}

impl ShadowQualitySetting {
    pub fn shadows_enabled(self) -> bool {
        self != Self::Off
    }

    pub fn cascade_builder(self) -> CascadeShadowConfigBuilder {
        let (num_cascades, first_cascade_far_bound) = match self {
            Self::Off | Self::Low => (1, 40.0),
            Self::Medium => (2, 12.0),
            Self::High => (3, 8.0),
        };
        CascadeShadowConfigBuilder {
            num_cascades,
            minimum_distance: 0.1,
            maximum_distance: 40.0,
            first_cascade_far_bound,
            overlap_proportion: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FpsLimitSetting {
    Default60,
    Monitor,
    Unlimited,
}

impl Default for FpsLimitSetting {
    fn default() -> Self {
        Self::Monitor
    }
}

impl FpsLimitSetting {
    pub fn to_update_mode(self) -> UpdateMode {
        match self {
            Self::Default60 => UpdateMode::reactive(Duration::from_secs_f64(1.0 / 60.0)),
            Self::Monitor | Self::Unlimited => UpdateMode::Continuous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionSetting {
    pub width: u32,
    pub height: u32,
}

impl Default for ResolutionSetting {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub resolution: ResolutionSetting,
    pub vsync: bool,
    pub fps_limit: FpsLimitSetting,
    /// Web only: size the canvas to its parent element.
    pub fit_canvas_to_parent: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Robot Viewer".to_string(),
            resolution: ResolutionSetting::default(),
            vsync: true,
            fps_limit: FpsLimitSetting::Monitor,
            fit_canvas_to_parent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GraphicsSettings {
    pub shadow_quality: ShadowQualitySetting,
    pub show_grid: bool,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            shadow_quality: ShadowQualitySetting::Medium,
            show_grid: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Root directory (or URL prefix on the web) for every asset path.
    pub asset_root: String,
    /// glTF/GLB file relative to `asset_root`.
    pub path: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            asset_root: "assets".to_string(),
            path: "models/robot.glb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ViewerSettings {
    pub window: WindowSettings,
    pub graphics: GraphicsSettings,
    pub model: ModelSettings,
    pub motion: MotionTuning,
    pub camera: OrbitTuning,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            graphics: GraphicsSettings::default(),
            model: ModelSettings::default(),
            motion: MotionTuning::default(),
            camera: OrbitTuning::default(),
        }
    }
}

impl ViewerSettings {
    pub fn validate(&self) -> Result<(), SettingsIoError> {
        self.motion.validate().map_err(SettingsIoError::Invalid)?;
        self.camera.validate().map_err(SettingsIoError::Invalid)
    }
}

#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("failed to read settings file: {0}")]
    Read(std::io::Error),
    #[error("failed to write settings file: {0}")]
    Write(std::io::Error),
    #[error("failed to decode YAML settings: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML settings: {0}")]
    Serialize(serde_yaml::Error),
    #[error("invalid settings value: {0}")]
    Invalid(TuningError),
}

#[derive(Resource, Clone)]
pub struct SettingsResource {
    pub current: ViewerSettings,
}

impl SettingsResource {
    pub fn new(current: ViewerSettings) -> Self {
        Self { current }
    }
}

/// Runs before logging is up, so failures go to stderr.
pub fn load_settings_or_default() -> ViewerSettings {
    let path = Path::new(SETTINGS_FILE_PATH);

    if !path.exists() {
        return ViewerSettings::default();
    }

    match load_settings_from_path(path) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!(
                "Failed to load settings from '{}': {}. Falling back to defaults.",
                SETTINGS_FILE_PATH, error
            );
            ViewerSettings::default()
        }
    }
}

pub fn ensure_settings_file_exists(settings: &ViewerSettings) -> Result<(), SettingsIoError> {
    let path = Path::new(SETTINGS_FILE_PATH);
    if path.exists() {
        return Ok(());
    }

    write_settings_to_path(settings, path)
}

pub fn present_mode_for(window: &WindowSettings) -> PresentMode {
    if matches!(window.fps_limit, FpsLimitSetting::Unlimited) {
        PresentMode::AutoNoVsync
    } else if window.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    }
}

pub fn parse_settings(raw: &str) -> Result<ViewerSettings, SettingsIoError> {
    let settings =
        serde_yaml::from_str::<ViewerSettings>(raw).map_err(SettingsIoError::Deserialize)?;
    settings.validate()?;
    Ok(settings)
}

fn load_settings_from_path(path: &Path) -> Result<ViewerSettings, SettingsIoError> {
    let raw = fs::read_to_string(path).map_err(SettingsIoError::Read)?;
    parse_settings(&raw)
}

fn write_settings_to_path(settings: &ViewerSettings, path: &Path) -> Result<(), SettingsIoError> {
    let encoded = serde_yaml::to_string(settings).map_err(SettingsIoError::Serialize)?;
    fs::write(path, encoded).map_err(SettingsIoError::Write)
}
