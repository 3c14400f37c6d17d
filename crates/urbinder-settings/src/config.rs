//! Configuration for URBinder
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default file lives in the platform config
//! directory as `urbinder/binder-config.json`.
//!
//! Configuration is organized into logical sections:
//! - Robot settings (controller address)
//! - Animation settings (render range, frame rate, servo tuning)
//! - Motion settings (speed limit, over-rotation correction)
//! - Toolpath settings (stitching tolerance, lift clearance, tool output)
//! - Export settings (where to keep copies of what was sent)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::ops::Range;
use std::path::{Path, PathBuf};
use urbinder_core::Joint;

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "urbinder";

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "binder-config.json";

/// Controller address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    /// Host name or IP of the controller. Unset until the user configures it.
    pub host: Option<String>,
    /// Port that accepts program text
    pub script_port: u16,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            host: None,
            script_port: 30002,
        }
    }
}

/// Animation export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// First frame to export
    pub frame_start: i64,
    /// Frame after the last one exported
    pub frame_end: i64,
    /// Scene frame rate
    pub fps: f64,
    /// Repeat the animation until the program is stopped
    pub loop_animation: bool,
    /// Name of the generated program function
    pub function_name: String,
    /// servoj lookahead time in seconds
    pub lookahead_time: f64,
    /// servoj proportional gain
    pub gain: f64,
}

impl AnimationSettings {
    pub fn frame_range(&self) -> Range<i64> {
        self.frame_start..self.frame_end
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_start: 1,
            frame_end: 250,
            fps: 24.0,
            loop_animation: false,
            function_name: "blender_move".to_string(),
            lookahead_time: 0.1,
            gain: 300.0,
        }
    }
}

/// Joint speed checking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Rated joint speed in degrees per second
    pub speed_limit_deg_per_sec: f64,
    /// Multiplier on top of the rated speed
    pub safety_margin: f64,
    /// Joints whose series get angle wrap correction
    pub corrected_joints: Vec<Joint>,
    /// Reject wrap corrections that are still above the limit
    pub reject_residual_overspeed: bool,
    /// movej acceleration for the move to the first frame
    pub acceleration: f64,
    /// movej velocity for the move to the first frame
    pub velocity: f64,
}

impl MotionSettings {
    pub fn speed_limit_rad_per_sec(&self) -> f64 {
        self.speed_limit_deg_per_sec.to_radians()
    }
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            speed_limit_deg_per_sec: 191.0,
            safety_margin: 1.02,
            corrected_joints: vec![Joint::Base],
            reject_residual_overspeed: false,
            acceleration: 1.4,
            velocity: 1.05,
        }
    }
}

/// Drawing mesh edges with the tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathSettings {
    /// Offset of the approach and retract points from a polyline's ends
    pub lift_clearance: [f64; 3],
    /// Distance under which segment endpoints are joined
    pub tolerance: f64,
    /// Tool digital output that switches the tool on
    pub tool_output: u32,
    /// Tool rotation vector held for every waypoint
    pub tool_orientation: [f64; 3],
    /// movel acceleration
    pub acceleration: f64,
    /// movel velocity
    pub velocity: f64,
    /// Name of the generated program function
    pub function_name: String,
}

impl Default for ToolpathSettings {
    fn default() -> Self {
        Self {
            lift_clearance: [0.0, 0.0, 0.5],
            tolerance: 0.01,
            tool_output: 0,
            tool_orientation: [0.0, PI, 0.0],
            acceleration: 1.2,
            velocity: 0.25,
            function_name: "draw_toolpath".to_string(),
        }
    }
}

/// Copies of export output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Where the program text is written before it is sent
    pub script_log: Option<PathBuf>,
    /// Where the corrected joint angles are written as JSON
    pub trace_json: Option<PathBuf>,
}

/// Complete binder configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub robot: RobotSettings,
    pub animation: AnimationSettings,
    pub motion: MotionSettings,
    pub toolpath: ToolpathSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path`, writing the defaults there first if it does not exist
    pub fn load_or_create(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            return Self::load_from_file(path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self::default();
        config.save_to_file(path)?;
        tracing::info!("Created default configuration at {}", path.display());
        Ok(config)
    }

    /// `<platform config dir>/urbinder/binder-config.json`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "no configuration directory on this platform".to_string(),
                )
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(host) = &self.robot.host {
            if host.trim().is_empty() {
                return Err(ConfigError::InvalidSetting {
                    key: "robot.host".to_string(),
                    reason: "must not be empty when set".to_string(),
                });
            }
        }

        if self.robot.script_port == 0 {
            return Err(ConfigError::out_of_range("robot.script_port", 0));
        }

        let animation = &self.animation;
        if !(animation.fps.is_finite() && animation.fps > 0.0) {
            return Err(ConfigError::out_of_range("animation.fps", animation.fps));
        }

        if animation.frame_end <= animation.frame_start {
            return Err(ConfigError::InvalidSetting {
                key: "animation.frame_end".to_string(),
                reason: format!(
                    "frame range {}..{} is empty",
                    animation.frame_start, animation.frame_end
                ),
            });
        }

        if animation.function_name.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "animation.function_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if animation.lookahead_time < 0.0 {
            return Err(ConfigError::out_of_range(
                "animation.lookahead_time",
                animation.lookahead_time,
            ));
        }

        let motion = &self.motion;
        if !(motion.speed_limit_deg_per_sec.is_finite() && motion.speed_limit_deg_per_sec > 0.0) {
            return Err(ConfigError::out_of_range(
                "motion.speed_limit_deg_per_sec",
                motion.speed_limit_deg_per_sec,
            ));
        }

        if motion.safety_margin.is_nan() || motion.safety_margin < 1.0 {
            return Err(ConfigError::out_of_range(
                "motion.safety_margin",
                motion.safety_margin,
            ));
        }

        let mut seen = HashSet::new();
        for joint in &motion.corrected_joints {
            if !seen.insert(*joint) {
                return Err(ConfigError::DuplicateJoint(*joint));
            }
        }

        let toolpath = &self.toolpath;
        if toolpath.tolerance.is_nan() || toolpath.tolerance <= 0.0 {
            return Err(ConfigError::out_of_range(
                "toolpath.tolerance",
                toolpath.tolerance,
            ));
        }

        if toolpath.function_name.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "toolpath.function_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if toolpath.velocity <= 0.0 || toolpath.acceleration <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                key: "toolpath.velocity".to_string(),
                reason: "velocity and acceleration must be > 0".to_string(),
            });
        }

        Ok(())
    }
}
