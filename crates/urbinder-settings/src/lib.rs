//! URBinder Settings Crate
//!
//! Handles the binder configuration: robot address, render range, speed
//! limits and toolpath parameters. The configuration is a plain value; the
//! pipelines receive it explicitly and never look it up themselves.

pub mod config;
pub mod error;

pub use config::{
    AnimationSettings, Config, ExportSettings, MotionSettings, RobotSettings, ToolpathSettings,
    CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
