//! Error type shared by settings, renderer and platform glue

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashError {
    /// A settings value failed validation
    InvalidSettings { field: &'static str, reason: String },
    /// Settings JSON could not be parsed
    SettingsParse(String),
    /// Surface creation or presentation failed
    Surface(String),
    /// GPU adapter/device could not be acquired
    Device(String),
    /// A required platform object was missing
    Platform(String),
}

impl fmt::Display for SplashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplashError::InvalidSettings { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
            SplashError::SettingsParse(msg) => write!(f, "failed to parse settings: {msg}"),
            SplashError::Surface(msg) => write!(f, "surface error: {msg}"),
            SplashError::Device(msg) => write!(f, "device error: {msg}"),
            SplashError::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for SplashError {}

impl From<serde_json::Error> for SplashError {
    fn from(err: serde_json::Error) -> Self {
        SplashError::SettingsParse(err.to_string())
    }
}
