use std::fmt;

/// Errors raised by a drawing surface.
#[derive(Debug)]
pub enum SurfaceError {
    /// The host could not provide a surface, or it could not be measured.
    Unavailable(String),
    /// A backend draw call failed.
    Draw(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable(msg) => write!(f, "Could not get a drawing surface: {}", msg),
            SurfaceError::Draw(msg) => write!(f, "Drawing failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Errors raised while reading or writing option presets.
#[derive(Debug)]
pub enum PresetError {
    Io(std::io::Error),
    Encode(rmp_serde::encode::Error),
    Decode(rmp_serde::decode::Error),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Io(e) => write!(f, "Failed to access preset file: {}", e),
            PresetError::Encode(e) => write!(f, "Failed to encode preset: {}", e),
            PresetError::Decode(e) => write!(f, "Failed to decode preset: {}", e),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Io(e) => Some(e),
            PresetError::Encode(e) => Some(e),
            PresetError::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PresetError {
    fn from(e: std::io::Error) -> Self {
        PresetError::Io(e)
    }
}

impl From<rmp_serde::encode::Error> for PresetError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        PresetError::Encode(e)
    }
}

impl From<rmp_serde::decode::Error> for PresetError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        PresetError::Decode(e)
    }
}
