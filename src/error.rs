use thiserror::Error;

/// Problems with values that are fixed at startup (settings, widget geometry).
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Button dimensions must not be negative (found: {width}x{height})")]
    NegativeDimensions { width: i32, height: i32 },
    #[error("The window needs a non-zero size (found: {width}x{height})")]
    InvalidWindowSize { width: u32, height: u32 },
    #[error("The frame rate must be at least 1 (found: {fps})")]
    InvalidFrameRate { fps: u16 },
    #[error("Not a colour (found: {found}, expected: \"#rrggbb\" or \"#rrggbbaa\")")]
    InvalidColour { found: String },
    #[error("The range for {name} is empty (found: {min}..={max})")]
    InvalidRange { name: &'static str, min: i64, max: i64 },
}

/// Violated invariants. Reaching any of these is a bug in the caller.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("The scene manager owning this handle is gone")]
    ManagerGone,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Failed to construct scene {scene}")]
    SceneConstruction {
        scene: &'static str,
        #[source]
        source: Box<Error>,
    },
    #[error("Failed to access settings file")]
    Io(#[from] std::io::Error),
    #[error("Failed to deserialize settings")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
