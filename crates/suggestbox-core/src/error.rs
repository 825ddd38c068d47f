use thiserror::Error;

/// All errors that can occur in suggestbox-core.
#[derive(Debug, Error)]
pub enum SuggestboxError {
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Event channel closed")]
    ChannelClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Exit codes used by the `suggestbox` binary.
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
}

pub type Result<T> = std::result::Result<T, SuggestboxError>;
