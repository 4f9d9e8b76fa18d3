use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomeCmdError {
    #[error("Invalid command spec for '{verb}': {reason}")]
    InvalidCommandSpec { verb: String, reason: String },

    #[error("Invalid parameter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unknown entity: {0}")]
    UnknownEntity(crate::core::types::EntityId),

    #[error("Command '{verb}' is not supported by {entity}")]
    UnsupportedCommand { entity: String, verb: String },

    #[error("Command '{verb}' requires a parameter")]
    MissingParameter { verb: String },

    #[error("Invalid value '{value}' for command '{verb}'")]
    InvalidParameter { verb: String, value: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Malformed argument: {0}")]
    MalformedArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HomeCmdError>;
