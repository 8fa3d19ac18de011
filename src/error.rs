//! Error types for tiresias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TiresiasError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input loading errors
    #[error("Input file not found: {path}")]
    ResourceNotFound { path: String },

    // Pipeline stage errors, each wrapping the originating provider failure
    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    #[error("Visual reasoning failed: {message}")]
    Reasoning { message: String },

    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Playback failed: {message}")]
    Playback { message: String },

    // Missing credentials (caught before any provider call)
    #[error("Missing credential: environment variable {variable} is not set")]
    MissingCredential { variable: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, TiresiasError>;
