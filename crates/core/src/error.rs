use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the scaffold generator
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stub file not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Artisan command `{command}` failed: {message}")]
    Artisan { command: String, message: String },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl ScaffoldError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    pub fn artisan(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artisan {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for scaffold operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
