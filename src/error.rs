use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Backend returned status {0}")]
    StatusError(reqwest::StatusCode),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<&str> for ChatError {
    fn from(error: &str) -> Self {
        ChatError::ConfigError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
