use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaginatorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid pagination state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PaginatorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
