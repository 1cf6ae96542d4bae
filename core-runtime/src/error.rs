use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingSettings(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
