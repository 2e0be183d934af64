//! Error types for showcase

use thiserror::Error;

/// Main error type for showcase operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),
    
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Configuration error: {0}")]
    Config(String),
    
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for showcase operations
pub type Result<T> = std::result::Result<T, Error>;
