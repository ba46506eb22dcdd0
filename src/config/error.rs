use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DataDir,
    InvalidAddress(String),
    InvalidFileName(String),
    Stride,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
            ConfigError::DataDir => write!(f, "data_dir cannot be empty"),
            ConfigError::InvalidAddress(addr) => {
                write!(f, "address {:?} is not a valid host:port pair", addr)
            }
            ConfigError::InvalidFileName(name) => {
                write!(f, "{:?} should be a bare file name without directories", name)
            }
            ConfigError::Stride => write!(f, "sigma0_preview.stride should be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}
