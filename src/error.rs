use thiserror::Error;

/// PAC engine error types
#[derive(Error, Debug)]
pub enum PacError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid network address: {0}")]
    InvalidNetwork(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_network_is_matchable() {
        let err = PacError::InvalidNetwork("300.0.0.0/8".to_string());
        assert!(matches!(err, PacError::InvalidNetwork(_)));
    }

    #[test]
    fn test_display_includes_message() {
        let err = PacError::InvalidNetwork("10.0.0.0/33".to_string());
        let display = format!("{}", err);
        assert!(display.contains("10.0.0.0/33"), "got: {}", display);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PacError = io.into();
        assert!(matches!(err, PacError::IoError(_)));
    }
}
