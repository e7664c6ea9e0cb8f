use thiserror::Error;

/// Errors that can occur while generating the penguin analysis report.
#[derive(Error, Debug)]
pub enum PenguinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Analysis error: {0}")]
    AnalysisError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Render error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PenguinError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = PenguinError::ParseError("unknown species: 'Emperor'".to_string());
        assert_eq!(err.to_string(), "Parse error: unknown species: 'Emperor'");
    }

    #[test]
    fn test_analysis_error_display() {
        let err = PenguinError::AnalysisError("degenerate kernel".to_string());
        assert_eq!(err.to_string(), "Analysis error: degenerate kernel");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = PenguinError::InsufficientData("empty table".to_string());
        assert_eq!(err.to_string(), "Insufficient data: empty table");
    }

    #[test]
    fn test_render_error_display() {
        let err = PenguinError::Render("backend failure".to_string());
        assert_eq!(err.to_string(), "Render error: backend failure");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: PenguinError = io_err.into();
        assert!(matches!(err, PenguinError::Io(_)));
    }

    #[test]
    fn test_error_is_debug() {
        let err = PenguinError::ParseError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ParseError"));
    }
}
