//! Error types for the exoplanet analysis engine

use std::fmt;

/// Errors that can occur while configuring the analysis engine
///
/// The analysis operations themselves are total: malformed scientific input
/// degrades to documented defaults instead of producing an error. This type
/// is returned by configuration validation and the constructors that run it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Structurally invalid input (e.g. a record that is not a JSON object,
    /// or a spectrum that is not a sequence)
    InvalidInput(String),

    /// Configuration parameter out of its valid range
    InvalidConfig(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let e = AnalysisError::InvalidConfig("window must be odd".to_string());
        assert_eq!(e.to_string(), "Invalid configuration: window must be odd");

        let e = AnalysisError::InvalidInput("not an object".to_string());
        assert!(e.to_string().starts_with("Invalid input"));
    }
}
