//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: generation error (surface rejected the scene dimensions)
//! - 11: I/O error (PNG or SVG write)
//! - 12: input error (bad `--params` JSON, bad color, color mode, output
//!   extension or any other parameter rejected by validation)
//! - 13: serialization error

use grassfield_core::GrassError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// The scene could not be drawn onto the requested surface.
    Generation(GrassError),
    /// An I/O error (file write).
    Io(String),
    /// A user input error (bad JSON params, bad flag value).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Generation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<GrassError> for CliError {
    fn from(e: GrassError) -> Self {
        match e {
            GrassError::Io(msg) => CliError::Io(msg),
            GrassError::Format(_)
            | GrassError::InvalidParameter(_)
            | GrassError::ParamTypeMismatch { .. } => CliError::Input(e.to_string()),
            GrassError::InvalidDimensions => CliError::Generation(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_exit_code_is_10() {
        let err = CliError::Generation(GrassError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad color".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_grass_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(GrassError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_grass_error_dimensions_route_to_generation() {
        let cli_err = CliError::from(GrassError::InvalidDimensions);
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("dimensions"));
    }

    #[test]
    fn from_grass_error_parameter_problems_route_to_input() {
        let errors = [
            GrassError::Format("#12".into()),
            GrassError::InvalidParameter("nsegments must be at least 1".into()),
            GrassError::ParamTypeMismatch {
                name: "base_color".into(),
                expected: "string".into(),
                got: "number".into(),
            },
        ];
        for e in errors {
            let msg = e.to_string();
            let cli_err = CliError::from(e);
            assert_eq!(cli_err.exit_code(), 12, "{msg}");
            assert_eq!(cli_err.to_string(), msg);
        }
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
