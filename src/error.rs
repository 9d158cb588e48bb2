//! Error types for the MiniChess crate

use thiserror::Error;

/// Main error type for the MiniChess crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move {mv} for {side} in the current position")]
    IllegalMove { mv: String, side: String },

    #[error("game already over")]
    GameOver,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid state key '{key}': {reason}")]
    InvalidStateKey { key: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("interactive input closed before a move was chosen")]
    InputClosed,

    #[error("unsupported policy format version {found} (expected {expected})")]
    UnsupportedPolicyVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_move_display_names_move_and_side() {
        let err = Error::IllegalMove {
            mv: "(0,0)->(3,0)".to_string(),
            side: "White".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "illegal move (0,0)->(3,0) for White in the current position"
        );
    }

    #[test]
    fn io_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(err.to_string().contains("gone"));
    }
}
