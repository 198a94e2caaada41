//! Crate-level error type for remote entity operations.

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::ipc::IpcError;

/// Errors returned by client and handle methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport, framing, or server-reported failure.
    #[error(transparent)]
    Ipc(#[from] IpcError),

    /// Degenerate geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The server answered, but the result did not have the expected shape.
    #[error("Unexpected result from {method}: {source}")]
    UnexpectedResult {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied argument cannot be sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err: ApiError = IpcError::NotConnected.into();
        assert_eq!(err.to_string(), "Socket is not connected");

        let err: ApiError = GeometryError::SingularMatrix.into();
        assert_eq!(err.to_string(), "Transform matrix is singular");
    }

    #[test]
    fn test_unexpected_result_names_method() {
        let source = serde_json::from_value::<String>(serde_json::json!(3)).unwrap_err();
        let err = ApiError::UnexpectedResult {
            method: "GetProjectName".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Unexpected result from GetProjectName"));
    }
}
