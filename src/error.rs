use crate::client::ServiceError;
use crate::validate::ValidationError;
use std::path::PathBuf;

/// Everything that can stop an analysis, classified for the user.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// Local validation rejected the image.
    #[error("{0}")]
    BadParameter(#[from] ValidationError),

    /// The service answered with an error status.
    #[error("Ollama returned HTTP {status}: {message}")]
    ServiceResponse {
        model: String,
        status: u16,
        message: String,
    },

    /// The service could not be reached.
    #[error("Cannot connect to Ollama at {endpoint}: {message}")]
    ServiceRequest { endpoint: String, message: String },

    /// Reading the image failed after it was validated.
    #[error("Failed to read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl AnalyzeError {
    /// Attach the model name to a service error.
    pub fn from_service(err: ServiceError, model: &str) -> Self {
        match err {
            ServiceError::Request { endpoint, message } => {
                AnalyzeError::ServiceRequest { endpoint, message }
            }
            ServiceError::Response { status, message } => AnalyzeError::ServiceResponse {
                model: model.to_string(),
                status,
                message,
            },
            ServiceError::InvalidResponse(msg) => {
                AnalyzeError::Unexpected(format!("invalid response from Ollama: {}", msg))
            }
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// The single line printed to standard error.
    pub fn user_message(&self, verbose: bool) -> String {
        match self {
            AnalyzeError::BadParameter(e) => format!("Error: {}", e),
            AnalyzeError::ServiceResponse { model, status: 404, .. } => format!(
                "Error: model '{}' not found. Pull it first with `ollama pull {}` and try again.",
                model, model
            ),
            AnalyzeError::ServiceResponse { message, .. } => format!("Error: {}", message),
            AnalyzeError::ServiceRequest { endpoint, .. } => format!(
                "Error: could not connect to Ollama at {}. Check your network connection and make sure the Ollama service is running.",
                endpoint
            ),
            AnalyzeError::Io { path, source } => {
                format!("Error: failed to read image {}: {}", path.display(), source)
            }
            AnalyzeError::Unexpected(msg) if verbose => {
                format!("Error: an unexpected error occurred: {}", msg)
            }
            AnalyzeError::Unexpected(msg) => format!(
                "Error: an unexpected error occurred: {} (run with --verbose for details)",
                msg
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, message: &str) -> AnalyzeError {
        AnalyzeError::from_service(
            ServiceError::Response {
                status,
                message: message.to_string(),
            },
            "llava-phi3",
        )
    }

    #[test]
    fn every_failure_exits_one() {
        let errors = [
            AnalyzeError::BadParameter(ValidationError::NotFound("x.png".into())),
            response(404, "gone"),
            AnalyzeError::Unexpected("boom".into()),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn bad_parameter_echoes_validation_message() {
        let err = AnalyzeError::from(ValidationError::NotFound("/tmp/missing.png".into()));
        let msg = err.user_message(false);
        assert!(msg.contains("/tmp/missing.png"));
        assert!(msg.starts_with("Error: "));
    }

    #[test]
    fn not_found_suggests_pull() {
        let msg = response(404, "model 'llava-phi3' not found").user_message(false);
        assert!(msg.contains("not found"));
        assert!(msg.contains("ollama pull llava-phi3"));
    }

    #[test]
    fn other_status_echoes_service_text() {
        let msg = response(500, "CUDA out of memory").user_message(false);
        assert_eq!(msg, "Error: CUDA out of memory");
    }

    #[test]
    fn request_error_mentions_connectivity() {
        let err = AnalyzeError::from_service(
            ServiceError::Request {
                endpoint: "http://localhost:11434".into(),
                message: "connection refused".into(),
            },
            "llava-phi3",
        );
        let msg = err.user_message(false);
        assert!(msg.contains("network"));
        assert!(msg.contains("running"));
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn io_error_echoes_source() {
        let err = AnalyzeError::Io {
            path: "cat.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(err.user_message(false).contains("permission denied"));
    }

    #[test]
    fn invalid_response_is_unexpected() {
        let err = AnalyzeError::from_service(
            ServiceError::InvalidResponse("missing message.content".into()),
            "llava-phi3",
        );
        assert!(matches!(err, AnalyzeError::Unexpected(_)));
    }

    #[test]
    fn verbose_hint_only_without_verbose() {
        let err = AnalyzeError::Unexpected("boom".into());
        assert!(err.user_message(false).contains("--verbose"));
        assert!(!err.user_message(true).contains("--verbose"));
    }
}
