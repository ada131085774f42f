//! Errors raised while talking to the headless host.
//!
//! [`RemoteError`] covers the three ways a request can fail: the host
//! answered with a non-success status, the request never completed, or the
//! answer could not be understood.

use thiserror::Error;

use crate::error::{ControlError, Stage};

#[derive(Debug, Error)]
pub enum RemoteError {
    /// The host answered with a non-2xx status; `message` is its diagnostic body.
    #[error("host returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// DNS, connection refused, socket timeout and similar transport failures.
    #[error("could not reach host: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx answer whose body is not a job payload.
    #[error("malformed host response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Tag this failure with the invocation step it interrupted.
    pub fn during(self, stage: Stage) -> ControlError {
        ControlError::Remote {
            stage,
            source: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        let err = RemoteError::Status {
            status: 404,
            message: "no such template".into(),
        };
        assert_eq!(err.to_string(), "host returned status 404: no such template");
    }

    #[test]
    fn invalid_response_display() {
        let err = RemoteError::InvalidResponse("missing field `id`".into());
        assert_eq!(
            err.to_string(),
            "malformed host response: missing field `id`"
        );
    }

    #[test]
    fn during_keeps_the_source() {
        let err = RemoteError::InvalidResponse("x".into()).during(Stage::Wait);
        match err {
            ControlError::Remote { stage, source } => {
                assert_eq!(stage, Stage::Wait);
                assert!(matches!(source, RemoteError::InvalidResponse(_)));
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }
}
