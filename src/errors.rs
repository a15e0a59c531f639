use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::fmt;

/// Failure outcomes of a lead submission.
///
/// Every variant maps to exactly one status code and one fixed plain-text
/// body. Diagnostic detail stays in the server logs.
#[derive(Debug, Clone)]
pub enum ForwardError {
    /// The request used a method other than POST.
    MethodNotAllowed,
    /// The form identifier or the bearer credential is not configured.
    Misconfigured,
    /// HubSpot answered with a non-success status.
    UpstreamRejected {
        /// Status returned by HubSpot.
        status: u16,
        /// Raw response body, logged only.
        body: String,
    },
    /// Anything else: body parse failures, transport errors, serialization.
    Unexpected(String),
}

impl ForwardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ForwardError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ForwardError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            ForwardError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            ForwardError::MethodNotAllowed => "Method Not Allowed",
            ForwardError::Misconfigured => "Server misconfiguration",
            ForwardError::UpstreamRejected { .. } => "HubSpot submission failed",
            ForwardError::Unexpected(_) => "Unexpected error",
        }
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::MethodNotAllowed => write!(f, "Method not allowed"),
            ForwardError::Misconfigured => write!(f, "HubSpot form id or token not configured"),
            ForwardError::UpstreamRejected { status, body } => {
                write!(f, "HubSpot returned {}: {}", status, body)
            }
            ForwardError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for ForwardError {}

impl IntoResponse for ForwardError {
    /// Converts the error into a plain-text HTTP response.
    ///
    /// Upstream rejections and unexpected failures are logged here, never
    /// relayed.
    fn into_response(self) -> Response {
        match &self {
            ForwardError::MethodNotAllowed => {
                tracing::debug!("Rejected lead submission: method not allowed");
            }
            ForwardError::Misconfigured => {
                tracing::error!("Lead submission rejected: server misconfiguration");
            }
            ForwardError::UpstreamRejected { status, body } => {
                tracing::error!("HubSpot error {}: {}", status, body);
            }
            ForwardError::Unexpected(msg) => {
                tracing::error!("Lead submission error: {}", msg);
            }
        }

        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        ForwardError::Unexpected(format!("HubSpot request failed: {}", err))
    }
}

impl From<serde_json::Error> for ForwardError {
    fn from(err: serde_json::Error) -> Self {
        ForwardError::Unexpected(format!("Invalid JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_status_and_body_mapping() {
        let cases = [
            (ForwardError::MethodNotAllowed, 405, "Method Not Allowed"),
            (ForwardError::Misconfigured, 500, "Server misconfiguration"),
            (
                ForwardError::UpstreamRejected {
                    status: 400,
                    body: "{\"message\":\"bad field\"}".to_string(),
                },
                502,
                "HubSpot submission failed",
            ),
            (
                ForwardError::Unexpected("boom".to_string()),
                500,
                "Unexpected error",
            ),
        ];

        for (error, status, body) in cases {
            let response = error.into_response();
            assert_eq!(response.status().as_u16(), status);
            assert_eq!(body_text(response).await, body);
        }
    }

    #[tokio::test]
    async fn test_upstream_body_is_not_relayed() {
        let response = ForwardError::UpstreamRejected {
            status: 400,
            body: "secret upstream diagnostics".to_string(),
        }
        .into_response();

        let text = body_text(response).await;
        assert!(!text.contains("secret upstream diagnostics"));
    }

    #[test]
    fn test_serde_error_is_unexpected() {
        let err: ForwardError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ForwardError::Unexpected(_)));
    }
}
