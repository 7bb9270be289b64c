use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when the service gives us nothing usable to render.
const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Classified failure of a remote request.
///
/// Variants are `Clone` so they can live inside cache entries and be
/// rendered on every frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 401/403. Handled out-of-band: the session is torn down and the app
    /// returns to the login boundary instead of rendering this inline.
    #[error("authentication required (status {status})")]
    Auth { status: u16 },

    /// Any other non-success status, with the service's structured message
    /// when one was present in the body.
    #[error("Status {status}: {message}")]
    Api { status: u16, message: String },

    /// Connection-level failure before a status code existed.
    #[error("{0}")]
    Transport(String),

    /// Success status but the body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Classify a non-success response from its status code and raw body.
    ///
    /// The service reports structured errors as `{"detail": "..."}`; when
    /// the body doesn't parse, the HTTP canonical reason stands in.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return ApiError::Auth { status };
        }
        let message = detail_message(body).unwrap_or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or(GENERIC_ERROR_MESSAGE)
                .to_string()
        });
        ApiError::Api { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Stringified so the error stays Clone-able inside the cache.
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_and_forbidden_classify_as_auth() {
        assert_eq!(
            ApiError::from_status(401, r#"{"detail": "Not authenticated"}"#),
            ApiError::Auth { status: 401 }
        );
        assert_eq!(
            ApiError::from_status(403, ""),
            ApiError::Auth { status: 403 }
        );
    }

    #[test]
    fn detail_body_becomes_the_message() {
        let err = ApiError::from_status(404, r#"{"detail": "Notification not found"}"#);
        assert_eq!(
            err,
            ApiError::Api {
                status: 404,
                message: "Notification not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "Status 404: Notification not found");
    }

    #[test]
    fn unparseable_body_falls_back_to_canonical_reason() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(
            err,
            ApiError::Api {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_gets_the_generic_message() {
        let err = ApiError::from_status(599, "");
        assert_eq!(
            err,
            ApiError::Api {
                status: 599,
                message: GENERIC_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn only_auth_variant_reports_auth() {
        assert!(ApiError::Auth { status: 401 }.is_auth());
        assert!(!ApiError::Transport("connection refused".into()).is_auth());
        let api = ApiError::Api {
            status: 404,
            message: "missing".into(),
        };
        assert!(!api.is_auth());
    }
}
