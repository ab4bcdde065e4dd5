//! HTTP API request and response bodies.
//!
//! Successful calculations answer with [`PercentileSummary`](outlier_math::PercentileSummary)
//! directly: `{"count": 5, "percentile": 95.0, "result": 4.8}`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Body of `POST /calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Observations to compute over. Required.
    pub values: Vec<f64>,

    /// Percentile to compute; the server default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
}

/// Error body returned with every 4xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Present when the failure belongs to the core taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ErrorResponse {
    /// Error outside the core taxonomy (bad request shape, unknown route).
    pub fn message(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            kind: None,
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        ErrorResponse {
            error: err.to_string(),
            kind: Some(err.kind()),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        HealthResponse {
            status: "healthy".to_string(),
            service: "outlier".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_percentile_is_optional() {
        let req: CalculateRequest = serde_json::from_str(r#"{"values":[1,2,3]}"#).unwrap();
        assert_eq!(req.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(req.percentile, None);
    }

    #[test]
    fn request_values_are_required() {
        let err = serde_json::from_str::<CalculateRequest>(r#"{"percentile":50}"#).unwrap_err();
        assert!(err.to_string().contains("values"));
    }

    #[test]
    fn error_response_from_core_error() {
        let body = ErrorResponse::from(&Error::EmptyInput);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "cannot calculate percentile of empty dataset",
                "kind": "empty_input"
            })
        );
    }

    #[test]
    fn plain_error_response_omits_kind() {
        let json = serde_json::to_value(ErrorResponse::message("not found")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "not found"}));
    }

    #[test]
    fn health_response_shape() {
        let json = serde_json::to_value(HealthResponse::healthy("1.2.3")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "healthy", "service": "outlier", "version": "1.2.3"})
        );
    }
}
