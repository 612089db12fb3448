//! Failures of requests to the transaction service.

use thiserror::Error;

/// Why a request to the transaction service did not produce a usable result.
///
/// None of these are fatal: the view state decides how to degrade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response, e.g. the service is down or CORS
    /// blocked it.
    #[error("request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status code.
    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(error) => ApiError::Decode(error.to_string()),
            error => ApiError::Network(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn status_error_names_url_and_code() {
        let error = ApiError::Status {
            status: 500,
            url: "http://localhost:3000/transactions".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "http://localhost:3000/transactions responded with status 500"
        );
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let serde_error = serde_json::from_str::<u64>("\"not a number\"").unwrap_err();

        let error = ApiError::from(gloo_net::Error::SerdeError(serde_error));

        assert!(matches!(error, ApiError::Decode(_)), "got {error:?}");
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let error = ApiError::from(gloo_net::Error::GlooError("connection refused".to_string()));

        match error {
            ApiError::Network(message) => assert!(message.contains("connection refused")),
            other => panic!("want a network error, got {other:?}"),
        }
    }
}
