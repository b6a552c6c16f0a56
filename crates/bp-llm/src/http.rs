//! Shared HTTP response checks.
//!
//! Centralizes status-code handling (429 with `Retry-After` parsing,
//! non-success to [`LlmError::Api`]) so the client stays focused on request
//! construction and response mapping.

use crate::error::LlmError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** to [`LlmError::RateLimited`], reading
///   `Retry-After` (60 s when absent or unparseable).
/// - **Non-success status** to [`LlmError::Api`] with status code and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(LlmError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(LlmError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn retry_after_from_header() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after("20")), 20);
    }

    #[test]
    fn retry_after_defaults() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response_with_retry_after("soon")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limited() {
        let err = check_response(mock_response_with_retry_after("5"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_secs: 5
            }
        ));
    }

    #[tokio::test]
    async fn api_error_keeps_body() {
        let err = check_response(mock_response(401, "invalid api key"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, LlmError::Api { status: 401, ref message } if message == "invalid api key")
        );
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
