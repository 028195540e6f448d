//! Status-code classification for GitHub responses.

use crate::error::FetchError;
use reqwest::blocking::Response;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Returns the response unchanged on success, otherwise the matching
/// [`FetchError`]. A 429 carries the `Retry-After` delay.
pub fn check_response(resp: Response) -> Result<Response, FetchError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let retry_after = resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let message = resp.text().unwrap_or_default();
    Err(classify_failure(status, retry_after.as_deref(), message))
}

fn classify_failure(status: u16, retry_after: Option<&str>, message: String) -> FetchError {
    if status == 429 {
        FetchError::RateLimited {
            retry_after_secs: parse_retry_after(retry_after),
        }
    } else {
        FetchError::Api { status, message }
    }
}

fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
