//! Shared GET-and-classify plumbing for the vendor clients.

use tracing::debug;

use cinescout_core::FetchError;

/// Issue a GET and return the JSON body, classifying every failure.
///
/// Transport failures (no response at all) become `Network`; everything
/// else goes through [`FetchError::from_status`] in its fixed precedence,
/// carrying the vendor's own error text and any Retry-After hint.
pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<serde_json::Value, FetchError> {
    debug!(url = %url, "vendor request");

    let resp = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::from_status(
            status.as_u16(),
            vendor_message(&body),
            retry_after,
        ));
    }

    resp.json()
        .await
        .map_err(|e| FetchError::Unknown(format!("parse vendor JSON: {e}")))
}

/// Pull the human-readable error text out of a vendor error body, when the
/// body is JSON and uses one of the known message fields.
fn vendor_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["status_message", "Error", "message"] {
        if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
            if !msg.is_empty() {
                return Some(msg.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_message_reads_known_fields() {
        assert_eq!(
            vendor_message(r#"{"status_message":"Invalid API key"}"#).as_deref(),
            Some("Invalid API key")
        );
        assert_eq!(
            vendor_message(r#"{"Error":"Movie not found!"}"#).as_deref(),
            Some("Movie not found!")
        );
        assert_eq!(vendor_message("<html>502</html>"), None);
        assert_eq!(vendor_message(r#"{"status_message":""}"#), None);
    }
}
