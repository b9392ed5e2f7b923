// Slack Web API HTTP client.
// Handles bearer authentication, rate limiting, and the `{ok, error}` envelope.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::error::{LauncherError, Result};

use super::types::Status;

pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Slack Web API client. The token is supplied per call so one client
/// serves every registered workspace.
pub struct SlackClient {
    client: Client,
    api_base: String,
}

impl SlackClient {
    /// Create a client talking to `api_base` with the given request timeout.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("slack-launcher"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(LauncherError::Api)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Call a Web API method and decode the body once `ok` is confirmed.
    pub async fn call<T, P>(&self, method: &str, token: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.api_base, method);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(LauncherError::Api)?;

        let body = check_response(response).await?.bytes().await?;
        let status: Status = serde_json::from_slice(&body)?;
        if !status.ok {
            return Err(slack_error(status.error.unwrap_or_default()));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Download a file without Slack credentials (avatar URLs are public).
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = check_response(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::UNAUTHORIZED => Err(LauncherError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0);
            Err(LauncherError::RateLimited {
                retry_at: retry_at(retry_after),
            })
        }
        status => Err(LauncherError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

/// Map a Slack error code from an `ok: false` envelope.
fn slack_error(code: String) -> LauncherError {
    match code.as_str() {
        "invalid_auth" | "not_authed" | "token_revoked" | "account_inactive" => {
            LauncherError::Unauthorized
        }
        "ratelimited" => LauncherError::RateLimited {
            retry_at: retry_at(0),
        },
        "" => LauncherError::Slack("unknown error".to_string()),
        _ => LauncherError::Slack(code),
    }
}

fn retry_at(seconds: i64) -> String {
    chrono::TimeDelta::try_seconds(seconds)
        .and_then(|delta| chrono::Local::now().checked_add_signed(delta))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slack_error_mapping() {
        assert!(matches!(
            slack_error("invalid_auth".to_string()),
            LauncherError::Unauthorized
        ));
        assert!(matches!(
            slack_error("ratelimited".to_string()),
            LauncherError::RateLimited { .. }
        ));
        match slack_error("channel_not_found".to_string()) {
            LauncherError::Slack(code) => assert_eq!(code, "channel_not_found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_retry_at_handles_out_of_range_delays() {
        assert_eq!(retry_at(10_000_000_000_000), "unknown");
        assert_eq!(retry_at(i64::MAX), "unknown");
        assert_eq!(retry_at(30).len(), "12:00:30".len());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = SlackClient::new("https://slack.com/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_base, SLACK_API_BASE);
    }
}
