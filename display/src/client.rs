use crate::api::{STATUS_ERROR, StateResponse};
use crate::config::DisplayConfig;
use crate::error::{DisplayError, Result};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error};

/// HTTP access to the display backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct StateClient {
    client: Client,
    base_url: String,
}

impl StateClient {
    pub fn new(config: &DisplayConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(DisplayError::Http)?;

        #[cfg(target_arch = "wasm32")]
        let client = Client::builder().build().map_err(DisplayError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    /// GET `endpoint` with `params` as the query string and decode the JSON body.
    pub async fn try_fetch_data(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut request = self.client.get(self.url(endpoint));
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DisplayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Self::try_fetch_data`], but failures come back as
    /// `{"status": "error", "message": ...}` instead of an `Err`.
    pub async fn fetch_data(&self, endpoint: &str, params: &[(&str, &str)]) -> Value {
        match self.try_fetch_data(endpoint, params).await {
            Ok(value) => value,
            Err(e) => {
                error!("Data request to {} failed: {}", endpoint, e);
                error_value(&e.to_string())
            }
        }
    }

    pub async fn all_lines(&self) -> Value {
        self.fetch_data("/api/get_all_lines", &[]).await
    }

    pub async fn routes_for_line(&self, line_name: &str) -> Value {
        self.fetch_data("/api/get_routes_for_line", &[("line_name", line_name)])
            .await
    }

    pub async fn station_info(&self, line_name: &str, route_name: &str) -> Value {
        self.fetch_data(
            "/api/get_station_info",
            &[("line_name", line_name), ("route_name", route_name)],
        )
        .await
    }

    /// POST to a state endpoint, with an optional JSON body.
    ///
    /// The HTTP status is not inspected: the backend reports failures through
    /// the `status` field, so any JSON body is accepted whatever its shape.
    pub async fn post_state(&self, endpoint: &str, body: Option<&Value>) -> Result<StateResponse> {
        let mut request = self.client.post(self.url(endpoint));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!("POST {} answered {}", endpoint, response.status());

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(StateResponse::from_value(&body))
    }
}

/// The normalized failure shape returned by [`StateClient::fetch_data`].
pub fn error_value(message: &str) -> Value {
    let message = if message.is_empty() {
        "Unknown error"
    } else {
        message
    };
    json!({ "status": STATUS_ERROR, "message": message })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> StateClient {
        StateClient::new(&DisplayConfig::for_origin(base_url)).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let c = client("http://display.local:8089/");
        assert_eq!(c.base_url(), "http://display.local:8089");
        assert_eq!(c.url("/api/state/next"), "http://display.local:8089/api/state/next");
        assert_eq!(c.url("api/get_all_lines"), "http://display.local:8089/api/get_all_lines");
        assert_eq!(c.url("https://other.host/data"), "https://other.host/data");
    }

    #[test]
    fn test_error_value_never_empty() {
        assert_eq!(error_value("boom")["message"], "boom");
        assert_eq!(error_value("")["message"], "Unknown error");
        assert_eq!(error_value("boom")["status"], "error");
    }
}
