//! reqwestによるGemini API通信

use lacquer_studio_common::{api_error, Error, Transport};

/// reqwestクライアントで JSON を POST する
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> lacquer_studio_common::Result<String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "gemini api returned error status");
            return Err(api_error(status.as_u16(), &text));
        }

        Ok(text)
    }
}
