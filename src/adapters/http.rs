use crate::config::HttpSettings;
use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;

/// 單一連線、依序請求的 HTML 下載器
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET `url` and return the decoded body. Non-success statuses surface as
    /// `ScrapeError::Fetch`, connection problems as `ScrapeError::Http`.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::Fetch {
                url: url.to_string(),
                reason: format!("status code {}", status.as_u16()),
            });
        }

        Ok(response.text().await?)
    }
}
