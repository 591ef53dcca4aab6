use tracing::debug;

use crate::{
    Error, Result,
    config::Endpoints,
    sync::{
        Backend, Submission,
        listing::{OpenEntry, parse_listing_bytes},
    },
};

/// [`Backend`] backed by the HTTP webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl WebhookClient {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = endpoints.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoints,
        })
    }
}

impl Backend for WebhookClient {
    async fn list_open(&self) -> Result<Vec<OpenEntry>> {
        debug!("GET {}", self.endpoints.list_open);

        let response = self.http.get(&self.endpoints.list_open).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        parse_listing_bytes(&body)
    }

    async fn submit(&self, submission: &Submission) -> Result<()> {
        debug!(
            "POST {} ({})",
            self.endpoints.submit, submission.operation
        );

        let response = self
            .http
            .post(&self.endpoints.submit)
            .json(&submission.body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        Ok(())
    }
}
