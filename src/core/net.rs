// src/core/net.rs
// XML-over-HTTP POST (blocking, one request in flight)

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

/// Sends one request body and returns the response body.
/// The runner only talks to the API through this, so tests can swap it out.
pub trait Transport {
    fn post_xml(&self, body: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// `timeout: None` waits on the server indefinitely.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

impl Transport for HttpTransport {
    fn post_xml(&self, body: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "POST");
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body.to_owned())
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }
}
