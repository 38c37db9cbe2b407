use crate::config::Config;
use crate::error::HandlerError;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info};

/// Medium prefixes every JSON response with `])}while(1);</x>` to stop JSON hijacking.
/// Only the length is relied on, the content of the preamble is not checked.
pub const PREAMBLE_LEN: usize = 16;

/// Anything that can return the raw metadata API response for a post ID.
/// The production implementation is [MediumApi]. Tests use in-memory responses.
pub trait PostSource {
    /// Returns the full response body, preamble included.
    fn get_post(&self, post_id: &str) -> impl Future<Output = Result<String, HandlerError>> + Send;
}

/// A client for `https://medium.com/_/api/posts/{id}?format=json`.
/// No auth, no timeout override, no retries.
pub struct MediumApi {
    client: reqwest::Client,
    api_origin: String,
}

impl MediumApi {
    /// Builds the HTTP client once per cold start. It is reused by all invocations.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_origin: config.api_origin.clone(),
        })
    }

    /// E.g. https://medium.com/_/api/posts/7be95f305318?format=json
    pub fn post_url(&self, post_id: &str) -> String {
        [&self.api_origin, "/_/api/posts/", post_id, "?format=json"].concat()
    }
}

impl PostSource for MediumApi {
    async fn get_post(&self, post_id: &str) -> Result<String, HandlerError> {
        let api_url = self.post_url(post_id);
        info!("API URL: {api_url}");

        let resp = self.client.get(&api_url).send().await?;

        // Medium sends its error documents with the same preamble, but without a payload,
        // so the status is not acted upon here
        debug!("API response status: {}", resp.status());

        Ok(resp.text().await?)
    }
}

/// Removes the anti-hijacking preamble and returns the `payload` property of the JSON that follows.
pub fn parse_payload(body: &str) -> Result<Value, HandlerError> {
    if body.len() < PREAMBLE_LEN {
        return Err(HandlerError::Parse(format!(
            "response is {} bytes long, shorter than the {PREAMBLE_LEN}-byte preamble",
            body.len()
        )));
    }

    let json = body.get(PREAMBLE_LEN..).ok_or_else(|| {
        HandlerError::Parse(format!("the preamble does not end on a character boundary at byte {PREAMBLE_LEN}"))
    })?;

    let resp: Value = serde_json::from_str(json)?;

    // an explicit `"payload": null` is a valid payload, only a missing one is an error
    resp.get("payload")
        .cloned()
        .ok_or_else(|| HandlerError::Parse("no payload in the API response".to_owned()))
}
