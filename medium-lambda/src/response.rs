use crate::error::HandlerError;
use crate::event::OutputFormat;
use serde::Serialize;
use std::collections::BTreeMap;

/// An API Gateway proxy integration response.
/// Success and failure differ by `status_code`, the body is the payload or the error message.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl Response {
    /// A 200 response with the content type matching the format of the body.
    pub fn ok(format: OutputFormat, body: String) -> Self {
        let content_type = match format {
            OutputFormat::Json => "application/json",
            OutputFormat::Markdown => "text/markdown; charset=utf-8",
        };

        Self::new(200, content_type, body)
    }

    fn new(status_code: u16, content_type: &str, body: String) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([("content-type".to_owned(), content_type.to_owned())]),
            body,
            is_base64_encoded: false,
        }
    }
}

impl From<HandlerError> for Response {
    fn from(e: HandlerError) -> Self {
        Self::new(e.status_code(), "text/plain; charset=utf-8", e.to_string())
    }
}
