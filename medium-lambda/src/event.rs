use crate::error::HandlerError;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

/// What the caller wants back: the raw payload as JSON or the post body rendered as Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(HandlerError::InvalidRequest(format!(
                "Invalid request. Unsupported format: {s}."
            ))),
        }
    }
}

/// The part of the inbound event the handler cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// URL of the post page, e.g. https://medium.com/@someone/some-title-7be95f305318
    pub url: String,
    pub format: OutputFormat,
}

impl PostRequest {
    /// Extracts the post URL from one of the supported event shapes, in this order:
    /// 1. `body` as a JSON-encoded string or an object with `url`, e.g. API Gateway POST
    /// 2. `pathParameters.url`, e.g. API Gateway GET /medium/{url}
    /// 3. top-level `url`, e.g. a direct invocation
    ///
    /// A shape that doesn't fit falls through to the next one.
    /// `format` is read next to `url` or from `queryStringParameters`.
    pub fn from_event(event: &Value) -> Result<Self, HandlerError> {
        let (url, format) = match body_fields(event) {
            Some(v) => {
                debug!("URL from body");
                v
            }
            None => match event.get("pathParameters").and_then(Value::as_object).and_then(url_fields) {
                Some(v) => {
                    debug!("URL from pathParameters");
                    v
                }
                None => match event.as_object().and_then(url_fields) {
                    Some(v) => {
                        debug!("URL from the event root");
                        v
                    }
                    None => return Err(HandlerError::missing_url()),
                },
            },
        };

        // a format next to the URL wins over the query string
        let format = match format.or_else(|| query_format(event)) {
            Some(v) => OutputFormat::from_str(&v)?,
            None => OutputFormat::default(),
        };

        Ok(Self { url, format })
    }
}

/// API Gateway passes the body as a string, but test consoles and direct invocations
/// may send it as an object.
fn body_fields(event: &Value) -> Option<(String, Option<String>)> {
    match event.get("body")? {
        Value::String(body) => match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(body)) => url_fields(&body),
            Ok(_) => None,
            Err(e) => {
                debug!("Body is not JSON: {e}");
                None
            }
        },
        Value::Object(body) => url_fields(body),
        _ => None,
    }
}

/// Returns `url` and optional `format` if `url` is present as a string.
fn url_fields(fields: &Map<String, Value>) -> Option<(String, Option<String>)> {
    let url = fields.get("url")?.as_str()?.to_owned();
    let format = fields.get("format").and_then(Value::as_str).map(str::to_owned);
    Some((url, format))
}

fn query_format(event: &Value) -> Option<String> {
    event
        .get("queryStringParameters")?
        .get("format")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://medium.com/serverlessguru/amazon-api-gateway-http-apis-7be95f305318";

    #[test]
    fn url_from_string_body() {
        let event = json!({ "body": json!({ "url": URL }).to_string() });
        let req = PostRequest::from_event(&event).unwrap();
        assert_eq!(req.url, URL);
        assert_eq!(req.format, OutputFormat::Json);
    }

    #[test]
    fn url_from_object_body() {
        let event = json!({ "body": { "url": URL } });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, URL);
    }

    #[test]
    fn url_from_path_parameters() {
        let event = json!({ "body": null, "pathParameters": { "url": URL } });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, URL);
    }

    #[test]
    fn url_from_event_root() {
        let event = json!({ "url": URL });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, URL);
    }

    #[test]
    fn body_wins_over_path_parameters() {
        let event = json!({
            "body": json!({ "url": "https://medium.com/a-1" }).to_string(),
            "pathParameters": { "url": "https://medium.com/b-2" },
        });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, "https://medium.com/a-1");
    }

    #[test]
    fn body_mentioning_url_without_the_key_falls_through() {
        // the text contains "url" but there is no url property
        let event = json!({
            "body": "{\"note\":\"see the url below\"}",
            "pathParameters": { "url": URL },
        });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, URL);
    }

    #[test]
    fn unparseable_body_falls_through_to_root() {
        let event = json!({ "body": "url=not-json", "url": URL });
        assert_eq!(PostRequest::from_event(&event).unwrap().url, URL);
    }

    #[test]
    fn non_string_url_is_ignored() {
        let event = json!({ "url": 42 });
        assert_eq!(PostRequest::from_event(&event).unwrap_err(), HandlerError::missing_url());
    }

    #[test]
    fn unsupported_shapes_are_rejected() {
        for event in [json!(null), json!([{ "url": URL }]), json!("url"), json!({ "pathParameters": null })] {
            let err = PostRequest::from_event(&event).unwrap_err();
            assert_eq!(err.to_string(), "Invalid request. Must contain URL in body or pathParameters.");
        }
    }

    #[test]
    fn format_next_to_url() {
        let event = json!({ "url": URL, "format": "markdown" });
        assert_eq!(PostRequest::from_event(&event).unwrap().format, OutputFormat::Markdown);
    }

    #[test]
    fn format_from_query_string() {
        let event = json!({
            "pathParameters": { "url": URL },
            "queryStringParameters": { "format": "markdown" },
        });
        assert_eq!(PostRequest::from_event(&event).unwrap().format, OutputFormat::Markdown);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let event = json!({ "url": URL, "format": "pdf" });
        assert_eq!(
            PostRequest::from_event(&event).unwrap_err(),
            HandlerError::InvalidRequest("Invalid request. Unsupported format: pdf.".to_owned())
        );
    }
}
