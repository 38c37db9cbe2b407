/// The message returned when no URL can be found in any of the supported event shapes.
pub const MISSING_URL_MSG: &str = "Invalid request. Must contain URL in body or pathParameters.";

/// All the ways a single invocation can fail.
/// None of them are retried. The Lambda boundary maps each kind to its own status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The event does not carry a usable URL or asks for something we cannot do.
    InvalidRequest(String),
    /// The GET to the metadata API failed to connect or broke mid-transfer.
    Network(String),
    /// The upstream body is not the preamble + JSON document we expect.
    Parse(String),
}

impl HandlerError {
    pub(crate) fn missing_url() -> Self {
        Self::InvalidRequest(MISSING_URL_MSG.to_owned())
    }

    /// HTTP status code used by the Lambda boundary for this kind of failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Network(_) | Self::Parse(_) => 502,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(msg) => f.write_str(msg),
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<reqwest::Error> for HandlerError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_message_is_exact() {
        assert_eq!(
            HandlerError::missing_url().to_string(),
            "Invalid request. Must contain URL in body or pathParameters."
        );
    }

    #[test]
    fn status_codes_per_kind() {
        assert_eq!(HandlerError::missing_url().status_code(), 400);
        assert_eq!(HandlerError::Network("refused".into()).status_code(), 502);
        assert_eq!(HandlerError::Parse("eof".into()).status_code(), 502);
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(HandlerError::from(e), HandlerError::Parse(_)));
    }
}
