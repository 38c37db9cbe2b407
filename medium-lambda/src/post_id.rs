/// Derives the Medium post ID from a post URL.
///
/// Medium post slugs end with the post ID after the last dash,
/// e.g. `https://medium.com/serverlessguru/amazon-api-gateway-http-apis-7be95f305318` -> `7be95f305318`.
/// The query string, fragment and trailing slashes are ignored.
/// A segment without a dash is returned whole.
pub fn post_id_from_url(url: &str) -> &str {
    // TODO: check the host is medium.com or a custom Medium domain before calling the API
    let path = match url.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &url[..idx],
        None => url,
    };

    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    segment.rsplit('-').next().unwrap_or_default()
}
