use crate::error::HandlerError;
use crate::event::{OutputFormat, PostRequest};
use crate::markdown::render_post;
use crate::medium::{parse_payload, PostSource};
use crate::post_id::post_id_from_url;
use crate::response::Response;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info};

/// A post fetched from the API and serialized in the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub format: OutputFormat,
    pub body: String,
}

/// Gets the payload of the post the event points at.
/// Any failure is returned as a [HandlerError] for the caller to decide what to do with it.
pub async fn get_post<S: PostSource>(source: &S, event: &Value) -> Result<Post, HandlerError> {
    let request = PostRequest::from_event(event)?;

    let post_id = post_id_from_url(&request.url);
    debug!("Post ID: {post_id}, URL: {}", request.url);

    // the only await point of the invocation
    let api_response = source.get_post(post_id).await?;

    let payload = parse_payload(&api_response)?;
    debug!("Payload: {payload}");

    let body = match request.format {
        OutputFormat::Json => serde_json::to_string(&payload)?,
        OutputFormat::Markdown => render_post(&payload)?,
    };

    Ok(Post {
        format: request.format,
        body,
    })
}

/// The Lambda entry point. It never returns an error to the runtime:
/// failures are converted into a response with a non-200 status code and the message as the body.
pub async fn function_handler<S: PostSource>(source: &S, event: LambdaEvent<Value>) -> Result<Response, Error> {
    let (event, ctx) = event.into_parts();

    debug!("Event: {event}");
    debug!("Request ID: {}", ctx.request_id);

    let response = match get_post(source, &event).await {
        Ok(post) => {
            info!("Returning {} bytes as {:?}", post.body.len(), post.format);
            Response::ok(post.format, post.body)
        }
        Err(e) => {
            error!("{e}");
            Response::from(e)
        }
    };

    Ok(response)
}
