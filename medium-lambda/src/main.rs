use lambda_runtime::{service_fn, Error, LambdaEvent};
use medium_lambda::config::Config;
use medium_lambda::handler::function_handler;
use medium_lambda::medium::MediumApi;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env();

    // one HTTP client per cold start, shared by all invocations
    let api = MediumApi::new(&config)?;
    let api = &api;

    if let Err(e) = lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(api, event).await
    }))
    .await
    {
        debug!("Runtime error: {:?}", e);
        return Err(e);
    }

    Ok(())
}

/// Initializes the tracing from RUST_LOG env var if present or logs INFO for this crate only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(
                    Directive::from_str("medium_lambda=info").expect("Invalid logging filter. It's a bug."),
                )
                .from_env_lossy(),
        )
        // CloudWatch does not render the color codes
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
