//! An AWS Lambda function that takes the URL of a Medium post, fetches the post metadata
//! from `https://medium.com/_/api/posts/{id}?format=json` and returns its `payload`.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod markdown;
pub mod medium;
pub mod post_id;
pub mod response;
