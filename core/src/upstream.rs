//! Reading outbound HTTP replies
//!
//! Every adapter that calls another service reads the reply body through
//! [`read_body`], so an oversized or endless body fails the call instead of
//! being buffered whole.

use thiserror::Error;

/// Largest reply body any adapter accepts from a provider or the back service
pub const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Read the whole body, failing as soon as it grows past `limit` bytes
pub async fn read_body(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, BodyError> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(BodyError::TooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};

    use crate::test_utils::spawn_server;

    async fn body_of(len: usize) -> reqwest::Response {
        let app = Router::new().route("/", get(move || async move { "x".repeat(len) }));
        let url = spawn_server(app).await;
        reqwest::get(url).await.unwrap()
    }

    #[tokio::test]
    async fn reads_body_within_limit() {
        let body = read_body(body_of(16).await, 16).await.unwrap();
        assert_eq!(body, vec![b'x'; 16]);
    }

    #[tokio::test]
    async fn rejects_body_over_limit() {
        let err = read_body(body_of(17).await, 16).await.unwrap_err();
        assert!(matches!(err, BodyError::TooLarge { limit: 16 }));
        assert_eq!(err.to_string(), "response body exceeds 16 bytes");
    }

    #[tokio::test]
    async fn empty_body_is_fine() {
        let body = read_body(body_of(0).await, MAX_BODY_BYTES).await.unwrap();
        assert!(body.is_empty());
    }
}
