use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Encode a comment as `{"body": message}`.
pub fn encode(message: &str) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&CommentBody { body: message })?)
}
