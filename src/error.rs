use thiserror::Error;

/// Fatal load-phase failures. Every polygon depends on catalog integrity, so
/// none of these are recovered locally; the whole run aborts.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("arc index {index} out of range (catalog has {len} arcs)")]
    ArcIndexOutOfRange { index: usize, len: usize },

    #[error("unparsable county id: {0:?}")]
    BadCountyId(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
