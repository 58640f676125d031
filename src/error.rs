// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failure kinds of one scrape cycle, one variant per pipeline stage.
///
/// Every variant is contained at the cycle boundary by the scheduler; none of
/// them terminates the long-running process.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response carried no `<string>` envelope. Not a malfunction —
    /// the upstream answers like this when it has nothing to say.
    #[error("no payload envelope in response")]
    NoPayload,

    /// The envelope was present but its content is not valid JSON. Carries a
    /// bounded snippet of the content so logs stay useful without dumping
    /// the whole body.
    #[error("payload is not valid JSON ({source}); content starts with: {snippet:?}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
        snippet: String,
    },

    /// The payload parsed but does not expose the expected section or shape.
    #[error("schema mismatch: {0}")]
    Schema(String),

    #[error("failed to encode records as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
