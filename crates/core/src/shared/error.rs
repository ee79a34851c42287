use thiserror::Error;
use uuid::Uuid;

use super::table_id::TableId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("table {0} was never opened")]
    UnknownTable(TableId),
    #[error("no alert with id {0}")]
    UnknownAlert(Uuid),
    #[error("session is being mutated by another caller")]
    ConcurrentMutation,
    #[error("session lock poisoned by a panicking caller")]
    Poisoned,
    #[error("session already finished")]
    SessionFinished,
    #[error("frame data length {actual} does not match {width}x{height}x{channels}")]
    FrameShape {
        actual: usize,
        width: u32,
        height: u32,
        channels: u8,
    },
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
