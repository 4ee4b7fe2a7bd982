//! Wire codec for the persisted note sequence.
//!
//! # Responsibility
//! - Serialize the note sequence to the JSON-array payload stored under
//!   the notes key, and parse it back.
//!
//! # Invariants
//! - `title`, `content` and `lastEdit` round-trip exactly, in order.
//! - `visible` is never written and is always `true` after decoding.
//! - Payloads without `id` fields (the pre-id format) still decode; each
//!   such note receives a freshly generated id.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Error raised while encoding or decoding the persisted payload.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed note payload: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Encodes the full note sequence as a JSON array.
pub fn encode_notes(notes: &[Note]) -> CodecResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Decodes a persisted payload back into the note sequence.
///
/// Every decoded note comes back visible; the filter flag is a projection
/// recomputed by the caller, not persisted state.
pub fn decode_notes(payload: &str) -> CodecResult<Vec<Note>> {
    Ok(serde_json::from_str(payload)?)
}
