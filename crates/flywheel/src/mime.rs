//! The drag-and-drop payload contract.
//!
//! A drag selection crosses the toolkit boundary as a [`DragPayload`]: an
//! ordered identifier list encoded as a JSON string array (self-describing),
//! tagged with the single accepted media type. How the toolkit moves the
//! bytes is its own business; this module only defines what the bytes are.

use crate::error::ModelError;

/// The one media type drop operations accept.
pub const STATE_LIST_MEDIA_TYPE: &str = "application/x-flywheel-state-list";

/// A serialized drag selection: media type tag plus encoded identifier list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    media_type: String,
    body: Vec<u8>,
}

impl DragPayload {
    /// Creates a payload from raw parts. Mainly useful for tests and for
    /// toolkit glue reconstructing a payload received from elsewhere.
    pub fn new(media_type: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            body,
        }
    }

    /// Returns the media type tag.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the encoded identifier list.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Encodes an ordered identifier list into a tagged payload.
pub fn encode_state_list(ids: &[String]) -> DragPayload {
    let body = serde_json::to_vec(ids).expect("string lists always serialize");
    DragPayload {
        media_type: STATE_LIST_MEDIA_TYPE.to_string(),
        body,
    }
}

/// Decodes a payload back into the ordered identifier list.
///
/// # Errors
///
/// Rejects payloads tagged with a foreign media type and bodies that do not
/// decode as a string array.
pub fn decode_state_list(payload: &DragPayload) -> Result<Vec<String>, ModelError> {
    if payload.media_type != STATE_LIST_MEDIA_TYPE {
        return Err(ModelError::ForeignPayload {
            media_type: payload.media_type.clone(),
        });
    }
    serde_json::from_slice(&payload.body).map_err(|err| ModelError::MalformedPayload(err.to_string()))
}
