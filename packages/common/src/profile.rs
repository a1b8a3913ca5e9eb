use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A profile document as stored in the profiles collection.
///
/// Only the attributes the cascade reads are modelled; everything else in the
/// document is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(rename = "$id")]
    pub id: String,
    /// Owning account.
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "profilePicFileId", default)]
    pub profile_pic_file_id: Option<String>,
    #[serde(rename = "additionalPhotos", default)]
    pub additional_photos: Option<PhotoRefs>,
}

/// The `additionalPhotos` attribute, which older clients wrote as a JSON
/// string instead of a native list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhotoRefs {
    Sequence(Vec<String>),
    EncodedText(String),
    /// Anything else (numbers, objects, lists with non-string items).
    Unrecognized(Value),
}

impl PhotoRefs {
    /// Canonical ordered list of identifiers.
    ///
    /// Text that does not decode into a list of strings yields an empty list.
    /// A native list keeps its string entries and drops everything else.
    pub fn decode(&self) -> Vec<String> {
        match self {
            PhotoRefs::Sequence(ids) => ids.clone(),
            PhotoRefs::EncodedText(text) if text.trim().is_empty() => Vec::new(),
            PhotoRefs::EncodedText(text) => match serde_json::from_str::<Vec<String>>(text) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(error = %e, "Could not decode additionalPhotos, treating as empty");
                    Vec::new()
                }
            },
            PhotoRefs::Unrecognized(Value::Array(items)) => {
                let ids: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect();
                warn!(
                    kept = ids.len(),
                    skipped = items.len() - ids.len(),
                    "Skipping non-string entries in additionalPhotos"
                );
                ids
            }
            PhotoRefs::Unrecognized(value) => {
                warn!(kind = value_kind(value), "Unexpected additionalPhotos shape, treating as empty");
                Vec::new()
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// What the cascade needs to know about a user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub profile_id: String,
    /// Primary image first, then auxiliary images in stored order. Blank
    /// identifiers are dropped.
    pub file_ids: Vec<String>,
}

impl From<&ProfileDocument> for ProfileSnapshot {
    fn from(doc: &ProfileDocument) -> Self {
        let auxiliary = doc
            .additional_photos
            .as_ref()
            .map(PhotoRefs::decode)
            .unwrap_or_default();

        let file_ids = doc
            .profile_pic_file_id
            .iter()
            .cloned()
            .chain(auxiliary)
            .filter(|id| !id.trim().is_empty())
            .collect();

        Self {
            profile_id: doc.id.clone(),
            file_ids,
        }
    }
}
