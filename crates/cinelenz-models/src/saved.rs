use serde::{Deserialize, Serialize};

/// One entry in the on-device watchlist or compare list. Stored as a flat
/// JSON array, latest write wins, no schema versioning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedItem {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}
