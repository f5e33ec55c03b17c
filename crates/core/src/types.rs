use serde::{Deserialize, Serialize};

/// History entry identifiers are opaque UUIDs minted at creation time.
pub type EntryId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Sort direction over the history timestamp, newest-first by default.
///
/// Shared by the repository layer (SQL ordering) and the gallery state
/// machine (fetch parameters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parser: anything other than `"asc"` sorts descending, which
    /// mirrors how the listing endpoint has always treated the parameter.
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}
