use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single user as returned on the wire.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

/// One page of search results.
///
/// Envelope keys stay snake_case (`users`, `next_page`) while record keys are
/// PascalCase; both follow the established wire format that existing clients
/// decode.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub users: Vec<UserRecord>,
    /// `true` when at least one more record exists after this page.
    pub next_page: bool,
}

/// Body of every non-200 response.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
