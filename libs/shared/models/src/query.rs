use serde::Deserialize;

pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Query string for the list endpoints.
///
/// `limit` is kept as raw text so that a malformed value degrades to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }
}
