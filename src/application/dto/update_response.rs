use chrono::NaiveDate;
use serde::Serialize;

/// Result of `update`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateResponse {
    pub channel_count: usize,
    pub newest_release_date: Option<NaiveDate>,
}
