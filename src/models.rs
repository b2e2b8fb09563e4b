// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one completed HTTP round trip against the chat endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
