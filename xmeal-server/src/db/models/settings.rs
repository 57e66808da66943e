//! Settings Model (Singleton)
//!
//! 每个食堂只有一条记录，保存每日预订截止时间

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Default daily booking close time (HH:MM)
pub const DEFAULT_CLOSE_TIME: &str = "10:15";

/// Settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Daily booking close time, "HH:MM"
    pub close_time: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Settings {
    pub fn with_defaults(now: i64) -> Self {
        Self {
            id: None,
            close_time: DEFAULT_CLOSE_TIME.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
}
