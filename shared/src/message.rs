//! Live-view fan-out payloads

use serde::{Deserialize, Serialize};

/// Full-collection snapshot pushed to live-view subscribers.
///
/// Every mutation of a store republishes the complete collection with a
/// per-store version that only ever increases, so clients can discard
/// out-of-order deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Store name: `meals`, `orders` or `settings`
    pub store: String,
    /// Monotonically increasing per-store version
    pub version: u64,
    /// Full collection contents at publish time
    pub records: serde_json::Value,
}
