//! LiveViewHub — 集合实时分发
//!
//! 每个集合 (meals / orders / settings) 一条 broadcast 通道。订阅方先拿到
//! 当前完整快照，之后每次该集合发生变更都会收到一份新的完整快照。
//!
//! ```text
//! API handler (mutation)
//!       │ ServerState::publish_store
//!       ▼
//! LiveViewHub
//!   └── channels: store → (version, broadcast::Sender<StoreSnapshot>)
//!         │
//!         ▼
//! SSE handler (subscribe → initial snapshot → push on change)
//! ```
//!
//! 慢订阅者只会 lag（broadcast 语义），不会阻塞写入方。

use dashmap::DashMap;
use shared::message::StoreSnapshot;
use tokio::sync::broadcast;

/// Broadcast channel 容量 — 足以缓冲连接时突发
const BROADCAST_CAPACITY: usize = 256;

/// Stores the hub fans out
pub const LIVE_STORES: [&str; 3] = ["meals", "orders", "settings"];

/// 单个集合的分发通道
struct StoreChannel {
    /// Monotonically increasing per-store version
    version: u64,
    tx: broadcast::Sender<StoreSnapshot>,
}

impl StoreChannel {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { version: 0, tx }
    }
}

/// Live view projection hub
pub struct LiveViewHub {
    channels: DashMap<String, StoreChannel>,
}

impl LiveViewHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Whether `store` is a collection this hub projects
    pub fn is_known_store(store: &str) -> bool {
        LIVE_STORES.contains(&store)
    }

    /// Register a subscriber. Dropping the receiver unsubscribes; nothing is
    /// delivered after that beyond what was already in flight.
    pub fn subscribe(&self, store: &str) -> broadcast::Receiver<StoreSnapshot> {
        self.channels
            .entry(store.to_string())
            .or_insert_with(StoreChannel::new)
            .tx
            .subscribe()
    }

    /// Current version of a store (0 before the first publish)
    pub fn version(&self, store: &str) -> u64 {
        self.channels.get(store).map(|c| c.version).unwrap_or(0)
    }

    /// Publish a fresh full snapshot of `store`, bumping its version.
    ///
    /// Fire-and-forget: a send with no subscribers is not an error.
    pub fn publish(&self, store: &str, records: serde_json::Value) -> StoreSnapshot {
        let mut entry = self
            .channels
            .entry(store.to_string())
            .or_insert_with(StoreChannel::new);
        entry.version += 1;

        let snapshot = StoreSnapshot {
            store: store.to_string(),
            version: entry.version,
            records,
        };
        let _ = entry.tx.send(snapshot.clone());
        snapshot
    }

    /// Number of live subscribers for a store
    pub fn subscriber_count(&self, store: &str) -> usize {
        self.channels
            .get(store)
            .map(|c| c.tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for LiveViewHub {
    fn default() -> Self {
        Self::new()
    }
}
