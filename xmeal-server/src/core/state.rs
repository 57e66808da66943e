use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use shared::message::StoreSnapshot;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{MealRepository, OrderRepository, SettingsRepository};
use crate::live::LiveViewHub;
use crate::services::bootstrap;
use crate::utils::{AppError, AppResult};

/// Orders included in a live snapshot, newest first. A canteen day is a few
/// hundred orders; this bound keeps snapshots from growing without limit.
const ORDERS_SNAPSHOT_LIMIT: i64 = 1000;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | live | Arc<LiveViewHub> | 实时快照分发 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 实时快照分发
    pub live: Arc<LiveViewHub>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/xmeal.db)
    /// 3. JWT 服务、实时分发
    /// 4. 默认数据写入 (首次启动)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("xmeal.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::assemble(config.clone(), db_service.db).await
    }

    /// 初始化内存态服务器 (测试用)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::in_memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::assemble(config.clone(), db_service.db).await
    }

    async fn assemble(config: Config, db: Surreal<Db>) -> Self {
        let state = Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            live: Arc::new(LiveViewHub::new()),
            config,
            db,
        };

        if state.config.seed_defaults {
            // Seeding failure is not fatal; the admin API can repair the data
            if let Err(e) = bootstrap::seed_defaults(&state.db, &state.config).await {
                tracing::error!(error = %e, "Failed to seed default data");
            }
        }

        state
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 变更后重新发布集合快照
    ///
    /// Fire-and-forget: 快照采集失败只记日志，不影响触发它的请求。
    pub async fn publish_store(&self, store: &str) {
        match self.collect_store(store).await {
            Ok(records) => {
                let snapshot = self.live.publish(store, records);
                tracing::debug!(
                    store = %snapshot.store,
                    version = snapshot.version,
                    "Published live snapshot"
                );
            }
            Err(e) => {
                tracing::warn!(store = %store, error = %e, "Failed to collect live snapshot");
            }
        }
    }

    /// 订阅集合变更：返回当前完整快照和后续变更的接收端
    pub async fn subscribe_store(
        &self,
        store: &str,
    ) -> AppResult<(StoreSnapshot, broadcast::Receiver<StoreSnapshot>)> {
        if !LiveViewHub::is_known_store(store) {
            return Err(AppError::not_found(format!("Unknown store: {store}")));
        }

        // Subscribe before reading so a concurrent mutation is not lost
        let rx = self.live.subscribe(store);
        let records = self.collect_store(store).await?;
        let snapshot = StoreSnapshot {
            store: store.to_string(),
            version: self.live.version(store),
            records,
        };
        Ok((snapshot, rx))
    }

    async fn collect_store(&self, store: &str) -> AppResult<serde_json::Value> {
        let value = match store {
            "meals" => {
                let meals = MealRepository::new(self.db.clone()).find_all().await?;
                serde_json::to_value(meals)
            }
            "orders" => {
                let orders = OrderRepository::new(self.db.clone())
                    .find_all(ORDERS_SNAPSHOT_LIMIT, 0)
                    .await?;
                serde_json::to_value(orders)
            }
            "settings" => {
                let settings = SettingsRepository::new(self.db.clone()).get_or_create().await?;
                serde_json::to_value(vec![settings])
            }
            other => return Err(AppError::not_found(format!("Unknown store: {other}"))),
        };
        value.map_err(|e| AppError::internal(format!("Snapshot serialization failed: {e}")))
    }
}
