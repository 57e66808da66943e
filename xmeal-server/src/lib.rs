//! XMeal Server - 食堂预订系统服务端
//!
//! # 架构概述
//!
//! 本模块是 XMeal Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (meals / orders / settings / users)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **订单域** (`orders`): 预订 (原子库存扣减 + QR 令牌) 与核销 (一次性兑换)
//! - **实时分发** (`live`): 集合快照广播，SSE 推送
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! xmeal-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── services/      # 首次启动数据写入
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 工具函数
//! ├── db/            # 数据库层
//! ├── live/          # 实时快照分发
//! └── orders/        # 订单领域服务
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod live;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use live::LiveViewHub;
pub use orders::{BookingService, VerificationService};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

pub fn print_banner() {
    println!(
        r#"
 __  __ __  __            _
 \ \/ /|  \/  | ___  __ _| |
  \  / | |\/| |/ _ \/ _` | |
  /  \ | |  | |  __/ (_| | |
 /_/\_\|_|  |_|\___|\__,_|_|
    "#
    );
}
