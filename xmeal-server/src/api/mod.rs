//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口 (注册/登录/当前用户)
//! - [`meals`] - 餐品库存管理接口
//! - [`orders`] - 预订和订单接口
//! - [`verify`] - QR 核销接口
//! - [`settings`] - 截止时间设置接口
//! - [`live`] - 集合实时订阅 (SSE)

pub mod auth;
pub mod health;
pub mod live;
pub mod meals;
pub mod orders;
pub mod settings;
pub mod verify;

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(meals::router())
        .merge(orders::router())
        .merge(verify::router())
        .merge(settings::router())
        .merge(live::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
