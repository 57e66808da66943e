//! QR 核销 API 模块

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/verify", routes())
}

fn routes() -> Router<ServerState> {
    // 核销是管理员面向窗口的操作
    Router::new()
        .route("/", post(handler::verify))
        .layer(middleware::from_fn(require_admin))
}
