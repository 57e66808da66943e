//! 实时订阅 API 模块 (SSE)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/live/{store}", get(handler::stream))
}
