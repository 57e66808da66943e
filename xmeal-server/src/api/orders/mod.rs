//! Order API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", post(handler::book))
        .route("/mine", get(handler::list_mine))
        .route("/pay-all", post(handler::pay_all))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/pay", post(handler::pay));

    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
