//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::orders::{BookingService, BookingSummary};
use crate::utils::{AppError, AppResult};
use shared::client::{BookMealsRequest, PayAllResponse};

const RESOURCE: &str = "orders";

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List all orders (admin, paginated)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all(query.limit, query.offset).await?;
    Ok(Json(orders))
}

/// List the current user's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_by_user(&user.id).await?;
    Ok(Json(orders))
}

/// Get order by id (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::forbidden("You can only view your own orders"));
    }

    Ok(Json(order))
}

/// Book the selected meals for the authenticated user.
///
/// One order per listed meal; per-meal failures land in the summary without
/// rolling back the rest.
pub async fn book(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BookMealsRequest>,
) -> AppResult<Json<BookingSummary>> {
    let booking = BookingService::new(state.get_db(), state.config.enforce_close_time);
    let summary = booking.place_many(&payload.meal_ids, &user.id).await?;

    state.publish_store("meals").await;
    state.publish_store(RESOURCE).await;

    Ok(Json(summary))
}

/// Pay a single pending order (simulated payment)
pub async fn pay(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::forbidden("You can only pay your own orders"));
    }
    if order.status == OrderStatus::Paid {
        return Err(AppError::conflict("Order is already paid"));
    }

    let order = repo.update_status(&id, OrderStatus::Paid).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(order))
}

/// Pay all of the current user's pending orders at once
pub async fn pay_all(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PayAllResponse>> {
    let repo = OrderRepository::new(state.get_db());
    let updated = repo.pay_all_pending(&user.id).await?;

    if !updated.is_empty() {
        state.publish_store(RESOURCE).await;
    }

    Ok(Json(PayAllResponse {
        updated: updated.len(),
    }))
}

/// Status update request (admin toggle)
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Set an order's lifecycle status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.update_status(&id, payload.status).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(order))
}
