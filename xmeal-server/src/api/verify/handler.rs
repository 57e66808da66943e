//! QR Verification Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::VerificationService;
use crate::utils::AppResult;
use shared::client::VerifyRequest;

/// Redeem a QR token (one-shot). Returns the verified order snapshot so the
/// window display can show the meal name and price.
pub async fn verify(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<Order>> {
    let service = VerificationService::new(state.get_db());
    let order = service.verify_token(&payload.qr_code).await?;

    state.publish_store("orders").await;

    Ok(Json(order))
}
