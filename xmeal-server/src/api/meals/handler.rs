//! Meal API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Meal, MealCreate, MealRestock, MealSetAvailable};
use crate::db::repository::MealRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_positive_quantity, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "meals";

/// List all meals
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Meal>>> {
    let repo = MealRepository::new(state.get_db());
    let meals = repo.find_all().await?;
    Ok(Json(meals))
}

/// Get meal by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Meal>> {
    let repo = MealRepository::new(state.get_db());
    let meal = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Meal {} not found", id)))?;
    Ok(Json(meal))
}

/// Create a new meal
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MealCreate>,
) -> AppResult<Json<Meal>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_price(payload.price)?;
    validate_positive_quantity(payload.total, "total")?;

    let repo = MealRepository::new(state.get_db());
    let meal = repo.create(payload).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(meal))
}

/// Admin availability override
pub async fn set_available(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MealSetAvailable>,
) -> AppResult<Json<Meal>> {
    let repo = MealRepository::new(state.get_db());
    let meal = repo.set_available(&id, payload.available).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(meal))
}

/// Add fresh stock
pub async fn restock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MealRestock>,
) -> AppResult<Json<Meal>> {
    let repo = MealRepository::new(state.get_db());
    let meal = repo.restock(&id, payload.amount).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(meal))
}

/// Hard delete a meal
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = MealRepository::new(state.get_db());
    repo.delete(&id).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(serde_json::json!({ "deleted": id })))
}
