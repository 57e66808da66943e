//! Meal Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Meal ID type
pub type MealId = RecordId;

/// Meal entity — a bookable menu item with price and stock counters.
///
/// `available` counts units currently bookable, `total` counts units ever
/// stocked. `available <= total` is enforced on every mutation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MealId>,
    pub name: String,
    pub price: f64,
    pub available: i64,
    pub total: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create meal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub name: String,
    pub price: f64,
    /// Initial stock; `available` starts equal to `total`
    pub total: i64,
}

/// Admin availability override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSetAvailable {
    pub available: i64,
}

/// Restock payload — bumps both `available` and `total`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRestock {
    pub amount: i64,
}
