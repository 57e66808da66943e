//! Order Model

use std::fmt;

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity — one student's booking of one meal unit.
///
/// `meal_name` and `price` are a denormalized snapshot of the meal at booking
/// time, so the order survives later meal edits or deletion. The `qr_code`
/// token is the redemption credential; it is unique and consumed at most once
/// (`verified` flips false → true exactly once, only while `status == paid`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    /// Meal reference (snapshot reference, not ownership — may dangle after
    /// an admin deletes the meal)
    #[serde(with = "serde_helpers::record_id")]
    pub meal_id: RecordId,
    pub meal_name: String,
    pub price: f64,
    /// Booking user id, always taken from the authenticated session
    pub user_id: String,
    pub status: OrderStatus,
    pub qr_code: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<i64>,
}
