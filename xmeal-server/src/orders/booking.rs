//! Booking Service
//!
//! Places orders: checks the meal, takes one unit of stock with a single
//! conditional update, mints the QR token and writes the order record.

use serde::Serialize;

use crate::db::models::{Order, OrderStatus};
use crate::db::repository::{MealRepository, OrderRepository, SettingsRepository};
use crate::utils::time::{close_time_passed, parse_close_time};
use crate::utils::{AppError, AppResult};
use shared::util::{now_millis, order_token};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Per-meal failure inside a batch booking
#[derive(Debug, Clone, Serialize)]
pub struct BookingFailure {
    pub meal_id: String,
    pub error: String,
}

/// Outcome of a batch booking — per-item failures never roll back the
/// succeeded subset
#[derive(Debug, Serialize)]
pub struct BookingSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub orders: Vec<Order>,
    pub failures: Vec<BookingFailure>,
}

#[derive(Clone)]
pub struct BookingService {
    meals: MealRepository,
    orders: OrderRepository,
    settings: SettingsRepository,
    enforce_close_time: bool,
}

impl BookingService {
    pub fn new(db: Surreal<Db>, enforce_close_time: bool) -> Self {
        Self {
            meals: MealRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            settings: SettingsRepository::new(db),
            enforce_close_time,
        }
    }

    /// Place a single order for `user_id`.
    ///
    /// The stock check and decrement are one atomic statement
    /// ([`MealRepository::take_one`]), so the last unit can only be taken
    /// once. The order insert follows the decrement; if it fails the unit is
    /// put back before the error propagates.
    pub async fn place_order(&self, meal_id: &str, user_id: &str) -> AppResult<Order> {
        self.check_close_time().await?;

        let meal = self
            .meals
            .find_by_id(meal_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Meal {} not found", meal_id)))?;
        let meal_record = meal
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Meal record has no id".to_string()))?;

        if self.meals.take_one(&meal_record).await?.is_none() {
            return Err(AppError::unavailable(format!("{} is sold out", meal.name)));
        }

        let now = now_millis();
        let order = Order {
            id: None,
            meal_id: meal_record.clone(),
            meal_name: meal.name.clone(),
            price: meal.price,
            user_id: user_id.to_string(),
            status: OrderStatus::Pending,
            qr_code: order_token(),
            verified: false,
            created_at: now,
            updated_at: now,
            verified_at: None,
        };

        match self.orders.create(order).await {
            Ok(created) => {
                tracing::info!(
                    order_id = %created.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
                    meal = %created.meal_name,
                    user_id = %created.user_id,
                    "Order placed"
                );
                Ok(created)
            }
            Err(e) => {
                // The unit was already taken; give it back before failing
                if let Err(restore_err) = self.meals.put_one_back(&meal_record).await {
                    tracing::error!(
                        meal_id = %meal_record,
                        error = %restore_err,
                        "Failed to restore stock after order insert failure"
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Book several meals as independent placements.
    ///
    /// Per-item failures are collected into the summary; nothing is rolled
    /// back.
    pub async fn place_many(&self, meal_ids: &[String], user_id: &str) -> AppResult<BookingSummary> {
        if meal_ids.is_empty() {
            return Err(AppError::validation("No meals selected".to_string()));
        }

        let mut orders = Vec::new();
        let mut failures = Vec::new();
        for meal_id in meal_ids {
            match self.place_order(meal_id, user_id).await {
                Ok(order) => orders.push(order),
                Err(e) => failures.push(BookingFailure {
                    meal_id: meal_id.clone(),
                    error: e.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            tracing::warn!(
                user_id = %user_id,
                succeeded = orders.len(),
                failed = failures.len(),
                "Batch booking partially failed"
            );
        }

        Ok(BookingSummary {
            succeeded: orders.len(),
            failed: failures.len(),
            orders,
            failures,
        })
    }

    /// Reject bookings after the daily close time when enforcement is on.
    ///
    /// A malformed stored close time disables the gate rather than blocking
    /// all bookings; the settings API rejects bad values on write.
    async fn check_close_time(&self) -> AppResult<()> {
        if !self.enforce_close_time {
            return Ok(());
        }

        let settings = self.settings.get_or_create().await?;
        match parse_close_time(&settings.close_time) {
            Ok(close) if close_time_passed(close) => Err(AppError::validation(format!(
                "Booking is closed for today (closes at {})",
                settings.close_time
            ))),
            Ok(_) => Ok(()),
            Err(_) => {
                tracing::warn!(
                    close_time = %settings.close_time,
                    "Stored close time is malformed, skipping enforcement"
                );
                Ok(())
            }
        }
    }
}
