//! Meal Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id, strip_table_prefix};
use crate::db::models::{Meal, MealCreate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const MEAL_TABLE: &str = "meal";

#[derive(Clone)]
pub struct MealRepository {
    base: BaseRepository,
}

impl MealRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all meals, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Meal>> {
        let meals: Vec<Meal> = self
            .base
            .db()
            .query("SELECT * FROM meal ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(meals)
    }

    /// Find meal by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Meal>> {
        let pure_id = strip_table_prefix(MEAL_TABLE, id);
        let meal: Option<Meal> = self.base.db().select((MEAL_TABLE, pure_id)).await?;
        Ok(meal)
    }

    /// Create a new meal with `available = total`
    pub async fn create(&self, data: MealCreate) -> RepoResult<Meal> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("meal name must not be empty".into()));
        }
        if !data.price.is_finite() || data.price < 0.0 {
            return Err(RepoError::Validation(format!(
                "price must be non-negative, got {}",
                data.price
            )));
        }
        if data.total <= 0 {
            return Err(RepoError::Validation(format!(
                "total quantity must be positive, got {}",
                data.total
            )));
        }

        let now = now_millis();
        let meal = Meal {
            id: None,
            name: data.name,
            price: data.price,
            available: data.total,
            total: data.total,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Meal> = self.base.db().create(MEAL_TABLE).content(meal).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create meal".to_string()))
    }

    /// Admin availability override.
    ///
    /// Values above `total` (or below zero) are rejected rather than clamped,
    /// so a typo surfaces instead of silently distorting the stock counters.
    pub async fn set_available(&self, id: &str, value: i64) -> RepoResult<Meal> {
        let meal = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Meal {} not found", id)))?;

        if value < 0 {
            return Err(RepoError::Validation(format!(
                "available must not be negative, got {value}"
            )));
        }
        if value > meal.total {
            return Err(RepoError::Validation(format!(
                "available ({value}) must not exceed total ({})",
                meal.total
            )));
        }

        let thing = make_record_id(MEAL_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE meal SET available = $value, updated_at = $now WHERE id = $id RETURN AFTER")
            .bind(("id", thing))
            .bind(("value", value))
            .bind(("now", now_millis()))
            .await?;
        let meals: Vec<Meal> = result.take(0)?;
        meals
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Meal {} not found", id)))
    }

    /// Add fresh stock: bumps both `available` and `total` by `amount`
    pub async fn restock(&self, id: &str, amount: i64) -> RepoResult<Meal> {
        if amount <= 0 {
            return Err(RepoError::Validation(format!(
                "restock amount must be positive, got {amount}"
            )));
        }

        let thing = make_record_id(MEAL_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE meal SET available += $amount, total += $amount, updated_at = $now WHERE id = $id RETURN AFTER")
            .bind(("id", thing))
            .bind(("amount", amount))
            .bind(("now", now_millis()))
            .await?;
        let meals: Vec<Meal> = result.take(0)?;
        meals
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Meal {} not found", id)))
    }

    /// Hard delete a meal. Orders referencing it keep their denormalized
    /// snapshot; the reference is allowed to dangle.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(MEAL_TABLE, id);
        let result: Option<Meal> = self.base.db().delete((MEAL_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Meal {} not found", id)));
        }
        Ok(())
    }

    /// Atomic conditional decrement: takes one unit only while stock remains.
    ///
    /// The availability check and the decrement are a single statement, so two
    /// concurrent bookings cannot both consume the last unit. Returns the meal
    /// after the decrement, or `None` when no unit was available.
    pub async fn take_one(&self, id: &RecordId) -> RepoResult<Option<Meal>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE meal SET available -= 1, updated_at = $now WHERE id = $id AND available > 0 RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("now", now_millis()))
            .await?;
        let meals: Vec<Meal> = result.take(0)?;
        Ok(meals.into_iter().next())
    }

    /// Compensate a decrement whose order insert failed
    pub async fn put_one_back(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE meal SET available += 1, updated_at = $now WHERE id = $id")
            .bind(("id", id.clone()))
            .bind(("now", now_millis()))
            .await?;
        Ok(())
    }
}
