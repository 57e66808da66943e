//! Verification Service
//!
//! Redeems a paid order's QR token exactly once.

use crate::db::models::{Order, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct VerificationService {
    orders: OrderRepository,
}

impl VerificationService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db),
        }
    }

    /// Redeem a QR token.
    ///
    /// `paid + unverified → paid + verified` is the only success path and it
    /// is terminal — there is no un-verify. The flip itself is a guarded
    /// update, so two racing redeems of the same token cannot both pass.
    pub async fn verify_token(&self, qr_code: &str) -> AppResult<Order> {
        let qr_code = qr_code.trim();
        if qr_code.is_empty() {
            return Err(AppError::validation("QR code must not be empty".to_string()));
        }

        let order = self
            .orders
            .find_by_qr(qr_code)
            .await?
            .ok_or(AppError::InvalidQr)?;

        if order.verified {
            return Err(AppError::AlreadyVerified);
        }
        if order.status != OrderStatus::Paid {
            return Err(AppError::NotPaid);
        }

        let id = order
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Order record has no id".to_string()))?;

        match self.orders.mark_verified(&id).await? {
            Some(verified) => {
                tracing::info!(
                    order_id = %id,
                    meal = %verified.meal_name,
                    "Order verified"
                );
                Ok(verified)
            }
            // Lost the race against a concurrent redeem or a status change;
            // re-read to report the precondition that now holds.
            None => match self.orders.find_by_id(&id.to_string()).await? {
                Some(current) if current.verified => Err(AppError::AlreadyVerified),
                Some(_) => Err(AppError::NotPaid),
                None => Err(AppError::InvalidQr),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::MealCreate;
    use crate::db::repository::MealRepository;
    use crate::orders::BookingService;

    async fn setup() -> (VerificationService, BookingService, MealRepository, OrderRepository) {
        let db = DbService::in_memory().await.unwrap().db;
        (
            VerificationService::new(db.clone()),
            BookingService::new(db.clone(), false),
            MealRepository::new(db.clone()),
            OrderRepository::new(db),
        )
    }

    async fn booked_order(booking: &BookingService, meals: &MealRepository) -> Order {
        let meal = meals
            .create(MealCreate {
                name: "Tea".to_string(),
                price: 10.0,
                total: 5,
            })
            .await
            .unwrap();
        booking
            .place_order(&meal.id.unwrap().to_string(), "user:a")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn full_lifecycle_pending_paid_verified() {
        let (verify, booking, meals, orders) = setup().await;
        let order = booked_order(&booking, &meals).await;
        let order_id = order.id.clone().unwrap().to_string();

        // Pending: rejected, verified untouched
        let err = verify.verify_token(&order.qr_code).await.unwrap_err();
        assert!(matches!(err, AppError::NotPaid));
        let current = orders.find_by_id(&order_id).await.unwrap().unwrap();
        assert!(!current.verified);

        // Pay, then the one and only successful redemption
        orders
            .update_status(&order_id, OrderStatus::Paid)
            .await
            .unwrap();
        let verified = verify.verify_token(&order.qr_code).await.unwrap();
        assert!(verified.verified);
        assert!(verified.verified_at.is_some());
        assert_eq!(verified.meal_name, "Tea");
        assert_eq!(verified.price, 10.0);

        // Terminal: the same token never redeems twice
        let err = verify.verify_token(&order.qr_code).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyVerified));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let (verify, _, _, _) = setup().await;
        let err = verify.verify_token("ORDER-0-nosuchtok").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidQr));
    }

    #[tokio::test]
    async fn blank_token_is_rejected_before_lookup() {
        let (verify, _, _, _) = setup().await;
        let err = verify.verify_token("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn concurrent_redeems_accept_exactly_one() {
        let (verify, booking, meals, orders) = setup().await;
        let order = booked_order(&booking, &meals).await;
        orders
            .update_status(&order.id.clone().unwrap().to_string(), OrderStatus::Paid)
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            verify.verify_token(&order.qr_code),
            verify.verify_token(&order.qr_code),
        );
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
    }
}
