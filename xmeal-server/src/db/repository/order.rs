//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, make_record_id, strip_table_prefix};
use crate::db::models::{Order, OrderStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly built order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, pure_id)).await?;
        Ok(order)
    }

    /// All orders, newest first (paginated)
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// A user's orders, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user_id = $uid ORDER BY created_at DESC")
            .bind(("uid", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Point lookup on the unique QR token
    pub async fn find_by_qr(&self, qr_code: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE qr_code = $qr LIMIT 1")
            .bind(("qr", qr_code.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Set the lifecycle status (admin toggle / payment)
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let thing = make_record_id(ORDER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE order SET status = $status, updated_at = $now WHERE id = $id RETURN AFTER")
            .bind(("id", thing))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// One-shot verification flip.
    ///
    /// Guarded so the flag can only go false → true while the order is paid;
    /// a concurrent redeem of the same token loses the race and gets `None`.
    pub async fn mark_verified(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query("UPDATE order SET verified = true, verified_at = $now, updated_at = $now WHERE id = $id AND verified = false AND status = 'paid' RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("now", now))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Move every pending order of a user to paid; returns the updated orders
    pub async fn pay_all_pending(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE order SET status = 'paid', updated_at = $now WHERE user_id = $uid AND status = 'pending' RETURN AFTER")
            .bind(("uid", user_id.to_string()))
            .bind(("now", now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::util::order_token;

    async fn repo() -> OrderRepository {
        let service = DbService::in_memory().await.unwrap();
        OrderRepository::new(service.db)
    }

    fn sample_order(user_id: &str, created_at: i64) -> Order {
        Order {
            id: None,
            meal_id: RecordId::from_table_key("meal", "tea"),
            meal_name: "Tea".to_string(),
            price: 10.0,
            user_id: user_id.to_string(),
            status: OrderStatus::Pending,
            qr_code: order_token(),
            verified: false,
            created_at,
            updated_at: created_at,
            verified_at: None,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_qr() {
        let repo = repo().await;
        let order = repo.create(sample_order("user:a", 1)).await.unwrap();

        let found = repo.find_by_qr(&order.qr_code).await.unwrap().unwrap();
        assert_eq!(found.id, order.id);
        assert_eq!(found.status, OrderStatus::Pending);
        assert!(!found.verified);

        assert!(repo.find_by_qr("ORDER-0-nosuchtok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_user_is_newest_first() {
        let repo = repo().await;
        repo.create(sample_order("user:a", 100)).await.unwrap();
        repo.create(sample_order("user:a", 300)).await.unwrap();
        repo.create(sample_order("user:b", 200)).await.unwrap();

        let orders = repo.find_by_user("user:a").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].created_at, 300);
        assert_eq!(orders[1].created_at, 100);
    }

    #[tokio::test]
    async fn mark_verified_requires_paid_and_unverified() {
        let repo = repo().await;
        let order = repo.create(sample_order("user:a", 1)).await.unwrap();
        let id = order.id.clone().unwrap();

        // Pending: the guarded update matches nothing
        assert!(repo.mark_verified(&id).await.unwrap().is_none());

        repo.update_status(&id.to_string(), OrderStatus::Paid)
            .await
            .unwrap();

        let verified = repo.mark_verified(&id).await.unwrap().unwrap();
        assert!(verified.verified);
        assert!(verified.verified_at.is_some());

        // Second flip loses the guard
        assert!(repo.mark_verified(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pay_all_pending_only_touches_own_pending() {
        let repo = repo().await;
        let a1 = repo.create(sample_order("user:a", 1)).await.unwrap();
        repo.create(sample_order("user:a", 2)).await.unwrap();
        repo.create(sample_order("user:b", 3)).await.unwrap();
        repo.update_status(&a1.id.unwrap().to_string(), OrderStatus::Paid)
            .await
            .unwrap();

        let updated = repo.pay_all_pending("user:a").await.unwrap();
        assert_eq!(updated.len(), 1);
        assert!(updated.iter().all(|o| o.status == OrderStatus::Paid));

        let b_orders = repo.find_by_user("user:b").await.unwrap();
        assert_eq!(b_orders[0].status, OrderStatus::Pending);
    }
}
