//! First-run data seeding
//!
//! 首次启动时写入默认餐品、设置单例和管理员账号。
//! 每一步都只在对应集合为空时生效，重启不会重复写入。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::models::{MealCreate, UserCreate, UserRole};
use crate::db::repository::{MealRepository, SettingsRepository, UserRepository};
use crate::utils::AppResult;

/// Default meals on a fresh install: name, price, available, total
const DEFAULT_MEALS: [(&str, f64, i64, i64); 3] = [
    ("Meals", 40.0, 150, 200),
    ("Chai", 10.0, 150, 200),
    ("Samosa", 8.0, 150, 200),
];

/// Seed default data on first run
pub async fn seed_defaults(db: &Surreal<Db>, config: &Config) -> AppResult<()> {
    seed_meals(db).await?;
    // Settings singleton is lazily created with the default close time
    SettingsRepository::new(db.clone()).get_or_create().await?;
    seed_admin(db, config).await?;
    Ok(())
}

async fn seed_meals(db: &Surreal<Db>) -> AppResult<()> {
    let meals = MealRepository::new(db.clone());
    if !meals.find_all().await?.is_empty() {
        return Ok(());
    }

    for (name, price, available, total) in DEFAULT_MEALS {
        let meal = meals
            .create(MealCreate {
                name: name.to_string(),
                price,
                total,
            })
            .await?;
        if available != total {
            let id = meal.id.map(|t| t.to_string()).unwrap_or_default();
            meals.set_available(&id, available).await?;
        }
    }
    tracing::info!(count = DEFAULT_MEALS.len(), "Seeded default meals");
    Ok(())
}

async fn seed_admin(db: &Surreal<Db>, config: &Config) -> AppResult<()> {
    let users = UserRepository::new(db.clone());
    if users.any_exists().await? {
        return Ok(());
    }

    let password = match &config.admin_password {
        Some(p) => p.clone(),
        None => {
            let generated = generate_password();
            // Printed exactly once, on the very first start
            tracing::warn!(
                email = %config.admin_email,
                password = %generated,
                "ADMIN_PASSWORD not set — generated an initial admin password, change it after first login"
            );
            generated
        }
    };

    users
        .create(UserCreate {
            email: config.admin_email.clone(),
            password,
            display_name: "Canteen Admin".to_string(),
            role: UserRole::Admin,
        })
        .await?;
    tracing::info!(email = %config.admin_email, "Seeded admin account");
    Ok(())
}

fn generate_password() -> String {
    use rand::{Rng, distributions::Alphanumeric};
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::DEFAULT_CLOSE_TIME;

    fn test_config() -> Config {
        let mut config = Config::with_overrides("/tmp/xmeal-bootstrap-test", 0);
        config.admin_email = "admin@xmeal.com".to_string();
        config.admin_password = Some("admin-secret-pass".to_string());
        config
    }

    #[tokio::test]
    async fn seeds_meals_settings_and_admin_once() {
        let db = DbService::in_memory().await.unwrap().db;
        let config = test_config();

        seed_defaults(&db, &config).await.unwrap();

        let meals = MealRepository::new(db.clone()).find_all().await.unwrap();
        assert_eq!(meals.len(), 3);
        assert!(meals.iter().all(|m| m.available == 150 && m.total == 200));

        let settings = SettingsRepository::new(db.clone()).get().await.unwrap().unwrap();
        assert_eq!(settings.close_time, DEFAULT_CLOSE_TIME);

        let admin = UserRepository::new(db.clone())
            .find_by_email("admin@xmeal.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.verify_password("admin-secret-pass").unwrap());

        // Idempotent: a second run changes nothing
        seed_defaults(&db, &config).await.unwrap();
        assert_eq!(MealRepository::new(db.clone()).find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn does_not_reseed_when_data_exists() {
        let db = DbService::in_memory().await.unwrap().db;
        let config = test_config();

        MealRepository::new(db.clone())
            .create(MealCreate { name: "Dosa".into(), price: 25.0, total: 10 })
            .await
            .unwrap();

        seed_defaults(&db, &config).await.unwrap();
        let meals = MealRepository::new(db.clone()).find_all().await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Dosa");
    }
}
