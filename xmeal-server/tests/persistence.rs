//! On-disk persistence smoke test
//!
//! The unit tests run against the in-memory engine; this one makes sure the
//! RocksDB-backed store used by the binary survives a close/reopen cycle.

use tempfile::TempDir;

use xmeal_server::db::DbService;
use xmeal_server::db::models::MealCreate;
use xmeal_server::db::repository::MealRepository;

#[tokio::test]
async fn data_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("xmeal.db");
    let db_path = db_path.to_string_lossy().to_string();

    let meal_id = {
        let service = DbService::new(&db_path).await.unwrap();
        let repo = MealRepository::new(service.db.clone());
        let meal = repo
            .create(MealCreate {
                name: "Tea".to_string(),
                price: 10.0,
                total: 5,
            })
            .await
            .unwrap();
        meal.id.unwrap().to_string()
        // service drops here, releasing the store
    };

    let service = DbService::new(&db_path).await.unwrap();
    let repo = MealRepository::new(service.db);
    let meal = repo.find_by_id(&meal_id).await.unwrap().unwrap();
    assert_eq!(meal.name, "Tea");
    assert_eq!(meal.available, 5);
}
