//! Database Models
//!
//! SurrealDB-facing record types with string-friendly `RecordId` serde.

pub mod meal;
pub mod order;
pub mod serde_helpers;
pub mod settings;
pub mod user;

pub use meal::{Meal, MealCreate, MealId, MealRestock, MealSetAvailable};
pub use order::{Order, OrderId, OrderStatus};
pub use settings::{DEFAULT_CLOSE_TIME, Settings, SettingsUpdate};
pub use user::{User, UserCreate, UserId, UserRole};
