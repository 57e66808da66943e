//! Client-facing request/response DTOs

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request (role is always `student`; the admin is seeded)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// User info returned to clients — never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: i64,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Batch booking request — one order per listed meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMealsRequest {
    pub meal_ids: Vec<String>,
}

/// QR redemption request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub qr_code: String,
}

/// Result of paying all pending orders at once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayAllResponse {
    /// Number of orders moved to `paid`
    pub updated: usize,
}
