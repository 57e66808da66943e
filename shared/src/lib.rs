//! Shared types for the XMeal canteen server
//!
//! DTOs exchanged between the server and its clients, plus small utilities
//! (timestamps, QR token minting) used on both sides of the wire.

pub mod client;
pub mod message;
pub mod util;

pub use client::{
    BookMealsRequest, LoginRequest, LoginResponse, PayAllResponse, RegisterRequest, UserInfo,
    VerifyRequest,
};
pub use message::StoreSnapshot;
