//! 订单领域服务
//!
//! - [`BookingService`] - 下单：库存原子扣减 + 生成 QR 令牌 + 写入订单
//! - [`VerificationService`] - 核销：一次性兑换已支付订单的 QR 令牌

pub mod booking;
pub mod verification;

pub use booking::{BookingFailure, BookingService, BookingSummary};
pub use verification::VerificationService;
