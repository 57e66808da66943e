/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Mint a QR redemption token for an order.
///
/// Layout: `ORDER-<millis>-<9 random alphanumerics>`. Uniqueness comes from
/// the millisecond timestamp plus ~53 bits of randomness — collision-free at
/// canteen scale, not cryptographically guaranteed. The order store also
/// carries a unique index on the token as a backstop.
pub fn order_token() -> String {
    use rand::{Rng, distributions::Alphanumeric};

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("ORDER-{}-{}", now_millis(), suffix)
}
