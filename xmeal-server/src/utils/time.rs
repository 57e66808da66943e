//! 时间工具函数 — 营业截止时间处理
//!
//! 截止时间以 "HH:MM" 文本存储在 settings 单例中，
//! 解析和比较统一在这里完成。

use chrono::{Local, NaiveTime};

use super::{AppError, AppResult};

/// 解析截止时间字符串 (HH:MM)，格式错误返回 ValidationError
pub fn parse_close_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid close time format: {value} (expected HH:MM)")))
}

/// 当前本地时间是否已经过了当日截止时间
pub fn close_time_passed(close: NaiveTime) -> bool {
    Local::now().time() > close
}
