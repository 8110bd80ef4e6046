//! 头部摘要文本：日期、问候语、状态行

use chrono::{DateTime, TimeZone, Timelike};

use crate::models::Metrics;

pub const ALL_DONE: &str = "All goals met!";

/// 按小时选择问候语
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// 形如 "Monday, Oct 19"
pub fn date_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %b %-d").to_string()
}

pub fn greeting_at<Tz: TimeZone>(now: &DateTime<Tz>) -> &'static str {
    greeting(now.hour())
}

pub fn status_line(metrics: &Metrics) -> String {
    if metrics.all_done() {
        ALL_DONE.to_string()
    } else {
        format!("You have {} tasks to go", metrics.remaining)
    }
}
