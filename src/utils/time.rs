use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time, never earlier than `previous`.
pub fn now_after(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let current = now();
    match previous {
        Some(previous) if previous > current => previous,
        _ => current,
    }
}
