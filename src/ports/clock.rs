use chrono::{DateTime, Utc};

/// Port for reading the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
