use chrono::{DateTime, TimeZone, Utc};

/// Source of the current time, so that time dependent responses can be tested
pub trait ISys: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that is stopped at the given timestamp in millis
pub struct StaticSys {
    pub timestamp_millis: i64,
}

impl ISys for StaticSys {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp_millis)
            .single()
            .unwrap_or_else(Utc::now)
    }
}
