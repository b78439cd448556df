use chrono::{DateTime, Utc};

pub mod chainage;
pub mod geo;
pub mod logging;
pub mod settings;

pub struct DateTimeUtils {}

impl DateTimeUtils {
    pub const DISPLAY_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn to_utc(seconds: i64, nanos: u32) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(seconds, nanos)
    }

    pub fn timestamp_to_str(seconds: i64, nanos: u32) -> Option<String> {
        Self::to_utc(seconds, nanos).map(|datetime| datetime.format(Self::DISPLAY_FORMAT).to_string())
    }
}
