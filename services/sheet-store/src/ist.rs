//! India Standard Time helpers
//!
//! IST has no daylight saving, so a fixed +05:30 offset is exact.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// The IST offset
pub fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in IST
pub fn now_ist() -> DateTime<FixedOffset> {
    to_ist(Utc::now())
}

pub fn to_ist(t: DateTime<Utc>) -> DateTime<FixedOffset> {
    t.with_timezone(&ist_offset())
}

/// Timestamp format used in the log tabs, e.g. `2025-09-05 15:15:00`
pub fn sheet_timestamp(t: &DateTime<FixedOffset>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Wall-clock format used for `last_started` / `last_stopped`, e.g. `03:15:00 PM`
pub fn clock_time(t: &DateTime<FixedOffset>) -> String {
    t.format("%I:%M:%S %p").to_string()
}

/// RFC 3339 with the +05:30 offset, used in API payloads
pub fn api_timestamp(t: &DateTime<FixedOffset>) -> String {
    t.to_rfc3339()
}

/// NSE cash session: Monday-Friday, 09:15 - 15:30 IST inclusive
pub fn is_market_hours(t: &DateTime<FixedOffset>) -> bool {
    let local = t.with_timezone(&ist_offset());
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let minutes = local.hour() * 60 + local.minute();
    let open = 9 * 60 + 15;
    let close = 15 * 60 + 30;
    (open..=close).contains(&minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        ist_offset().with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_utc_conversion_adds_five_thirty() {
        let utc = Utc.with_ymd_and_hms(2025, 9, 5, 9, 45, 0).unwrap();
        assert_eq!(sheet_timestamp(&to_ist(utc)), "2025-09-05 15:15:00");
    }

    #[test]
    fn test_formats() {
        let t = ist(2025, 9, 5, 15, 15, 7);
        assert_eq!(sheet_timestamp(&t), "2025-09-05 15:15:07");
        assert_eq!(clock_time(&t), "03:15:07 PM");
        assert_eq!(api_timestamp(&t), "2025-09-05T15:15:07+05:30");
    }

    #[test]
    fn test_market_hours_boundaries() {
        // 2025-09-05 is a Friday
        assert!(!is_market_hours(&ist(2025, 9, 5, 9, 14, 59)));
        assert!(is_market_hours(&ist(2025, 9, 5, 9, 15, 0)));
        assert!(is_market_hours(&ist(2025, 9, 5, 15, 30, 59)));
        assert!(!is_market_hours(&ist(2025, 9, 5, 15, 31, 0)));
    }

    #[test]
    fn test_weekend_is_closed() {
        assert!(!is_market_hours(&ist(2025, 9, 6, 11, 0, 0)));
        assert!(!is_market_hours(&ist(2025, 9, 7, 11, 0, 0)));
    }
}
