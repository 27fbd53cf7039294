use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current date and time in the timezone `canonical_timezone`.
pub fn local_now(canonical_timezone: &str) -> Option<OffsetDateTime> {
    get_local_offset(canonical_timezone).map(|offset| OffsetDateTime::now_utc().to_offset(offset))
}

/// Today's date in the timezone `canonical_timezone`, e.g. "Pacific/Auckland".
pub fn local_today(canonical_timezone: &str) -> Option<Date> {
    local_now(canonical_timezone).map(|now| now.date())
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::{get_local_offset, local_now, local_today};

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_has_no_offset() {
        assert_eq!(get_local_offset("Middle/Earth"), None);
        assert_eq!(local_today("Middle/Earth"), None);
        assert_eq!(local_now("Middle/Earth"), None);
    }

    #[test]
    fn local_now_uses_timezone_offset() {
        let now = local_now("Etc/UTC").unwrap();

        assert_eq!(now.offset(), UtcOffset::UTC);
    }
}
