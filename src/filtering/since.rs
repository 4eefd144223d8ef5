use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{SummarizerError, SummarizerResult};

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(r"(\d+)(y|mo|w|d|h|m|s)").unwrap();
    static ref FULL_DURATION_RE: Regex = Regex::new(r"^(?:\d+(?:y|mo|w|d|h|m|s))+$").unwrap();
}

/// Parse a `--since` value relative to the current time.
///
/// Accepts `2004-10-20`, `2004-10-20 15:04:05`, RFC 3339, or durations such
/// as `6mo`, `1w2d` and `36h`.
pub fn parse_since(input: &str) -> SummarizerResult<DateTime<FixedOffset>> {
    parse_since_at(input, Local::now())
}

pub fn parse_since_at(input: &str, now: DateTime<Local>) -> SummarizerResult<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return local_datetime(date.and_hms_opt(0, 0, 0), input);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return local_datetime(Some(datetime), input);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime);
    }

    let lowered = input.to_lowercase();
    if !FULL_DURATION_RE.is_match(&lowered) {
        return Err(SummarizerError::InvalidInput(format!(
            "unrecognized time or duration format: {:?}",
            input
        )));
    }

    let mut total = Duration::zero();
    let mut less_than_day_units = false;
    for captures in DURATION_RE.captures_iter(&lowered) {
        let amount: i64 = captures[1].parse().map_err(|_| {
            SummarizerError::InvalidInput(format!("invalid number in duration: {}", &captures[1]))
        })?;
        let unit = &captures[2];

        let step = match unit {
            "y" => amount.checked_mul(365).and_then(Duration::try_days),
            "mo" => amount.checked_mul(30).and_then(Duration::try_days),
            "w" => Duration::try_weeks(amount),
            "d" => Duration::try_days(amount),
            "h" => {
                less_than_day_units = true;
                Duration::try_hours(amount)
            }
            "m" => {
                less_than_day_units = true;
                Duration::try_minutes(amount)
            }
            "s" => {
                less_than_day_units = true;
                Duration::try_seconds(amount)
            }
            other => {
                return Err(SummarizerError::InvalidInput(format!("unknown unit: {}", other)));
            }
        };
        total = step
            .and_then(|step| total.checked_add(&step))
            .ok_or_else(|| out_of_range(input))?;
    }

    let since = now.checked_sub_signed(total).ok_or_else(|| out_of_range(input))?;

    // Day-granular durations start at midnight.
    if less_than_day_units {
        Ok(since.fixed_offset())
    } else {
        local_datetime(since.date_naive().and_hms_opt(0, 0, 0), input)
    }
}

fn local_datetime(naive: Option<NaiveDateTime>, input: &str) -> SummarizerResult<DateTime<FixedOffset>> {
    naive
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|datetime| datetime.fixed_offset())
        .ok_or_else(|| out_of_range(input))
}

fn out_of_range(input: &str) -> SummarizerError {
    SummarizerError::InvalidInput(format!("time out of range: {:?}", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 13, 45, 10).earliest().unwrap()
    }

    #[test]
    fn absolute_date_is_local_midnight() {
        let since = parse_since_at("2024-06-01", now()).unwrap();
        assert_eq!(since.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(since.hour(), 0);
    }

    #[test]
    fn absolute_datetime_and_rfc3339() {
        let since = parse_since_at("2024-06-01 08:30:00", now()).unwrap();
        assert_eq!((since.hour(), since.minute()), (8, 30));

        let since = parse_since_at("2024-06-01T08:30:00+02:00", now()).unwrap();
        assert_eq!(since.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn day_durations_truncate_to_midnight() {
        let since = parse_since_at("2w", now()).unwrap();
        assert_eq!(since.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!((since.hour(), since.minute(), since.second()), (0, 0, 0));
    }

    #[test]
    fn combined_and_sub_day_durations_keep_time() {
        let since = parse_since_at("1d2h", now()).unwrap();
        let expected = (now() - Duration::hours(26)).fixed_offset();
        assert_eq!(since, expected);
    }

    #[test]
    fn month_unit_is_not_minutes() {
        let since = parse_since_at("1mo", now()).unwrap();
        assert_eq!(since.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 16).unwrap());
    }

    #[test]
    fn uppercase_units_are_accepted() {
        assert!(parse_since_at("3D", now()).is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        for input in ["", "soon", "2x", "w2", "1d and more"] {
            assert!(
                matches!(parse_since_at(input, now()), Err(SummarizerError::InvalidInput(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn absurd_durations_are_errors_not_panics() {
        assert!(parse_since_at("99999999999999y", now()).is_err());
    }
}
