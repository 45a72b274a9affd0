//! Wall-clock time resolution: "HH:MM" + now → the next future instant.

use chrono::{DateTime, Days, TimeZone};

use crate::error::{Result, SchedulerError};

/// Parse an `HH:MM` token into (hour, minute).
///
/// Strict: exactly two colon-separated all-digit fields, `HH` in 0–23,
/// `MM` in 0–59. Everything else is [`SchedulerError::MalformedTime`].
pub fn parse_time_of_day(token: &str) -> Result<(u32, u32)> {
    let malformed = || SchedulerError::MalformedTime(token.to_string());

    let (h, m) = token.split_once(':').ok_or_else(malformed)?;
    if h.is_empty() || m.is_empty() || m.contains(':') {
        return Err(malformed());
    }
    if !h.chars().all(|c| c.is_ascii_digit()) || !m.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    let hour: u32 = h.parse().map_err(|_| malformed())?;
    let minute: u32 = m.parse().map_err(|_| malformed())?;
    if hour > 23 || minute > 59 {
        return Err(malformed());
    }
    Ok((hour, minute))
}

/// Resolve `token` ("HH:MM") to the next occurrence of that wall-clock time
/// strictly after `now`, in `now`'s zone.
///
/// A candidate equal to `now` counts as already passed: a minute that
/// elapsed in the same instant it was requested rolls to tomorrow rather
/// than firing immediately. The roll-forward is exactly one day (two only
/// when a DST gap erases tomorrow's candidate); this is "next occurrence
/// within 24h", not a general calendar scheduler.
pub fn next_occurrence<Tz: TimeZone>(token: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>> {
    let (hour, minute) = parse_time_of_day(token)?;
    let tz = now.timezone();

    for days_ahead in 0..3 {
        let Some(date) = now.date_naive().checked_add_days(Days::new(days_ahead)) else {
            break;
        };
        let Some(naive) = date.and_hms_opt(hour, minute, 0) else {
            break;
        };
        // `earliest` picks the first mapping for ambiguous (fall-back)
        // times and skips candidates erased by a spring-forward gap.
        if let Some(candidate) = tz.from_local_datetime(&naive).earliest() {
            if candidate > now {
                return Ok(candidate);
            }
        }
    }

    Err(SchedulerError::Unresolvable {
        time: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_time_of_day("00:00").unwrap(), (0, 0));
        assert_eq!(parse_time_of_day("09:05").unwrap(), (9, 5));
        assert_eq!(parse_time_of_day("23:59").unwrap(), (23, 59));
        // Single-digit fields are tolerated as long as they are digits.
        assert_eq!(parse_time_of_day("9:5").unwrap(), (9, 5));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["25:00", "abc", "9", "9:9:9", "10:60", "24:00", "-1:30", "+1:05", ":30", "10:", "1O:00", ""] {
            assert!(
                matches!(parse_time_of_day(bad), Err(SchedulerError::MalformedTime(_))),
                "expected MalformedTime for {bad:?}"
            );
        }
    }

    #[test]
    fn time_still_ahead_today_resolves_to_today() {
        let now = at(10, 0, 0);
        let resolved = next_occurrence("23:59", now).unwrap();
        assert_eq!(resolved, at(23, 59, 0));
    }

    #[test]
    fn time_already_passed_resolves_to_tomorrow() {
        let now = at(10, 0, 0);
        let resolved = next_occurrence("08:00", now).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap());
    }

    #[test]
    fn candidate_equal_to_now_counts_as_passed() {
        let now = at(10, 0, 0);
        let resolved = next_occurrence("10:00", now).unwrap();
        assert_eq!(
            resolved,
            Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn sub_minute_elapsed_time_rolls_forward() {
        // 10:00:30 is past 10:00:00, so roll to tomorrow, never "fire now".
        let now = at(10, 0, 30);
        let resolved = next_occurrence("10:00", now).unwrap();
        assert_eq!(
            resolved,
            Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn malformed_token_fails_resolution() {
        let now = at(10, 0, 0);
        assert!(matches!(
            next_occurrence("7pm", now),
            Err(SchedulerError::MalformedTime(_))
        ));
    }

    #[test]
    fn dst_gap_skips_to_next_day() {
        // 2024-03-10: US spring-forward, 02:30 local does not exist.
        let now = New_York.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap();
        let resolved = next_occurrence("02:30", now).unwrap();
        assert_eq!(
            resolved,
            New_York.with_ymd_and_hms(2024, 3, 11, 2, 30, 0).unwrap()
        );
    }
}
