use chrono::{DateTime, Local, Utc};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// Ages under a week are phrased as "N seconds/minutes/hours/days ago", with N
/// rounded down. Older timestamps are shown as a local `d-m-yyyy` date. An absent
/// timestamp renders as `-`. A timestamp in the future produces a negative number
/// of seconds.
#[must_use]
pub fn format_relative(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "-".to_string();
    };

    let delta = (now - timestamp).num_milliseconds();

    if delta < MINUTE_MS {
        format!("{} seconds ago", delta.div_euclid(SECOND_MS))
    } else if delta < HOUR_MS {
        format!("{} minutes ago", delta.div_euclid(MINUTE_MS))
    } else if delta < DAY_MS {
        format!("{} hours ago", delta.div_euclid(HOUR_MS))
    } else if delta < WEEK_MS {
        format!("{} days ago", delta.div_euclid(DAY_MS))
    } else {
        timestamp.with_timezone(&Local).format("%-d-%-m-%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn ago(ms: i64) -> String {
        format_relative(Some(now() - TimeDelta::milliseconds(ms)), now())
    }

    #[test]
    fn test_absent_timestamp() {
        assert_eq!(format_relative(None, now()), "-");
    }

    #[test]
    fn test_buckets() {
        assert_eq!(ago(45_000), "45 seconds ago");
        assert_eq!(ago(300_000), "5 minutes ago");
        assert_eq!(ago(32_400_000), "9 hours ago");
        assert_eq!(ago(259_200_000), "3 days ago");
    }

    #[test]
    fn test_bucket_boundaries_round_down() {
        assert_eq!(ago(0), "0 seconds ago");
        assert_eq!(ago(59_999), "59 seconds ago");
        assert_eq!(ago(60_000), "1 minutes ago");
        assert_eq!(ago(3_599_999), "59 minutes ago");
        assert_eq!(ago(3_600_000), "1 hours ago");
        assert_eq!(ago(86_399_999), "23 hours ago");
        assert_eq!(ago(86_400_000), "1 days ago");
        assert_eq!(ago(604_799_999), "6 days ago");
    }

    #[test]
    fn test_older_than_a_week_is_absolute_date() {
        let timestamp = now() - TimeDelta::milliseconds(864_000_000);
        let expected = timestamp.with_timezone(&Local).format("%-d-%-m-%Y").to_string();
        assert_eq!(format_relative(Some(timestamp), now()), expected);
        assert!(!expected.contains("ago"));
    }

    #[test]
    fn test_absolute_date_has_no_padding() {
        let timestamp = Utc.with_ymd_and_hms(2017, 5, 3, 12, 0, 0).unwrap();
        let local = timestamp.with_timezone(&Local);
        let expected = format!("{}-{}-{}", local.format("%-d"), local.format("%-m"), local.format("%Y"));
        assert_eq!(format_relative(Some(timestamp), now()), expected);
    }

    #[test]
    fn test_future_timestamp_floors_to_negative_seconds() {
        assert_eq!(ago(-1_500), "-2 seconds ago");
        assert_eq!(ago(-1_000), "-1 seconds ago");
    }
}
