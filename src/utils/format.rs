use time::OffsetDateTime;

const KB: i64 = 1024;
const MB: i64 = KB * 1024;
const GB: i64 = MB * 1024;

#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(size: i64) -> String {
    if size < KB {
        format!("{size} Б")
    } else if size < MB {
        format!("{:.1} КБ", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.1} МБ", size as f64 / MB as f64)
    } else {
        format!("{:.2} ГБ", size as f64 / GB as f64)
    }
}

/// Unknown and zero sizes are shown as `N/A`.
pub fn format_optional_file_size(size: Option<i64>) -> String {
    match size {
        Some(size) if size > 0 => format_file_size(size),
        _ => "N/A".to_owned(),
    }
}

/// Human date relative to `now`: minutes or hours for the same day, "Вчера", then a plain date.
pub fn format_date(date: OffsetDateTime, now: OffsetDateTime) -> String {
    let diff = now - date;
    if diff.is_negative() {
        return format_plain_date(date);
    }

    let days = diff.whole_days();
    let seconds = diff.whole_seconds() - days * 86_400;

    match days {
        0 if seconds < 3600 => {
            let minutes = seconds / 60;
            if minutes > 1 {
                format!("{minutes} минут назад")
            } else {
                "Только что".to_owned()
            }
        }
        0 => format!("{} часов назад", seconds / 3600),
        1 => "Вчера".to_owned(),
        _ => format_plain_date(date),
    }
}

fn format_plain_date(date: OffsetDateTime) -> String {
    format!("{:02}.{:02}.{}", date.day(), u8::from(date.month()), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::{Date, Duration, Month, Time};

    fn at(year: i32, month: Month, day: u8, hour: u8, minute: u8) -> OffsetDateTime {
        Date::from_calendar_date(year, month, day)
            .unwrap()
            .with_time(Time::from_hms(hour, minute, 0).unwrap())
            .assume_utc()
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Б");
        assert_eq!(format_file_size(1023), "1023 Б");
        assert_eq!(format_file_size(1024), "1.0 КБ");
        assert_eq!(format_file_size(1_024_000), "1000.0 КБ");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.5 МБ");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 ГБ");
    }

    #[test]
    fn test_format_optional_file_size() {
        assert_eq!(format_optional_file_size(None), "N/A");
        assert_eq!(format_optional_file_size(Some(0)), "N/A");
        assert_eq!(format_optional_file_size(Some(2048)), "2.0 КБ");
    }

    #[test]
    fn test_format_date_recent() {
        let now = at(2026, Month::October, 17, 12, 0);

        assert_eq!(format_date(now, now), "Только что");
        assert_eq!(format_date(now - Duration::seconds(90), now), "Только что");
        assert_eq!(format_date(now - Duration::minutes(5), now), "5 минут назад");
        assert_eq!(format_date(now - Duration::minutes(59), now), "59 минут назад");
        assert_eq!(format_date(now - Duration::hours(3), now), "3 часов назад");
    }

    #[test]
    fn test_format_date_days() {
        let now = at(2026, Month::October, 17, 12, 0);

        assert_eq!(format_date(now - Duration::hours(30), now), "Вчера");
        assert_eq!(format_date(at(2026, Month::October, 3, 8, 15), now), "03.10.2026");
    }

    #[test]
    fn test_format_date_in_future() {
        let now = at(2026, Month::October, 17, 12, 0);
        assert_eq!(format_date(at(2026, Month::October, 18, 9, 0), now), "18.10.2026");
    }
}
