//! Human-readable dates for the rendered page.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// `02 Jan 2024`, in the timestamp's own offset.
pub fn format_day<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%d %b %Y").to_string()
}

/// ISO week label and full timestamp, e.g. `("2024-W01", "2024-01-02 13:45 +00:00")`.
pub fn format_week_pair(at: &DateTime<FixedOffset>) -> (String, String) {
    (
        at.format("%G-W%V").to_string(),
        at.format("%Y-%m-%d %H:%M %:z").to_string(),
    )
}

/// `January 2024`, used as a month section heading.
pub fn format_month_heading(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year:04}-{month:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_timestamp;

    #[test]
    fn test_format_day_uses_local_offset() {
        let at = parse_timestamp("2024-01-02T23:30:00-05:00").unwrap();
        assert_eq!(format_day(&at), "02 Jan 2024");
    }

    #[test]
    fn test_week_pair_crosses_year_boundary() {
        // 2024-12-30 belongs to ISO week 1 of 2025
        let at = parse_timestamp("2024-12-30T08:05:00Z").unwrap();
        let (week, full) = format_week_pair(&at);
        assert_eq!(week, "2025-W01");
        assert_eq!(full, "2024-12-30 08:05 +00:00");
    }

    #[test]
    fn test_month_heading() {
        assert_eq!(format_month_heading(2024, 3), "March 2024");
        assert_eq!(format_month_heading(2024, 13), "2024-13");
    }
}
