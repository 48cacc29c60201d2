//! Preset-driven date ranges for the order history filter.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

/// Filter preset picked on the orders page. `Custom` reads the two free-form
/// date inputs; everything else derives from today's date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    #[default]
    Today,
    Week,
    Month,
    Custom,
}

impl DatePreset {
    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Week => "1 Week",
            DatePreset::Month => "1 Month",
            DatePreset::Custom => "Custom",
        }
    }
}

/// Inclusive calendar-date bounds handed to the orders API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn single(day: Date) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start_iso(&self) -> String {
        format_iso_date(self.start)
    }

    pub fn end_iso(&self) -> String {
        format_iso_date(self.end)
    }
}

/// Resolves a preset plus the custom inputs into concrete bounds.
///
/// A custom range is honored only when both inputs are non-empty and parse
/// as ISO dates; anything else collapses to today/today rather than sending
/// a half-open range to the API. `today` is passed in so each recomputation
/// sees the current date.
pub fn resolve(preset: DatePreset, custom_start: &str, custom_end: &str, today: Date) -> DateRange {
    match preset {
        DatePreset::Today => DateRange::single(today),
        DatePreset::Week => DateRange {
            start: today - Duration::days(7),
            end: today,
        },
        DatePreset::Month => DateRange {
            start: today - Duration::days(30),
            end: today,
        },
        DatePreset::Custom => match (parse_iso_date(custom_start), parse_iso_date(custom_end)) {
            (Some(start), Some(end)) => DateRange { start, end },
            _ => DateRange::single(today),
        },
    }
}

/// Today's trading date in Seoul. KST is a fixed UTC+9 with no DST.
pub fn today_kst() -> Date {
    OffsetDateTime::now_utc()
        .to_offset(time::macros::offset!(+9))
        .date()
}

pub fn parse_iso_date(text: &str) -> Option<Date> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Date::parse(
        trimmed,
        time::macros::format_description!("[year]-[month]-[day]"),
    )
    .ok()
}

pub fn format_iso_date(date: Date) -> String {
    date.format(time::macros::format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn today_preset_is_a_single_day() {
        let range = resolve(DatePreset::Today, "", "", date!(2024 - 01 - 08));
        assert_eq!(range.start, date!(2024 - 01 - 08));
        assert_eq!(range.end, date!(2024 - 01 - 08));
    }

    #[test]
    fn week_preset_reaches_back_seven_days() {
        let range = resolve(DatePreset::Week, "", "", date!(2024 - 01 - 08));
        assert_eq!(range.start, date!(2024 - 01 - 01));
        assert_eq!(range.end, date!(2024 - 01 - 08));
    }

    #[test]
    fn month_preset_reaches_back_thirty_days() {
        let range = resolve(DatePreset::Month, "", "", date!(2024 - 01 - 31));
        assert_eq!(range.start, date!(2024 - 01 - 01));
        assert_eq!(range.end, date!(2024 - 01 - 31));
    }

    #[test]
    fn complete_custom_range_is_honored() {
        let range = resolve(
            DatePreset::Custom,
            "2023-12-01",
            "2023-12-15",
            date!(2024 - 01 - 08),
        );
        assert_eq!(range.start, date!(2023 - 12 - 01));
        assert_eq!(range.end, date!(2023 - 12 - 15));
    }

    #[test]
    fn incomplete_custom_range_falls_back_to_today() {
        let today = date!(2024 - 01 - 08);
        let range = resolve(DatePreset::Custom, "", "2024-01-01", today);
        assert_eq!(range, DateRange::single(today));

        let range = resolve(DatePreset::Custom, "2024-01-01", "", today);
        assert_eq!(range, DateRange::single(today));
    }

    #[test]
    fn unparseable_custom_input_falls_back_to_today() {
        let today = date!(2024 - 01 - 08);
        let range = resolve(DatePreset::Custom, "last tuesday", "2024-01-01", today);
        assert_eq!(range, DateRange::single(today));
    }

    #[test]
    fn iso_round_trip() {
        let day = date!(2024 - 01 - 08);
        assert_eq!(format_iso_date(day), "2024-01-08");
        assert_eq!(parse_iso_date("2024-01-08"), Some(day));
        assert_eq!(parse_iso_date("  2024-01-08  "), Some(day));
        assert_eq!(parse_iso_date(""), None);
    }
}
