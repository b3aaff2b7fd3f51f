use chrono::NaiveDate;

use crate::domain::errors::DateNormalizationError;

// Textual date encodings the backend is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShape {
    // YYYY-MM-DD
    Iso,
    // YYYYMMDD
    Compact8,
    // YYYYMDD, month without its leading zero
    Compact7,
}

impl DateShape {
    fn detect(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        let all_digits =
            |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

        match bytes.len() {
            10 if bytes[4] == b'-'
                && bytes[7] == b'-'
                && all_digits(0..4)
                && all_digits(5..7)
                && all_digits(8..10) =>
            {
                Some(DateShape::Iso)
            }
            8 if all_digits(0..8) => Some(DateShape::Compact8),
            7 if all_digits(0..7) => Some(DateShape::Compact7),
            _ => None,
        }
    }

    // Byte ranges of year, month and day within a value of this shape.
    fn fields(self) -> [std::ops::Range<usize>; 3] {
        match self {
            DateShape::Iso => [0..4, 5..7, 8..10],
            DateShape::Compact8 => [0..4, 4..6, 6..8],
            DateShape::Compact7 => [0..4, 4..5, 5..7],
        }
    }
}

/// Normalize a booking or query date into a calendar date.
///
/// Accepts ISO `YYYY-MM-DD`, compact `YYYYMMDD` and compact `YYYYMDD`
/// (single-digit month). Surrounding whitespace is ignored.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateNormalizationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DateNormalizationError::Empty);
    }

    let shape = DateShape::detect(value)
        .ok_or_else(|| DateNormalizationError::UnsupportedShape(value.to_string()))?;
    calendar_date(value, shape)
        .ok_or_else(|| DateNormalizationError::InvalidCalendarDate(value.to_string()))
}

// Every field is ASCII digits once the shape is known, so only the calendar can reject it.
fn calendar_date(value: &str, shape: DateShape) -> Option<NaiveDate> {
    let [year, month, day] = shape.fields();
    let year = value[year].parse::<i32>().ok()?;
    let month = value[month].parse::<u32>().ok()?;
    let day = value[day].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
