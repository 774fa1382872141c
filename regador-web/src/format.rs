use time::format_description::well_known::Rfc3339;
use time::format_description::{self, OwnedFormatItem};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::Result;

/// Compile a `time` format description such as `[day]/[month]/[year]`.
pub fn timestamp_format(description: &str) -> Result<OwnedFormatItem> {
    Ok(format_description::parse_owned::<2>(description)?)
}

/// Date and time without an offset, with either `T` or a space between them.
const NAIVE_TIMESTAMP: &str =
    "[year]-[month]-[day][first [T][ ]][hour]:[minute]:[second][optional [.[subsecond]]]";

/// Render a backend timestamp. RFC 3339 values keep the offset they were reported with;
/// values without an offset are shown as written.
pub fn format_timestamp(raw: &str, format: &OwnedFormatItem) -> Result<String> {
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(timestamp.format(format)?);
    }

    let naive = format_description::parse_owned::<2>(NAIVE_TIMESTAMP)?;
    Ok(PrimitiveDateTime::parse(raw, &naive)?.format(format)?)
}

/// `"{minutes} min"`, with the leftover seconds appended when there are any.
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;

    if remaining > 0 {
        format!("{minutes} min {remaining}s")
    } else {
        format!("{minutes} min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PT_BR: &str = "[day]/[month]/[year], [hour]:[minute]:[second]";

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(600), "10 min");
        assert_eq!(format_duration(90), "1 min 30s");
        assert_eq!(format_duration(45), "0 min 45s");
        assert_eq!(format_duration(0), "0 min");
    }

    #[test]
    fn test_pt_br_timestamp() {
        let format = timestamp_format(PT_BR).unwrap();

        assert_eq!(
            format_timestamp("2024-03-09T07:05:00-03:00", &format).unwrap(),
            "09/03/2024, 07:05:00"
        );
        assert_eq!(
            format_timestamp("2024-03-09T07:05:00.123456Z", &format).unwrap(),
            "09/03/2024, 07:05:00"
        );
    }

    #[test]
    fn test_timestamp_without_offset() {
        let format = timestamp_format(PT_BR).unwrap();

        assert_eq!(
            format_timestamp("2024-01-01T00:00:00", &format).unwrap(),
            "01/01/2024, 00:00:00"
        );
        assert_eq!(
            format_timestamp("2024-01-01 18:30:15.250000", &format).unwrap(),
            "01/01/2024, 18:30:15"
        );
    }

    #[test]
    fn test_unreadable_timestamp() {
        let format = timestamp_format(PT_BR).unwrap();

        assert!(matches!(
            format_timestamp("ontem", &format),
            Err(crate::error::Error::TimestampParse(_))
        ));
    }

    #[test]
    fn test_invalid_description() {
        assert!(timestamp_format("[dia]/[mes]").is_err());
    }
}
