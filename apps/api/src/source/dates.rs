//! PDF date strings (`D:YYYYMMDDHHmmSSOHH'mm'`), normalized to RFC 3339 when possible.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix("D:").unwrap_or(trimmed);
    let digit_len = body.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &body[..digit_len];
    if digits.len() < 4 {
        return None;
    }

    // Missing trailing components take their PDF defaults.
    let component = |start: usize, default: u32| -> Option<u32> {
        match digits.get(start..start + 2) {
            Some(d) => d.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = digits[..4].parse().ok()?;
    let month = component(4, 1)?;
    let day = component(6, 1)?;
    let hour = component(8, 0)?;
    let minute = component(10, 0)?;
    let second = component(12, 0)?;

    let offset = parse_offset(&body[digit_len..])?;
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    offset.from_local_datetime(&naive).single()
}

fn parse_offset(rest: &str) -> Option<FixedOffset> {
    let mut chars = rest.chars();
    match chars.next() {
        None | Some('Z') => FixedOffset::east_opt(0),
        Some(sign @ ('+' | '-')) => {
            let digits: String = chars.filter(char::is_ascii_digit).collect();
            let hours: i32 = digits.get(0..2)?.parse().ok()?;
            let minutes: i32 = match digits.get(2..4) {
                Some(m) => m.parse().ok()?,
                None => 0,
            };
            let seconds = hours * 3600 + minutes * 60;
            if sign == '+' {
                FixedOffset::east_opt(seconds)
            } else {
                FixedOffset::west_opt(seconds)
            }
        }
        _ => None,
    }
}

/// RFC 3339 when parseable, otherwise the raw value unchanged.
pub fn normalize_pdf_date(raw: &str) -> String {
    parse_pdf_date(raw)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_date_with_offset() {
        let dt = parse_pdf_date("D:20230115103000+01'00'").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-15T10:30:00+01:00");
    }

    #[test]
    fn test_utc_marker() {
        assert_eq!(
            normalize_pdf_date("D:20240229235959Z"),
            "2024-02-29T23:59:59+00:00"
        );
    }

    #[test]
    fn test_negative_offset() {
        let dt = parse_pdf_date("D:20211231080000-05'30'").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
    }

    #[test]
    fn test_year_only_uses_defaults() {
        assert_eq!(
            normalize_pdf_date("D:2019"),
            "2019-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_unparseable_kept_raw() {
        assert_eq!(normalize_pdf_date("last tuesday"), "last tuesday");
        assert_eq!(normalize_pdf_date("D:20231399"), "D:20231399");
        assert_eq!(normalize_pdf_date(""), "");
    }
}
