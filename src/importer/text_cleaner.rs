// ==========================================
// Logistica ASN - text / number / date cleaning
// ==========================================
// TRIM / encoding repair / numeric parsing / day-first dates
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Decodes file bytes: UTF-8 when valid, otherwise Latin-1. A UTF-8 BOM is dropped.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Repairs UTF-8 text that was decoded as Latin-1 ("NÃºmero" -> "Número").
///
/// Text that is not such a mis-decoding is returned unchanged.
pub fn repair_mojibake(value: &str) -> String {
    if value.chars().any(|c| c as u32 > 0xFF) {
        return value.to_string();
    }
    let bytes: Vec<u8> = value.chars().map(|c| c as u8).collect();
    match String::from_utf8(bytes) {
        Ok(repaired) => repaired,
        Err(_) => value.to_string(),
    }
}

/// Trimmed value, `None` when blank or a spreadsheet null marker.
pub fn normalize_null(value: Option<&str>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parses a decimal, accepting a comma as decimal separator.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a whole number ("12", "12.0"). Fractions and values outside the
/// i64 range are rejected.
pub fn parse_integer(value: &str) -> Option<i64> {
    let number = parse_number(value)?;
    if number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}

/// Textual key of a CodItem/SKU cell: "1001.0" -> "1001".
pub fn code_key(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.strip_suffix(".0") {
        Some(int_part) if !int_part.is_empty() && int_part.chars().all(|c| c.is_ascii_digit()) => {
            int_part.to_string()
        }
        _ => trimmed.to_string(),
    }
}

const DAY_FIRST_DATETIME_FORMATS: [&str; 6] = [
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DAY_FIRST_DATE_FORMATS: [&str; 5] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y%m%d"];

/// Parses a date written day-first, ISO, or as an Excel serial number.
pub fn parse_date_day_first(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DAY_FIRST_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DAY_FIRST_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    // Excel serial date (days since 1899-12-30)
    match trimmed.parse::<f64>() {
        Ok(serial) if serial > 0.0 && serial < 2_958_466.0 => {
            let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            base.checked_add_signed(Duration::days(serial.trunc() as i64))
        }
        _ => None,
    }
}
