// Utility functions
use chrono::{DateTime, Utc};

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats a timestamp as `dd/mm/YYYY`.
pub fn format_day(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize_first("electric vehicles"), "Electric vehicles");
        assert_eq!(capitalize_first("iPhone sales"), "IPhone sales");
        assert_eq!(capitalize_first("ßig"), "SSig");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn formats_day_month_year() {
        let date = Utc.with_ymd_and_hms(2024, 7, 3, 23, 59, 0).unwrap();
        assert_eq!(format_day(&date), "03/07/2024");
    }
}
