use anyhow::Result;
use chrono::NaiveDate;
use evcal_core::event::DATE_FORMAT;

/// Parse a day given as `YYYY-MM-DD` or in natural language ("tomorrow",
/// "next fri", "march 20").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    Ok(dt.date())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Local};

    #[test]
    fn iso_date() {
        assert_eq!(
            parse_date(" 2024-03-04 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn relative_date() {
        let expected = Local::now().date_naive() + Duration::days(1);
        assert_eq!(parse_date("tomorrow").unwrap(), expected);
    }

    #[test]
    fn absolute_month_day() {
        let date = parse_date("mar 20").unwrap();
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 20);
    }

    #[test]
    fn invalid_input() {
        assert!(parse_date("not a date at all xyz").is_err());
    }

    #[test]
    fn expands_abbreviations() {
        assert_eq!(expand_abbreviations("Sat"), "saturday");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
        assert_eq!(expand_abbreviations("next friday"), "next friday");
    }
}
