use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parse an entry date as typed by a user or sent by the webhook.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, and timestamps (RFC 3339 or naive ISO 8601). A
/// timestamp with an offset is converted to UTC before its date is taken.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(input, INPUT_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, DISPLAY_FORMAT))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// The wire form of a date, `YYYY-MM-DD`.
pub fn format_input(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// The display form of a date, `DD/MM/YYYY`.
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Render a raw remote date for a listing row. Unparseable text is shown unchanged.
pub fn display_raw(input: &str) -> String {
    if input.trim().is_empty() {
        return "Data não informada".into();
    }

    parse_date(input)
        .map(format_display)
        .unwrap_or_else(|| input.to_string())
}
