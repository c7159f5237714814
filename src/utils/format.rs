use chrono::NaiveDate;

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try full ISO-8601 first, then bare YYYY-MM-DD
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if let Ok(d) = parse_date_prefix(date) {
        d.format("%b %d, %Y").to_string()
    } else {
        date.to_string()
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Whether a due date (YYYY-MM-DD or full ISO-8601) is in the past.
/// Unparseable or absent dates are never overdue.
pub fn is_overdue(due_date: Option<&str>) -> bool {
    match due_date.map(parse_date_prefix) {
        Some(Ok(date)) => date < chrono::Utc::now().date_naive(),
        _ => false,
    }
}

fn parse_date_prefix(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    let prefix: String = date.chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d")
}
