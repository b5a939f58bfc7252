/// Format a stored amount for table display.
pub fn format_money(value: f64) -> String {
    format!("₹{:.2}", value)
}

/// Get current date in YYYY-MM-DD format
pub fn current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

/// Parse YYYY-MM-DD date string into components
pub fn parse_date_string(date_str: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let year = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;

    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some((year, month, day))
    } else {
        None
    }
}

/// Format YYYY-MM-DD date string for display
pub fn format_date_for_display(date_str: &str) -> String {
    if let Some((year, month, day)) = parse_date_string(date_str) {
        let month_name = match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "January",
        };
        format!("{} {}, {}", month_name, day, year)
    } else {
        date_str.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_money_with_two_decimals() {
        assert_eq!(format_money(4000.0), "₹4000.00");
        assert_eq!(format_money(-300.5), "₹-300.50");
    }

    #[test]
    fn parses_well_formed_dates() {
        assert_eq!(parse_date_string("2026-06-01"), Some((2026, 6, 1)));
        assert_eq!(parse_date_string("2026-13-01"), None);
        assert_eq!(parse_date_string("2026-06"), None);
        assert_eq!(parse_date_string("not a date"), None);
    }

    #[test]
    fn displays_dates_with_month_names() {
        assert_eq!(format_date_for_display("2026-06-01"), "June 1, 2026");
        // malformed input passes through untouched
        assert_eq!(format_date_for_display("soon"), "soon");
    }
}
