/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Parses a duration string (HH:MM) to minutes. Durations are spans, not
/// clock times, so the hour part is not bounded to a day.
pub fn parse_duration_to_minutes(duration_str: &str) -> Option<u32> {
    let parts: Vec<&str> = duration_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn minutes_to_time_string(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// End-of-block label for display: start plus duration, wrapping at
/// midnight for overnight sessions.
pub fn end_label(start_minutes: u32, duration_minutes: u32) -> String {
    minutes_to_time_string((start_minutes + duration_minutes) % (24 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_time_to_minutes("00:00"), Some(0));
        assert_eq!(parse_time_to_minutes("09:00"), Some(540));
        assert_eq!(parse_time_to_minutes("23:59"), Some(1439));
    }

    #[test]
    fn rejects_out_of_range_and_malformed_times() {
        assert_eq!(parse_time_to_minutes("24:00"), None);
        assert_eq!(parse_time_to_minutes("09:60"), None);
        assert_eq!(parse_time_to_minutes("N/A"), None);
        assert_eq!(parse_time_to_minutes("0900"), None);
        assert_eq!(parse_time_to_minutes(""), None);
    }

    #[test]
    fn durations_allow_more_than_a_day_of_hours() {
        assert_eq!(parse_duration_to_minutes("01:30"), Some(90));
        assert_eq!(parse_duration_to_minutes("25:00"), Some(1500));
        assert_eq!(parse_duration_to_minutes("01:75"), None);
        assert_eq!(parse_duration_to_minutes("N/A"), None);
    }

    #[test]
    fn formats_minutes_back_to_hhmm() {
        assert_eq!(minutes_to_time_string(0), "00:00");
        assert_eq!(minutes_to_time_string(540), "09:00");
        assert_eq!(minutes_to_time_string(20 * 60 + 30), "20:30");
    }

    #[test]
    fn end_label_wraps_past_midnight() {
        assert_eq!(end_label(9 * 60, 90), "10:30");
        assert_eq!(end_label(23 * 60, 180), "02:00");
    }
}
