use chrono::Timelike;

/// `HH:MM` in 24-hour form, both fields zero-padded.
pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Clock text for the current local time.
pub fn current_clock() -> String {
    format_clock(&chrono::Local::now())
}
