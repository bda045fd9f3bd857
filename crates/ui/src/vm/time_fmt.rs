use chrono::Duration;

/// `m:ss`, clamped at zero.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let seconds = value.num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::seconds(0)), "0:00");
        assert_eq!(format_elapsed(Duration::seconds(75)), "1:15");
        assert_eq!(format_elapsed(Duration::minutes(12)), "12:00");
    }

    #[test]
    fn negative_is_zero() {
        assert_eq!(format_elapsed(Duration::seconds(-5)), "0:00");
    }
}
