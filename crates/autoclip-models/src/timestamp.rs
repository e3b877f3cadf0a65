//! Timestamp formatting helpers.

/// Format seconds as HH:MM:SS.mmm for FFmpeg arguments and reports.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor() as u32;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u32;
    let secs = seconds % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(75.5), "00:01:15.500");
        assert_eq!(format_timestamp(3661.25), "01:01:01.250");
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        assert_eq!(format_timestamp(-3.0), "00:00:00.000");
    }
}
