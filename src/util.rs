pub mod extensions;

/// Format seconds as `HH:MM:SS`, the form ffmpeg accepts for `-ss` and `-t`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// Human readable duration used in the merge summary, ex. `1h 1m 30.00s`
pub fn format_hms(seconds: f64) -> String {
    let whole = seconds.max(0.0);
    let hours = (whole / 3600.0).floor();
    let minutes = ((whole % 3600.0) / 60.0).floor();

    format!("{}h {}m {:.2}s", hours, minutes, whole % 60.0)
}
