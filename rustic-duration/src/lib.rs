use std::time::Duration;

/// Renders a stage duration for log lines.
///
/// Sub-millisecond timings are shown in µs, anything under a second in ms,
/// anything under a minute in seconds with two decimals and longer runs
/// as minutes and seconds.
pub fn beautify_duration(elapsed_duration: Duration) -> String {
    let millis = elapsed_duration.as_millis();

    if millis == 0 {
        format!("{}µs", elapsed_duration.as_micros())
    } else if millis < 1000 {
        format!("{millis}ms")
    } else if elapsed_duration.as_secs() < 60 {
        format!("{:.2}s", elapsed_duration.as_secs_f64())
    } else {
        let secs = elapsed_duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
