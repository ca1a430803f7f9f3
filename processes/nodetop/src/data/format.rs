//! Display formatting for dashboard values

/// Format an uptime in seconds as `<d>d <h>h <m>m <s>s`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Format large numbers with K/M suffixes
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Three decimals, `NaN` spelled out
pub fn format_latency(ms: f64) -> String {
    if ms.is_nan() {
        "NaN".to_string()
    } else {
        format!("{ms:.3}")
    }
}

pub fn format_flag(active: bool) -> &'static str {
    if active {
        "✔"
    } else {
        "✘"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0d 0h 0m 0s");
        assert_eq!(format_uptime(5186606), "60d 0h 43m 26s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(2_711_500), "2.7M");
        assert_eq!(format_count(3_319), "3.3K");
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(1.4712197562234925), "1.471");
        assert_eq!(format_latency(f64::NAN), "NaN");
        assert_eq!(format_latency(0.0), "0.000");
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(format_flag(true), "✔");
        assert_eq!(format_flag(false), "✘");
    }
}
