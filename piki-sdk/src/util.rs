//! Small helpers shared by the client and the exporter

use std::future::Future;
use std::time::{Duration, Instant};

/// Await `fut` and report how long it took
pub async fn timed<T>(fut: impl Future<Output = T>) -> (T, Duration) {
    let started = Instant::now();
    let output = fut.await;
    (output, started.elapsed())
}

/// Cut `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }

    let mut cut: String = s.chars().take(max_len - 3).collect();
    cut.push_str("...");
    cut
}

/// Short id tying together the log lines of one webhook call
pub fn generate_request_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}

/// `"1500ms"`, `"30s"`, `"5m"`, `"1h"` or bare (possibly fractional) seconds.
/// Zero and negative values are rejected.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim().to_ascii_lowercase();

    let duration = if let Some(n) = raw.strip_suffix("ms") {
        n.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(n) = raw.strip_suffix('h') {
        n.trim().parse::<u64>().ok().map(|h| Duration::from_secs(h * 3600))
    } else if let Some(n) = raw.strip_suffix('m') {
        n.trim().parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        let n = raw.strip_suffix('s').unwrap_or(&raw);
        n.trim()
            .parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    };

    duration.filter(|d| !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hi", 2), "hi");
        assert_eq!(truncate_string("envío fallido", 6), "env...");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("100ms"), Some(Duration::from_millis(100)));
        assert_eq!(parse_duration("60"), Some(Duration::from_secs(60)));
        assert_eq!(parse_duration("120.0"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("-5"), None);
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn test_request_ids_are_short_and_distinct() {
        let a = generate_request_id();
        assert_eq!(a.len(), 12);
        assert_ne!(a, generate_request_id());
    }

    #[tokio::test]
    async fn test_timed_returns_output() {
        let (value, elapsed) = timed(async { 7 }).await;
        assert_eq!(value, 7);
        assert!(elapsed < Duration::from_secs(5));
    }
}
