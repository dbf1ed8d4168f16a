//! # System Appearance
//!
//! Answers "does the environment prefer a dark theme?" and watches for
//! changes. A terminal has no media query, so [`TerminalAppearance`] reads:
//!
//! 1. `PARLEY_APPEARANCE` (`dark` / `light`), then
//! 2. `COLORFGBG` (`"<fg>;<bg>"`, as set by rxvt, Konsole, iTerm2 and others).
//!
//! Either may be absent, in which case the answer is `None`.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

pub const APPEARANCE_ENV: &str = "PARLEY_APPEARANCE";
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// How often the watcher samples the system preference.
pub const WATCH_INTERVAL: Duration = Duration::from_secs(2);

pub trait SystemAppearance: Send + Sync {
    /// `Some(true)` for dark, `Some(false)` for light, `None` if unknown.
    fn prefers_dark(&self) -> Option<bool>;
}

/// Environment-variable based appearance detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAppearance;

impl SystemAppearance for TerminalAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        if let Ok(value) = std::env::var(APPEARANCE_ENV)
            && let Some(dark) = parse_appearance(&value)
        {
            return Some(dark);
        }
        std::env::var(COLORFGBG_ENV)
            .ok()
            .and_then(|value| parse_colorfgbg(&value))
    }
}

/// Parse an explicit `dark` / `light` override (case-insensitive).
pub fn parse_appearance(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// Parse `COLORFGBG`. The background is the last `;`-separated field.
///
/// ANSI indices 0-6 and 8 are dark backgrounds; 7 and 9-15 are light.
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}

/// Poll `source` every `interval` and call `on_change` whenever a known
/// value differs from the last one seen. The initial value is not reported.
///
/// Must be called from within a tokio runtime.
pub fn spawn_watcher<F>(
    source: Arc<dyn SystemAppearance>,
    interval: Duration,
    on_change: F,
) -> tokio::task::AbortHandle
where
    F: Fn(bool) -> bool + Send + 'static,
{
    info!("Watching system appearance every {:?}", interval);
    let handle = tokio::spawn(async move {
        let mut last = source.prefers_dark();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let current = source.prefers_dark();
            if let Some(dark) = current
                && current != last
            {
                debug!("System appearance changed: dark={}", dark);
                if !on_change(dark) {
                    debug!("Appearance receiver dropped, stopping watcher");
                    return;
                }
            }
            last = current;
        }
    });
    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU8, Ordering};

    /// 0 = unknown, 1 = light, 2 = dark
    struct FakeAppearance(AtomicU8);

    impl SystemAppearance for FakeAppearance {
        fn prefers_dark(&self) -> Option<bool> {
            match self.0.load(Ordering::SeqCst) {
                1 => Some(false),
                2 => Some(true),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_appearance() {
        assert_eq!(parse_appearance("dark"), Some(true));
        assert_eq!(parse_appearance(" LIGHT "), Some(false));
        assert_eq!(parse_appearance("sepia"), None);
    }

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("0;7"), Some(false));
        assert_eq!(parse_colorfgbg("default"), None);
        assert_eq!(parse_colorfgbg("15;200"), None);
        assert_eq!(parse_colorfgbg(""), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_reports_changes_only() {
        let source = Arc::new(FakeAppearance(AtomicU8::new(1)));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let handle = spawn_watcher(source.clone(), Duration::from_secs(1), move |dark| {
            sink.lock().unwrap().push(dark);
            true
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(seen.lock().unwrap().is_empty(), "unchanged value must not fire");

        source.0.store(2, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*seen.lock().unwrap(), vec![true]);

        // Unknown does not fire, and coming back to the same value after unknown does.
        source.0.store(0, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        source.0.store(2, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*seen.lock().unwrap(), vec![true, true]);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_stops_when_callback_declines() {
        let source = Arc::new(FakeAppearance(AtomicU8::new(1)));
        let calls = Arc::new(AtomicU8::new(0));

        let counter = calls.clone();
        let _handle = spawn_watcher(source.clone(), Duration::from_secs(1), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        source.0.store(2, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        source.0.store(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
