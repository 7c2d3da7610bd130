use std::time::Duration;

/// Length of the loading sequence.
pub const SPLASH_DURATION: Duration = Duration::from_millis(3500);
/// Extra pause after reaching 100% before the main screen shows.
pub const REVEAL_DELAY: Duration = Duration::from_millis(300);
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Percentage complete after `elapsed`, clamped to 100.
pub fn progress(elapsed: Duration) -> f64 {
    let ratio = elapsed.as_secs_f64() / SPLASH_DURATION.as_secs_f64();
    (ratio * 100.0).min(100.0)
}

pub fn is_complete(progress: f64) -> bool {
    progress >= 100.0
}

pub fn phase_label(progress: f64) -> &'static str {
    if progress < 25.0 {
        "🚀 Initializing AI systems..."
    } else if progress < 50.0 {
        "📊 Loading financial models..."
    } else if progress < 75.0 {
        "💎 Preparing your dashboard..."
    } else {
        "✨ Almost ready!"
    }
}
