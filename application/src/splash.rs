use domain::splash::{is_complete, progress, REVEAL_DELAY, TICK_INTERVAL};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashOutcome {
    Completed,
    Cancelled,
}

/// Run the loading sequence.
///
/// `on_progress` receives the percentage on every tick. Once 100% is reached
/// and the reveal delay has passed, `on_complete` fires exactly once.
/// Cancelling the token at any point ends the sequence without completing.
pub async fn run_splash<P, C>(
    mut on_progress: P,
    on_complete: C,
    cancel: &CancellationToken,
) -> SplashOutcome
where
    P: FnMut(f64),
    C: FnOnce(),
{
    let started = Instant::now();
    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return SplashOutcome::Cancelled,
            _ = ticker.tick() => {}
        }

        let current = progress(started.elapsed());
        on_progress(current);
        if is_complete(current) {
            break;
        }
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => SplashOutcome::Cancelled,
        _ = sleep(REVEAL_DELAY) => {
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "splash finished");
            on_complete();
            SplashOutcome::Completed
        }
    }
}
