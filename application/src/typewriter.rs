//! Timed, cancellable character-by-character reveal of a reply.

use std::time::Duration;

use domain::reveal::prefixes;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

/// Lazily yields growing prefixes of `text`, one `char` per `char_delay`.
///
/// The first character appears immediately. The stream stops early once
/// `cancel` fires. Each call starts an independent reveal.
pub fn reveal(
    text: impl Into<String>,
    char_delay: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = String> {
    let text = text.into();
    let ends: Vec<usize> = prefixes(&text).map(str::len).collect();

    futures::stream::unfold(
        (text, ends.into_iter().enumerate(), cancel),
        move |(text, mut ends, cancel)| async move {
            let (step, end) = ends.next()?;
            if cancel.is_cancelled() {
                return None;
            }
            if step > 0 && !char_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    _ = tokio::time::sleep(char_delay) => {}
                }
            }
            let prefix = text[..end].to_string();
            Some((prefix, (text, ends, cancel)))
        },
    )
}

/// Drive a reveal to the end, handing each prefix to `on_prefix`.
pub async fn reveal_with<F>(
    text: &str,
    char_delay: Duration,
    cancel: CancellationToken,
    mut on_prefix: F,
) -> RevealOutcome
where
    F: FnMut(&str),
{
    let total = text.len();
    let stream = reveal(text, char_delay, cancel);
    futures::pin_mut!(stream);

    let mut shown = 0;
    while let Some(prefix) = stream.next().await {
        shown = prefix.len();
        on_prefix(&prefix);
    }

    if shown == total {
        RevealOutcome::Completed
    } else {
        RevealOutcome::Cancelled
    }
}
