//! Terminal feedback while a remote call is in flight.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// Run `fut` to completion with a spinner on stderr, then clear the
/// spinner line and return the future's output.
///
/// Stderr keeps the spinner out of stdout output like printed URLs and
/// manifests.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
    let message = message.to_string();

    let handle = tokio::spawn(async move {
        let mut i = 0;
        loop {
            let frame = FRAMES[i % FRAMES.len()];
            // \r moves to start of line, \x1b[2K clears the line
            eprint!("\x1b[2K\r{frame} {message}");
            let _ = std::io::stderr().flush();

            tokio::select! {
                _ = tokio::time::sleep(INTERVAL) => {}
                _ = cancel_rx.changed() => break,
            }
            i += 1;
        }
        // Clear the spinner line
        eprint!("\x1b[2K\r");
        let _ = std::io::stderr().flush();
    });

    let out = fut.await;

    let _ = cancel_tx.send(true);
    let _ = handle.await;

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_single_braille_chars() {
        for frame in FRAMES {
            assert_eq!(frame.chars().count(), 1);
        }
    }

    #[tokio::test]
    async fn returns_the_future_output() {
        let value = with_spinner("working", async { 41 + 1 }).await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn survives_a_slow_future() {
        let value = with_spinner("slow", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "done"
        })
        .await;
        assert_eq!(value, "done");
    }
}
