use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation, sleeping for each entry of `delays` between
/// attempts.
///
/// The operation runs at most `delays.len() + 1` times; the last error is
/// returned when every attempt fails.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, delays: &[Duration]) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = delays.len() + 1;

    for (i, delay) in delays.iter().enumerate() {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                warn!(
                    "Request failed (attempt {}/{total}): {e}. Retrying after {}ms...",
                    i + 1,
                    delay.as_millis()
                );
                sleep(*delay).await;
            }
        }
    }

    operation().await
}
