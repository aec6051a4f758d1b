use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;

use crate::store::WebhookStore;

/// Start the background task that removes expired endpoints.
///
/// Without it `expires_at` is advisory only. The first interval tick fires
/// immediately and is skipped, so the first sweep happens one full period
/// after startup.
pub fn spawn_sweeper(store: Arc<dyn WebhookStore>, period: Duration) -> JoinHandle<()> {
    tracing::info!(period_secs = period.as_secs(), "Expired endpoint sweeper started");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            sweep_once(store.as_ref(), OffsetDateTime::now_utc());
        }
    })
}

/// Run one sweep against `now` and report how many endpoints were dropped
pub fn sweep_once(store: &dyn WebhookStore, now: OffsetDateTime) -> usize {
    let removed = store.purge_expired(now);
    if removed > 0 {
        tracing::info!(
            removed,
            remaining = store.endpoint_count(),
            "Purged expired endpoints"
        );
    } else {
        tracing::debug!("No expired endpoints to purge");
    }
    removed
}
