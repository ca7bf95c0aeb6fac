use std::sync::Arc;
use std::time::Duration;

use crate::state::AppState;

pub async fn run_tasks(state: Arc<AppState>) {
    let mut interval_timer = tokio::time::interval(Duration::from_secs(60 * 60));
    loop {
        interval_timer.tick().await;
        let removed = state.purge_sessions();
        if removed > 0 {
            tracing::info!("expired sessions removed: {removed}");
        }
    }
}
