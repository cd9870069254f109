//! Background API jobs to keep the UI loop responsive.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use super::state::AppState;
use super::sync::{self, Command, SyncUpdate};
use crate::core::api::CarApi;

/// Spawns commands on the runtime and routes their results back to the UI
/// loop.  Nothing is de-duplicated or cancelled; stale refreshes are
/// filtered by generation when applied.
pub struct Dispatcher {
    api: Arc<dyn CarApi>,
    tx: mpsc::UnboundedSender<SyncUpdate>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn CarApi>) -> (Self, mpsc::UnboundedReceiver<SyncUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, tx }, rx)
    }

    pub fn dispatch(&self, state: &mut AppState, cmd: Command) {
        debug!(?cmd, "dispatch");
        state.in_flight += 1;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let update = sync::execute(api.as_ref(), cmd).await;
            let _ = tx.send(update);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::RefreshCause;
    use crate::config::AppConfig;
    use crate::core::api::fake::{car, FakeCarApi};

    #[tokio::test]
    async fn results_come_back_over_the_channel() {
        let api = Arc::new(FakeCarApi::with_catalog(vec![car("C1", "Tata", "Nexon", true)]));
        let (dispatcher, mut rx) = Dispatcher::new(api.clone());
        let mut state = AppState::new(AppConfig::default());

        let cmd = state.begin_refresh(RefreshCause::Load);
        dispatcher.dispatch(&mut state, cmd);
        assert_eq!(state.in_flight, 1);

        let update = rx.recv().await.unwrap();
        assert_eq!(state.apply(update), None);
        assert_eq!(state.in_flight, 0);
        assert_eq!(state.cards().len(), 1);
        assert_eq!(api.list_calls(), 1);
    }
}
