//! # Wallet Adapter Bridge
//!
//! Connects a [`WalletProvider`] to the wallet store and keeps the balance
//! snapshot in step with provider lifecycle events.
//!
//! ## Generations
//!
//! Every connect, disconnect and refresh bumps [`WalletState::generation`].
//! A refresh result is applied only if the generation it was started under is
//! still current, so a fetch that resolves after a disconnect (or after a newer
//! refresh) is dropped.

use crate::app::state::WalletState;
use crate::core::service::{WalletApi, WalletEvent, WalletProvider};
use lib_core::Result;
use parking_lot::RwLock;
use shared::dto::wallet::{BalanceSummary, WalletSnapshot};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// What a [`WalletBridge::refresh`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// Not connected, or a refresh is already loading.
    Skipped,
    /// Superseded before it resolved.
    Stale,
    /// Fetch failed; the previous snapshot stays.
    Failed,
}

#[derive(Clone)]
pub struct WalletBridge {
    provider: Arc<dyn WalletProvider>,
    api: Arc<dyn WalletApi>,
    state: Arc<RwLock<WalletState>>,
}

impl WalletBridge {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        api: Arc<dyn WalletApi>,
        state: Arc<RwLock<WalletState>>,
    ) -> Self {
        Self { provider, api, state }
    }

    pub fn state(&self) -> &Arc<RwLock<WalletState>> {
        &self.state
    }

    /// Connected address, if any.
    pub fn address(&self) -> Option<String> {
        self.state.read().snapshot.address.clone()
    }

    // region: --- Lifecycle

    /// Ask the provider to connect, then load balances.
    ///
    /// The refresh is awaited here, so the caller sees loaded balances.
    /// `WalletUnavailable` and `UserRejected` are logged and returned; nothing
    /// is retried.
    pub async fn connect(&self) -> Result<String> {
        let pending = PendingConnect::begin(&self.state);
        let address = match self.provider.connect().await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(code = e.code(), "[WALLET] Connect failed: {}", e);
                return Err(e);
            }
        };

        let adopted = self.adopt(&address);
        drop(pending);
        if adopted {
            self.refresh().await;
        }
        Ok(address)
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.provider.disconnect().await?;
        self.reset();
        Ok(())
    }

    /// Pick up a connection the provider already had at start-up.
    pub async fn adopt_existing(&self) -> Option<String> {
        let address = self.provider.public_key()?;
        tracing::info!("[WALLET] Provider already connected as {}", address);
        if self.adopt(&address) {
            self.refresh().await;
        }
        Some(address)
    }

    /// Forward provider events into the store until the guard is dropped.
    pub fn watch(&self) -> WatchGuard {
        let mut events = self.provider.subscribe();
        let bridge = self.clone();

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => bridge.handle_event(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("[WALLET] Missed {} provider events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        WatchGuard { handle }
    }

    /// Apply a provider event, ignoring ones the provider's current key
    /// contradicts (a late `Connected` after a disconnect, and vice versa).
    pub async fn handle_event(&self, event: WalletEvent) {
        let current = self.provider.public_key();
        match event {
            WalletEvent::Connected(address) if current.as_deref() == Some(address.as_str()) => {
                if self.state.read().connecting > 0 {
                    tracing::debug!("[WALLET] Connect for {} handled by its caller", address);
                    return;
                }
                if self.adopt(&address) {
                    self.refresh().await;
                }
            }
            WalletEvent::Disconnected if current.is_none() => self.reset(),
            event => tracing::debug!("[WALLET] Ignoring outdated event {:?}", event),
        }
    }

    /// Record `address` as connected. Returns `false` if it already was.
    fn adopt(&self, address: &str) -> bool {
        let mut state = self.state.write();
        if state.snapshot.address.as_deref() == Some(address) {
            return false;
        }

        state.generation += 1;
        state.snapshot = WalletSnapshot {
            address: Some(address.to_string()),
            ..WalletSnapshot::empty()
        };
        state.summary = BalanceSummary::default();
        true
    }

    /// Hard reset to the empty snapshot.
    fn reset(&self) {
        let mut state = self.state.write();
        if state.snapshot.address.is_none() {
            return;
        }
        state.generation += 1;
        state.snapshot = WalletSnapshot::empty();
        state.summary = BalanceSummary::default();
        tracing::info!("[WALLET] Cleared wallet snapshot");
    }

    // endregion: --- Lifecycle

    // region: --- Balances

    /// Reload balances for the connected address.
    ///
    /// Keeps the displayed values while loading. Errors are logged and
    /// swallowed.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (address, generation) = {
            let mut state = self.state.write();
            let Some(address) = state.snapshot.address.clone() else {
                return RefreshOutcome::Skipped;
            };
            if state.snapshot.loading {
                return RefreshOutcome::Skipped;
            }
            state.generation += 1;
            state.snapshot.loading = true;
            (address, state.generation)
        };

        tracing::debug!("[BALANCE] Refreshing {} (generation {})", address, generation);
        let result = self.api.wallet_snapshot(&address).await;

        let mut state = self.state.write();
        if state.generation != generation {
            tracing::debug!("[BALANCE] Dropping stale refresh (generation {})", generation);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(response) => {
                let mut snapshot = response.snapshot;
                snapshot.address = Some(address);
                snapshot.loading = false;
                tracing::info!(
                    tokens = snapshot.tokens.len(),
                    total_usd = response.summary.total_usd,
                    "[BALANCE] Snapshot updated"
                );
                state.snapshot = snapshot;
                state.summary = response.summary;
                RefreshOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(code = e.code(), "[BALANCE] Refresh failed: {}", e);
                state.snapshot.loading = false;
                RefreshOutcome::Failed
            }
        }
    }

    // endregion: --- Balances
}

/// Marks a bridge-initiated connect as pending until dropped.
struct PendingConnect<'a> {
    state: &'a RwLock<WalletState>,
}

impl<'a> PendingConnect<'a> {
    fn begin(state: &'a RwLock<WalletState>) -> Self {
        state.write().connecting += 1;
        Self { state }
    }
}

impl Drop for PendingConnect<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        state.connecting = state.connecting.saturating_sub(1);
    }
}

/// Owns the event-forwarding task; aborts it on drop.
#[derive(Debug)]
pub struct WatchGuard {
    handle: JoinHandle<()>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lib_core::AppError;
    use parking_lot::Mutex;
    use shared::dto::wallet::{TokenBalance, WalletSnapshotResponse};
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::{broadcast, Notify};

    const ADDRESS: &str = "WaLLet1111";

    struct MockProvider {
        result: Result<String>,
        key: Mutex<Option<String>>,
        events: broadcast::Sender<WalletEvent>,
    }

    impl MockProvider {
        fn new(result: Result<String>) -> Arc<Self> {
            let (events, _) = broadcast::channel(8);
            Arc::new(Self {
                result,
                key: Mutex::new(None),
                events,
            })
        }
    }

    #[async_trait]
    impl WalletProvider for MockProvider {
        async fn connect(&self) -> Result<String> {
            let address = self.result.clone()?;
            *self.key.lock() = Some(address.clone());
            Ok(address)
        }

        async fn disconnect(&self) -> Result<()> {
            *self.key.lock() = None;
            Ok(())
        }

        fn public_key(&self) -> Option<String> {
            self.key.lock().clone()
        }

        fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
            self.events.subscribe()
        }
    }

    /// Answers snapshot requests in order; optionally waits for a release first.
    struct MockWalletApi {
        replies: Mutex<VecDeque<Result<WalletSnapshotResponse>>>,
        gate: Option<Notify>,
        calls: Mutex<usize>,
    }

    impl MockWalletApi {
        fn new(replies: Vec<Result<WalletSnapshotResponse>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                gate: None,
                calls: Mutex::new(0),
            })
        }

        fn gated(replies: Vec<Result<WalletSnapshotResponse>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                gate: Some(Notify::new()),
                calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl WalletApi for MockWalletApi {
        async fn wallet_snapshot(&self, _address: &str) -> Result<WalletSnapshotResponse> {
            *self.calls.lock() += 1;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Network("no scripted reply".to_string())))
        }
    }

    fn response(native: f64, usd: f64) -> WalletSnapshotResponse {
        let snapshot = WalletSnapshot {
            address: Some(ADDRESS.to_string()),
            native_balance: Some(native),
            tokens: vec![TokenBalance {
                symbol: "SOL".to_string(),
                name: "Solana".to_string(),
                amount: native,
                usd_value: Some(usd),
            }],
            loading: false,
        };
        let summary = snapshot.summary("SOL");
        WalletSnapshotResponse { snapshot, summary }
    }

    fn bridge(provider: Arc<MockProvider>, api: Arc<MockWalletApi>) -> WalletBridge {
        WalletBridge::new(provider, api, Arc::new(RwLock::new(WalletState::default())))
    }

    #[tokio::test]
    async fn test_connect_loads_snapshot() {
        let b = bridge(MockProvider::new(Ok(ADDRESS.to_string())), MockWalletApi::new(vec![Ok(response(2.0, 300.0))]));

        assert_eq!(b.connect().await.unwrap(), ADDRESS);
        let state = b.state().read().clone();
        assert_eq!(state.snapshot.address.as_deref(), Some(ADDRESS));
        assert_eq!(state.snapshot.native_balance, Some(2.0));
        assert!(!state.snapshot.loading);
        assert_eq!(state.summary.native_price, 150.0);
    }

    #[tokio::test]
    async fn test_connect_errors_propagate() {
        let b = bridge(
            MockProvider::new(Err(AppError::UserRejected("User rejected the request".to_string()))),
            MockWalletApi::new(vec![]),
        );
        assert!(matches!(b.connect().await, Err(AppError::UserRejected(_))));
        assert_eq!(b.address(), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_values() {
        let api = MockWalletApi::new(vec![
            Ok(response(2.0, 300.0)),
            Err(AppError::Parse("bad json".to_string())),
        ]);
        let b = bridge(MockProvider::new(Ok(ADDRESS.to_string())), api);
        b.connect().await.unwrap();

        assert_eq!(b.refresh().await, RefreshOutcome::Failed);
        let state = b.state().read().clone();
        assert_eq!(state.snapshot.native_balance, Some(2.0));
        assert!(!state.snapshot.loading);
    }

    #[tokio::test]
    async fn test_refresh_skipped_when_disconnected() {
        let api = MockWalletApi::new(vec![]);
        let b = bridge(MockProvider::new(Ok(ADDRESS.to_string())), api.clone());
        assert_eq!(b.refresh().await, RefreshOutcome::Skipped);
        assert_eq!(*api.calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_refresh_resolving_after_disconnect_is_dropped() {
        let provider = MockProvider::new(Ok(ADDRESS.to_string()));
        let api = MockWalletApi::gated(vec![Ok(response(2.0, 300.0))]);
        let b = bridge(provider.clone(), api.clone());

        // Adopt without refreshing so the gated refresh below is the only call
        provider.connect().await.unwrap();
        assert!(b.adopt(ADDRESS));

        let pending = tokio::spawn({
            let b = b.clone();
            async move { b.refresh().await }
        });
        while *api.calls.lock() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(b.state().read().snapshot.loading);

        b.disconnect().await.unwrap();
        if let Some(gate) = &api.gate {
            gate.notify_one();
        }

        assert_eq!(pending.await.unwrap(), RefreshOutcome::Stale);
        assert_eq!(b.state().read().snapshot, WalletSnapshot::empty());
    }

    #[tokio::test]
    async fn test_adopt_existing_connection() {
        let provider = MockProvider::new(Ok(ADDRESS.to_string()));
        provider.connect().await.unwrap();
        let b = bridge(provider, MockWalletApi::new(vec![Ok(response(1.0, 150.0))]));

        assert_eq!(b.adopt_existing().await.as_deref(), Some(ADDRESS));
        assert_eq!(b.state().read().snapshot.native_balance, Some(1.0));
    }

    #[tokio::test]
    async fn test_watch_forwards_events_until_dropped() {
        let provider = MockProvider::new(Ok(ADDRESS.to_string()));
        let api = MockWalletApi::new(vec![Ok(response(2.0, 300.0))]);
        let b = bridge(provider.clone(), api);

        let guard = b.watch();
        *provider.key.lock() = Some(ADDRESS.to_string());
        provider.events.send(WalletEvent::Connected(ADDRESS.to_string())).unwrap();
        wait_for(|| b.state().read().snapshot.native_balance == Some(2.0)).await;

        *provider.key.lock() = None;
        provider.events.send(WalletEvent::Disconnected).unwrap();
        wait_for(|| b.address().is_none()).await;

        drop(guard);
        // Aborted task releases its receiver
        wait_for(|| provider.events.receiver_count() == 0).await;
    }

    #[tokio::test]
    async fn test_late_connected_event_after_disconnect_is_ignored() {
        let provider = MockProvider::new(Ok(ADDRESS.to_string()));
        let b = bridge(provider.clone(), MockWalletApi::new(vec![]));

        b.handle_event(WalletEvent::Connected(ADDRESS.to_string())).await;
        assert_eq!(b.address(), None);
    }

    #[tokio::test]
    async fn test_connected_event_during_connect_is_left_to_caller() {
        let provider = MockProvider::new(Ok(ADDRESS.to_string()));
        let api = MockWalletApi::new(vec![Ok(response(2.0, 300.0))]);
        let b = bridge(provider.clone(), api.clone());

        *provider.key.lock() = Some(ADDRESS.to_string());
        b.state().write().connecting = 1;
        b.handle_event(WalletEvent::Connected(ADDRESS.to_string())).await;
        assert_eq!(b.address(), None);
        assert_eq!(*api.calls.lock(), 0);

        b.state().write().connecting = 0;
        assert_eq!(b.connect().await.unwrap(), ADDRESS);
        assert_eq!(b.state().read().snapshot.native_balance, Some(2.0));
        assert_eq!(b.state().read().connecting, 0);
    }

    #[tokio::test]
    async fn test_failed_connect_clears_pending_flag() {
        let b = bridge(
            MockProvider::new(Err(AppError::WalletUnavailable("no keypair".to_string()))),
            MockWalletApi::new(vec![]),
        );
        assert!(b.connect().await.is_err());
        assert_eq!(b.state().read().connecting, 0);
    }

    #[test]
    fn test_overlapping_pending_connects_are_counted() {
        let state = RwLock::new(WalletState::default());
        let first = PendingConnect::begin(&state);
        let second = PendingConnect::begin(&state);
        drop(first);
        assert_eq!(state.read().connecting, 1);
        drop(second);
        assert_eq!(state.read().connecting, 0);
    }

    async fn wait_for(condition: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached");
    }
}
