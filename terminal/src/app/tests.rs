//! End-to-end tests for [`App`] with mock collaborators.

use super::*;
use crate::core::service::WalletEvent;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::dto::chat::ChatMessage;
use shared::dto::wallet::{CurrencyDisplay, WalletSnapshot, WalletSnapshotResponse};
use std::time::Duration;
use tokio::sync::broadcast;

const ADDRESS: &str = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";

// region: --- Mocks

#[derive(Default)]
struct MockBackend {
    chat_calls: Mutex<Vec<Vec<ChatMessage>>>,
    chat_error: Option<AppError>,
    snapshot_delay: Option<Duration>,
}

#[async_trait]
impl ChatApi for MockBackend {
    async fn send_chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.chat_calls.lock().push(messages);
        match &self.chat_error {
            Some(e) => Err(e.clone()),
            None => Ok("Hrrrm. I see you.".to_string()),
        }
    }
}

#[async_trait]
impl WalletApi for MockBackend {
    async fn wallet_snapshot(&self, address: &str) -> Result<WalletSnapshotResponse> {
        if let Some(delay) = self.snapshot_delay {
            tokio::time::sleep(delay).await;
        }
        let snapshot = WalletSnapshot {
            address: Some(address.to_string()),
            native_balance: Some(2.5),
            tokens: Vec::new(),
            loading: false,
        };
        let summary = snapshot.summary("SOL");
        Ok(WalletSnapshotResponse { snapshot, summary })
    }
}

struct MockWallet {
    key: Mutex<Option<String>>,
    events: broadcast::Sender<WalletEvent>,
}

impl MockWallet {
    fn new(connected: bool) -> Arc<Self> {
        let (events, _) = broadcast::channel(8);
        Arc::new(Self {
            key: Mutex::new(connected.then(|| ADDRESS.to_string())),
            events,
        })
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<String> {
        *self.key.lock() = Some(ADDRESS.to_string());
        let _ = self.events.send(WalletEvent::Connected(ADDRESS.to_string()));
        Ok(ADDRESS.to_string())
    }

    async fn disconnect(&self) -> Result<()> {
        *self.key.lock() = None;
        let _ = self.events.send(WalletEvent::Disconnected);
        Ok(())
    }

    fn public_key(&self) -> Option<String> {
        self.key.lock().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

fn app_with(backend: Arc<MockBackend>, wallet: Arc<MockWallet>) -> App {
    App::new(backend.clone(), backend, wallet, "SOL")
}

// endregion: --- Mocks

#[tokio::test]
async fn test_start_opens_new_chat() {
    let app = app_with(Arc::new(MockBackend::default()), MockWallet::new(false));
    let out = app.start("steve").await;

    assert!(out.contains("Welcome, STEVE"));
    let store = app.conversations.read();
    assert_eq!(store.active_session().map(|s| s.title.as_str()), Some("New Chat"));
}

#[tokio::test]
async fn test_start_adopts_connected_wallet() {
    let app = app_with(Arc::new(MockBackend::default()), MockWallet::new(true));
    let out = app.start("alex").await;

    assert!(out.contains("2.5000 SOL"));
    assert_eq!(app.wallet.read().snapshot.address.as_deref(), Some(ADDRESS));
}

#[tokio::test]
async fn test_chat_round_trip_renders_reply() {
    let backend = Arc::new(MockBackend::default());
    let app = app_with(backend.clone(), MockWallet::new(false));
    app.start("steve").await;

    let out = app.execute(Command::parse("gm")).await;
    assert_eq!(out, "<BRINE> Hrrrm. I see you.");
    assert_eq!(backend.chat_calls.lock().len(), 1);

    let transcript = app.execute(Command::Open(1)).await;
    assert!(transcript.contains("<STEVE> gm\n"));
    assert!(transcript.contains("<BRINE> Hrrrm. I see you.\n"));
}

#[tokio::test]
async fn test_server_error_becomes_assistant_message() {
    let backend = Arc::new(MockBackend {
        chat_error: Some(AppError::Network("HTTP 500: provider down".to_string())),
        ..MockBackend::default()
    });
    let app = app_with(backend, MockWallet::new(false));
    app.start("steve").await;

    let out = app.send("hello?").await;
    assert!(out.starts_with("<BRINE> I apologize"));

    let messages = app.conversations.read().active_session().unwrap().messages.clone();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], ChatMessage::user("hello?"));
}

#[tokio::test]
async fn test_roast_without_wallet_never_calls_backend() {
    let backend = Arc::new(MockBackend::default());
    let app = app_with(backend.clone(), MockWallet::new(false));
    app.start("steve").await;

    let out = app.send("@roastme").await;
    assert!(out.contains("Connect your wallet first"));
    assert!(backend.chat_calls.lock().is_empty());
}

#[tokio::test]
async fn test_wallet_commands() {
    let app = app_with(Arc::new(MockBackend::default()), MockWallet::new(false));
    app.start("steve").await;

    assert!(app.execute(Command::Address).await.contains("/connect"));

    let panel = app.execute(Command::Connect).await;
    assert!(panel.contains("2.5000 SOL"));
    assert_eq!(app.execute(Command::Address).await, format!("{}\n", ADDRESS));

    let usd = app.execute(Command::Toggle).await;
    assert_eq!(app.view.read().display, CurrencyDisplay::Usd);
    assert!(usd.contains("$0.00"));

    app.execute(Command::Disconnect).await;
    assert_eq!(app.wallet.read().snapshot, WalletSnapshot::empty());
    assert!(app.execute(Command::Refresh).await.contains("not connected"));
}

#[tokio::test]
async fn test_sessions_listing_and_switching() {
    let app = app_with(Arc::new(MockBackend::default()), MockWallet::new(false));
    app.start("steve").await;
    app.send("first chat").await;
    app.execute(Command::New).await;

    let list = app.execute(Command::Chats).await;
    let lines: Vec<_> = list.lines().collect();
    assert!(lines[1].starts_with("*  1. New Chat"));
    assert!(lines[2].starts_with("   2. New Chat  (2 messages"));

    let transcript = app.execute(Command::Open(2)).await;
    assert!(transcript.contains("<STEVE> first chat"));
    assert!(app.execute(Command::Open(9)).await.contains("No chat #9"));
    assert!(app.execute(Command::Open(0)).await.contains("No chat #0"));
}

#[tokio::test]
async fn test_cancel_without_pending_reply() {
    let app = app_with(Arc::new(MockBackend::default()), MockWallet::new(false));
    app.start("steve").await;
    assert!(app.execute(Command::Cancel).await.contains("Nothing to cancel"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_connect_panel_shows_loaded_balances() {
    for _ in 0..50 {
        let backend = Arc::new(MockBackend {
            snapshot_delay: Some(Duration::from_millis(20)),
            ..MockBackend::default()
        });
        let app = app_with(backend, MockWallet::new(false));

        let panel = app.execute(Command::Connect).await;
        assert!(panel.contains("2.5000 SOL"), "panel before balances loaded: {}", panel);
        assert!(!panel.contains("Loading..."));
    }
}
