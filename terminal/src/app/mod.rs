//! # Application Orchestrator
//!
//! [`App`] owns the three stores and wires them to the dispatcher, the wallet
//! bridge and the renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  REPL (main.rs)                                              │
//! │   line ──► Command::parse ──► App::execute / App::send       │
//! └───────────────┬───────────────────────────────┬──────────────┘
//!                 │                               │
//!   ┌─────────────▼────────────┐    ┌─────────────▼────────────┐
//!   │  ChatDispatcher          │    │  WalletBridge            │
//!   │  - roast / normal path   │    │  - connect / disconnect  │
//!   │  - in-flight guard, seq  │    │  - generation refresh    │
//!   └─────────────┬────────────┘    └─────────────┬────────────┘
//!                 │ Arc<RwLock<_>>                │ Arc<RwLock<_>>
//!   ┌─────────────▼────────────┐    ┌─────────────▼────────────┐
//!   │  ConversationStore       │◄───┤  WalletState             │
//!   └──────────────────────────┘    └──────────────────────────┘
//!                  ViewState (display toggle, username)
//! ```
//!
//! ## State Management Pattern
//!
//! Each store sits behind its own `Arc<parking_lot::RwLock<_>>`. Locks are
//! taken for a single read or update and are never held across an `.await`.

pub mod commands;
pub mod conversation;
pub mod dispatcher;
pub mod state;
pub mod wallet;

pub use commands::Command;
pub use conversation::{ConversationStore, InFlightGuard, Session, SessionId, SharedConversations};
pub use dispatcher::{ChatDispatcher, DispatchOutcome};
pub use state::{ViewState, WalletState};
pub use wallet::{RefreshOutcome, WalletBridge, WatchGuard};

use crate::config::TerminalConfig;
use crate::core::service::{AutoApprove, ChatApi, WalletApi, WalletProvider};
use crate::services::{ApiClient, KeypairWallet};
use crate::ui;
use lib_core::{AppError, Result};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct App {
    pub conversations: SharedConversations,
    pub wallet: Arc<RwLock<WalletState>>,
    pub view: Arc<RwLock<ViewState>>,
    dispatcher: ChatDispatcher,
    bridge: WalletBridge,
    native_symbol: String,
    _watch: WatchGuard,
}

impl App {
    /// Build from injected collaborators. Must run inside a tokio runtime.
    pub fn new(
        chat_api: Arc<dyn ChatApi>,
        wallet_api: Arc<dyn WalletApi>,
        provider: Arc<dyn WalletProvider>,
        native_symbol: impl Into<String>,
    ) -> Self {
        let conversations = ConversationStore::shared();
        let wallet = Arc::new(RwLock::new(WalletState::default()));
        let view = Arc::new(RwLock::new(ViewState::default()));

        let dispatcher = ChatDispatcher::new(chat_api, conversations.clone(), wallet.clone());
        let bridge = WalletBridge::new(provider, wallet_api, wallet.clone());
        let watch = bridge.watch();

        Self {
            conversations,
            wallet,
            view,
            dispatcher,
            bridge,
            native_symbol: native_symbol.into(),
            _watch: watch,
        }
    }

    /// Production wiring: HTTP client for both endpoints and the keypair wallet.
    ///
    /// Typing `/connect` is the user's approval, so the provider auto-approves.
    pub fn from_config(config: &TerminalConfig) -> Result<Self> {
        let api = Arc::new(ApiClient::from_config(config)?);
        let provider = Arc::new(KeypairWallet::new(config.keypair_path.clone(), Arc::new(AutoApprove)));

        tracing::info!(
            api = %config.api_base_url,
            keypair = %config.keypair_path.display(),
            "[APP] Console client configured"
        );

        Ok(Self::new(api.clone(), api, provider, config.native_symbol.clone()))
    }

    /// Set the username, open the first chat and adopt a pre-existing wallet
    /// connection.
    pub async fn start(&self, username: &str) -> String {
        self.view.write().username = Some(username.trim().to_string());
        self.conversations.write().new_chat();

        let mut out = ui::notice(&format!(
            "Welcome, {}. Herobrine is listening. Type /help for commands.",
            self.view.read().user_label()
        ));
        if self.bridge.adopt_existing().await.is_some() {
            out.push_str(&self.wallet_panel());
        }
        out
    }

    /// Dispatch chat input and render the assistant line it produced.
    pub async fn send(&self, text: &str) -> String {
        match self.dispatcher.submit(text).await {
            Ok(DispatchOutcome::Replied(reply))
            | Ok(DispatchOutcome::Failed(reply))
            | Ok(DispatchOutcome::Canned(reply)) => {
                ui::message_line(&shared::dto::chat::ChatMessage::assistant(reply), "")
            }
            Ok(DispatchOutcome::Ignored) | Ok(DispatchOutcome::Stale) => String::new(),
            Err(AppError::DispatchInProgress(_)) => {
                ui::notice("BRINE is still thinking... (/cancel abandons the pending reply)")
            }
            Err(e) => ui::notice(&e.to_string()),
        }
    }

    /// Run a non-chat command and return the text to print.
    pub async fn execute(&self, command: Command) -> String {
        match command {
            Command::Chat(text) => self.send(&text).await,
            Command::New => {
                self.conversations.write().new_chat();
                ui::notice("Started a new chat.")
            }
            Command::Chats => {
                let store = self.conversations.read();
                ui::session_list(store.list_sessions(), store.active_id())
            }
            Command::Open(n) => self.open(n),
            Command::Connect => match self.bridge.connect().await {
                Ok(_) => self.wallet_panel(),
                Err(e) => ui::notice(&e.to_string()),
            },
            Command::Disconnect => match self.bridge.disconnect().await {
                Ok(()) => ui::notice("Wallet disconnected."),
                Err(e) => ui::notice(&e.to_string()),
            },
            Command::Refresh => match self.bridge.refresh().await {
                RefreshOutcome::Applied => self.wallet_panel(),
                RefreshOutcome::Skipped if self.bridge.address().is_none() => {
                    ui::notice("Wallet not connected. Use /connect.")
                }
                RefreshOutcome::Skipped => ui::notice("Already refreshing..."),
                RefreshOutcome::Stale => String::new(),
                RefreshOutcome::Failed => ui::notice("Could not load balances; showing the last snapshot."),
            },
            Command::Wallet => self.wallet_panel(),
            Command::Toggle => {
                self.view.write().toggle_display();
                self.wallet_panel()
            }
            Command::Address => match self.bridge.address() {
                Some(address) => format!("{}\n", address),
                None => ui::notice("Wallet not connected. Use /connect."),
            },
            Command::Cancel => self.cancel(),
            Command::Help => ui::help(),
            Command::Quit => String::new(),
            Command::Usage(usage) => ui::notice(&format!("Usage: {}", usage)),
            Command::Unknown(cmd) => ui::notice(&format!("Unknown command '{}'. Type /help.", cmd)),
        }
    }

    fn open(&self, n: usize) -> String {
        let mut store = self.conversations.write();
        let Some(id) = n
            .checked_sub(1)
            .and_then(|i| store.list_sessions().get(i))
            .map(|s| s.id.clone())
        else {
            return ui::notice(&format!("No chat #{}. Type /chats.", n));
        };

        if let Err(e) = store.select_session(&id) {
            return ui::notice(&e.to_string());
        }

        let label = self.view.read().user_label();
        store
            .active_session()
            .map(|s| ui::transcript(s, &label))
            .unwrap_or_default()
    }

    fn cancel(&self) -> String {
        let mut store = self.conversations.write();
        let superseded = store
            .active_id()
            .map(str::to_string)
            .is_some_and(|id| store.supersede_dispatch(&id));

        if superseded {
            ui::notice("Abandoned the pending reply.")
        } else {
            ui::notice("Nothing to cancel.")
        }
    }

    fn wallet_panel(&self) -> String {
        let display = self.view.read().display;
        let state = self.wallet.read();
        ui::wallet_panel(&state, display, &self.native_symbol)
    }
}

#[cfg(test)]
mod tests;
