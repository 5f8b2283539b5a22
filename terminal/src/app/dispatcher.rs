//! # Chat Dispatcher
//!
//! Turns one line of user input into at most one completion call and folds the
//! result back into the [`ConversationStore`](super::conversation::ConversationStore).
//!
//! ## Flow
//!
//! ```text
//! input ──trim──► empty? ──► Ignored
//!                   │
//!                   ├─ "@roastme" ──► wallet? ──no──► user msg + canned reply (no call)
//!                   │                   │
//!                   │                  yes──► [directive, "Roast this wallet!"] ─┐
//!                   │                                                          │
//!                   └─ text ──► append user msg ──► [history..., msg] ─────────┤
//!                                                                              ▼
//!                                               reply ──► latest seq? ──no──► Stale
//!                                                                │
//!                                                               yes──► append assistant msg
//! ```
//!
//! The user message is appended before the call and is never rolled back.
//! Failures become an assistant message; nothing is retried.

use crate::app::conversation::{InFlightGuard, SharedConversations};
use crate::app::state::WalletState;
use crate::core::service::ChatApi;
use lib_core::Result;
use parking_lot::RwLock;
use shared::dto::chat::ChatMessage;
use shared::dto::wallet::WalletSnapshot;
use std::sync::Arc;

/// Reserved input that asks for a wallet roast (compared after trim + lowercase).
pub const ROAST_COMMAND: &str = "@roastme";
/// User turn sent after the roast directive.
pub const ROAST_USER_MESSAGE: &str = "Roast this wallet!";
pub const ROAST_NO_WALLET: &str = "I can't roast what I can't see! Connect your wallet first, if you dare...";
pub const ROAST_FAILED: &str = "Even Herobrine couldn't process this roast. Try again later!";

/// Result of one [`ChatDispatcher::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank input, nothing happened.
    Ignored,
    /// The endpoint answered; the reply was appended.
    Replied(String),
    /// The call failed; this error text was appended as an assistant message.
    Failed(String),
    /// Answered locally without calling the endpoint.
    Canned(String),
    /// A newer dispatch superseded this one; the reply was dropped.
    Stale,
}

pub struct ChatDispatcher {
    api: Arc<dyn ChatApi>,
    conversations: SharedConversations,
    wallet: Arc<RwLock<WalletState>>,
}

impl ChatDispatcher {
    pub fn new(
        api: Arc<dyn ChatApi>,
        conversations: SharedConversations,
        wallet: Arc<RwLock<WalletState>>,
    ) -> Self {
        Self {
            api,
            conversations,
            wallet,
        }
    }

    /// Dispatch one line of input against the active session.
    ///
    /// Fails only with `DispatchInProgress` (or `UnknownSession` if the session
    /// vanished); remote failures are reported through [`DispatchOutcome::Failed`].
    pub async fn submit(&self, input: &str) -> Result<DispatchOutcome> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(DispatchOutcome::Ignored);
        }

        let session_id = self.conversations.write().ensure_active(text);
        let guard = InFlightGuard::acquire(&self.conversations, &session_id)?;

        if text.to_lowercase() == ROAST_COMMAND {
            self.roast(text, guard).await
        } else {
            self.converse(text, guard).await
        }
    }

    async fn converse(&self, text: &str, guard: InFlightGuard) -> Result<DispatchOutcome> {
        let session_id = guard.session_id().to_string();

        let outgoing = {
            let mut store = self.conversations.write();
            store.append_message(&session_id, ChatMessage::user(text))?;
            store
                .session(&session_id)
                .map(|s| s.messages.clone())
                .unwrap_or_default()
        };

        tracing::info!(
            session = %session_id,
            seq = guard.seq(),
            "[CHAT] Sending {} messages",
            outgoing.len()
        );

        let reply = self.api.send_chat(outgoing).await;
        self.settle(guard, reply, |reason| {
            format!(
                "I apologize, but I encountered an error while processing your request: {}. Please try again.",
                reason
            )
        })
    }

    async fn roast(&self, text: &str, guard: InFlightGuard) -> Result<DispatchOutcome> {
        let session_id = guard.session_id().to_string();
        let snapshot = self.wallet.read().snapshot.clone();

        self.conversations
            .write()
            .append_message(&session_id, ChatMessage::user(text))?;

        if snapshot.address.is_none() {
            tracing::info!(session = %session_id, "[CHAT] Roast requested without a wallet");
            self.conversations
                .write()
                .append_message(&session_id, ChatMessage::assistant(ROAST_NO_WALLET))?;
            return Ok(DispatchOutcome::Canned(ROAST_NO_WALLET.to_string()));
        }

        let outgoing = vec![
            ChatMessage::system(roast_directive(&snapshot)),
            ChatMessage::user(ROAST_USER_MESSAGE),
        ];

        tracing::info!(session = %session_id, seq = guard.seq(), "[CHAT] Sending wallet roast");

        let reply = self.api.send_chat(outgoing).await;
        self.settle(guard, reply, |_| ROAST_FAILED.to_string())
    }

    /// Append the reply (or the failure text) unless the dispatch went stale.
    fn settle(
        &self,
        guard: InFlightGuard,
        reply: Result<String>,
        failure_text: impl FnOnce(&str) -> String,
    ) -> Result<DispatchOutcome> {
        let session_id = guard.session_id();

        if !guard.is_current() {
            tracing::debug!(session = %session_id, seq = guard.seq(), "[CHAT] Dropping stale reply");
            return Ok(DispatchOutcome::Stale);
        }

        let (message, outcome) = match reply {
            Ok(content) => (
                ChatMessage::assistant(content.clone()),
                DispatchOutcome::Replied(content),
            ),
            Err(e) => {
                tracing::warn!(session = %session_id, code = e.code(), "[CHAT] Completion failed: {}", e);
                let text = failure_text(&e.details());
                (ChatMessage::assistant(text.clone()), DispatchOutcome::Failed(text))
            }
        };

        self.conversations.write().append_message(session_id, message)?;
        Ok(outcome)
    }
}

/// Build the one-off system directive describing `snapshot`.
pub fn roast_directive(snapshot: &WalletSnapshot) -> String {
    let holdings = snapshot
        .tokens
        .iter()
        .map(|t| {
            let usd = t
                .usd_value
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "0".to_string());
            format!("{} {} (Worth ${})", t.amount, t.symbol, usd)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are BRINE, a savage Minecraft Herobrine AI that roasts people's crypto wallets.\n\
         Here's the wallet data to roast:\n\
         - Wallet Address: {}\n\
         - SOL Balance: {} SOL\n\
         - Token Holdings: {}\n\
         Be creative, funny, and savage, but keep it Minecraft-themed. Reference Herobrine lore if possible.",
        snapshot.address.as_deref().unwrap_or_default(),
        snapshot.native_balance.unwrap_or(0.0),
        holdings
    )
}
