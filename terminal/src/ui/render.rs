//! # Render Functions
//!
//! ```text
//! <BRINE> Greetings, mortal.
//! <STEVE> gm
//!
//! ── Wallet ─────────────────────────────
//!   8W6Q...JKAL               2.6667 SOL
//!   SOL              2.0000      $300.00
//! ```

use crate::app::conversation::Session;
use crate::app::state::WalletState;
use shared::dto::chat::{ChatMessage, ChatRole};
use shared::dto::wallet::CurrencyDisplay;
use shared::utils::{format_token_line, format_total, truncate_address};
use std::fmt::Write;

const RULE: &str = "──────────────────────────────────────────";

/// One transcript line. Content is printed exactly as stored.
pub fn message_line(message: &ChatMessage, user_label: &str) -> String {
    match message.role {
        ChatRole::Assistant => format!("<BRINE> {}", message.content),
        ChatRole::User => format!("<{}> {}", user_label, message.content),
        ChatRole::System => format!("<SYSTEM> {}", message.content),
    }
}

pub fn transcript(session: &Session, user_label: &str) -> String {
    let mut out = format!("── {} ──\n", session.title);
    for message in &session.messages {
        out.push_str(&message_line(message, user_label));
        out.push('\n');
    }
    out
}

/// Numbered list, most recent first; the active session is starred.
pub fn session_list(sessions: &[Session], active: Option<&str>) -> String {
    if sessions.is_empty() {
        return notice("No chats yet.");
    }

    let mut out = String::from("Chats:\n");
    for (i, session) in sessions.iter().enumerate() {
        let marker = if active == Some(session.id.as_str()) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:>2}. {}  ({} messages, {})",
            marker,
            i + 1,
            session.title,
            session.messages.len(),
            session.created_at.format("%H:%M")
        );
    }
    out
}

pub fn wallet_panel(state: &WalletState, display: CurrencyDisplay, native_symbol: &str) -> String {
    let snapshot = &state.snapshot;
    let Some(address) = snapshot.address.as_deref() else {
        return notice("Wallet not connected. Use /connect.");
    };

    let total = match display {
        CurrencyDisplay::Usd => format_total(&state.summary, display),
        CurrencyDisplay::Native => format!("{} {}", format_total(&state.summary, display), native_symbol),
    };

    let mut out = format!("── Wallet {}\n", RULE);
    let _ = writeln!(out, "  {:<24} {:>16}", truncate_address(address), total);
    if snapshot.loading {
        out.push_str("  Loading...\n");
    }
    if snapshot.tokens.is_empty() && !snapshot.loading {
        out.push_str("  No tokens found\n");
    }
    for token in &snapshot.tokens {
        let _ = writeln!(out, "  {}", format_token_line(token));
    }
    out
}

pub fn notice(text: &str) -> String {
    format!("* {}\n", text)
}

pub fn help() -> String {
    let rows = [
        ("<text>", "Chat with BRINE"),
        ("@roastme", "Let Herobrine roast your connected wallet"),
        ("/new", "Start a new chat"),
        ("/chats", "List chats"),
        ("/open <n>", "Switch to chat n"),
        ("/cancel", "Abandon the pending reply"),
        ("/connect", "Connect the local keypair wallet"),
        ("/disconnect", "Disconnect the wallet"),
        ("/refresh", "Reload balances"),
        ("/wallet", "Show balances"),
        ("/toggle", "Switch the total between SOL and USD"),
        ("/address", "Print the full wallet address"),
        ("/quit", "Exit"),
    ];

    let mut out = String::from("Commands:\n");
    for (cmd, what) in rows {
        let _ = writeln!(out, "  {:<12} {}", cmd, what);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::dto::wallet::{BalanceSummary, TokenBalance, WalletSnapshot};

    #[test]
    fn test_message_line_is_verbatim() {
        let content = "  multi\nline <b>content</b>  ";
        assert_eq!(
            message_line(&ChatMessage::assistant(content), "STEVE"),
            format!("<BRINE> {}", content)
        );
        assert_eq!(message_line(&ChatMessage::user("gm"), "STEVE"), "<STEVE> gm");
    }

    #[test]
    fn test_session_list_marks_active() {
        let sessions = vec![
            Session {
                id: "b".into(),
                title: "second".into(),
                created_at: Utc::now(),
                messages: vec![ChatMessage::user("x")],
            },
            Session {
                id: "a".into(),
                title: "first".into(),
                created_at: Utc::now(),
                messages: vec![],
            },
        ];
        let out = session_list(&sessions, Some("a"));
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[1].starts_with("   1. second  (1 messages"));
        assert!(lines[2].starts_with("*  2. first  (0 messages"));
    }

    #[test]
    fn test_wallet_panel_totals_follow_toggle() {
        let state = WalletState {
            snapshot: WalletSnapshot {
                address: Some("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL".into()),
                native_balance: Some(2.5),
                tokens: vec![],
                loading: false,
            },
            summary: BalanceSummary {
                total_usd: 0.0,
                native_price: 0.0,
                total_native: 2.5,
            },
            ..WalletState::default()
        };

        let native = wallet_panel(&state, CurrencyDisplay::Native, "SOL");
        assert!(native.contains("8W6Q...JKAL"));
        assert!(native.contains("2.5000 SOL"));
        assert!(native.contains("No tokens found"));

        let usd = wallet_panel(&state, CurrencyDisplay::Usd, "SOL");
        assert!(usd.contains("$0.00"));
    }

    #[test]
    fn test_wallet_panel_lists_tokens() {
        let state = WalletState {
            snapshot: WalletSnapshot {
                address: Some("addr".into()),
                native_balance: Some(1.0),
                tokens: vec![TokenBalance {
                    symbol: "BONK".into(),
                    name: "Bonk".into(),
                    amount: 1000.0,
                    usd_value: Some(0.02),
                }],
                loading: true,
            },
            ..WalletState::default()
        };
        let out = wallet_panel(&state, CurrencyDisplay::Usd, "SOL");
        assert!(out.contains("Loading..."));
        assert!(out.contains("1000.0000"));
        assert!(out.contains("$0.02"));
    }

    #[test]
    fn test_disconnected_panel() {
        let out = wallet_panel(&WalletState::default(), CurrencyDisplay::Native, "SOL");
        assert!(out.contains("/connect"));
    }
}
