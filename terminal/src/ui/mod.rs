//! # Console Rendering
//!
//! Plain-text rendering of the transcript, session list and wallet panel.
//! Every function returns a `String`; printing is left to the REPL.

pub mod render;

pub use render::{help, message_line, notice, session_list, transcript, wallet_panel};
