//! # REPL Commands
//!
//! Slash commands understood by the console. Any line that does not start
//! with `/` is chat input (including `@roastme`).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    New,
    Chats,
    /// 1-based index into the session list
    Open(usize),
    Connect,
    Disconnect,
    Refresh,
    Wallet,
    Toggle,
    Address,
    Cancel,
    Help,
    Quit,
    /// Recognized command with bad arguments; carries the usage line
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Chat(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match name.as_str() {
            "new" => Command::New,
            "chats" => Command::Chats,
            "open" => match arg.and_then(|a| a.parse::<usize>().ok()) {
                Some(n) if n > 0 => Command::Open(n),
                _ => Command::Usage("/open <n>  (see /chats for numbers)"),
            },
            "connect" => Command::Connect,
            "disconnect" => Command::Disconnect,
            "refresh" => Command::Refresh,
            "wallet" => Command::Wallet,
            "toggle" => Command::Toggle,
            "address" | "copy" => Command::Address,
            "cancel" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}
