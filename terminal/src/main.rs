//! BRINE console entry point.
//!
//! Reads lines from stdin. Chat input is dispatched on a background task so
//! commands (`/cancel`, `/wallet`, ...) keep working while BRINE thinks.

use std::io::Write;
use std::sync::Arc;
use terminal::{logger, App, Command, TerminalConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = TerminalConfig::from_env()?;
    let _log_guard = logger::init(&config.log_dir)?;

    let app = Arc::new(App::from_config(&config)?);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("BRINE // the Herobrine of Solana");
    let username = loop {
        prompt("Enter your username: ")?;
        match lines.next_line().await? {
            Some(name) if !name.trim().is_empty() => break name,
            Some(_) => continue,
            None => return Ok(()),
        }
    };
    print!("{}", app.start(&username).await);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Chat(text) => {
                let app = app.clone();
                tokio::spawn(async move {
                    let out = app.send(&text).await;
                    if !out.is_empty() {
                        println!("{}", out.trim_end());
                    }
                });
            }
            command => print!("{}", app.execute(command).await),
        }
    }

    tracing::info!("[APP] Console client exiting");
    Ok(())
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{}", text);
    std::io::stdout().flush()
}
