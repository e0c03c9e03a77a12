mod utils;

use anyhow::Result;
use clap::Parser;
use chat_host::{resolve_api_key, ChatSession, KeyringStore, SystemDialer, VariantProfile};
use providers::GeminiClient;
use shared::agent_api::{Message, RequestState};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use utils::{load_settings_or_default, parse_input, CliArgs, Input};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CliArgs::parse();
    let mut settings = load_settings_or_default();
    if let Some(variant) = cli.variant {
        settings.variant = variant;
    }

    let store = KeyringStore::new(settings.variant.key_name());
    let api_key = resolve_api_key(&store, settings.default_key_from_env().as_deref());
    if api_key.is_none() {
        tracing::warn!(
            "no API key found; set {} to enable replies",
            settings.variant.key_name()
        );
    }

    let provider = GeminiClient::from_settings(&settings)?;
    let profile = VariantProfile::new(settings.variant, &settings.contact);
    let chat = Arc::new(ChatSession::new(
        profile,
        api_key,
        Arc::new(provider),
        Arc::new(SystemDialer),
    ));

    println!("== {} ==", chat.profile().title);
    print_new(&chat, 0);
    print_actions(&chat);

    let status = spawn_status_printer(chat.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::ListActions => print_actions(&chat),
            Input::QuickAction(id) => {
                let before = chat.messages().len();
                match chat.dispatch(id).await {
                    Ok(()) => print_new(&chat, before),
                    Err(e) => println!("! {}", e),
                }
            }
            Input::Message(text) => {
                let before = chat.messages().len();
                match chat.send(text).await {
                    // the user's own line is already on screen
                    Ok(_) => print_new(&chat, before + 1),
                    Err(e) => println!("! {}", e),
                }
            }
        }
    }

    status.abort();
    println!("\n{}", chat.footer());
    Ok(())
}

/// Prints the typing indicator and error banner as the request state changes.
fn spawn_status_printer(chat: Arc<ChatSession>) -> tokio::task::JoinHandle<()> {
    let mut rx = chat.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            match state {
                RequestState::Pending => {
                    if let Some(text) = chat.typing_indicator() {
                        eprintln!("… {}", text);
                    }
                }
                RequestState::Failed(_) => {
                    if let Some(banner) = chat.error_banner() {
                        eprintln!("[error] {}", banner);
                    }
                }
                _ => {}
            }
        }
    })
}

fn print_new(chat: &ChatSession, from: usize) {
    for msg in chat.messages().iter().skip(from) {
        print_message(msg);
    }
}

fn print_message(msg: &Message) {
    println!(
        "[{}] {}:\n{}\n",
        msg.created_at().format("%H:%M"),
        msg.author_label(),
        msg.text()
    );
}

fn print_actions(chat: &ChatSession) {
    let actions: Vec<String> = chat
        .quick_actions()
        .iter()
        .map(|a| format!("/{} ({})", a.id, a.title))
        .collect();
    println!("Quick actions: {}  |  /quit to exit\n", actions.join("  "));
}
