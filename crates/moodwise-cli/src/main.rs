//! MoodWise Notes - a terminal client for the MoodWise notes service.
//!
//! The bearer token is kept in the configured token store between runs.
//! Redirects requested by the session are turned into hints on stderr.

mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use moodwise_core::auth::{Destination, RecordingNavigator, Session};
use moodwise_core::models::{ChatMessage, NewNote, NewUser, NoteUpdate};
use moodwise_core::presentation::{format_date, show_error, truncate, ErrorBanner};
use moodwise_core::{ApiClient, Config};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    let navigator = Arc::new(RecordingNavigator::new());
    let result = run(cli, navigator.clone()).await;

    let mut banner = ErrorBanner::new();
    if let Err(e) = &result {
        show_error(&format!("{:#}", e), &mut banner);
    }
    if let Some(text) = banner.render() {
        eprintln!("Error: {}", text);
    }

    if let Some(destination) = navigator.last() {
        print_redirect_hint(destination);
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_redirect_hint(destination: Destination) {
    match destination {
        Destination::Login => {
            eprintln!("Not signed in ({}). Run `moodwise login <username>`.", destination)
        }
        Destination::Dashboard => {
            eprintln!("Already signed in ({}). Run `moodwise notes` to see your notes.", destination)
        }
    }
}

async fn run(cli: Cli, navigator: Arc<RecordingNavigator>) -> Result<()> {
    let command = cli.command;

    let mut config = Config::load()?;
    config.apply_env()?;
    config.apply_overrides(cli.server, None)?;
    if config.base_url.is_empty() && !command.is_offline() {
        bail!(
            "No server configured. Set base_url in {} or MOODWISE_BASE_URL",
            Config::config_path()?.display()
        );
    }

    let session = Session::new(config.open_store()?, navigator);
    let client = ApiClient::new(config.base_url.clone(), session);
    command.ensure_authorized(client.session())?;

    // The command may carry a password; never log it
    info!(base_url = %client.base_url(), "Running command");
    execute(command, &client).await
}

async fn execute(command: Command, client: &ApiClient) -> Result<()> {
    let session = client.session();
    match command {
        Command::Login { username, password } => {
            if session.redirect_if_authenticated() {
                return Ok(());
            }
            let password = password_or_prompt(password, "Password: ")?;
            client.login(&username, &password).await?;
            println!("Signed in as {}", username);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password, "Choose a password: ")?;
            let user = client
                .register(&NewUser {
                    username,
                    email,
                    password,
                })
                .await?;
            println!("Registered {} <{}>. Run `moodwise login {}`.", user.username, user.email, user.username);
        }
        Command::Logout => session.logout(),
        Command::Status => {
            if session.is_authenticated() {
                println!("Signed in (server: {})", display_base_url(client.base_url()));
            } else {
                println!("Not signed in");
            }
        }
        Command::ForgotPassword { email } => {
            let reply = client.forgot_password(&email).await?;
            println!("{}", reply.message);
        }
        Command::ResetPassword { token, password } => {
            let password = password_or_prompt(password, "New password: ")?;
            let reply = client.reset_password(&token, &password).await?;
            println!("{}", reply.message);
        }
        Command::WhoAmI => {
            let user = client.current_user().await?;
            println!("{} <{}> (id {})", user.username, user.email, user.id);
        }
        Command::Notes => {
            let notes = client.list_notes().await?;
            if notes.is_empty() {
                println!("No notes yet. Add one with `moodwise add <title> <content>`.");
            }
            for note in notes {
                println!("{:<26} {:<43} {}", note.id, note.short_title(), note.updated_display());
            }
        }
        Command::Show { id } => {
            let note = client.note(&id).await?;
            println!("{}", note.title);
            println!("Created {}  Updated {}", note.created_display(), note.updated_display());
            println!();
            println!("{}", note.content);
        }
        Command::Export { id } => {
            let note = client.note(&id).await?;
            println!("{}", note.to_html());
        }
        Command::Add { title, content } => {
            let note = client.create_note(&NewNote { title, content }).await?;
            println!("Created note {}", note.id);
        }
        Command::Edit { id, title, content } => {
            let note = client.update_note(&id, &NoteUpdate { title, content }).await?;
            println!("Updated note {} ({})", note.id, note.short_title());
        }
        Command::Remove { id } => {
            client.delete_note(&id).await?;
            println!("Deleted note {}", id);
        }
        Command::Chat { message, save } => chat(client, message, save).await?,
        Command::Conversations => {
            let conversations = client.conversations().await?;
            if conversations.is_empty() {
                println!("No saved conversations. Start one with `moodwise chat --save`.");
            }
            for conversation in conversations {
                let opening = conversation.opening_line().unwrap_or("(no messages)");
                let created = conversation
                    .created_at
                    .as_deref()
                    .map_or_else(|| "-".to_string(), format_date);
                println!("{:<26} {:<43} {}", conversation.id, truncate(opening, 40), created);
            }
        }
    }
    Ok(())
}

/// Run a chat session: the optional first message, then one message per stdin line.
async fn chat(client: &ApiClient, first: Option<String>, save: bool) -> Result<()> {
    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = io::stdin().lock().lines();
    let mut next = first;

    loop {
        let message = match next.take() {
            Some(message) => message,
            None => {
                eprint!("you> ");
                io::stderr().flush()?;
                match lines.next() {
                    Some(line) => line?,
                    None => break,
                }
            }
        };
        let message = message.trim();
        if message.is_empty() {
            continue;
        }

        let reply = client.chat(message, &history).await?;
        println!("[{}] {}", reply.emotion, reply.message);
        history.push(ChatMessage::user(message));
        history.push(reply.to_message());
    }

    if save && !history.is_empty() {
        let saved = client.save_conversation(&history).await?;
        println!("Saved conversation {}", saved.id);
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password(prompt)?),
    }
}

fn display_base_url(base_url: &str) -> &str {
    if base_url.is_empty() {
        "same origin"
    } else {
        base_url
    }
}
