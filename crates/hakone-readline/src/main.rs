//! Terminal front end for hakone.
//!
//! Opens a chat with the default persona and relays each line to the
//! active conversation session. Slash commands switch personas, start over
//! or change the user's nickname.

mod command;
mod helper;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use hakone_core::config::{DebugSettings, RootConfig};
use hakone_core::persona::PersonaRegistry;
use hakone_core::reply::ReplyGenerator;
use hakone_core::session::{ChatMessage, IgnoreReason, TurnOutcome};
use hakone_core::user::UserService;
use hakone_infrastructure::{ConfigBasedUserService, ConfigStorage, HakonePaths};
use hakone_interaction::{ConversationSession, GeminiApiAgent};

use crate::command::Command;
use crate::helper::CliHelper;

/// Routes tracing output to a daily rolling file under the logs directory.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must be held until exit so buffered lines are flushed.
fn init_logging(debug: &DebugSettings) -> Result<WorkerGuard> {
    let logs_dir = HakonePaths::logs_dir().context("Failed to resolve logs directory")?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "hakone.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&debug.log_level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn print_message(speaker: &str, message: &ChatMessage, fell_back: bool) {
    if message.is_user() {
        println!("{}", format!("> {}", message.text).green());
        return;
    }

    println!("{}", format!("[{speaker}]").bright_magenta());
    for line in message.text.lines() {
        if fell_back {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.bright_blue());
        }
    }
    println!();
}

/// Prints the whole visible log, greeting included.
fn print_transcript(session: &ConversationSession) {
    let snapshot = session.snapshot();
    for message in &snapshot.log {
        print_message(&snapshot.active_persona_id, message, false);
    }
}

fn print_personas(session: &ConversationSession) {
    let active = session.persona();
    for persona in session.registry().iter() {
        if persona.id == active.id {
            println!("{}", format!("* {}", persona.id).bright_green());
        } else {
            println!("{}", format!("  {}", persona.id).bright_black());
        }
    }
}

async fn take_turn(session: &ConversationSession, line: &str, has_api_key: bool) {
    let persona = session.persona();
    println!(
        "{}",
        format!("{} is typing...", persona.family_name()).bright_black()
    );

    // Dropping the turn on CTRL-C releases the pending slot.
    let outcome = tokio::select! {
        outcome = session.submit_user_turn(line) => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Reply cancelled.".yellow());
            return;
        }
    };

    match outcome {
        TurnOutcome::Replied(reply) => print_message(&persona.id, &reply, false),
        TurnOutcome::FellBack(reply) => {
            print_message(&persona.id, &reply, true);
            if !has_api_key {
                println!(
                    "{}",
                    "No Gemini API key configured. Set GEMINI_API_KEY or edit secret.json."
                        .bright_black()
                );
            }
        }
        TurnOutcome::Ignored(IgnoreReason::BlankInput) => {}
        TurnOutcome::Ignored(IgnoreReason::ReplyPending) => {
            println!("{}", "Still waiting for the last reply.".bright_black());
        }
        TurnOutcome::Discarded => {
            tracing::debug!("Reply arrived after the conversation moved on");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ===== Configuration =====
    let storage = ConfigStorage::new().context("Failed to locate config.toml")?;
    let config: RootConfig = storage.load().context("Failed to load config.toml")?;
    let _log_guard = init_logging(&config.debug)?;

    let secret_path = HakonePaths::ensure_secret_file().context("Failed to prepare secret.json")?;
    tracing::info!(config = %storage.path().display(), "Starting hakone");

    let user_service = Arc::new(ConfigBasedUserService::load(storage)?);

    let (generator, has_api_key): (Arc<dyn ReplyGenerator>, bool) =
        match GeminiApiAgent::try_from_env(&config.chat) {
            Ok(agent) => {
                tracing::info!(model = agent.model(), "Gemini agent ready");
                (Arc::new(agent), true)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Running without a Gemini API key");
                println!(
                    "{}",
                    format!(
                        "No Gemini API key found. Replies will fall back until one is added to {}",
                        secret_path.display()
                    )
                    .yellow()
                );
                let agent = GeminiApiAgent::default().with_model(config.chat.model.clone());
                (Arc::new(agent), false)
            }
        };

    let session = ConversationSession::builder(PersonaRegistry::builtin(), generator)
        .with_settings(config.chat.clone())
        .with_user_service(user_service.clone())
        .start_default()
        .context("Failed to open the first conversation")?;

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Hakone ===".bright_magenta().bold());
    println!(
        "{}",
        "Commands: /new, /persona <name>, /personas, /nickname <name>, /quit".bright_black()
    );
    println!();
    print_transcript(&session);

    // ===== Main REPL Loop =====
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match Command::parse(&line) {
            Command::Say(text) => take_turn(&session, &text, has_api_key).await,
            Command::NewChat => {
                session.new_chat()?;
                print_transcript(&session);
            }
            Command::SwitchPersona(query) => match session.registry().resolve(&query) {
                Some(persona) => {
                    session.reset(&persona.id)?;
                    print_transcript(&session);
                }
                None => {
                    println!("{}", format!("No persona matches '{query}'.").red());
                    print_personas(&session);
                }
            },
            Command::ListPersonas => print_personas(&session),
            Command::SetNickname(nickname) => match user_service.set_nickname(nickname) {
                Ok(()) => println!(
                    "{}",
                    format!(
                        "Nickname set to {}. It applies from the next /new.",
                        user_service.get_user_name()
                    )
                    .bright_green()
                ),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to save nickname");
                    eprintln!("{}", format!("Could not save nickname: {err}").red());
                }
            },
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Invalid(message) => println!("{}", message.bright_black()),
        }
    }

    Ok(())
}
