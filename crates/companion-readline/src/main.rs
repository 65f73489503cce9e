mod command;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use companion_core::persona::PersonaSource;
use companion_core::session::{SessionEvent, SessionRepository};
use companion_core::{CompanionError, ConversationSession, MessageRole};
use companion_infrastructure::{
    CompanionPaths, ConfigService, LoadedConfig, TomlSessionRepository, init_tracing,
};

use crate::command::{COMMANDS, ReplCommand, help_text};

const PERSONA_COMMAND: &str = "/persona ";

#[derive(Parser, Debug)]
#[command(name = "companion")]
#[command(about = "Chat with a persona that answers in tune with your mood", long_about = None)]
struct Args {
    /// Persona to talk to (defaults to the configured default persona)
    #[arg(short, long)]
    persona: Option<String>,

    /// Seed for reproducible replies
    #[arg(long)]
    seed: Option<u64>,

    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Continue a saved session
    #[arg(long, value_name = "SESSION_ID")]
    resume: Option<String>,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

/// CLI helper for rustyline that completes commands and persona names.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    persona_names: Vec<String>,
}

impl CliHelper {
    fn new(persona_names: Vec<String>) -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            persona_names,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(partial) = line.strip_prefix(PERSONA_COMMAND) {
            let candidates = self
                .persona_names
                .iter()
                .filter(|name| name.starts_with(partial))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: name.clone(),
                })
                .collect();
            return Ok((PERSONA_COMMAND.len(), candidates));
        }

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Opens a fresh session, or restores the one named by `--resume`.
fn open_session(
    args: &Args,
    loaded: &LoadedConfig,
    repository: &TomlSessionRepository,
) -> Result<ConversationSession> {
    let Some(session_id) = args.resume.as_deref() else {
        let persona = args
            .persona
            .clone()
            .unwrap_or_else(|| loaded.engine.default_persona.clone());
        return Ok(ConversationSession::from_config(
            loaded.catalog.clone(),
            loaded.classifier.clone(),
            &loaded.engine,
            persona,
        ));
    };

    let snapshot = repository
        .find_by_id(session_id)?
        .ok_or_else(|| CompanionError::not_found("session", session_id))?;
    let mut session = ConversationSession::restore_from_config(
        loaded.catalog.clone(),
        loaded.classifier.clone(),
        &loaded.engine,
        snapshot,
    );
    if let Some(persona) = args.persona.as_deref() {
        session.set_persona(persona)?;
    }
    Ok(session)
}

fn print_reply(display_name: &str, text: &str) {
    println!("{}", format!("[{}]", display_name).bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

fn print_history(session: &ConversationSession) {
    if session.history().is_empty() {
        println!("{}", "(no messages yet)".bright_black());
        return;
    }

    let display_name = session.persona().display_name.to_string();
    for message in session.history() {
        let time = message.timestamp.format("%H:%M:%S");
        let emotion = message
            .emotion
            .map(|e| format!(" ({e})"))
            .unwrap_or_default();
        match message.role {
            MessageRole::User => {
                println!("{} {}", format!("{time} you{emotion}:").green(), message.text)
            }
            MessageRole::Assistant => println!(
                "{} {}",
                format!("{time} {display_name}:").bright_magenta(),
                message.text.bright_blue()
            ),
        }
    }
}

fn print_personas(session: &ConversationSession) {
    let active = session.persona_name().to_lowercase();
    for persona in session.catalog().iter() {
        let source = match persona.source {
            PersonaSource::System => "built-in",
            PersonaSource::User => "configured",
        };
        let marker = if persona.name.to_lowercase() == active { "*" } else { " " };
        println!(
            "{} {} {}",
            marker.bright_green(),
            persona.name.bright_cyan(),
            format!("({}, {})", persona.display_name, source).bright_black()
        );
    }
    if !session.catalog().contains(session.persona_name()) {
        println!(
            "{} {} {}",
            "*".bright_green(),
            session.persona_name().bright_cyan(),
            "(custom, default replies)".bright_black()
        );
    }
}

fn save_session(session: &ConversationSession, repository: &TomlSessionRepository) {
    match repository.save(&session.snapshot()) {
        Ok(()) => println!(
            "{}",
            format!("Session saved. Resume with --resume {}", session.id()).bright_black()
        ),
        Err(e) => eprintln!("{}", format!("Failed to save session: {}", e).red()),
    }
}

/// Runs one chat turn, showing a typing indicator between the two halves.
fn chat_turn(session: &mut ConversationSession, text: &str) -> companion_core::Result<()> {
    session.submit_user(text)?;
    let display_name = session.persona().display_name.to_string();
    println!("{}", format!("{} is typing...", display_name).bright_black());
    let reply = session.respond()?;
    print_reply(&display_name, &reply.text);
    Ok(())
}

/// The main entry point for the companion REPL.
///
/// 1. Loads config.toml and builds the persona catalog and classifier
/// 2. Opens a new session or resumes a saved one
/// 3. Runs the readline loop, saving the session on exit
fn main() -> Result<()> {
    let args = Args::parse();

    // ===== Initialization =====
    let paths = CompanionPaths::default_location()?;
    let log_dir = args.log_dir.clone().unwrap_or_else(|| paths.logs_dir());
    let _log_guard = init_tracing(&log_dir)
        .with_context(|| format!("failed to initialize logging in {}", log_dir.display()))?;

    let config_path = args.config.clone().unwrap_or_else(|| paths.config_file());
    let mut loaded = ConfigService::new(config_path.clone())
        .load()
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(seed) = args.seed {
        loaded.engine.seed = Some(seed);
    }

    let repository = TomlSessionRepository::new(paths.sessions_dir());
    let mut session = open_session(&args, &loaded, &repository)?;
    session.subscribe(|event: &SessionEvent| tracing::debug!(?event, "session event"));

    // ===== REPL Setup =====
    let helper = CliHelper::new(loaded.catalog.names().map(str::to_string).collect());
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Companion ===".bright_magenta().bold());
    println!(
        "{}",
        "Just type to chat. '/help' lists commands, 'quit' exits.".bright_black()
    );
    println!();

    if session.history().is_empty() {
        let display_name = session.persona().display_name.to_string();
        print_reply(&display_name, session.greeting());
    } else {
        print_history(&session);
        println!();
        if session.is_awaiting_reply() {
            let display_name = session.persona().display_name.to_string();
            let reply = session.respond()?;
            print_reply(&display_name, &reply.text);
        }
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match ReplCommand::parse(trimmed) {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Chat(text) => {
                        if let Err(e) = chat_turn(&mut session, &text) {
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                    ReplCommand::Persona(Some(name)) => match session.set_persona(&name) {
                        Ok(resolved) => {
                            let note = if resolved.custom {
                                " (custom name, default replies)"
                            } else {
                                ""
                            };
                            let greeting = resolved.persona.greeting.clone();
                            let display_name = resolved.display_name.to_string();
                            println!(
                                "{}",
                                format!("Now talking to {display_name}{note}").bright_yellow()
                            );
                            print_reply(&display_name, &greeting);
                        }
                        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                    },
                    ReplCommand::Persona(None) => {
                        let resolved = session.persona();
                        println!(
                            "{}",
                            format!("Active persona: {}", resolved.display_name).bright_yellow()
                        );
                    }
                    ReplCommand::Personas => print_personas(&session),
                    ReplCommand::Reset => {
                        session.reset();
                        println!("{}", "Conversation cleared.".bright_yellow());
                        let display_name = session.persona().display_name.to_string();
                        print_reply(&display_name, session.greeting());
                    }
                    ReplCommand::History => print_history(&session),
                    ReplCommand::Save => save_session(&session, &repository),
                    ReplCommand::Help => println!("{}", help_text().bright_black()),
                    ReplCommand::Unknown(command) => {
                        println!("{}", format!("Unknown command: {command}").bright_black());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if !session.history().is_empty() {
        save_session(&session, &repository);
    }

    Ok(())
}
