//! Application entry point: terminal chat adapter.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the catalog named in config, or the built-in one.
//! 4. Create the [`tokio`] runtime used by the optional remote backend.
//! 5. Read lines from stdin and print `[kind] reply` for each.
//!
//! # Commands
//!
//! | Input | Effect |
//! |-------|--------|
//! | `:sleep <hours>` | Attach self-reported sleep hours to later messages |
//! | `:sleep` | Clear the sleep hours |
//! | `:tone <calm\|motivate\|grounding>` | Reply style asked of the remote backend |
//! | `:reset` | Forget the conversation so far |
//! | `:quit` | Exit |

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use mindbot_triage::{
    backend::Responder,
    catalog::Catalog,
    config::{AppConfig, AppPaths, Tone},
    triage::{ConversationWindow, Message, TriageContext, TriageEngine},
};

// ---------------------------------------------------------------------------
// Catalog loading
// ---------------------------------------------------------------------------

/// Catalog from `[catalog] path`, else `catalog.json` in the config
/// directory when present, else the built-in tables.
fn load_catalog(config: &AppConfig) -> Catalog {
    let path = match &config.catalog.path {
        Some(path) => path.clone(),
        None => {
            let default_path = AppPaths::new().catalog_file;
            if !default_path.exists() {
                return Catalog::builtin();
            }
            default_path
        }
    };
    match Catalog::load_from(&path) {
        Ok(catalog) => {
            log::info!("Catalog loaded: {}", path.display());
            catalog
        }
        Err(e) => {
            log::warn!(
                "Could not use catalog {} ({e}); using the built-in catalog",
                path.display()
            );
            Catalog::builtin()
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

enum Command {
    Sleep(Option<f64>),
    Tone(Tone),
    Reset,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let rest = line.strip_prefix(':')?;
    let mut parts = rest.split_whitespace();
    let cmd = match parts.next().unwrap_or("") {
        "sleep" => match parts.next() {
            None => Command::Sleep(None),
            Some(raw) => match raw.parse::<f64>() {
                Ok(hours) if hours.is_finite() && hours >= 0.0 => Command::Sleep(Some(hours)),
                _ => Command::Unknown(format!("not a number of hours: {raw}")),
            },
        },
        "tone" => match parts.next().and_then(Tone::from_name) {
            Some(tone) => Command::Tone(tone),
            None => Command::Unknown("tone is one of calm, motivate, grounding".into()),
        },
        "reset" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(format!("unknown command :{other}")),
    };
    Some(cmd)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("mindbot-triage starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Catalog + engine
    let catalog = load_catalog(&config);
    let engine = Arc::new(TriageEngine::from_config(&catalog, &config));
    let mut responder = Responder::from_config(engine, &config.backend);

    // 4. Tokio runtime (the backend is the only async user)
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 5. Chat loop
    let mut window = ConversationWindow::new(&config.conversation);
    let mut ctx = TriageContext::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Type a message (:sleep <hours>, :tone <name>, :reset, :quit).")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();

        if let Some(cmd) = parse_command(trimmed) {
            match cmd {
                Command::Sleep(hours) => {
                    ctx.sleep_hours = hours;
                    match hours {
                        Some(h) => writeln!(stdout, "(sleep hours set to {h})")?,
                        None => writeln!(stdout, "(sleep hours cleared)")?,
                    }
                }
                Command::Tone(tone) => {
                    responder.set_tone(tone);
                    if !responder.has_backend() {
                        log::info!("tone only applies to the remote backend, which is disabled");
                    }
                    writeln!(stdout, "(tone set to {})", tone.as_str())?;
                }
                Command::Reset => {
                    window.reset();
                    writeln!(stdout, "(conversation cleared)")?;
                }
                Command::Quit => break,
                Command::Unknown(msg) => writeln!(stdout, "({msg})")?,
            }
            continue;
        }

        window.expire_if_idle();
        let history = window.messages();
        let response = rt.block_on(responder.respond(trimmed, &history, &ctx));
        let result = response.result;

        writeln!(stdout, "[{}] {}", result.kind, result.reply)?;
        if let Some(tool) = result.tool {
            writeln!(stdout, "    try: {}", tool.label())?;
        }
        stdout.flush()?;

        if !trimmed.is_empty() {
            window.push(Message::user(trimmed));
            window.push(Message::assistant(result.reply));
        }
    }

    log::info!("mindbot-triage shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse_command("I can't sleep").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn sleep_command_parses_hours() {
        assert!(matches!(parse_command(":sleep 6.5"), Some(Command::Sleep(Some(h))) if h == 6.5));
        assert!(matches!(parse_command(":sleep"), Some(Command::Sleep(None))));
        assert!(matches!(parse_command(":sleep -2"), Some(Command::Unknown(_))));
        assert!(matches!(parse_command(":sleep lots"), Some(Command::Unknown(_))));
    }

    #[test]
    fn control_commands() {
        assert!(matches!(parse_command(":reset"), Some(Command::Reset)));
        assert!(matches!(parse_command(":tone grounding"), Some(Command::Tone(Tone::Grounding))));
        assert!(matches!(parse_command(":tone loud"), Some(Command::Unknown(_))));
        assert!(matches!(parse_command(":tone"), Some(Command::Unknown(_))));
        assert!(matches!(parse_command(":quit"), Some(Command::Quit)));
        assert!(matches!(parse_command(":dance"), Some(Command::Unknown(_))));
    }
}
