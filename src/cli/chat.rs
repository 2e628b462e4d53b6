//! `deskchat chat` command implementation: an interactive session.

use crate::cli::Context;
use crate::cli::ask::resume;
use crate::cli::export::write_transcript;
use crate::cli::render::{format_local_time, format_message, format_title_preview};
use crate::client::{HttpClient, QueryApi};
use crate::core::{Exchange, SessionStore};
use crate::error::{Error, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  /new           start a new chat
  /load <id>     switch to a saved chat
  /delete <id>   delete a saved chat
  /history       list saved chats
  /clear         delete all saved chats
  /export        write the current chat to a transcript file
  /help          show this help
  /quit          leave
Anything else is sent to the assistant.";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// A query for the assistant.
    Send(String),
    New,
    Load(String),
    Delete(String),
    History,
    Clear,
    Export,
    Help,
    Quit,
    /// A slash command we don't know, or one missing its argument.
    Unknown(String),
    /// Blank line.
    Empty,
}

/// Parse a line of REPL input.
#[must_use]
pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Send(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (name, arg) {
        ("new", None) => ReplCommand::New,
        ("load", Some(id)) => ReplCommand::Load(id.to_string()),
        ("delete", Some(id)) => ReplCommand::Delete(id.to_string()),
        ("history", None) => ReplCommand::History,
        ("clear", None) => ReplCommand::Clear,
        ("export", None) => ReplCommand::Export,
        ("help", None) => ReplCommand::Help,
        ("quit" | "exit", None) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
pub struct Repl<'a> {
    session: SessionStore<'a>,
    exchange: Exchange,
    api: &'a dyn QueryApi,
    user_id: String,
    export_dir: &'a Path,
}

impl<'a> Repl<'a> {
    /// Create a REPL over an opened session.
    #[must_use]
    pub fn new(
        session: SessionStore<'a>,
        api: &'a dyn QueryApi,
        user_id: String,
        export_dir: &'a Path,
    ) -> Self {
        Self {
            session,
            exchange: Exchange::new(),
            api,
            user_id,
            export_dir,
        }
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &SessionStore<'a> {
        &self.session
    }

    /// Handle one command, writing user-facing output to `out`.
    ///
    /// Request failures are reported to `out` and do not end the session.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or `out` cannot be written.
    pub fn handle(&mut self, command: ReplCommand, out: &mut dyn Write) -> Result<Flow> {
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Send(query) => {
                match self
                    .exchange
                    .send(&mut self.session, self.api, &self.user_id, &query)
                {
                    Ok(reply) => {
                        writeln!(out, "{}", format_message(&reply.message))?;
                        if let Some(action) = reply.action_invoked {
                            writeln!(out, "    action: {action}")?;
                        }
                    }
                    Err(Error::Request(e)) => {
                        writeln!(out, "! Could not get a response: {e}. Your message was not sent.")?;
                    }
                    Err(e) => return Err(e),
                }
            }
            ReplCommand::New => {
                self.session.start_new_chat();
                writeln!(out, "Started a new chat.")?;
            }
            ReplCommand::Load(id) => {
                if self.session.load_chat(&id) {
                    for message in self.session.messages() {
                        writeln!(out, "{}", format_message(message))?;
                    }
                } else {
                    writeln!(out, "No chat with id {id}.")?;
                }
            }
            ReplCommand::Delete(id) => {
                if self.session.find_chat(&id).is_some() {
                    self.session.delete_chat(&id)?;
                    writeln!(out, "Deleted chat {id}.")?;
                } else {
                    writeln!(out, "No chat with id {id}.")?;
                }
            }
            ReplCommand::History => {
                if self.session.histories().is_empty() {
                    writeln!(out, "No saved chats.")?;
                }
                let current = self.session.current_chat_id();
                for chat in self.session.histories() {
                    let marker = if Some(chat.id.as_str()) == current { '*' } else { ' ' };
                    writeln!(
                        out,
                        "{marker} {}  {}  {}",
                        chat.id,
                        format_local_time(chat.last_updated),
                        format_title_preview(&chat.title)
                    )?;
                }
            }
            ReplCommand::Clear => {
                let count = self.session.histories().len();
                self.session.clear_history()?;
                writeln!(out, "Deleted {count} chat(s).")?;
            }
            ReplCommand::Export => {
                if self.session.messages().is_empty() {
                    writeln!(out, "Nothing to export.")?;
                } else {
                    let path = write_transcript(self.export_dir, self.session.messages())?;
                    writeln!(out, "Exported to {}", path.display())?;
                }
            }
            ReplCommand::Help => writeln!(out, "{HELP}")?,
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Unknown(line) => {
                writeln!(out, "Unknown command: {line} (try /help)")?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Run the chat command.
///
/// Reads lines from stdin until EOF or `/quit`.
///
/// # Errors
///
/// Returns an error if the chat is unknown, storage fails, or the terminal
/// cannot be read or written.
pub fn run(ctx: &Context, chat_id: Option<&str>) -> Result<()> {
    let prefs = ctx.preferences()?;
    let client = HttpClient::new(&prefs.api_url)?;
    let mut session = SessionStore::open(&ctx.store);
    resume(&mut session, chat_id)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Connected to {} as {}. Type /help for commands.", client.url(), prefs.user_id)?;

    let export_dir = Path::new(".");
    let mut repl = Repl::new(session, &client, prefs.user_id.clone(), export_dir);
    for message in repl.session().messages() {
        writeln!(out, "{}", format_message(message))?;
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        if repl.handle(parse_line(&line?), &mut out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
