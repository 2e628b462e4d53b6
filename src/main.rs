//! deskchat CLI - terminal client for a support assistant.

use clap::{Parser, Subcommand};
use deskchat::cli::{self, Context, Overrides};
use deskchat::{config, logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("DESKCHAT_GIT_HASH");
    const IS_RELEASE: &str = env!("DESKCHAT_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "deskchat")]
#[command(author, version = version(), about = "Terminal client for a support assistant", long_about = None)]
struct Cli {
    /// Endpoint URL for this run (overrides the stored preference).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// User id for this run (overrides the stored preference).
    #[arg(long, global = true)]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one question and print the reply.
    Ask {
        /// The question.
        query: String,

        /// Continue an existing chat instead of starting a new one.
        #[arg(short, long)]
        chat: Option<String>,
    },

    /// Start an interactive chat.
    Chat {
        /// Resume an existing chat.
        #[arg(short, long)]
        chat: Option<String>,
    },

    /// List saved chats.
    List {
        /// Maximum number of chats to show. Defaults to 20.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show every message of a chat.
    Show {
        /// Chat ID.
        chat_id: String,

        /// Print the stored JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved chat.
    Delete {
        /// Chat ID.
        chat_id: String,
    },

    /// Delete all saved chats.
    Clear {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Export a chat as a plain-text transcript.
    Export {
        /// Chat ID. Defaults to the most recently updated chat.
        #[arg(short, long)]
        chat: Option<String>,

        /// Directory to write into. Defaults to the current directory.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the transcript instead of writing a file.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Show or change preferences.
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },

    /// Check that the assistant endpoint is up.
    Health,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Store a preference (theme, user-id, api-url).
    Set {
        /// Preference name.
        key: String,
        /// New value.
        value: String,
    },

    /// Forget a stored preference.
    Reset {
        /// Preference name.
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = config::load_config().and_then(|config| {
        logging::init(&config.logging.level);
        let ctx = Context::new(
            config,
            Overrides {
                api_url: cli.api_url,
                user_id: cli.user_id,
            },
        )?;
        dispatch(&ctx, cli.command)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("deskchat: error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> deskchat::Result<()> {
    match command {
        Commands::Ask { query, chat } => cli::ask::run(ctx, &query, chat.as_deref()),
        Commands::Chat { chat } => cli::chat::run(ctx, chat.as_deref()),
        Commands::List { limit } => cli::list::run(ctx, limit),
        Commands::Show { chat_id, json } => cli::show::run(ctx, &chat_id, json),
        Commands::Delete { chat_id } => cli::delete::run(ctx, &chat_id),
        Commands::Clear { yes } => cli::clear::run(ctx, yes),
        Commands::Export { chat, out, stdout } => {
            cli::export::run(ctx, chat.as_deref(), out.as_deref(), stdout)
        }
        Commands::Prefs { action } => match action {
            None => cli::prefs::show(ctx),
            Some(PrefsAction::Set { key, value }) => cli::prefs::set(ctx, &key, &value),
            Some(PrefsAction::Reset { key }) => cli::prefs::reset(ctx, &key),
        },
        Commands::Health => cli::health::run(ctx),
    }
}
