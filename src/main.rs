// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use scribe::app_config::{Config, LogLevel};
use scribe::database::{
    AuthorChanges, DatabaseConnection, PostCategory, PostChanges, PostDraft, Repository,
};
use scribe::errors::ModelError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, inspect and modify authors
    Author {
        #[command(subcommand)]
        command: AuthorCommand,
    },

    /// Create, inspect and modify posts
    Post {
        #[command(subcommand)]
        command: PostCommand,
    },

    /// Show record counts and database size
    Stats,

    /// Generate shell completions for scribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum AuthorCommand {
    /// Create an author
    Create {
        /// Author name (must be unique)
        #[arg(long)]
        name: String,

        /// Phone number with exactly 10 digits, any formatting
        #[arg(long)]
        phone: Option<String>,
    },

    /// Show one author
    Show {
        id: i64,
    },

    /// List all authors
    List,

    /// Change an author's fields
    Update {
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long, conflicts_with = "clear_phone")]
        phone: Option<String>,

        /// Remove the phone number
        #[arg(long)]
        clear_phone: bool,
    },

    /// Delete an author
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PostCommand {
    /// Create a post
    Create {
        /// Title containing one of the configured phrases
        #[arg(long)]
        title: String,

        /// Post body (at least 250 characters)
        #[arg(long, required_unless_present = "content_file", conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the post body from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Fiction or Non-Fiction
        #[arg(long)]
        category: String,

        /// Optional summary (at most 250 characters)
        #[arg(long)]
        summary: Option<String>,
    },

    /// Show one post
    Show {
        id: i64,
    },

    /// List posts
    List {
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Change a post's fields
    Update {
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the new body from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// New summary
        #[arg(long, conflicts_with = "clear_summary")]
        summary: Option<String>,

        /// Remove the summary
        #[arg(long)]
        clear_summary: bool,

        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a post
    Delete {
        id: i64,
    },
}

/// scribe - validated authors and posts
///
/// Stores blog authors and posts in SQLite and rejects any write that
/// breaks a field rule.
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(version)]
#[command(about = "Validated author and post records over SQLite")]
#[command(long_about = "scribe stores authors and posts in SQLite and validates every write.

EXAMPLES:
    scribe author create --name \"Jane Doe\" --phone 555-123-4567
    scribe author update 1 --clear-phone
    scribe post create --title \"Top 10 Secrets\" --content-file body.txt --category Fiction
    scribe post list --category Non-Fiction
    scribe --log-level debug stats
    scribe completions bash > scribe.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Database file (overrides the config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// Minimal stderr logger: timestamp, coloured level tag, message
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // The level is lowered or raised once the config is loaded
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ModelError>() {
            Some(ModelError::Validation(v)) => error!("Invalid {}: {}", v.field(), v),
            _ => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "scribe", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if let Some(database) = cli.database {
        config.database_path = Some(database);
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let repo = match &config.database_path {
        Some(path) => Repository::new(DatabaseConnection::new(path)?),
        None => Repository::new_default()?,
    }
    .with_post_rules(config.post_rules.clone());
    debug!("Using database {}", repo.connection().path().display());

    match cli.command {
        Commands::Author { command } => run_author(&repo, command),
        Commands::Post { command } => run_post(&repo, command),
        Commands::Stats => {
            let stats = repo.connection().stats()?;
            info!("{}", stats);
            print_json(&stats)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_author(repo: &Repository, command: AuthorCommand) -> Result<()> {
    match command {
        AuthorCommand::Create { name, phone } => {
            let author = repo.create_author(&name, phone.as_deref())?;
            print_json(&author)
        }
        AuthorCommand::Show { id } => {
            let author = repo
                .get_author(id)?
                .ok_or(ModelError::NotFound { entity: "Author", id })?;
            print_json(&author)
        }
        AuthorCommand::List => print_json(&repo.list_authors()?),
        AuthorCommand::Update { id, name, phone, clear_phone } => {
            let phone_number = if clear_phone { Some(None) } else { phone.map(Some) };
            let author = repo.update_author(id, &AuthorChanges { name, phone_number })?;
            print_json(&author)
        }
        AuthorCommand::Delete { id } => {
            if !repo.delete_author(id)? {
                return Err(ModelError::NotFound { entity: "Author", id }.into());
            }
            info!("Deleted author {}", id);
            Ok(())
        }
    }
}

fn run_post(repo: &Repository, command: PostCommand) -> Result<()> {
    match command {
        PostCommand::Create { title, content, content_file, category, summary } => {
            let draft = PostDraft {
                title: Some(title),
                content: read_content(content, content_file)?,
                summary,
                category: Some(category),
            };
            let post = repo.create_post(&draft)?;
            print_json(&post)
        }
        PostCommand::Show { id } => {
            let post = repo
                .get_post(id)?
                .ok_or(ModelError::NotFound { entity: "Post", id })?;
            print_json(&post)
        }
        PostCommand::List { category } => {
            let category = category
                .map(|c| c.parse::<PostCategory>())
                .transpose()?;
            print_json(&repo.list_posts(category)?)
        }
        PostCommand::Update {
            id,
            title,
            content,
            content_file,
            summary,
            clear_summary,
            category,
        } => {
            let changes = PostChanges {
                title,
                content: read_content(content, content_file)?,
                summary: if clear_summary { Some(None) } else { summary.map(Some) },
                category,
            };
            let post = repo.update_post(id, &changes)?;
            print_json(&post)
        }
        PostCommand::Delete { id } => {
            if !repo.delete_post(id)? {
                return Err(ModelError::NotFound { entity: "Post", id }.into());
            }
            info!("Deleted post {}", id);
            Ok(())
        }
    }
}

fn read_content(content: Option<String>, content_file: Option<PathBuf>) -> Result<Option<String>> {
    match (content, content_file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read content file: {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
