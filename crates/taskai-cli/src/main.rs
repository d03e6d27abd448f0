mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, reminder::ReminderSubcommand};
use std::path::PathBuf;
use taskai_core::types::{CommitmentStatus, CommitmentType};

#[derive(Parser)]
#[command(
    name = "taskai",
    about = "Track expirations, deadlines and open-ended tasks with laddered reminders",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: nearest directory containing .taskai/, else cwd)
    #[arg(long, global = true, env = "TASKAI_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .taskai/ data directory
    Init {
        /// Load a small set of demo tasks
        #[arg(long)]
        demo: bool,
    },

    /// Add a task and schedule its reminder ladder
    Add {
        /// Title (may be left out when --template presets one)
        title: Vec<String>,
        /// expiration, deadline or open (default: the template's type, else deadline)
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<CommitmentType>,
        /// Target date (required for expiration and deadline)
        #[arg(long)]
        target: Option<String>,
        /// Optional details, not shown in lists
        #[arg(long)]
        description: Option<String>,
        /// First review date for open-ended tasks (default: 14 days from now)
        #[arg(long)]
        review: Option<String>,
        /// Start from a template: passport, insurance, warranty or custom
        #[arg(long, value_name = "TEMPLATE")]
        template: Option<String>,
    },

    /// List tasks, soonest target first
    List {
        /// active, done or expired
        #[arg(long, default_value = "active")]
        status: CommitmentStatus,
    },

    /// List expired tasks
    Expired,

    /// Rank tasks by urgency score
    Urgency {
        /// Include completed tasks (always score 0)
        #[arg(long)]
        all: bool,
    },

    /// Show a task with its upcoming reminders
    Show { id: String },

    /// Edit a task; schedule changes regenerate pending reminders
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New details; an empty string clears them
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<CommitmentType>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        review: Option<String>,
    },

    /// Mark a task as done and cancel its pending reminders
    Done { id: String },

    /// Delete a task and all of its reminders
    Delete { id: String },

    /// Expire active tasks whose target date has passed
    Sweep,

    /// Manage reminders
    Reminder {
        #[command(subcommand)]
        subcommand: ReminderSubcommand,
    },

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved data root");

    let result = match cli.command {
        Commands::Init { demo } => cmd::init::run(&root, demo),
        Commands::Add {
            title,
            kind,
            target,
            description,
            review,
            template,
        } => cmd::commitment::add(
            &root,
            cmd::commitment::AddArgs {
                title: title.join(" "),
                kind,
                target,
                description,
                review,
                template,
            },
            cli.json,
        ),
        Commands::List { status } => cmd::list::list(&root, status, cli.json),
        Commands::Expired => cmd::list::list(&root, CommitmentStatus::Expired, cli.json),
        Commands::Urgency { all } => cmd::list::urgency(&root, all, cli.json),
        Commands::Show { id } => cmd::commitment::show(&root, &id, cli.json),
        Commands::Edit {
            id,
            title,
            description,
            kind,
            target,
            review,
        } => cmd::commitment::edit(
            &root,
            &id,
            cmd::commitment::EditArgs {
                title,
                description,
                kind,
                target,
                review,
            },
            cli.json,
        ),
        Commands::Done { id } => cmd::commitment::done(&root, &id, cli.json),
        Commands::Delete { id } => cmd::commitment::delete(&root, &id, cli.json),
        Commands::Sweep => cmd::commitment::sweep(&root, cli.json),
        Commands::Reminder { subcommand } => cmd::reminder::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
