mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_core::filter::SortOrder;
use eventdesk_core::Id;
use tracing_subscriber::EnvFilter;

use commands::Context;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Browse, filter and edit events on your eventdesk backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally searched, filtered and sorted
    List {
        /// Match against title, description or location (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only events in this category (repeatable; any match counts)
        #[arg(short, long = "category")]
        categories: Vec<Id>,

        /// Order by start time: "newest" or "oldest"
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Print the filtered events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single event
    Show { id: Id },
    /// Create an event attributed to the logged-in user
    New {
        title: String,

        /// Start (e.g. "2025-03-20T15:00" or "2025-03-20")
        #[arg(short, long)]
        start: String,

        /// End (same formats as --start)
        #[arg(short, long)]
        end: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Category id (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Id>,
    },
    /// Edit an event; only the given fields change
    Edit {
        id: Id,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        image: Option<String>,

        /// Replace the event's categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Id>,
    },
    /// Delete an event
    Delete {
        id: Id,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List categories
    Categories,
    /// List users you can log in as
    Users,
    /// Select the user new and edited events are attributed to
    Login { user_id: Id },
    /// Clear the selected user
    Logout,
    /// Show the selected user
    Whoami,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EVENTDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = Context::load()?;

    let result = match cli.command {
        Commands::List {
            search,
            categories,
            sort,
            json,
        } => commands::list::run(&mut ctx, search, categories, sort, json).await,
        Commands::Show { id } => commands::show::run(&mut ctx, &id).await,
        Commands::New {
            title,
            start,
            end,
            description,
            location,
            image,
            categories,
        } => {
            let fields = commands::EventFields {
                title: Some(title),
                start: Some(start),
                end: Some(end),
                description,
                location,
                image,
                categories,
            };
            commands::new::run(&mut ctx, fields).await
        }
        Commands::Edit {
            id,
            title,
            start,
            end,
            description,
            location,
            image,
            categories,
        } => {
            let fields = commands::EventFields {
                title,
                start,
                end,
                description,
                location,
                image,
                categories,
            };
            commands::edit::run(&mut ctx, &id, fields).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&mut ctx, &id, yes).await,
        Commands::Categories => commands::categories::run(&mut ctx).await,
        Commands::Users => commands::users::run(&mut ctx).await,
        Commands::Login { user_id } => commands::session::login(&mut ctx, &user_id).await,
        Commands::Logout => commands::session::logout(&mut ctx),
        Commands::Whoami => commands::session::whoami(&ctx),
    };

    ctx.close()?;
    result
}
