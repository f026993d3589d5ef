//! PIN Gate CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (tables and the session store)
//! pin-cli migrate
//!
//! # Create an admin (password is stored as an Argon2 hash)
//! pin-cli admin create -e admin@system.com -p 'correct horse'
//!
//! # Manage PIN records
//! pin-cli pins add 123456 -d VIP
//! pin-cli pins list --all
//! pin-cli pins deactivate 1b4e28ba-2fa1-11d2-883f-0016d3cca427
//!
//! # Load admins and PINs from YAML
//! pin-cli seed seed.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `PIN_GATE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `PIN_GATE_ADMIN_PASSWORD` - Password for `admin create` when `-p` is omitted

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pin-cli")]
#[command(author, version, about = "PIN Gate CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage PIN records
    Pins {
        #[command(subcommand)]
        action: PinAction,
    },
    /// Insert admins and PINs from a YAML file
    Seed {
        /// Path to the YAML file
        file: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password (falls back to `PIN_GATE_ADMIN_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Replace an admin's password
    SetPassword {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// New password (falls back to `PIN_GATE_ADMIN_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List admin users
    List,
}

#[derive(Subcommand)]
enum PinAction {
    /// Add an active PIN
    Add {
        /// Six-digit code
        code: String,

        /// Text shown after a successful check
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List PINs, newest first
    List {
        /// Include deactivated PINs
        #[arg(long)]
        all: bool,
    },
    /// Deactivate a PIN by ID
    Deactivate {
        /// PIN record ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create_user(&email, password).await?;
            }
            AdminAction::SetPassword { email, password } => {
                commands::admin::set_password(&email, password).await?;
            }
            AdminAction::List => commands::admin::list_users().await?,
        },
        Commands::Pins { action } => match action {
            PinAction::Add { code, description } => {
                commands::pins::add(&code, description.as_deref()).await?;
            }
            PinAction::List { all } => commands::pins::list(all).await?,
            PinAction::Deactivate { id } => commands::pins::deactivate(&id).await?,
        },
        Commands::Seed { file } => commands::seed::from_file(&file).await?,
    }
    Ok(())
}
