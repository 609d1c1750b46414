//! Dispatch CLI - User management and data tools.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! dispatch-cli user create -e admin@example.com -p secret -n "Admin Name" -r admin
//!
//! # Create a driver with a phone number
//! dispatch-cli user create -e driver@example.com -p secret -n "Driver Name" -r driver --phone "+36 20 123 4567"
//!
//! # Seed demo data (admin, driver, a handful of customers)
//! dispatch-cli seed
//!
//! # Print collection counts from the data directory
//! dispatch-cli inspect
//! ```
//!
//! All commands operate directly on the JSON data directory named by
//! `DISPATCH_DATA_DIR` (default `./data`); the server does not need to be
//! running.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output is the whole point of a CLI.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dispatch-cli")]
#[command(author, version, about = "Dispatch CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the data directory with demo users and customers
    Seed,
    /// Print collection counts from the data directory
    Inspect,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (stored as-is; see server docs)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`admin` or `driver`)
        #[arg(short, long, default_value = "driver")]
        role: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                name,
                role,
                phone,
            } => {
                commands::user::create(&email, &password, &name, &role, phone)?;
            }
        },
        Commands::Seed => commands::seed::run()?,
        Commands::Inspect => commands::inspect::run()?,
    }
    Ok(())
}
