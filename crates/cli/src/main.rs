//! Monster Wash CLI - lead file management and reports.
//!
//! # Usage
//!
//! ```bash
//! # Write the example leads to a fresh data file
//! mw-cli seed
//!
//! # Add a lead as staff1
//! mw-cli add --as staff1 --password 111 --name 张三 --vehicle 奥迪A6 --status interested
//!
//! # Search leads visible to staff1
//! mw-cli list --as staff1 --password 111 --query 奥迪
//!
//! # Admin dashboard
//! mw-cli dashboard --as boss --password 888
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the example leads to the data file
//! - `add` - Add a lead
//! - `list` - Search and filter leads
//! - `summary` - Totals and win rate
//! - `dashboard` - Per-status and per-agent counts (admin only)
//! - `accounts` - List configured staff accounts
//!
//! Reads the same `CRM_*` environment variables as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use monster_wash_core::LeadStatus;
use monster_wash_crm::config::CrmConfig;

mod commands;

use commands::{CliError, Credentials};

#[derive(Parser)]
#[command(name = "mw-cli")]
#[command(author, version, about = "Monster Wash CRM tools")]
struct Cli {
    /// Lead file to operate on (overrides `CRM_DATA_FILE`)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Login {
    /// Staff username
    #[arg(long = "as")]
    username: String,

    /// Staff password
    #[arg(long)]
    password: String,
}

impl Login {
    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            username: &self.username,
            password: &self.password,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the example leads to the data file
    Seed {
        /// Overwrite an existing data file
        #[arg(long)]
        force: bool,
    },
    /// Add a lead owned by the logged-in staff member
    Add {
        #[command(flatten)]
        login: Login,

        /// Customer name
        #[arg(long)]
        name: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Vehicle model
        #[arg(long, default_value = "")]
        vehicle: String,

        /// Funnel stage (`potential`, `interested`, `won`, `lost`)
        #[arg(long, default_value = "potential")]
        status: LeadStatus,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Search and filter the leads visible to the logged-in staff member
    List {
        #[command(flatten)]
        login: Login,

        /// Search term
        #[arg(short, long)]
        query: Option<String>,

        /// Only leads in this stage
        #[arg(long)]
        status: Option<LeadStatus>,
    },
    /// Totals and win rate over the visible leads
    Summary {
        #[command(flatten)]
        login: Login,
    },
    /// Per-status and per-agent counts over every lead (admin only)
    Dashboard {
        #[command(flatten)]
        login: Login,
    },
    /// List configured staff accounts
    Accounts,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = CrmConfig::from_env()?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }

    match cli.command {
        Commands::Seed { force } => commands::seed::run(&config, force)?,
        Commands::Add {
            login,
            name,
            phone,
            vehicle,
            status,
            notes,
        } => {
            let form = monster_wash_crm::services::LeadForm {
                name,
                phone,
                vehicle,
                status,
                notes,
            };
            commands::leads::add(&config, login.credentials(), form)?;
        }
        Commands::List {
            login,
            query,
            status,
        } => commands::leads::list(&config, login.credentials(), query, status)?,
        Commands::Summary { login } => commands::leads::summary(&config, login.credentials())?,
        Commands::Dashboard { login } => commands::leads::dashboard(&config, login.credentials())?,
        Commands::Accounts => commands::accounts::list(&config)?,
    }
    Ok(())
}
