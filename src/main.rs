use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// restomenu - restaurant menu and team pages
#[derive(Parser)]
#[command(name = "restomenu")]
#[command(about = "Restaurant menu, team pages and their back office", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage meal categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a superuser account
    CreateSuperuser {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
    /// Grant or revoke superuser access
    SetRole {
        #[arg(long)]
        username: String,

        #[arg(long, value_enum)]
        role: cli::user::Role,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category
    Add { name: String },
    /// List categories
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = restomenu::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    restomenu::observability::init_observability(
        "restomenu",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(config).await,
        Commands::Reset => cli::migrate::reset(config).await,
        Commands::User { command } => match command {
            UserCommands::CreateSuperuser { username, password } => {
                cli::user::create_superuser(config, username, password).await
            }
            UserCommands::SetRole { username, role } => {
                cli::user::set_role(config, username, role).await
            }
        },
        Commands::Category { command } => match command {
            CategoryCommands::Add { name } => cli::category::add(config, name).await,
            CategoryCommands::List => cli::category::list(config).await,
        },
    }
}
