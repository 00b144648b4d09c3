use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lightbnb_config::{load as load_config, AppConfig};
use lightbnb_database::{
    initialize_database, DatabaseConnection, LightBnb, NewProperty, NewUser, PropertySearch,
};
use serde::Serialize;
use tokio::fs;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "lightbnb-admin", about = "Run LightBnB data access queries")]
struct Cli {
    /// Overrides `database.url` from the loaded configuration
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the schema
    Migrate,
    #[command(flatten)]
    Query(QueryCommand),
}

#[derive(Debug, Subcommand)]
enum QueryCommand {
    UserByEmail {
        email: String,
    },
    UserById {
        id: i64,
    },
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Reservations for a guest, excluding any starting today
    Reservations {
        guest_id: i64,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search listings, cheapest first
    Properties {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        owner_id: Option<i64>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Insert a property described by a JSON file
    AddProperty {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = load_config().context("failed to load configuration")?;
    if let Some(url) = cli.database_url.clone() {
        config.database.url = url;
    }

    run(cli.command, &config).await
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries query results
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Migrate => {
            initialize_database(&config.database)
                .await
                .context("failed to initialise database")?;
            info!(url = %config.database.url, "schema is up to date");
            Ok(())
        }
        Command::Query(query) => run_query(query, config).await,
    }
}

async fn run_query(command: QueryCommand, config: &AppConfig) -> anyhow::Result<()> {
    let connection = DatabaseConnection::from_config(&config.database).await?;
    connection.test_connection().await?;

    let db = LightBnb::new(connection.pool.clone());
    let outcome = execute(command, &db, config.queries.default_limit).await;

    connection.close().await;
    outcome
}

async fn execute(command: QueryCommand, db: &LightBnb, default_limit: u32) -> anyhow::Result<()> {
    match command {
        QueryCommand::UserByEmail { email } => print_json(&db.get_user_with_email(&email).await?),
        QueryCommand::UserById { id } => print_json(&db.get_user_with_id(id).await?),
        QueryCommand::AddUser {
            name,
            email,
            password,
        } => {
            let user = db
                .add_user(&NewUser {
                    name,
                    email,
                    password,
                })
                .await?;
            info!(user_id = user.id, "user added");
            print_json(&user)
        }
        QueryCommand::Reservations { guest_id, limit } => {
            let reservations = db
                .get_all_reservations(guest_id, limit.unwrap_or(default_limit))
                .await?;
            print_json(&reservations)
        }
        QueryCommand::Properties {
            city,
            owner_id,
            min_price,
            max_price,
            min_rating,
            limit,
        } => {
            let search = PropertySearch {
                city,
                owner_id,
                minimum_price_per_night: min_price,
                maximum_price_per_night: max_price,
                minimum_rating: min_rating,
            };
            let listings = db
                .get_all_properties(&search, limit.unwrap_or(default_limit))
                .await?;
            print_json(&listings)
        }
        QueryCommand::AddProperty { file } => {
            let request = read_property(&file).await?;
            let property = db.add_property(&request).await?;
            info!(property_id = property.id, "property added");
            print_json(&property)
        }
    }
}

async fn read_property(path: &Path) -> anyhow::Result<NewProperty> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid property description", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render result")?;
    println!("{rendered}");
    Ok(())
}
