//! CLI administration tool for foodgram.
//!
//! Registration over HTTP does not hand out credentials, so API tokens are
//! issued here. The tool also seeds reference data and shows statistics.
//!
//! # Usage
//!
//! ```bash
//! # Issue an API token for user 1
//! cargo run --bin admin -- token create --user 1 --name "Mobile App"
//!
//! # List and revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke "Mobile App"
//!
//! # Register a user
//! cargo run --bin admin -- user create --email ann@example.com --username ann
//!
//! # Seed reference data
//! cargo run --bin admin -- catalog add-tag --name Breakfast --slug breakfast
//! cargo run --bin admin -- catalog add-ingredient --name flour --unit g
//!
//! # View statistics, check the database
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's

use foodgram::application::services::{AuthService, UserService};
use foodgram::domain::entities::NewUser;
use foodgram::domain::repositories::TokenRepository;
use foodgram::infrastructure::persistence::{
    PgSubscriptionRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing foodgram.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Seed tags and ingredients
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for a user
    Create {
        /// Id of the user the token authenticates as
        #[arg(short, long)]
        user: i64,

        /// Token name (e.g., "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a user
    Create {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Add a tag
    AddTag {
        #[arg(long)]
        name: String,

        #[arg(long)]
        slug: String,
    },

    /// Add an ingredient
    AddIngredient {
        #[arg(long)]
        name: String,

        /// Measurement unit (e.g., "g", "ml", "pcs")
        #[arg(long)]
        unit: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Catalog { action } => handle_catalog_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { user, name, yes } => create_token(repo, user, name, yes).await?,
        TokenAction::List => list_tokens(repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(repo, name_or_id).await?,
    }

    Ok(())
}

/// Issues a token and prints it once.
///
/// Only the HMAC of the token is stored, keyed by `TOKEN_SIGNING_SECRET`;
/// the raw value cannot be recovered later.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    user_id: i64,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if signing_secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text(format!("user-{user_id}"))
            .interact_text()?,
    };

    println!("  User:  {}", user_id.to_string().cyan());
    println!("  Name:  {}", token_name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(repo, signing_secret);
    let (token_value, _) = auth
        .issue_token(user_id, &token_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "Token created successfully!".green().bold());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:8000/api/users/me",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- token create --user <id>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<30} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(90).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<6} {:<30} {:<18} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by ID (numeric input) or exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!("  User:  {}", token.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            username,
            first_name,
            last_name,
        } => {
            let pool = Arc::new(pool.clone());
            let users = UserService::new(
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgSubscriptionRepository::new(pool)),
            );

            let user = users
                .register(NewUser {
                    email,
                    username,
                    first_name,
                    last_name,
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!(
                "{} {} (id {})",
                "User created:".green().bold(),
                user.username.cyan(),
                user.id.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

async fn handle_catalog_action(action: CatalogAction, pool: &PgPool) -> Result<()> {
    match action {
        CatalogAction::AddTag { name, slug } => {
            let id: i64 =
                sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id")
                    .bind(&name)
                    .bind(&slug)
                    .fetch_one(pool)
                    .await
                    .context("Failed to add tag")?;

            println!(
                "{} {} (id {})",
                "Tag added:".green().bold(),
                name.cyan(),
                id.to_string().bright_white().bold()
            );
        }
        CatalogAction::AddIngredient { name, unit } => {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
            )
            .bind(&name)
            .bind(&unit)
            .fetch_one(pool)
            .await
            .context("Failed to add ingredient")?;

            println!(
                "{} {} ({}) (id {})",
                "Ingredient added:".green().bold(),
                name.cyan(),
                unit,
                id.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

async fn count(pool: &PgPool, sql: &str) -> Result<i64> {
    Ok(sqlx::query_scalar(sql).fetch_one(pool).await?)
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let rows = [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Recipes", "SELECT COUNT(*) FROM recipes"),
        ("Tags", "SELECT COUNT(*) FROM tags"),
        ("Ingredients", "SELECT COUNT(*) FROM ingredients"),
        ("Subscriptions", "SELECT COUNT(*) FROM subscriptions"),
        ("Short links", "SELECT COUNT(*) FROM recipe_short_links"),
        (
            "Active tokens",
            "SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL",
        ),
    ];

    for (label, sql) in rows {
        let value = count(pool, sql).await?;
        println!(
            "  {:<15}{}",
            format!("{label}:"),
            value.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
