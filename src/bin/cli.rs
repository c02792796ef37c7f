use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use staffdesk::{
    config::AppConfig,
    db,
    models::{Role, User},
    repositories::SqliteUserRepository,
    services::user_service::{CreateUserRequest, UserService},
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "staffdesk-cli")]
#[command(about = "CLI tool for managing staffdesk accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Account role
        #[arg(short, long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },

    /// List accounts
    List {
        /// Maximum number of users to display
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short = 'o', long, default_value_t = 0)]
        offset: i64,
    },

    /// Delete an account
    Delete {
        /// Email address of the user to delete
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password for an account
    SetPassword {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

/// Use the given password, or prompt twice and require both entries to match.
fn resolve_password(given: Option<String>, prompt: &str) -> anyhow::Result<String> {
    if let Some(pw) = given {
        return Ok(pw);
    }

    let password = get_password(prompt)?;
    let confirm = get_password("Confirm password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}

async fn create_user(
    service: &UserService,
    email: String,
    password: Option<String>,
    name: Option<String>,
    role: RoleArg,
) -> anyhow::Result<()> {
    let password = resolve_password(password, "Password")?;
    let user = service
        .create_user(CreateUserRequest {
            email,
            password,
            name,
            role: role.into(),
        })
        .await
        .context("Failed to create user")?;

    println!("✅ User created successfully!");
    println!("  ID: {}", user.id);
    println!("  Email: {}", user.email);
    println!("  Role: {}", user.role);
    Ok(())
}

async fn list_users(service: &UserService, limit: i64, offset: i64) -> anyhow::Result<()> {
    let users = service
        .list_users(Some(limit), Some(offset))
        .await
        .context("Failed to list users")?;

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!("{:<5} {:<40} {:<8} {:<24} {:<20}", "ID", "Email", "Role", "Name", "Created");
    println!("{}", "-".repeat(97));
    for user in users {
        println!(
            "{:<5} {:<40} {:<8} {:<24} {:<20}",
            user.id,
            user.email,
            user.role,
            user.name.as_deref().unwrap_or("-"),
            user.created_at
        );
    }
    Ok(())
}

/// Look an account up by email, failing when it does not exist.
async fn existing_user(service: &UserService, email: &str) -> anyhow::Result<User> {
    service
        .find_user_by_email(email)
        .await
        .context("Failed to find user")?
        .with_context(|| format!("User '{}' not found", email))
}

async fn delete_user(service: &UserService, email: &str) -> anyhow::Result<()> {
    let user = existing_user(service, email).await?;
    service
        .delete_user(user.id)
        .await
        .context("Failed to delete user")?;

    println!("✅ User '{}' deleted successfully!", email);
    Ok(())
}

async fn set_password(
    service: &UserService,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let user = existing_user(service, email).await?;
    let new_password = resolve_password(password, "New password")?;
    service
        .update_password(user.id, &new_password)
        .await
        .context("Failed to update password")?;

    println!("✅ Password updated successfully for '{}'!", email);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let pool = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Cannot open database {}", config.database_url))?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                email,
                password,
                name,
                role,
            } => create_user(&user_service, email, password, name, role).await,
            UserCommands::List { limit, offset } => list_users(&user_service, limit, offset).await,
            UserCommands::Delete { email } => delete_user(&user_service, &email).await,
            UserCommands::SetPassword { email, password } => {
                set_password(&user_service, &email, password).await
            }
        },
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("❌ {:#}", err);
        std::process::exit(1);
    }
}
