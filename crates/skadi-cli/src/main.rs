use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

use skadi_auth::UserRole;
use skadi_cli::{DEFAULT_COST, ProvisionError, demo_username, provision_user};
use skadi_db::{DatabaseConfig, PgUserRepository, init_db_pool};

#[derive(Parser)]
#[command(name = "skadi-cli")]
#[command(about = "Skadi CLI - Account provisioning for Skadi", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// admin, teacher or student
        #[arg(short = 'r', long)]
        role: Option<UserRole>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create one demo account per role, all sharing one password
    SeedDemo {
        /// Password for every demo account
        #[arg(short = 'p', long, default_value = "skadi-demo-2024")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database_config).await?;
    let users = PgUserRepository::new(pool, database_config.query_timeout);

    match cli.command {
        Commands::CreateUser {
            username,
            role,
            password,
        } => handle_create_user(&users, username, role, password).await,
        Commands::SeedDemo { password } => handle_seed_demo(&users, &password).await,
    }
}

async fn handle_create_user(
    users: &PgUserRepository,
    username: Option<String>,
    role: Option<UserRole>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let index = Select::new()
                .with_prompt("Role")
                .items(&UserRole::ALL.map(|r| r.as_str()))
                .default(2)
                .interact()?;
            UserRole::ALL[index]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    match provision_user(users, &username, &password, role, DEFAULT_COST).await {
        Ok(record) => {
            println!("\n✅ User created successfully!");
            println!("   Id: {}", record.id);
            println!("   Username: {}", record.username);
            println!("   Role: {}", record.role);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_seed_demo(users: &PgUserRepository, password: &str) -> anyhow::Result<()> {
    println!("🌱 Seeding demo accounts...");

    for role in UserRole::ALL {
        let username = demo_username(role);
        match provision_user(users, &username, password, role, DEFAULT_COST).await {
            Ok(record) => println!("   ✅ {:<8} {}", record.role.as_str(), record.username),
            Err(ProvisionError::Duplicate) => {
                println!("   ⏭️  {:<8} {} already exists", role.as_str(), username)
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n✅ Demo accounts ready. Password: {password}");
    Ok(())
}
