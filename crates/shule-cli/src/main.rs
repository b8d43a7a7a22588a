use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use shule_cli::seeder;
use shule_config::DatabaseConfig;
use shule_models::{CreateStaffDto, StaffRole};
use sqlx::SqlitePool;

#[derive(Parser)]
#[command(name = "shule-cli")]
#[command(about = "Shule CLI - Administrative tools for the admissions API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a secretary or headmaster account
    CreateStaff {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// `secretary` or `headmaster`
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create the secretary and headmaster from SECRETARY_* / HEADMASTER_* variables
    SeedStaff,
    /// Seed the sample Completed application and fake applicants
    Seed {
        /// Number of fake applications to create
        #[arg(short = 'n', long, default_value = "20")]
        applications: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = shule_db::init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;
    shule_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::CreateStaff {
            username,
            email,
            role,
            password,
        } => handle_create_staff(&pool, username, email, role, password).await,
        Commands::SeedStaff => {
            let created = seeder::ensure_default_staff(&pool).await?;
            println!("✅ Created {created} staff accounts");
            Ok(())
        }
        Commands::Seed { applications } => {
            seeder::seed_demo_applications(&pool, applications).await?;
            Ok(())
        }
    }
}

fn parse_role(role: &str) -> anyhow::Result<StaffRole> {
    match role.trim().to_lowercase().as_str() {
        "secretary" => Ok(StaffRole::Secretary),
        "headmaster" => Ok(StaffRole::Headmaster),
        other => anyhow::bail!("Unknown role '{other}', expected secretary or headmaster"),
    }
}

async fn handle_create_staff(
    pool: &SqlitePool,
    username: Option<String>,
    email: Option<String>,
    role: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let role = match role {
        Some(role) => parse_role(&role)?,
        None => {
            let roles = [StaffRole::Secretary, StaffRole::Headmaster];
            let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            let choice = Select::new()
                .with_prompt("Role")
                .items(&names)
                .default(0)
                .interact()
                .context("Failed to read role")?;
            roles[choice]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let dto = CreateStaffDto {
        username,
        email,
        password,
        role,
    };
    let id = seeder::create_staff(pool, &dto).await?;

    println!("\n✅ Staff account created successfully!");
    println!("   Id: {id}");
    println!("   Username: {}", dto.username);
    println!("   Role: {}", role.as_str());

    Ok(())
}
