use clap::{Parser, Subcommand};
use courseload_cli::seeder::{self, SeedOutcome};
use courseload_config::AppConfig;
use courseload_db::{PgStore, init_db_pool};
use dialoguer::{Input, Password};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courseload-cli")]
#[command(about = "Courseload CLI - Administrative tools for Courseload", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new QA administrator account
    CreateQa {
        /// Display name of the QA user
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Institutional email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create the QA admin described by the QAADMIN_* variables
    SeedQaAdmin,
}

#[tokio::main]
async fn main() {
    courseload_config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let Some(database_url) = config.database_url.clone() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let store = match connect(&database_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e:#}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateQa {
            name,
            email,
            password,
        } => handle_create_qa(&store, &config, name, email, password).await,
        Commands::SeedQaAdmin => handle_seed_qa_admin(&store, &config).await,
    }
}

async fn connect(database_url: &str) -> anyhow::Result<PgStore> {
    let store = PgStore::new(init_db_pool(database_url).await?);
    store.migrate().await?;
    Ok(store)
}

async fn handle_create_qa(
    store: &PgStore,
    config: &AppConfig,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let prompted = prompt_missing(name, email, password);
    let (name, email, password) = match prompted {
        Ok(values) => values,
        Err(e) => {
            eprintln!("\n❌ Failed to read input: {}", e);
            std::process::exit(1);
        }
    };

    match seeder::create_qa_user(store, &name, &email, &password, &config.institutional_domain)
        .await
    {
        Ok(user) => {
            println!("\n✅ QA user created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating QA user: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_missing(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String, String), dialoguer::Error> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    Ok((name, email, password))
}

async fn handle_seed_qa_admin(store: &PgStore, config: &AppConfig) {
    let Some(seed) = &config.seed_admin else {
        eprintln!("❌ QAADMIN_EMAIL and QAADMIN_PASSWORD must be set");
        std::process::exit(1);
    };

    match seeder::seed_qa_admin(store, seed, config).await {
        Ok(SeedOutcome::Created(user)) => println!("✅ QA admin {} seeded", user.email),
        Ok(SeedOutcome::AlreadyExists) => println!("✅ QA admin already exists"),
        Err(e) => {
            eprintln!("\n❌ Error seeding QA admin: {:#}", e);
            std::process::exit(1);
        }
    }
}
