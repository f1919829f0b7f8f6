use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rsvp::cli::{create_admin, promote};
use rsvp::store::PgIdentityStore;
use rsvp_config::{hash_cost_from_env, password_policy_from_env};
use rsvp_core::PasswordHasher;
use rsvp_models::Role;

#[derive(Parser)]
#[command(name = "rsvp-cli")]
#[command(about = "rsvp CLI - Administrative tools for the rsvp API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change the role of an existing user
    Promote {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: String,

        /// New role: GUEST, INVITEE or ADMIN
        #[arg(short = 'r', long, default_value = "ADMIN")]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = rsvp_db::init_db_pool().await;
    let store = PgIdentityStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&store, first_name, last_name, email, password).await,
        Commands::Promote { email, role } => handle_promote(&store, &email, role).await,
    }
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| exit_with(&format!("Failed to read {}: {}", label.to_lowercase(), e)))
}

fn exit_with(message: &str) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

async fn handle_create_admin(
    store: &PgIdentityStore,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let first_name = first_name.unwrap_or_else(|| prompt("First name"));
    let last_name = last_name.unwrap_or_else(|| prompt("Last name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| exit_with(&format!("Failed to read password: {}", e)))
    });

    let hasher = PasswordHasher::new(hash_cost_from_env())
        .unwrap_or_else(|e| exit_with(&format!("Invalid BCRYPT_COST: {}", e)));
    let policy = password_policy_from_env();

    match create_admin(
        store,
        &policy,
        &hasher,
        &first_name,
        &last_name,
        &email,
        &password,
    )
    .await
    {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {} {}", admin.first_name, admin.last_name);
        }
        Err(e) => exit_with(&format!("Error creating admin: {}", e)),
    }
}

async fn handle_promote(store: &PgIdentityStore, email: &str, role: Role) {
    match promote(store, email, role).await {
        Ok(user) => {
            println!("\n✅ Role updated!");
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Err(e) => exit_with(&format!("Error changing role: {}", e)),
    }
}
