//! Populate the database with the default admin and, optionally, sample data.
//!
//! Usage: `cargo run --bin seed [-- --with-samples]`

use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use showcase_backend::auth::password::hash_password;
use showcase_backend::config::AppConfig;
use showcase_backend::create_pool;
use showcase_backend::db::{admins, clients, projects};
use showcase_backend::models::admins::CreateAdmin;
use showcase_backend::models::clients::CreateClient;
use showcase_backend::models::projects::CreateProject;
use tracing_subscriber::EnvFilter;

const SAMPLE_PROJECTS: [(&str, &str, &str); 3] = [
    (
        "E-Commerce Platform",
        "A full-featured online shopping platform with payment integration, inventory management, and customer analytics.",
        "https://via.placeholder.com/450x350/4A90E2/ffffff?text=E-Commerce",
    ),
    (
        "Task Management App",
        "Collaborative task management application with real-time updates and project tracking.",
        "https://via.placeholder.com/450x350/50C878/ffffff?text=Task+Manager",
    ),
    (
        "Social Media Dashboard",
        "Analytics dashboard for social media management with post scheduling and engagement tracking.",
        "https://via.placeholder.com/450x350/FF6B6B/ffffff?text=Social+Dashboard",
    ),
];

// (name, description, designation, image)
const SAMPLE_CLIENTS: [(&str, &str, &str, &str); 3] = [
    (
        "Sarah Johnson",
        "Working with this team was an absolute pleasure. They delivered our project on time and exceeded our expectations.",
        "CEO, TechStart Inc",
        "https://via.placeholder.com/450x350/9B59B6/ffffff?text=SJ",
    ),
    (
        "Michael Chen",
        "The quality of work and professionalism throughout our project was outstanding.",
        "CTO, Innovation Labs",
        "https://via.placeholder.com/450x350/3498DB/ffffff?text=MC",
    ),
    (
        "Emily Rodriguez",
        "Responsive, creative, and delivered exactly what we needed for our business.",
        "Founder, Digital Solutions",
        "https://via.placeholder.com/450x350/E67E22/ffffff?text=ER",
    ),
];

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn seed_admin(db: &DatabaseConnection) -> Result<(), Box<dyn std::error::Error>> {
    let username = env_or("ADMIN_USERNAME", "admin");
    if admins::find_by_username(db, &username).await?.is_some() {
        tracing::warn!("Admin user {username} already exists, skipping");
        return Ok(());
    }

    let password = env_or("ADMIN_PASSWORD", "admin123");
    let email = env_or("ADMIN_EMAIL", "admin@showcase.com");
    let admin = admins::insert_admin(
        db,
        CreateAdmin {
            username,
            password_hash: hash_password(&password)?,
            email,
        },
    )
    .await?;

    tracing::info!("Created admin user {} <{}>", admin.username, admin.email);
    Ok(())
}

async fn seed_samples(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    if projects::get_all_projects(db).await?.is_empty() {
        for (name, description, image) in SAMPLE_PROJECTS {
            projects::insert_project(
                db,
                CreateProject {
                    name: name.to_string(),
                    description: description.to_string(),
                    location: None,
                    image: image.to_string(),
                },
            )
            .await?;
        }
        tracing::info!("Created {} sample projects", SAMPLE_PROJECTS.len());
    } else {
        tracing::warn!("Projects already exist, skipping sample data");
    }

    if clients::get_all_clients(db).await?.is_empty() {
        for (name, description, designation, image) in SAMPLE_CLIENTS {
            clients::insert_client(
                db,
                CreateClient {
                    name: name.to_string(),
                    description: description.to_string(),
                    designation: designation.to_string(),
                    image: image.to_string(),
                },
            )
            .await?;
        }
        tracing::info!("Created {} sample clients", SAMPLE_CLIENTS.len());
    } else {
        tracing::warn!("Clients already exist, skipping sample data");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let with_samples = std::env::args().any(|arg| arg == "--with-samples");

    let config = AppConfig::from_env()?;
    let db = create_pool(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    seed_admin(&db).await?;
    if with_samples {
        seed_samples(&db).await?;
    } else {
        tracing::info!("Run with --with-samples to add sample projects and clients");
    }

    tracing::info!("Database seeding completed");
    Ok(())
}
