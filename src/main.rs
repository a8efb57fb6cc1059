use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::{Connection, RunQueryDsl};
use log::{error, info, warn};

use eduportal::ai::AiClient;
use eduportal::auth::AuthService;
use eduportal::config::AppConfig;
use eduportal::db::{DbPool, DB_INIT_SQL};
use eduportal::events::EventRecorder;
use eduportal::handlers;
use eduportal::logger::setup_logger;
use eduportal::middleware::RequestLogger;
use eduportal::models::{NewUser, Role};
use eduportal::upload::{FileStore, LocalFileStore};
use eduportal::ws::{ws_route, Broadcaster};

// Local part of the email, so seeding cannot collide with an unrelated
// user who already took a fixed name
fn super_admin_username(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("superadmin")
        .to_string()
}

/// Creates the super admin account on first boot when SUPER_ADMIN_EMAIL and
/// SUPER_ADMIN_PASSWORD are set. Does nothing if the account already exists.
async fn seed_super_admin(config: &AppConfig, pool: &DbPool) {
    let (email, password) = match (&config.super_admin_email, &config.super_admin_password) {
        (Some(email), Some(password)) => (email.clone(), password.clone()),
        _ => return,
    };

    let existing = eduportal::services::users::UserService::find_by_email(&email, pool).await;
    match existing {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check for super admin account: {}", e);
            return;
        }
    }

    let password_hash = match AuthService::hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash super admin password: {}", e);
            return;
        }
    };

    let row = NewUser {
        username: super_admin_username(&email),
        email: email.clone(),
        password_hash,
        role: Role::SuperAdmin.as_str().to_string(),
    };

    let result = eduportal::db::blocking(pool, move |conn| {
        use eduportal::schema::users;
        diesel::insert_into(users::table).values(&row).execute(conn)
    })
    .await;

    match result {
        Ok(_) => info!("Seeded super admin account {}", email),
        Err(e) => error!("Failed to seed super admin account: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables and initialize logger
    dotenvy::dotenv().ok();
    setup_logger();

    // Get host and port from environment or use defaults
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a number");

    // Connecting to database
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    info!("Connecting to database");

    // Initialize database schema
    let mut conn = PgConnection::establish(&db_url)
        .expect("Failed to establish connection for schema setup");
    conn.batch_execute(DB_INIT_SQL)
        .expect("Failed to execute database initialization script");
    info!("Database initialization complete.");

    // Set up database connection pool
    let manager = ConnectionManager::<PgConnection>::new(db_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create database connection pool");

    // Load and validate configuration
    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        error!("Configuration validation error: {}", e);
        panic!("Invalid configuration: {}", e);
    }

    seed_super_admin(&config, &pool).await;

    let hub = Broadcaster::new();
    let events = EventRecorder::new(pool.clone(), hub.clone());
    let ai = AiClient::from_config(&config);

    let store = LocalFileStore::new(&config.upload_dir)
        .expect("Failed to create upload directory");
    let store: web::Data<dyn FileStore> = web::Data::from(Arc::new(store) as Arc<dyn FileStore>);

    let upload_dir = config.upload_dir.clone();
    let client_url = config.client_url.clone();

    if config.openai_api_key.is_none() {
        warn!("AI chat running without an API key; /api/chat will error");
    }

    info!("Starting HTTP server at http://{}:{}", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&client_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            // Enable request logger middleware
            .wrap(RequestLogger)
            .wrap(cors)
            // Register app data
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(hub.clone()))
            .app_data(web::Data::new(events.clone()))
            .app_data(web::Data::new(ai.clone()))
            .app_data(store.clone())
            // API routes
            .configure(handlers::configure)
            .route("/ws", web::get().to(ws_route))
            // Stored uploads are served straight off disk
            .service(actix_files::Files::new("/uploads", &upload_dir))
    })
    .workers(2) // Specify number of workers
    .keep_alive(std::time::Duration::from_secs(75)) // Configure keep-alive
    .shutdown_timeout(30) // Graceful shutdown timeout in seconds
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_username_comes_from_email_local_part() {
        assert_eq!(super_admin_username("ops@example.com"), "ops");
        assert_eq!(super_admin_username("a.b@portal.edu"), "a.b");
    }

    #[test]
    fn seed_username_falls_back_on_degenerate_email() {
        assert_eq!(super_admin_username("@example.com"), "superadmin");
        assert_eq!(super_admin_username(""), "superadmin");
    }
}
