use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

pub mod applications;
pub mod audit;
pub mod auth;
pub mod blog;
pub mod chat;
pub mod jobs;
pub mod notifications;
pub mod partners;
pub mod scholarships;
pub mod team;
pub mod testimonials;
pub mod uploads;
pub mod users;

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// The full route table. Admin routes live under `/api/admin` behind the
/// role-gated extractors; everything else under `/api` is public or only
/// needs a valid login.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health_check)
            // Auth
            .service(auth::register)
            .service(auth::login)
            .service(auth::me)
            // Public content
            .service(scholarships::list_public)
            .service(jobs::list_public)
            .service(blog::list_public)
            .service(partners::list_public)
            .service(team::list_public)
            .service(testimonials::list_public)
            // Logged-in users
            .service(applications::create)
            .service(applications::list_mine)
            .service(chat::converse)
            .service(chat::conversations)
            // Administration
            .service(
                web::scope("/admin")
                    .service(scholarships::list_admin)
                    .service(scholarships::create)
                    .service(scholarships::update)
                    .service(scholarships::remove)
                    .service(jobs::list_admin)
                    .service(jobs::create)
                    .service(jobs::update)
                    .service(jobs::remove)
                    .service(blog::list_admin)
                    .service(blog::create)
                    .service(blog::update)
                    .service(blog::remove)
                    .service(partners::list_admin)
                    .service(partners::create)
                    .service(partners::update)
                    .service(partners::remove)
                    .service(team::list_admin)
                    .service(team::create)
                    .service(team::update)
                    .service(team::remove)
                    .service(testimonials::list_admin)
                    .service(testimonials::create)
                    .service(testimonials::update)
                    .service(testimonials::remove)
                    .service(users::list)
                    .service(users::create)
                    .service(users::update)
                    .service(applications::list_admin)
                    .service(applications::review)
                    .service(notifications::list)
                    .service(notifications::mark_read)
                    .service(audit::list)
                    .service(uploads::upload),
            ),
    );
}
