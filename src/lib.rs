pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod services;
pub mod upload;
pub mod ws;
