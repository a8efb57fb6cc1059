pub mod applications;
pub mod audit;
pub mod blog;
pub mod chat;
pub mod jobs;
pub mod notifications;
pub mod partners;
pub mod scholarships;
pub mod team;
pub mod testimonials;
pub mod users;
