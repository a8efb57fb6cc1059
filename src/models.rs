use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

// ---------------------------------------------------------------------------
// Enumerated values. Stored as VARCHAR with CHECK constraints; these types
// are the single source of truth for what the API accepts.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Moderator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Roles allowed through the admin gate.
    pub const ADMIN_SET: &'static [Role] = &[Role::Admin, Role::Moderator, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<ContentStatus> {
        match s {
            "draft" => Some(ContentStatus::Draft),
            "published" => Some(ContentStatus::Published),
            "archived" => Some(ContentStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Waitlisted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Waitlisted => "waitlisted",
        }
    }

    pub fn parse(s: &str) -> Option<ApplicationStatus> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            "waitlisted" => Some(ApplicationStatus::Waitlisted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }
}

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AuditQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub entity_type: Option<String>,
}

impl AuditQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, self.username.trim().len() >= 3, "username", "must be at least 3 characters");
        check(&mut errors, self.username.len() <= 50, "username", "must be at most 50 characters");
        check(&mut errors, self.email.contains('@'), "email", "must be a valid email address");
        check(&mut errors, self.password.len() >= 8, "password", "must be at least 8 characters");
        finish(errors)
    }
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, self.username.trim().len() >= 3, "username", "must be at least 3 characters");
        check(&mut errors, self.email.contains('@'), "email", "must be a valid email address");
        check(&mut errors, self.password.len() >= 8, "password", "must be at least 8 characters");
        if let Some(role) = &self.role {
            check(&mut errors, Role::parse(role).is_some(), "role", "must be one of user, moderator, admin, super_admin");
        }
        finish(errors)
    }
}

#[derive(Deserialize, Debug)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(username) = &self.username {
            check(&mut errors, username.trim().len() >= 3, "username", "must be at least 3 characters");
        }
        if let Some(email) = &self.email {
            check(&mut errors, email.contains('@'), "email", "must be a valid email address");
        }
        if let Some(password) = &self.password {
            check(&mut errors, password.len() >= 8, "password", "must be at least 8 characters");
        }
        if let Some(role) = &self.role {
            check(&mut errors, Role::parse(role).is_some(), "role", "must be one of user, moderator, admin, super_admin");
        }
        finish(errors)
    }
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Scholarships
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Scholarship {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub amount: String,
    pub deadline: String,
    pub eligibility: String,
    pub status: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::scholarships)]
pub struct NewScholarship {
    pub title: String,
    pub description: String,
    pub amount: String,
    pub deadline: String,
    pub eligibility: String,
    pub status: String,
    pub created_by: i32,
}

#[derive(Deserialize, Debug)]
pub struct CreateScholarshipRequest {
    pub title: String,
    pub description: String,
    pub amount: String,
    pub deadline: String,
    pub eligibility: String,
    pub status: Option<String>,
}

impl CreateScholarshipRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.title.trim().is_empty(), "title", "is required");
        check(&mut errors, self.title.len() <= 255, "title", "must be at most 255 characters");
        check(&mut errors, !self.description.trim().is_empty(), "description", "is required");
        check(&mut errors, !self.amount.trim().is_empty(), "amount", "is required");
        check(&mut errors, !self.deadline.trim().is_empty(), "deadline", "is required");
        check(&mut errors, !self.eligibility.trim().is_empty(), "eligibility", "is required");
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::scholarships)]
pub struct ScholarshipChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub deadline: Option<String>,
    pub eligibility: Option<String>,
    pub status: Option<String>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl ScholarshipChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check(&mut errors, !title.trim().is_empty(), "title", "must not be empty");
        }
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Job opportunities
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct JobOpportunity {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub status: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::job_opportunities)]
pub struct NewJobOpportunity {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub status: String,
    pub created_by: i32,
}

#[derive(Deserialize, Debug)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub status: Option<String>,
}

impl CreateJobRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.title.trim().is_empty(), "title", "is required");
        check(&mut errors, !self.description.trim().is_empty(), "description", "is required");
        check(&mut errors, !self.company.trim().is_empty(), "company", "is required");
        check(&mut errors, !self.location.trim().is_empty(), "location", "is required");
        check(&mut errors, !self.job_type.trim().is_empty(), "job_type", "is required");
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::job_opportunities)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub status: Option<String>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl JobChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check(&mut errors, !title.trim().is_empty(), "title", "must not be empty");
        }
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub status: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub status: String,
    pub created_by: i32,
}

#[derive(Deserialize, Debug)]
pub struct CreateBlogPostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub status: Option<String>,
}

impl CreateBlogPostRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.title.trim().is_empty(), "title", "is required");
        check(&mut errors, !self.content.trim().is_empty(), "content", "is required");
        check(&mut errors, !self.category.trim().is_empty(), "category", "is required");
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct BlogPostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl BlogPostChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check(&mut errors, !title.trim().is_empty(), "title", "must not be empty");
        }
        check_status(&mut errors, &self.status);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Partner institutions
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct PartnerInstitution {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::partner_institutions)]
pub struct NewPartnerInstitution {
    pub name: String,
    pub country: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize, Debug)]
pub struct CreatePartnerRequest {
    pub name: String,
    pub country: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}

impl CreatePartnerRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.name.trim().is_empty(), "name", "is required");
        check(&mut errors, !self.country.trim().is_empty(), "country", "is required");
        if let Some(email) = &self.contact_email {
            check(&mut errors, email.contains('@'), "contact_email", "must be a valid email address");
        }
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::partner_institutions)]
pub struct PartnerChanges {
    pub name: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl PartnerChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check(&mut errors, !name.trim().is_empty(), "name", "must not be empty");
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::team_members)]
pub struct NewTeamMember {
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize, Debug)]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateTeamMemberRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.name.trim().is_empty(), "name", "is required");
        check(&mut errors, !self.title.trim().is_empty(), "title", "is required");
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::team_members)]
pub struct TeamMemberChanges {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl TeamMemberChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check(&mut errors, !name.trim().is_empty(), "name", "must not be empty");
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Testimonial {
    pub id: i32,
    pub author_name: String,
    pub author_title: Option<String>,
    pub quote: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::testimonials)]
pub struct NewTestimonial {
    pub author_name: String,
    pub author_title: Option<String>,
    pub quote: String,
    pub is_active: bool,
}

#[derive(Deserialize, Debug)]
pub struct CreateTestimonialRequest {
    pub author_name: String,
    pub author_title: Option<String>,
    pub quote: String,
    pub is_active: Option<bool>,
}

impl CreateTestimonialRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.author_name.trim().is_empty(), "author_name", "is required");
        check(&mut errors, !self.quote.trim().is_empty(), "quote", "is required");
        finish(errors)
    }
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = crate::schema::testimonials)]
pub struct TestimonialChanges {
    pub author_name: Option<String>,
    pub author_title: Option<String>,
    pub quote: Option<String>,
    pub is_active: Option<bool>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl TestimonialChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(quote) = &self.quote {
            check(&mut errors, !quote.trim().is_empty(), "quote", "must not be empty");
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Application {
    pub id: i32,
    pub user_id: i32,
    pub scholarship_id: Option<i32>,
    pub job_id: Option<i32>,
    pub status: String,
    pub note: Option<String>,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::applications)]
pub struct NewApplication {
    pub user_id: i32,
    pub scholarship_id: Option<i32>,
    pub job_id: Option<i32>,
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateApplicationRequest {
    pub scholarship_id: Option<i32>,
    pub job_id: Option<i32>,
}

impl CreateApplicationRequest {
    // An application targets exactly one content type
    pub fn validate(&self) -> Result<(), ApiError> {
        match (self.scholarship_id, self.job_id) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(ApiError::Validation(
                "exactly one of scholarship_id or job_id is required".to_string(),
            )),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ReviewApplicationRequest {
    pub status: String,
    pub note: Option<String>,
}

impl ReviewApplicationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(
            &mut errors,
            ApplicationStatus::parse(&self.status).is_some(),
            "status",
            "must be one of pending, approved, rejected, waitlisted",
        );
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// AI chat
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct AiChatConversation {
    pub id: i32,
    pub user_id: i32,
    pub messages: serde_json::Value,
    pub moderation_flags: serde_json::Value,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::ai_chat_conversations)]
pub struct NewConversation {
    pub user_id: i32,
    pub messages: serde_json::Value,
    pub moderation_flags: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String, // "user" | "assistant"
    pub content: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub conversation_id: Option<i32>,
    pub message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check(&mut errors, !self.message.trim().is_empty(), "message", "is required");
        check(&mut errors, self.message.len() <= 4000, "message", "must be at most 4000 characters");
        finish(errors)
    }
}

#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub conversation_id: i32,
    pub reply: ChatMessage,
}

// ---------------------------------------------------------------------------
// Notifications and audit log
// ---------------------------------------------------------------------------

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct AdminNotification {
    pub id: i32,
    pub target_user_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub entity_type: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::admin_notifications)]
pub struct NewNotification {
    pub target_user_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub entity_type: String,
}

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct AuditLog {
    pub id: i32,
    pub user_id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i32,
    pub detail: serde_json::Value,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::audit_logs)]
pub struct NewAuditLog {
    pub user_id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i32,
    pub detail: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn check(errors: &mut Vec<String>, ok: bool, field: &str, msg: &str) {
    if !ok {
        errors.push(format!("{}: {}", field, msg));
    }
}

fn check_status(errors: &mut Vec<String>, status: &Option<String>) {
    if let Some(status) = status {
        check(
            errors,
            ContentStatus::parse(status).is_some(),
            "status",
            "must be one of draft, published, archived",
        );
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::User, Role::Moderator, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn admin_set_excludes_plain_user() {
        assert!(!Role::ADMIN_SET.contains(&Role::User));
        assert!(Role::ADMIN_SET.contains(&Role::Moderator));
        assert!(Role::ADMIN_SET.contains(&Role::Admin));
        assert!(Role::ADMIN_SET.contains(&Role::SuperAdmin));
    }

    #[test]
    fn list_query_clamps_page_and_limit() {
        let q = ListQuery { page: Some(0), limit: Some(500), search: None, status: None };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);
        assert_eq!(q.offset(), 0);

        let q = ListQuery { page: Some(3), limit: Some(10), search: None, status: None };
        assert_eq!(q.offset(), 20);

        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);
    }

    #[test]
    fn blank_search_produces_no_pattern() {
        let q = ListQuery { search: Some("   ".to_string()), ..Default::default() };
        assert_eq!(q.search_pattern(), None);
        let q = ListQuery { search: Some("law".to_string()), ..Default::default() };
        assert_eq!(q.search_pattern(), Some("%law%".to_string()));
    }

    #[test]
    fn scholarship_create_rejects_missing_fields() {
        let req = CreateScholarshipRequest {
            title: "".to_string(),
            description: "d".to_string(),
            amount: "$1000".to_string(),
            deadline: "2025-01-01".to_string(),
            eligibility: "e".to_string(),
            status: Some("open".to_string()),
        };
        let err = req.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("status"));
    }

    #[test]
    fn scholarship_create_accepts_valid_payload() {
        let req = CreateScholarshipRequest {
            title: "X".to_string(),
            description: "Y".to_string(),
            amount: "$1000".to_string(),
            deadline: "2025-01-01".to_string(),
            eligibility: "Y".to_string(),
            status: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn application_requires_exactly_one_target() {
        assert!(CreateApplicationRequest { scholarship_id: Some(1), job_id: None }.validate().is_ok());
        assert!(CreateApplicationRequest { scholarship_id: None, job_id: Some(2) }.validate().is_ok());
        assert!(CreateApplicationRequest { scholarship_id: Some(1), job_id: Some(2) }.validate().is_err());
        assert!(CreateApplicationRequest { scholarship_id: None, job_id: None }.validate().is_err());
    }

    #[test]
    fn review_request_rejects_unknown_status() {
        let req = ReviewApplicationRequest { status: "maybe".to_string(), note: None };
        assert!(req.validate().is_err());
        let req = ReviewApplicationRequest { status: "waitlisted".to_string(), note: None };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn partial_update_deserializes_missing_fields_as_none() {
        let changes: ScholarshipChanges = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert!(changes.description.is_none());
        assert!(changes.status.is_none());
        assert!(changes.updated_at.is_none());
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            password_hash: "secret".to_string(),
            role: "user".to_string(),
            is_active: true,
            last_login: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
