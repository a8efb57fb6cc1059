use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::auth::{AuthService, AuthedUser};
use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    CreateUserRequest, ListQuery, NewUser, Paginated, RegisterRequest, Role, UpdateUserRequest,
    User, UserChanges,
};
use crate::schema::users;

fn filtered(q: &ListQuery) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(
            users::username
                .ilike(pattern.clone())
                .or(users::email.ilike(pattern)),
        );
    }
    if let Some(role) = &q.status {
        // The admin table reuses the status filter slot for roles
        query = query.filter(users::role.eq(role.clone()));
    }
    query
}

pub struct UserService;

impl UserService {
    pub async fn find_by_email(email_addr: &str, pool: &DbPool) -> Result<Option<User>, ApiError> {
        let email_copy = email_addr.to_string();
        db::blocking(pool, move |conn| {
            users::table
                .filter(users::email.eq(email_copy))
                .first::<User>(conn)
                .optional()
        })
        .await
    }

    pub async fn register(req: RegisterRequest, pool: &DbPool) -> Result<User, ApiError> {
        let password_hash = AuthService::hash_password(&req.password)?;
        let row = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: Role::User.as_str().to_string(),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .get_result::<User>(conn)
        })
        .await?;

        info!("Registered user {} ({})", created.id, created.username);
        Ok(created)
    }

    pub async fn list(q: ListQuery, pool: &DbPool) -> Result<Paginated<User>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(users::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<User>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(req: CreateUserRequest, pool: &DbPool) -> Result<User, ApiError> {
        let password_hash = AuthService::hash_password(&req.password)?;
        let row = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: req.role.unwrap_or_else(|| Role::User.as_str().to_string()),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .get_result::<User>(conn)
        })
        .await?;

        info!("Created user {} with role {}", created.id, created.role);
        Ok(created)
    }

    pub async fn update(
        user_id: i32,
        req: UpdateUserRequest,
        actor: &AuthedUser,
        pool: &DbPool,
    ) -> Result<User, ApiError> {
        // A super admin cannot lock themselves out
        if actor.id == user_id && req.is_active == Some(false) {
            return Err(ApiError::Validation(
                "you cannot deactivate your own account".to_string(),
            ));
        }

        let password_hash = match &req.password {
            Some(password) => Some(AuthService::hash_password(password)?),
            None => None,
        };

        let changes = UserChanges {
            username: req.username,
            email: req.email,
            password_hash,
            role: req.role,
            is_active: req.is_active,
            updated_at: Some(Utc::now().naive_utc()),
        };

        db::blocking(pool, move |conn| {
            diesel::update(users::table.find(user_id))
                .set(&changes)
                .get_result::<User>(conn)
        })
        .await
    }

    pub async fn update_last_login(user_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        db::blocking(pool, move |conn| {
            diesel::update(users::table.find(user_id))
                .set(users::last_login.eq(Some(Utc::now().naive_utc())))
                .execute(conn)
        })
        .await?;
        Ok(())
    }
}
