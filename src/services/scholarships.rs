use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    ContentStatus, CreateScholarshipRequest, ListQuery, NewScholarship, Paginated, Scholarship,
    ScholarshipChanges,
};
use crate::schema::scholarships;

fn filtered(q: &ListQuery) -> scholarships::BoxedQuery<'static, Pg> {
    let mut query = scholarships::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(scholarships::title.ilike(pattern));
    }
    if let Some(status) = &q.status {
        query = query.filter(scholarships::status.eq(status.clone()));
    }
    query
}

pub struct ScholarshipService;

impl ScholarshipService {
    pub async fn list(q: ListQuery, pool: &DbPool) -> Result<Paginated<Scholarship>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(scholarships::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<Scholarship>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(
        req: CreateScholarshipRequest,
        actor_id: i32,
        pool: &DbPool,
    ) -> Result<Scholarship, ApiError> {
        let row = NewScholarship {
            title: req.title,
            description: req.description,
            amount: req.amount,
            deadline: req.deadline,
            eligibility: req.eligibility,
            status: req
                .status
                .unwrap_or_else(|| ContentStatus::Draft.as_str().to_string()),
            created_by: actor_id,
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(scholarships::table)
                .values(&row)
                .get_result::<Scholarship>(conn)
        })
        .await?;

        info!("Created scholarship {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(
        scholarship_id: i32,
        mut changes: ScholarshipChanges,
        pool: &DbPool,
    ) -> Result<Scholarship, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(scholarships::table.find(scholarship_id))
                .set(&changes)
                .get_result::<Scholarship>(conn)
        })
        .await
    }

    pub async fn delete(scholarship_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(scholarships::table.find(scholarship_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Scholarship not found".to_string()));
        }
        info!("Deleted scholarship {}", scholarship_id);
        Ok(())
    }

    pub async fn find(scholarship_id: i32, pool: &DbPool) -> Result<Scholarship, ApiError> {
        db::blocking(pool, move |conn| {
            scholarships::table
                .find(scholarship_id)
                .first::<Scholarship>(conn)
        })
        .await
    }
}
