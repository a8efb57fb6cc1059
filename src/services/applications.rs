use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    Application, ApplicationStatus, ContentStatus, CreateApplicationRequest, ListQuery,
    NewApplication, Paginated, ReviewApplicationRequest,
};
use crate::schema::applications;
use crate::services::jobs::JobService;
use crate::services::scholarships::ScholarshipService;

fn filtered(q: &ListQuery) -> applications::BoxedQuery<'static, Pg> {
    let mut query = applications::table.into_boxed();
    if let Some(status) = &q.status {
        query = query.filter(applications::status.eq(status.clone()));
    }
    query
}

pub struct ApplicationService;

impl ApplicationService {
    pub async fn create(
        user_id: i32,
        req: CreateApplicationRequest,
        pool: &DbPool,
    ) -> Result<Application, ApiError> {
        // The target must exist and be open for applications
        if let Some(scholarship_id) = req.scholarship_id {
            let scholarship = ScholarshipService::find(scholarship_id, pool).await?;
            if scholarship.status != ContentStatus::Published.as_str() {
                return Err(ApiError::Validation(
                    "scholarship is not open for applications".to_string(),
                ));
            }
        }
        if let Some(job_id) = req.job_id {
            let job = JobService::find(job_id, pool).await?;
            if job.status != ContentStatus::Published.as_str() {
                return Err(ApiError::Validation(
                    "job is not open for applications".to_string(),
                ));
            }
        }

        let row = NewApplication {
            user_id,
            scholarship_id: req.scholarship_id,
            job_id: req.job_id,
            status: ApplicationStatus::Pending.as_str().to_string(),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(applications::table)
                .values(&row)
                .get_result::<Application>(conn)
        })
        .await?;

        info!("User {} submitted application {}", user_id, created.id);
        Ok(created)
    }

    pub async fn list_mine(
        user_id: i32,
        q: ListQuery,
        pool: &DbPool,
    ) -> Result<Paginated<Application>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let mine = applications::user_id.eq(user_id);
            let total = filtered(&q)
                .filter(mine)
                .count()
                .get_result::<i64>(conn)?;
            let items = filtered(&q)
                .filter(mine)
                .order(applications::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<Application>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn list(q: ListQuery, pool: &DbPool) -> Result<Paginated<Application>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(applications::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<Application>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn review(
        application_id: i32,
        reviewer_id: i32,
        req: ReviewApplicationRequest,
        pool: &DbPool,
    ) -> Result<Application, ApiError> {
        let now = Utc::now().naive_utc();

        let reviewed = db::blocking(pool, move |conn| {
            diesel::update(applications::table.find(application_id))
                .set((
                    applications::status.eq(req.status),
                    applications::note.eq(req.note),
                    applications::reviewed_by.eq(Some(reviewer_id)),
                    applications::reviewed_at.eq(Some(now)),
                    applications::updated_at.eq(now),
                ))
                .get_result::<Application>(conn)
        })
        .await?;

        info!(
            "Application {} reviewed by {} -> {}",
            reviewed.id, reviewer_id, reviewed.status
        );
        Ok(reviewed)
    }
}
