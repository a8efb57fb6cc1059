use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    ContentStatus, CreateJobRequest, JobChanges, JobOpportunity, ListQuery, NewJobOpportunity,
    Paginated,
};
use crate::schema::job_opportunities;

fn filtered(q: &ListQuery) -> job_opportunities::BoxedQuery<'static, Pg> {
    let mut query = job_opportunities::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(job_opportunities::title.ilike(pattern));
    }
    if let Some(status) = &q.status {
        query = query.filter(job_opportunities::status.eq(status.clone()));
    }
    query
}

pub struct JobService;

impl JobService {
    pub async fn list(q: ListQuery, pool: &DbPool) -> Result<Paginated<JobOpportunity>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(job_opportunities::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<JobOpportunity>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(
        req: CreateJobRequest,
        actor_id: i32,
        pool: &DbPool,
    ) -> Result<JobOpportunity, ApiError> {
        let row = NewJobOpportunity {
            title: req.title,
            description: req.description,
            company: req.company,
            location: req.location,
            job_type: req.job_type,
            status: req
                .status
                .unwrap_or_else(|| ContentStatus::Draft.as_str().to_string()),
            created_by: actor_id,
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(job_opportunities::table)
                .values(&row)
                .get_result::<JobOpportunity>(conn)
        })
        .await?;

        info!("Created job opportunity {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(
        job_id: i32,
        mut changes: JobChanges,
        pool: &DbPool,
    ) -> Result<JobOpportunity, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(job_opportunities::table.find(job_id))
                .set(&changes)
                .get_result::<JobOpportunity>(conn)
        })
        .await
    }

    pub async fn delete(job_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(job_opportunities::table.find(job_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Job opportunity not found".to_string()));
        }
        info!("Deleted job opportunity {}", job_id);
        Ok(())
    }

    pub async fn find(job_id: i32, pool: &DbPool) -> Result<JobOpportunity, ApiError> {
        db::blocking(pool, move |conn| {
            job_opportunities::table
                .find(job_id)
                .first::<JobOpportunity>(conn)
        })
        .await
    }
}
