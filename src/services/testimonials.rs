use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    CreateTestimonialRequest, ListQuery, NewTestimonial, Paginated, Testimonial,
    TestimonialChanges,
};
use crate::schema::testimonials;

fn filtered(q: &ListQuery, only_active: bool) -> testimonials::BoxedQuery<'static, Pg> {
    let mut query = testimonials::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(testimonials::author_name.ilike(pattern));
    }
    if only_active {
        query = query.filter(testimonials::is_active.eq(true));
    }
    query
}

pub struct TestimonialService;

impl TestimonialService {
    pub async fn list(
        q: ListQuery,
        only_active: bool,
        pool: &DbPool,
    ) -> Result<Paginated<Testimonial>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q, only_active).count().get_result::<i64>(conn)?;
            let items = filtered(&q, only_active)
                .order(testimonials::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<Testimonial>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(
        req: CreateTestimonialRequest,
        pool: &DbPool,
    ) -> Result<Testimonial, ApiError> {
        let row = NewTestimonial {
            author_name: req.author_name,
            author_title: req.author_title,
            quote: req.quote,
            is_active: req.is_active.unwrap_or(true),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(testimonials::table)
                .values(&row)
                .get_result::<Testimonial>(conn)
        })
        .await?;

        info!("Created testimonial {} ({})", created.id, created.author_name);
        Ok(created)
    }

    pub async fn update(
        testimonial_id: i32,
        mut changes: TestimonialChanges,
        pool: &DbPool,
    ) -> Result<Testimonial, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(testimonials::table.find(testimonial_id))
                .set(&changes)
                .get_result::<Testimonial>(conn)
        })
        .await
    }

    pub async fn delete(testimonial_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(testimonials::table.find(testimonial_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Testimonial not found".to_string()));
        }
        info!("Deleted testimonial {}", testimonial_id);
        Ok(())
    }
}
