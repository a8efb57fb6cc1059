use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    BlogPost, BlogPostChanges, ContentStatus, CreateBlogPostRequest, ListQuery, NewBlogPost,
    Paginated,
};
use crate::schema::blog_posts;

fn filtered(q: &ListQuery) -> blog_posts::BoxedQuery<'static, Pg> {
    let mut query = blog_posts::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(blog_posts::title.ilike(pattern));
    }
    if let Some(status) = &q.status {
        query = query.filter(blog_posts::status.eq(status.clone()));
    }
    query
}

pub struct BlogService;

impl BlogService {
    pub async fn list(q: ListQuery, pool: &DbPool) -> Result<Paginated<BlogPost>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(blog_posts::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<BlogPost>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(
        req: CreateBlogPostRequest,
        actor_id: i32,
        pool: &DbPool,
    ) -> Result<BlogPost, ApiError> {
        let row = NewBlogPost {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            category: req.category,
            status: req
                .status
                .unwrap_or_else(|| ContentStatus::Draft.as_str().to_string()),
            created_by: actor_id,
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(blog_posts::table)
                .values(&row)
                .get_result::<BlogPost>(conn)
        })
        .await?;

        info!("Created blog post {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(
        post_id: i32,
        mut changes: BlogPostChanges,
        pool: &DbPool,
    ) -> Result<BlogPost, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(blog_posts::table.find(post_id))
                .set(&changes)
                .get_result::<BlogPost>(conn)
        })
        .await
    }

    pub async fn delete(post_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(blog_posts::table.find(post_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Blog post not found".to_string()));
        }
        info!("Deleted blog post {}", post_id);
        Ok(())
    }
}
