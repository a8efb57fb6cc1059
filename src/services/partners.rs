use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    CreatePartnerRequest, ListQuery, NewPartnerInstitution, Paginated, PartnerChanges,
    PartnerInstitution,
};
use crate::schema::partner_institutions;

fn filtered(q: &ListQuery, only_active: bool) -> partner_institutions::BoxedQuery<'static, Pg> {
    let mut query = partner_institutions::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(partner_institutions::name.ilike(pattern));
    }
    if only_active {
        query = query.filter(partner_institutions::is_active.eq(true));
    }
    query
}

pub struct PartnerService;

impl PartnerService {
    pub async fn list(
        q: ListQuery,
        only_active: bool,
        pool: &DbPool,
    ) -> Result<Paginated<PartnerInstitution>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q, only_active).count().get_result::<i64>(conn)?;
            let items = filtered(&q, only_active)
                .order(partner_institutions::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<PartnerInstitution>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(
        req: CreatePartnerRequest,
        pool: &DbPool,
    ) -> Result<PartnerInstitution, ApiError> {
        let row = NewPartnerInstitution {
            name: req.name,
            country: req.country,
            website: req.website,
            contact_email: req.contact_email,
            is_active: req.is_active.unwrap_or(true),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(partner_institutions::table)
                .values(&row)
                .get_result::<PartnerInstitution>(conn)
        })
        .await?;

        info!("Created partner institution {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(
        partner_id: i32,
        mut changes: PartnerChanges,
        pool: &DbPool,
    ) -> Result<PartnerInstitution, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(partner_institutions::table.find(partner_id))
                .set(&changes)
                .get_result::<PartnerInstitution>(conn)
        })
        .await
    }

    pub async fn delete(partner_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(partner_institutions::table.find(partner_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Partner institution not found".to_string()));
        }
        info!("Deleted partner institution {}", partner_id);
        Ok(())
    }
}
