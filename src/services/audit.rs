use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{AuditLog, AuditQuery, Paginated};
use crate::schema::audit_logs;

fn filtered(q: &AuditQuery) -> audit_logs::BoxedQuery<'static, Pg> {
    let mut query = audit_logs::table.into_boxed();
    if let Some(entity_type) = &q.entity_type {
        query = query.filter(audit_logs::entity_type.eq(entity_type.clone()));
    }
    query
}

pub struct AuditService;

impl AuditService {
    pub async fn list(q: AuditQuery, pool: &DbPool) -> Result<Paginated<AuditLog>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q).count().get_result::<i64>(conn)?;
            let items = filtered(&q)
                .order(audit_logs::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<AuditLog>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }
}
