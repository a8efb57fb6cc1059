use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use log::info;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{
    CreateTeamMemberRequest, ListQuery, NewTeamMember, Paginated, TeamMember, TeamMemberChanges,
};
use crate::schema::team_members;

fn filtered(q: &ListQuery, only_active: bool) -> team_members::BoxedQuery<'static, Pg> {
    let mut query = team_members::table.into_boxed();
    if let Some(pattern) = q.search_pattern() {
        query = query.filter(team_members::name.ilike(pattern));
    }
    if only_active {
        query = query.filter(team_members::is_active.eq(true));
    }
    query
}

pub struct TeamService;

impl TeamService {
    pub async fn list(
        q: ListQuery,
        only_active: bool,
        pool: &DbPool,
    ) -> Result<Paginated<TeamMember>, ApiError> {
        let limit = q.limit();
        let offset = q.offset();

        db::blocking(pool, move |conn| {
            let total = filtered(&q, only_active).count().get_result::<i64>(conn)?;
            let items = filtered(&q, only_active)
                .order(team_members::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<TeamMember>(conn)?;
            Ok(Paginated { items, total })
        })
        .await
    }

    pub async fn create(req: CreateTeamMemberRequest, pool: &DbPool) -> Result<TeamMember, ApiError> {
        let row = NewTeamMember {
            name: req.name,
            title: req.title,
            bio: req.bio,
            photo_url: req.photo_url,
            email: req.email,
            is_active: req.is_active.unwrap_or(true),
        };

        let created = db::blocking(pool, move |conn| {
            diesel::insert_into(team_members::table)
                .values(&row)
                .get_result::<TeamMember>(conn)
        })
        .await?;

        info!("Created team member {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(
        member_id: i32,
        mut changes: TeamMemberChanges,
        pool: &DbPool,
    ) -> Result<TeamMember, ApiError> {
        changes.updated_at = Some(Utc::now().naive_utc());

        db::blocking(pool, move |conn| {
            diesel::update(team_members::table.find(member_id))
                .set(&changes)
                .get_result::<TeamMember>(conn)
        })
        .await
    }

    pub async fn delete(member_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let deleted = db::blocking(pool, move |conn| {
            diesel::delete(team_members::table.find(member_id)).execute(conn)
        })
        .await?;

        if deleted == 0 {
            return Err(ApiError::NotFound("Team member not found".to_string()));
        }
        info!("Deleted team member {}", member_id);
        Ok(())
    }
}
