use diesel::prelude::*;
use log::error;
use serde_json::json;

use crate::auth::AuthedUser;
use crate::db::{self, DbPool};
use crate::models::{AuditAction, NewAuditLog, NewNotification};
use crate::ws::Broadcaster;

/// Records the side effects of every admin mutation: an audit row, an admin
/// notification row, and a WebSocket broadcast on the resource channel.
/// All three are best-effort; a failure is logged and never surfaces to the
/// request that triggered it.
#[derive(Clone)]
pub struct EventRecorder {
    pool: DbPool,
    hub: Broadcaster,
}

impl EventRecorder {
    pub fn new(pool: DbPool, hub: Broadcaster) -> Self {
        Self { pool, hub }
    }

    pub async fn record(
        &self,
        actor: &AuthedUser,
        action: AuditAction,
        entity_type: &str,
        entity_id: i32,
    ) {
        let audit = NewAuditLog {
            user_id: actor.id,
            action: action.as_str().to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            detail: json!({ "actor": actor.username }),
        };

        let result = db::blocking(&self.pool, move |conn| {
            use crate::schema::audit_logs::dsl::*;
            diesel::insert_into(audit_logs).values(&audit).execute(conn)
        })
        .await;
        if let Err(e) = result {
            error!("Failed to write audit log: {}", e);
        }

        let notification = NewNotification {
            target_user_id: None, // broadcast to all admins
            title: format!("{} {}d", entity_type, action.as_str()),
            body: format!(
                "{} {}d {} #{}",
                actor.username,
                action.as_str(),
                entity_type,
                entity_id
            ),
            entity_type: entity_type.to_string(),
        };

        let result = db::blocking(&self.pool, move |conn| {
            use crate::schema::admin_notifications::dsl::*;
            diesel::insert_into(admin_notifications)
                .values(&notification)
                .execute(conn)
        })
        .await;
        if let Err(e) = result {
            error!("Failed to write admin notification: {}", e);
        }

        self.hub.broadcast(
            entity_type,
            json!({ "action": action.as_str(), "id": entity_id }),
        );
    }
}
