use diesel::prelude::*;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::AdminNotification;
use crate::schema::admin_notifications;

pub struct NotificationService;

impl NotificationService {
    /// Notifications visible to an admin: ones targeted at them plus
    /// broadcast rows (no target).
    pub async fn list(
        user_id: i32,
        unread_only: bool,
        pool: &DbPool,
    ) -> Result<Vec<AdminNotification>, ApiError> {
        db::blocking(pool, move |conn| {
            let mut query = admin_notifications::table
                .filter(
                    admin_notifications::target_user_id
                        .is_null()
                        .or(admin_notifications::target_user_id.eq(user_id)),
                )
                .into_boxed();
            if unread_only {
                query = query.filter(admin_notifications::is_read.eq(false));
            }
            query
                .order(admin_notifications::created_at.desc())
                .limit(100)
                .load::<AdminNotification>(conn)
        })
        .await
    }

    pub async fn mark_read(
        notification_id: i32,
        user_id: i32,
        pool: &DbPool,
    ) -> Result<AdminNotification, ApiError> {
        db::blocking(pool, move |conn| {
            diesel::update(
                admin_notifications::table
                    .find(notification_id)
                    .filter(
                        admin_notifications::target_user_id
                            .is_null()
                            .or(admin_notifications::target_user_id.eq(user_id)),
                    ),
            )
            .set(admin_notifications::is_read.eq(true))
            .get_result::<AdminNotification>(conn)
        })
        .await
    }
}
