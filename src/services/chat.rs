use chrono::Utc;
use diesel::prelude::*;
use log::{info, warn};
use serde_json::json;

use crate::ai::{moderation_flag, AiClient};
use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{AiChatConversation, ChatMessage, ChatRequest, ChatResponse, NewConversation};
use crate::schema::ai_chat_conversations;

pub struct ChatService;

impl ChatService {
    pub async fn converse(
        user_id: i32,
        req: ChatRequest,
        ai: &AiClient,
        pool: &DbPool,
    ) -> Result<ChatResponse, ApiError> {
        let conversation = match req.conversation_id {
            Some(conversation_id) => {
                let conversation = db::blocking(pool, move |conn| {
                    ai_chat_conversations::table
                        .find(conversation_id)
                        .first::<AiChatConversation>(conn)
                })
                .await?;
                // Conversations are private; a foreign id looks like a missing one
                if conversation.user_id != user_id {
                    return Err(ApiError::NotFound("Conversation not found".to_string()));
                }
                conversation
            }
            None => {
                let row = NewConversation {
                    user_id,
                    messages: json!([]),
                    moderation_flags: json!([]),
                };
                db::blocking(pool, move |conn| {
                    diesel::insert_into(ai_chat_conversations::table)
                        .values(&row)
                        .get_result::<AiChatConversation>(conn)
                })
                .await?
            }
        };

        let now = Utc::now().naive_utc();

        // Flagged prompts never reach the provider
        if let Some(term) = moderation_flag(&req.message) {
            warn!(
                "Moderation flag '{}' on conversation {} (user {})",
                term, conversation.id, user_id
            );
            let mut flags: Vec<String> =
                serde_json::from_value(conversation.moderation_flags.clone()).unwrap_or_default();
            flags.push(term.to_string());

            let conversation_id = conversation.id;
            let flags_value = json!(flags);
            db::blocking(pool, move |conn| {
                diesel::update(ai_chat_conversations::table.find(conversation_id))
                    .set((
                        ai_chat_conversations::moderation_flags.eq(flags_value),
                        ai_chat_conversations::updated_at.eq(now),
                    ))
                    .execute(conn)
            })
            .await?;

            return Err(ApiError::Validation(
                "message was refused by content moderation".to_string(),
            ));
        }

        let mut messages: Vec<ChatMessage> =
            serde_json::from_value(conversation.messages.clone()).unwrap_or_default();
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: req.message,
            timestamp: now,
        });

        let reply_content = ai.complete(&messages).await?;
        let reply = ChatMessage {
            role: "assistant".to_string(),
            content: reply_content,
            timestamp: Utc::now().naive_utc(),
        };
        messages.push(reply.clone());

        let conversation_id = conversation.id;
        let messages_value = serde_json::to_value(&messages)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize messages: {}", e)))?;
        db::blocking(pool, move |conn| {
            diesel::update(ai_chat_conversations::table.find(conversation_id))
                .set((
                    ai_chat_conversations::messages.eq(messages_value),
                    ai_chat_conversations::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
        })
        .await?;

        info!(
            "Conversation {} advanced to {} messages",
            conversation.id,
            messages.len()
        );
        Ok(ChatResponse {
            conversation_id: conversation.id,
            reply,
        })
    }

    pub async fn list(user_id: i32, pool: &DbPool) -> Result<Vec<AiChatConversation>, ApiError> {
        db::blocking(pool, move |conn| {
            ai_chat_conversations::table
                .filter(ai_chat_conversations::user_id.eq(user_id))
                .filter(ai_chat_conversations::is_active.eq(true))
                .order(ai_chat_conversations::updated_at.desc())
                .load::<AiChatConversation>(conn)
        })
        .await
    }
}
