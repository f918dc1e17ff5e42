//! Dual-system chat dispatch and the two-phase message lifecycle.

use std::sync::Arc;

use astro_core::AstrologySystem;
use astrologer::Astrologer;
use database::models::{ChatMessage, Profile};
use database::{account, chat, profile, settings, Database};
use serde::Serialize;
use tracing::{info, warn};

use crate::context::{self, HISTORY_WINDOW};
use crate::error::{Result, ServiceError};
use crate::validation;

/// The USER/BOT pair produced by one send.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePair {
    pub user_message: ChatMessage,
    pub bot_message: ChatMessage,
}

/// One page of conversation history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub messages: Vec<ChatMessage>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Chat operations, scoped to the calling account.
///
/// Holds one astrologer per system; the account's stored preference picks
/// which one answers.
#[derive(Clone)]
pub struct ChatService {
    db: Database,
    vedic: Arc<Astrologer>,
    western: Arc<Astrologer>,
}

impl ChatService {
    pub fn new(db: Database, vedic: Arc<Astrologer>, western: Arc<Astrologer>) -> Self {
        Self { db, vedic, western }
    }

    fn astrologer_for(&self, system: AstrologySystem) -> &Astrologer {
        match system {
            AstrologySystem::Vedic => self.vedic.as_ref(),
            AstrologySystem::Western => self.western.as_ref(),
        }
    }

    /// Send a message and get the generated reply.
    ///
    /// The USER message is durable before generation starts; generation
    /// cannot fail the call. A crash between the two inserts leaves an
    /// unpaired USER message, which history tolerates.
    pub async fn send_message(
        &self,
        user_id: &str,
        email: Option<&str>,
        profile_id: Option<i64>,
        content: &str,
    ) -> Result<MessagePair> {
        let content = validation::validate_message(content)?;

        let acct = account::get_or_create_account(self.db.pool(), user_id, email).await?;

        // Directed chat verifies ownership; undirected chat carries no
        // profile facts and stays in the null bucket.
        let selected = match profile_id {
            Some(id) => Some(self.owned_profile(acct.account_id, id).await?),
            None => None,
        };

        let system = self.preferred_system(acct.account_id).await?;

        let user_message = chat::insert_message(
            self.db.pool(),
            acct.account_id,
            profile_id,
            "USER",
            &content,
            system.as_str(),
        )
        .await?;

        let reply = self
            .generate_reply(
                acct.account_id,
                profile_id,
                selected.as_ref(),
                system,
                user_message.message_id,
                &content,
            )
            .await;

        let bot_message = chat::insert_message(
            self.db.pool(),
            acct.account_id,
            profile_id,
            "BOT",
            &reply,
            system.as_str(),
        )
        .await?;

        info!(
            account_id = acct.account_id,
            system = %system,
            user_message_id = user_message.message_id,
            bot_message_id = bot_message.message_id,
            "message pair created"
        );
        Ok(MessagePair {
            user_message,
            bot_message,
        })
    }

    /// Assemble the prompt context and generate the reply.
    ///
    /// The USER message is already stored by the time this runs, so failures
    /// here degrade to the apology text instead of surfacing. The stored
    /// question is excluded from the history window; it travels in the
    /// context as the question itself.
    async fn generate_reply(
        &self,
        account_id: i64,
        profile_id: Option<i64>,
        selected: Option<&Profile>,
        system: AstrologySystem,
        question_id: i64,
        question: &str,
    ) -> String {
        let history =
            chat::recent_messages(self.db.pool(), account_id, profile_id, HISTORY_WINDOW).await;
        match history {
            Ok(mut history) => {
                history.retain(|m| m.message_id != question_id);
                let ctx = context::build_context(system, selected, &history, question);
                self.astrologer_for(system).respond(&ctx).await
            }
            Err(err) => {
                warn!(account_id, error = %err, "context assembly failed, sending apology");
                astrologer::apology(system)
            }
        }
    }

    /// Paged conversation history for the (account, profile) bucket.
    ///
    /// Out-of-range paging values are normalized, not rejected.
    pub async fn get_history(
        &self,
        user_id: &str,
        profile_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<HistoryPage> {
        let (limit, offset) = validation::clamp_page(limit, offset);
        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        if let Some(id) = profile_id {
            self.owned_profile(acct.account_id, id).await?;
        }

        let messages =
            chat::list_history(self.db.pool(), acct.account_id, profile_id, limit, offset)
                .await?;
        let total = chat::count_history(self.db.pool(), acct.account_id, profile_id).await?;
        Ok(HistoryPage {
            messages,
            total,
            limit,
            offset,
        })
    }

    /// Get one of the caller's messages.
    pub async fn get_message(&self, user_id: &str, message_id: i64) -> Result<ChatMessage> {
        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        self.owned_message(acct.account_id, message_id).await
    }

    /// Edit a message's content. Only non-deleted USER messages are mutable.
    pub async fn update_message(
        &self,
        user_id: &str,
        message_id: i64,
        content: &str,
    ) -> Result<ChatMessage> {
        let content = validation::validate_message(content)?;

        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        let message = self.owned_message(acct.account_id, message_id).await?;
        if message.sender_type != "USER" {
            return Err(ServiceError::validation("only user messages can be edited"));
        }

        Ok(chat::update_content(self.db.pool(), message_id, &content).await?)
    }

    /// Soft-delete a message. Deleting an already-deleted message fails.
    pub async fn delete_message(&self, user_id: &str, message_id: i64) -> Result<()> {
        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        self.owned_message(acct.account_id, message_id).await?;
        chat::soft_delete_message(self.db.pool(), message_id).await?;
        Ok(())
    }

    /// Fetch a message the account owns; deleted or foreign rows read as
    /// not found.
    async fn owned_message(&self, account_id: i64, message_id: i64) -> Result<ChatMessage> {
        let message = chat::get_message(self.db.pool(), message_id).await?;
        if message.account_id != account_id || message.is_deleted {
            return Err(ServiceError::not_found(format!(
                "message {message_id} not found"
            )));
        }
        Ok(message)
    }

    async fn owned_profile(&self, account_id: i64, profile_id: i64) -> Result<Profile> {
        if !profile::has_membership(self.db.pool(), account_id, profile_id).await? {
            return Err(ServiceError::not_found(format!(
                "profile {profile_id} not found"
            )));
        }
        let row = profile::get_profile(self.db.pool(), profile_id).await?;
        if row.is_deleted {
            return Err(ServiceError::not_found(format!(
                "profile {profile_id} not found"
            )));
        }
        Ok(row)
    }

    /// The account's stored system preference. Unparseable values fall back
    /// to the default rather than failing the chat.
    async fn preferred_system(&self, account_id: i64) -> Result<AstrologySystem> {
        let stored = settings::get_settings(self.db.pool(), account_id)
            .await?
            .astrology_system;
        Ok(AstrologySystem::parse(&stored).unwrap_or_else(|| {
            warn!(account_id, stored = %stored, "unrecognized system preference, using default");
            AstrologySystem::default()
        }))
    }
}
