//! Telegram update handlers.
//!
//! Every command in this plugin is owner-only; updates from anyone else are
//! dropped without a reply, matching the single cog-level permission check.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use botutils_core::{auth::is_owner, domain::UserId};

use crate::router::AppState;

mod commands;

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| UserId(u.id.0 as i64));
    if !is_owner(user_id, &state.cfg.bot_owners) {
        return Ok(());
    }

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(bot, msg, state).await;
        }
    }
    Ok(())
}
