use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use botutils_core::{
    domain::ChatId,
    formatting::settings_display,
    logging::level::ForwardLevel,
    typing::start_typing,
    Error, Result,
};

use crate::router::AppState;

const HELP_TEXT: &str = "\
/botutils - show current settings
/botutils logging - toggle forwarding of log events to the log channel
/botutils logginglevel <level> - level to forward (debug, info, warn, error, critical, none)
/botutils patchtyping - toggle suppression of typing-indicator failures
/botutils logchannel <id> - set the destination chat (0 clears it)";

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let (cmd, args) = parse_command(text);
    if cmd != "botutils" {
        return Ok(());
    }

    let chat_id = ChatId(msg.chat.id.0);
    let mut parts = args.splitn(2, char::is_whitespace);
    let sub = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let outcome = run_subcommand(&state, chat_id, &sub, &rest).await;
    if let Err(error) = outcome {
        tracing::error!(error = %error, command = %sub, "command failed");
    }
    Ok(())
}

async fn run_subcommand(state: &AppState, chat_id: ChatId, sub: &str, rest: &str) -> Result<()> {
    let messenger = state.plugin.messenger();
    start_typing(messenger.as_ref(), chat_id, state.plugin.typing_mode()).await?;

    match sub {
        "" => show_settings(state, chat_id).await,
        "logging" => toggle_logging(state, chat_id).await,
        "logginglevel" => set_logging_level(state, chat_id, rest).await,
        "patchtyping" => toggle_typing(state, chat_id).await,
        "logchannel" => set_log_channel(state, chat_id, rest).await,
        _ => {
            messenger.send_text(chat_id, HELP_TEXT).await?;
            Ok(())
        }
    }
}

async fn show_settings(state: &AppState, chat_id: ChatId) -> Result<()> {
    let messenger = state.plugin.messenger();
    let settings = state.plugin.settings_snapshot().await;

    if messenger.capabilities().supports_html {
        messenger
            .send_html(chat_id, &settings_display(&settings, true))
            .await?;
    } else {
        messenger
            .send_text(chat_id, &settings_display(&settings, false))
            .await?;
    }
    messenger.send_text(chat_id, HELP_TEXT).await?;
    Ok(())
}

async fn toggle_logging(state: &AppState, chat_id: ChatId) -> Result<()> {
    let enabled = state.plugin.toggle_logging().await?;
    let word = if enabled { "enabled" } else { "disabled" };
    state
        .plugin
        .messenger()
        .send_text(chat_id, &format!("Logging forwarding is now {word}"))
        .await?;
    Ok(())
}

async fn set_logging_level(state: &AppState, chat_id: ChatId, rest: &str) -> Result<()> {
    let messenger = state.plugin.messenger();

    let level = match rest.parse::<ForwardLevel>() {
        Ok(level) => level,
        Err(Error::BadArgument(_)) => {
            messenger
                .send_text(
                    chat_id,
                    "Usage: /botutils logginglevel <debug|info|warn|error|critical|none>",
                )
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    state.plugin.set_logging_level(level).await?;
    messenger
        .send_text(
            chat_id,
            &format!("Logging level is now set to {}", level.name()),
        )
        .await?;
    Ok(())
}

async fn toggle_typing(state: &AppState, chat_id: ChatId) -> Result<()> {
    let enabled = state.plugin.toggle_typing_patch().await?;
    let word = if enabled { "enabled" } else { "disabled" };
    state
        .plugin
        .messenger()
        .send_text(chat_id, &format!("The typing patch is now {word}"))
        .await?;
    Ok(())
}

async fn set_log_channel(state: &AppState, chat_id: ChatId, rest: &str) -> Result<()> {
    let messenger = state.plugin.messenger();

    let Ok(target) = rest.parse::<i64>() else {
        messenger
            .send_text(chat_id, "Usage: /botutils logchannel <chat id, 0 to clear>")
            .await?;
        return Ok(());
    };

    let resolved = state.plugin.set_log_channel(target).await?;
    let reply = if target == 0 {
        "Log channel cleared".to_string()
    } else if resolved {
        format!("Log channel is now {target}")
    } else {
        format!("Log channel saved as {target}, but it could not be resolved; forwarding stays off until it can be")
    };
    messenger.send_text(chat_id, &reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bot_mention_and_lowercases() {
        assert_eq!(
            parse_command("/BotUtils@my_bot logging"),
            ("botutils".to_string(), "logging".to_string())
        );
    }

    #[test]
    fn splits_args_from_command() {
        let (cmd, args) = parse_command("/botutils logginglevel DEBUG");
        assert_eq!(cmd, "botutils");
        assert_eq!(args, "logginglevel DEBUG");
    }

    #[test]
    fn bare_command_has_empty_args() {
        assert_eq!(
            parse_command("/botutils"),
            ("botutils".to_string(), String::new())
        );
    }
}
