//! Typing-indicator strategy.
//!
//! No class patching here: the persisted `typing` flag selects between a
//! suppressing wrapper and a pass-through at the call site. Telegram chat
//! actions are fire-and-forget (they expire on their own), so the
//! enter/exit pair of richer platforms collapses to the single start call,
//! with suppression applied there.

use crate::{
    domain::ChatId,
    messaging::{port::MessagingPort, types::ChatAction},
    Result,
};

/// Behavior of the typing-indicator feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypingMode {
    /// Platform errors propagate to the caller.
    #[default]
    Passthrough,
    /// Network failures are swallowed and logged at debug level.
    Suppress,
}

impl TypingMode {
    pub fn from_flag(suppress: bool) -> Self {
        if suppress {
            TypingMode::Suppress
        } else {
            TypingMode::Passthrough
        }
    }
}

/// Start the typing indicator for a chat under the given mode.
pub async fn start_typing(
    messenger: &dyn MessagingPort,
    chat_id: ChatId,
    mode: TypingMode,
) -> Result<()> {
    if !messenger.capabilities().supports_chat_actions {
        return Ok(());
    }
    match messenger.send_chat_action(chat_id, ChatAction::Typing).await {
        Ok(()) => Ok(()),
        Err(error) if mode == TypingMode::Suppress => {
            tracing::debug!(error = %error, "ignoring error while starting typing indicator");
            Ok(())
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::testing::RecordingMessenger;

    #[tokio::test]
    async fn suppress_swallows_network_failures() {
        let messenger = RecordingMessenger::new().failing_chat_actions();
        let outcome = start_typing(&messenger, ChatId(1), TypingMode::Suppress).await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn passthrough_propagates_failures() {
        let messenger = RecordingMessenger::new().failing_chat_actions();
        let outcome = start_typing(&messenger, ChatId(1), TypingMode::Passthrough).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn both_modes_send_the_action_when_healthy() {
        let messenger = RecordingMessenger::new();
        start_typing(&messenger, ChatId(1), TypingMode::Suppress)
            .await
            .unwrap();
        start_typing(&messenger, ChatId(1), TypingMode::Passthrough)
            .await
            .unwrap();
        assert_eq!(messenger.chat_actions().await, 2);
    }
}
